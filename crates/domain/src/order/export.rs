//! CSV export of the order list.

use store::Order;

const HEADER: [&str; 11] = [
    "id",
    "created_at",
    "customer_name",
    "phone",
    "city",
    "address",
    "product_title",
    "product_price",
    "quantity",
    "total_amount",
    "status",
];

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = fields.into_iter().map(escape).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Renders orders as CSV with a header row. Amounts are whole rupees.
pub fn orders_to_csv(orders: &[Order]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER);

    for order in orders {
        let id = order.id.to_string();
        let created_at = order.created_at.to_rfc3339();
        let price = order.product_price.rupees().to_string();
        let quantity = order.quantity.to_string();
        let total = order.total_amount.rupees().to_string();
        push_row(
            &mut out,
            [
                id.as_str(),
                created_at.as_str(),
                order.customer_name.as_str(),
                order.phone.as_str(),
                order.city.as_str(),
                order.address.as_str(),
                order.product_title.as_str(),
                price.as_str(),
                quantity.as_str(),
                total.as_str(),
                order.status.as_str(),
            ],
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use common::{Money, OrderId, OrderStatus, ProductId};
    use store::NewOrder;

    use super::*;

    fn order(address: &str) -> Order {
        NewOrder {
            customer_name: "Ali Khan".to_string(),
            phone: "03001234567".to_string(),
            city: "Lahore".to_string(),
            address: address.to_string(),
            product_id: ProductId::new(1),
            product_title: "Watch \"Pro\"".to_string(),
            product_price: Money::from_rupees(3000),
            quantity: 2,
            total_amount: Money::from_rupees(6000),
            status: OrderStatus::OrderedOnMarketplace,
        }
        .into_order(
            OrderId::new(4),
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn empty_list_is_header_only() {
        let csv = orders_to_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("id,created_at,customer_name"));
    }

    #[test]
    fn fields_are_quoted_when_needed() {
        let csv = orders_to_csv(&[order("House 1, Street 2")]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "4,2025-01-02T03:04:05+00:00,Ali Khan,03001234567,Lahore,\"House 1, Street 2\",\"Watch \"\"Pro\"\"\",3000,2,6000,Ordered on Markaz"
        );
    }

    #[test]
    fn embedded_newlines_stay_in_one_field() {
        let csv = orders_to_csv(&[order("Line one\nLine two")]);
        assert!(csv.contains("\"Line one\nLine two\""));
    }
}
