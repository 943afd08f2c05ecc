//! Text handed to the fulfilment side: the copyable address block and
//! prefilled WhatsApp links.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use store::{Order, Product};

/// Characters a URI component keeps unescaped, as browsers do.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes text for use as a single URI component.
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Formats the address block an admin pastes into the marketplace.
pub fn relay_text(order: &Order) -> String {
    format!(
        "Name: {}\nPhone: {}\nAddress: {}, {}",
        order.customer_name, order.phone, order.address, order.city
    )
}

/// Builds a `wa.me` link that opens a chat with `number` prefilled with `text`.
pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        number.trim_start_matches('+'),
        encode_uri_component(text)
    )
}

/// Builds the "order via WhatsApp" link shown on a product page.
pub fn product_whatsapp_link(number: &str, product: &Product) -> String {
    whatsapp_link(
        number,
        &format!("I want to order {} - {}", product.title, product.price),
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use common::{Money, OrderId, OrderStatus, ProductId};
    use store::{NewOrder, NewProduct};

    use super::*;

    fn order() -> Order {
        NewOrder {
            customer_name: "Ali Khan".to_string(),
            phone: "03001234567".to_string(),
            city: "Lahore".to_string(),
            address: "House 1, Street 2".to_string(),
            product_id: ProductId::new(1),
            product_title: "Smart Watch".to_string(),
            product_price: Money::from_rupees(3000),
            quantity: 1,
            total_amount: Money::from_rupees(3000),
            status: OrderStatus::Pending,
        }
        .into_order(OrderId::new(7), Utc::now())
    }

    #[test]
    fn relay_text_lists_contact_and_address() {
        assert_eq!(
            relay_text(&order()),
            "Name: Ali Khan\nPhone: 03001234567\nAddress: House 1, Street 2, Lahore"
        );
    }

    #[test]
    fn whatsapp_link_encodes_like_a_uri_component() {
        assert_eq!(
            whatsapp_link("923000000000", "Hi (there)! a&b=c"),
            "https://wa.me/923000000000?text=Hi%20(there)!%20a%26b%3Dc"
        );
        assert_eq!(
            whatsapp_link("+923000000000", "x"),
            "https://wa.me/923000000000?text=x"
        );
    }

    #[test]
    fn product_link_includes_title_and_price() {
        let product = NewProduct::new("Smart Watch", Money::from_rupees(3000), "Watches")
            .into_product(ProductId::new(1), Utc::now());
        assert_eq!(
            product_whatsapp_link("923000000000", &product),
            "https://wa.me/923000000000?text=I%20want%20to%20order%20Smart%20Watch%20-%20Rs%203%2C000"
        );
    }
}
