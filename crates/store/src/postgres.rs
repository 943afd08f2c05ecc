use async_trait::async_trait;
use common::{Money, OrderId, OrderStatus, ProductId, ReviewId};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

use crate::{
    NewOrder, NewProduct, NewReview, Order, Product, ProductPatch, ProductQuery, Result, Review,
    Specifications, StoreError, store::Store,
};

const PRODUCT_COLUMNS: &str = "id, title, price, image_urls, category, description, \
     specifications, stock_quantity, is_active, rating, review_count, is_featured, created_at";

const ORDER_COLUMNS: &str = "id, customer_name, phone, city, address, product_id, \
     product_title, product_price, quantity, total_amount, status, created_at";

const REVIEW_COLUMNS: &str =
    "id, product_id, customer_name, rating, comment, verified_purchase, created_at";

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("storefront migrations applied");
        Ok(())
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        let specifications: serde_json::Value = row.try_get("specifications")?;
        let specifications: Specifications = if specifications.is_null() {
            Specifications::new()
        } else {
            serde_json::from_value(specifications)?
        };

        Ok(Product {
            id: ProductId::new(row.try_get("id")?),
            title: row.try_get("title")?,
            price: Money::from_rupees(row.try_get("price")?),
            image_urls: row.try_get("image_urls")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
            specifications,
            stock_quantity: row.try_get("stock_quantity")?,
            is_active: row.try_get("is_active")?,
            rating: row.try_get("rating")?,
            review_count: row.try_get("review_count")?,
            is_featured: row.try_get("is_featured")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status: String = row.try_get("status")?;
        let status = status.parse::<OrderStatus>().map_err(|e| StoreError::InvalidRow {
            collection: "orders",
            reason: e.to_string(),
        })?;
        let quantity: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|_| StoreError::InvalidRow {
            collection: "orders",
            reason: format!("negative quantity {quantity}"),
        })?;

        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            customer_name: row.try_get("customer_name")?,
            phone: row.try_get("phone")?,
            city: row.try_get("city")?,
            address: row.try_get("address")?,
            product_id: ProductId::new(row.try_get("product_id")?),
            product_title: row.try_get("product_title")?,
            product_price: Money::from_rupees(row.try_get("product_price")?),
            quantity,
            total_amount: Money::from_rupees(row.try_get("total_amount")?),
            status,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_review(row: PgRow) -> Result<Review> {
        let rating: i16 = row.try_get("rating")?;
        let rating = u8::try_from(rating).map_err(|_| StoreError::InvalidRow {
            collection: "reviews",
            reason: format!("rating {rating} out of range"),
        })?;

        Ok(Review {
            id: ReviewId::new(row.try_get("id")?),
            product_id: ProductId::new(row.try_get("product_id")?),
            customer_name: row.try_get("customer_name")?,
            rating,
            comment: row.try_get("comment")?,
            verified_purchase: row.try_get("verified_purchase")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn push_filters(builder: &mut QueryBuilder<'static, Postgres>, query: &ProductQuery) {
        builder.push(" WHERE TRUE");
        if let Some(ref category) = query.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(active) = query.is_active {
            builder.push(" AND is_active = ").push_bind(active);
        }
        if let Some(featured) = query.is_featured {
            builder.push(" AND is_featured = ").push_bind(featured);
        }
        if let Some(id) = query.exclude_id {
            builder.push(" AND id <> ").push_bind(id.as_i64());
        }
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product> {
        let specifications = serde_json::to_value(&product.specifications)?;
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (title, price, image_urls, category, description, specifications,
                                  stock_quantity, is_active, rating, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.title)
        .bind(product.price.rupees())
        .bind(&product.image_urls)
        .bind(&product.category)
        .bind(&product.description)
        .bind(specifications)
        .bind(product.stock_quantity)
        .bind(product.is_active)
        .bind(product.rating)
        .bind(product.is_featured)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_product(row)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn query_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let mut builder = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        Self::push_filters(&mut builder, query);

        if let Some((column, direction)) = query.order_by {
            let direction = match direction {
                crate::Direction::Ascending => "ASC",
                crate::Direction::Descending => "DESC",
            };
            builder.push(format!(
                " ORDER BY {} {direction}, id {direction}",
                column.as_sql()
            ));
        } else {
            builder.push(" ORDER BY id ASC");
        }
        if let Some(limit) = query.limit {
            builder
                .push(" LIMIT ")
                .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn count_products(&self, query: &ProductQuery) -> Result<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
        Self::push_filters(&mut builder, query);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let mut product = self.get_product(id).await?.ok_or(StoreError::NotFound {
            collection: "products",
            id: id.as_i64(),
        })?;
        patch.apply(&mut product);

        let specifications = serde_json::to_value(&product.specifications)?;
        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET title = $2, price = $3, image_urls = $4, category = $5, description = $6,
                specifications = $7, stock_quantity = $8, is_active = $9, rating = $10,
                is_featured = $11
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(&product.title)
        .bind(product.price.rupees())
        .bind(&product.image_urls)
        .bind(&product.category)
        .bind(&product.description)
        .bind(specifications)
        .bind(product.stock_quantity)
        .bind(product.is_active)
        .bind(product.rating)
        .bind(product.is_featured)
        .fetch_optional(&self.pool)
        .await?;

        // The row may have been deleted between the read and the write.
        row.map(Self::row_to_product)
            .transpose()?
            .ok_or(StoreError::NotFound {
                collection: "products",
                id: id.as_i64(),
            })
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: "products",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        let quantity = i32::try_from(order.quantity).map_err(|_| StoreError::InvalidRow {
            collection: "orders",
            reason: format!("quantity {} too large", order.quantity),
        })?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO orders (customer_name, phone, city, address, product_id, product_title,
                                product_price, quantity, total_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&order.customer_name)
        .bind(&order.phone)
        .bind(&order.city)
        .bind(&order.address)
        .bind(order.product_id.as_i64())
        .bind(&order.product_title)
        .bind(order.product_price.rupees())
        .bind(quantity)
        .bind(order.total_amount.rupees())
        .bind(order.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_order(row)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_order).transpose()
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<Order> {
        let row = sqlx::query(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order)
            .transpose()?
            .ok_or(StoreError::NotFound {
                collection: "orders",
                id: id.as_i64(),
            })
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO reviews (product_id, customer_name, rating, comment, verified_purchase)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review.product_id.as_i64())
        .bind(&review.customer_name)
        .bind(i16::from(review.rating))
        .bind(&review.comment)
        .bind(review.verified_purchase)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_review(row)
    }

    async fn reviews_for_product(&self, product_id: ProductId) -> Result<Vec<Review>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE product_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(product_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_review).collect()
    }
}
