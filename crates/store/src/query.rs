use std::cmp::Ordering;

use common::ProductId;

use crate::Product;

/// Column a product query can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
    CreatedAt,
    Price,
    Title,
    Rating,
}

impl ProductColumn {
    /// Returns the SQL column name.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ProductColumn::CreatedAt => "created_at",
            ProductColumn::Price => "price",
            ProductColumn::Title => "title",
            ProductColumn::Rating => "rating",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Builder for product queries.
///
/// Supports the filters the storefront pushes down to the backend: equality
/// on category and flags, exclusion of a single id, ordering and a limit.
/// Text search and price ranges are applied by the catalog reader.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Filter by exact category label.
    pub category: Option<String>,

    /// Filter by active flag.
    pub is_active: Option<bool>,

    /// Filter by featured flag.
    pub is_featured: Option<bool>,

    /// Exclude a single product.
    pub exclude_id: Option<ProductId>,

    /// Ordering column and direction.
    pub order_by: Option<(ProductColumn, Direction)>,

    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl ProductQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for active products, newest first.
    pub fn active() -> Self {
        Self::new()
            .is_active(true)
            .order_by(ProductColumn::CreatedAt, Direction::Descending)
    }

    /// Filters by category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filters by active flag.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Filters by featured flag.
    pub fn is_featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    /// Excludes a product id.
    pub fn exclude(mut self, id: ProductId) -> Self {
        self.exclude_id = Some(id);
        self
    }

    /// Orders the results.
    pub fn order_by(mut self, column: ProductColumn, direction: Direction) -> Self {
        self.order_by = Some((column, direction));
        self
    }

    /// Limits the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if a product passes every filter of this query.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category
            && &product.category != category
        {
            return false;
        }
        if let Some(active) = self.is_active
            && product.is_active != active
        {
            return false;
        }
        if let Some(featured) = self.is_featured
            && product.is_featured != featured
        {
            return false;
        }
        if let Some(id) = self.exclude_id
            && product.id == id
        {
            return false;
        }
        true
    }

    /// Compares two products by this query's ordering.
    ///
    /// Rows without an explicit ordering are kept in id order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let Some((column, direction)) = self.order_by else {
            return a.id.cmp(&b.id);
        };
        let ordering = match column {
            ProductColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            ProductColumn::Price => a.price.cmp(&b.price),
            ProductColumn::Title => a.title.cmp(&b.title),
            ProductColumn::Rating => a.rating.total_cmp(&b.rating),
        };
        let ordering = ordering.then(a.id.cmp(&b.id));
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use common::Money;

    use super::*;
    use crate::NewProduct;

    fn product(id: i64, category: &str, active: bool) -> Product {
        NewProduct::new(format!("Product {id}"), Money::from_rupees(id * 100), category)
            .active(active)
            .into_product(ProductId::new(id), Utc::now())
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = ProductQuery::new();
        assert!(query.matches(&product(1, "Audio", true)));
        assert!(query.matches(&product(2, "Watches", false)));
    }

    #[test]
    fn active_query_excludes_inactive() {
        let query = ProductQuery::active();
        assert!(query.matches(&product(1, "Audio", true)));
        assert!(!query.matches(&product(2, "Audio", false)));
    }

    #[test]
    fn category_and_exclusion_filters() {
        let query = ProductQuery::active()
            .category("Audio")
            .exclude(ProductId::new(1));
        assert!(!query.matches(&product(1, "Audio", true)));
        assert!(query.matches(&product(2, "Audio", true)));
        assert!(!query.matches(&product(3, "Watches", true)));
    }

    #[test]
    fn compare_respects_direction() {
        let cheap = product(1, "Audio", true);
        let pricey = product(5, "Audio", true);

        let asc = ProductQuery::new().order_by(ProductColumn::Price, Direction::Ascending);
        assert_eq!(asc.compare(&cheap, &pricey), Ordering::Less);

        let desc = ProductQuery::new().order_by(ProductColumn::Price, Direction::Descending);
        assert_eq!(desc.compare(&cheap, &pricey), Ordering::Greater);
    }

    #[test]
    fn column_sql_names() {
        assert_eq!(ProductColumn::CreatedAt.as_sql(), "created_at");
        assert_eq!(ProductColumn::Rating.as_sql(), "rating");
    }
}
