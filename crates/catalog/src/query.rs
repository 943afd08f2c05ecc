//! Listing parameters: filters and sort order.

use std::cmp::Ordering;
use std::str::FromStr;

use common::Money;
use serde::{Deserialize, Serialize};
use store::{Direction, Product, ProductColumn, ProductQuery};

use crate::error::UnknownSortKey;

/// How a listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Creation time, most recent first.
    #[default]
    Newest,
    /// Creation time, oldest first.
    Oldest,
    /// Price, cheapest first.
    PriceAsc,
    /// Price, most expensive first.
    PriceDesc,
    /// Displayed rating, best first.
    Rating,
    /// Title, alphabetical and case-insensitive.
    Name,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Rating => "rating",
            SortKey::Name => "name",
        }
    }

    /// Compares two products under this key.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::Oldest => a.created_at.cmp(&b.created_at),
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }

    /// Sorts in place. Ties keep their input order.
    pub fn sort<T>(&self, items: &mut [T], product: impl Fn(&T) -> &Product) {
        items.sort_by(|a, b| self.compare(product(a), product(b)));
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "price-asc" | "price-low" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            "name" => Ok(SortKey::Name),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Parameters of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Exact category label.
    pub category: Option<String>,
    pub only_active: bool,
    /// Case-insensitive substring of the title or the category.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    pub sort: SortKey,
    /// Recompute ratings from reviews.
    pub with_ratings: bool,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            category: None,
            only_active: true,
            search: None,
            min_price: None,
            max_price: None,
            sort: SortKey::Newest,
            with_ratings: true,
        }
    }
}

impl CatalogQuery {
    /// Active products, newest first, with ratings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.only_active = false;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_ratings(mut self, with_ratings: bool) -> Self {
        self.with_ratings = with_ratings;
        self
    }

    /// The part of the query the store evaluates.
    pub fn store_query(&self) -> ProductQuery {
        let mut query =
            ProductQuery::new().order_by(ProductColumn::CreatedAt, Direction::Descending);
        if let Some(ref category) = self.category {
            query = query.category(category.clone());
        }
        if self.only_active {
            query = query.is_active(true);
        }
        query
    }

    /// Applies the filters the store does not evaluate.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref text) = self.search {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty()
                && !product.title.to_lowercase().contains(&needle)
                && !product.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        true
    }
}
