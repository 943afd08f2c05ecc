//! The catalog reader.

use std::collections::BTreeMap;
use std::time::Instant;

use common::ProductId;
use futures_util::future::join_all;
use store::{Product, ProductQuery, Review, Store, StoreExt};

use crate::error::{CatalogError, Result};
use crate::listing::{
    CatalogProduct, CategoryListing, CategorySummary, ProductDetail, category_name, category_slug,
};
use crate::query::{CatalogQuery, SortKey};
use crate::rating::{RatingSummary, average_rating, round_to_tenth};

/// How many related products a product page shows.
pub const RELATED_LIMIT: usize = 4;

/// Read-only access to the product catalog.
///
/// Every call re-runs its store reads; nothing is cached.
pub struct CatalogReader<S: Store> {
    store: S,
}

impl<S: Store> CatalogReader<S> {
    /// Creates a new reader over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists products matching a query in the requested order.
    ///
    /// Category and the active flag are evaluated by the store; search text
    /// and the price range are applied here. With `with_ratings` set, each
    /// product's reviews are read concurrently and its displayed rating is
    /// recomputed before sorting.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &CatalogQuery) -> Result<Vec<CatalogProduct>> {
        let start = Instant::now();

        let products: Vec<Product> = self
            .store
            .query_products(&query.store_query())
            .await?
            .into_iter()
            .filter(|p| query.matches(p))
            .collect();

        let mut items = if query.with_ratings {
            self.enrich(products).await
        } else {
            products.into_iter().map(CatalogProduct::new).collect()
        };
        query.sort.sort(&mut items, |item| &item.product);

        metrics::histogram!("catalog_listing_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        tracing::debug!(count = items.len(), "catalog listed");
        Ok(items)
    }

    /// Loads the product page: the product with its rating summary and
    /// related products.
    ///
    /// Inactive products are reported as not found.
    #[tracing::instrument(skip(self))]
    pub async fn product_detail(&self, id: ProductId) -> Result<ProductDetail> {
        let mut product = self
            .store
            .get_product(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(CatalogError::ProductNotFound(id))?;

        let ratings = self.store.review_ratings(id).await?;
        let summary = RatingSummary::from_ratings(&ratings, product.rating);
        product.rating = summary.average;
        product.review_count = summary.count as i32;

        let related = self
            .store
            .query_products(
                &ProductQuery::active()
                    .category(product.category.clone())
                    .exclude(id)
                    .limit(RELATED_LIMIT),
            )
            .await?
            .into_iter()
            .map(CatalogProduct::new)
            .collect();

        Ok(ProductDetail {
            product: CatalogProduct::new(product),
            ratings: summary,
            related,
        })
    }

    /// Returns the categories of active products with their product counts,
    /// sorted by name.
    pub async fn categories(&self) -> Result<Vec<CategorySummary>> {
        let products = self.store.query_products(&ProductQuery::active()).await?;

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for product in products {
            *counts.entry(product.category).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(name, count)| CategorySummary {
                slug: category_slug(&name),
                name,
                count,
            })
            .collect())
    }

    /// Lists the active products of the category named by a URL slug.
    ///
    /// The slug is matched against the categories of active products, so
    /// every slug returned by [`categories`](Self::categories) resolves. A
    /// slug that matches none is reported as not found.
    #[tracing::instrument(skip(self))]
    pub async fn category_listing(&self, slug: &str, sort: SortKey) -> Result<CategoryListing> {
        let slug = slug.to_lowercase();
        let category = self
            .categories()
            .await?
            .into_iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| CatalogError::CategoryNotFound(category_name(&slug)))?;

        let products = self
            .list(&CatalogQuery::new().category(category.name.clone()).sort(sort))
            .await?;

        Ok(CategoryListing {
            name: category.name,
            slug: category.slug,
            products,
        })
    }

    /// Returns a product's reviews, newest first.
    pub async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>> {
        Ok(self.store.reviews_for_product(product_id).await?)
    }

    /// Recomputes displayed ratings from reviews, one concurrent read per
    /// product. A failed read leaves that product's stored values in place.
    async fn enrich(&self, products: Vec<Product>) -> Vec<CatalogProduct> {
        let reads = products.iter().map(|p| self.store.review_ratings(p.id));
        let results = join_all(reads).await;

        products
            .into_iter()
            .zip(results)
            .map(|(mut product, ratings)| {
                match ratings {
                    Ok(ratings) => {
                        product.rating = average_rating(&ratings)
                            .unwrap_or_else(|| round_to_tenth(product.rating));
                        product.review_count = ratings.len() as i32;
                    }
                    Err(e) => {
                        metrics::counter!("catalog_enrichment_failures_total").increment(1);
                        tracing::warn!(
                            product_id = %product.id,
                            error = %e,
                            "failed to read reviews, keeping stored rating"
                        );
                    }
                }
                CatalogProduct::new(product)
            })
            .collect()
    }
}
