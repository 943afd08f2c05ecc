use catalog::{CatalogQuery, CatalogReader, SortKey};
use criterion::{Criterion, criterion_group, criterion_main};
use store::{InMemoryStore, Money, NewProduct, NewReview, Store};

const CATEGORIES: [&str; 4] = ["Smart Watches", "Audio", "Accessories", "Home Decor"];

/// Populate a store with N products, each having 3 reviews.
async fn populate_store(store: &InMemoryStore, n: usize) {
    for i in 0..n {
        let product = store
            .insert_product(
                NewProduct::new(
                    format!("Product {i}"),
                    Money::from_rupees(500 + (i as i64 * 37) % 9000),
                    CATEGORIES[i % CATEGORIES.len()],
                )
                .with_stock((i % 25) as i32)
                .with_rating(3.5),
            )
            .await
            .unwrap();

        for rating in [5, 4, (i % 5) as u8 + 1] {
            store
                .insert_review(NewReview {
                    product_id: product.id,
                    customer_name: "Bench".to_string(),
                    rating,
                    comment: None,
                    verified_purchase: false,
                })
                .await
                .unwrap();
        }
    }
}

fn bench_listing_with_ratings(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    rt.block_on(populate_store(&store, 200));
    let reader = CatalogReader::new(store);

    c.bench_function("catalog/list_200_with_ratings", |b| {
        b.iter(|| {
            rt.block_on(async {
                reader
                    .list(&CatalogQuery::new().sort(SortKey::Rating))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_listing_filtered(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    rt.block_on(populate_store(&store, 1000));
    let reader = CatalogReader::new(store);

    let query = CatalogQuery::new()
        .category("Audio")
        .search("product 1")
        .price_range(Some(Money::from_rupees(1000)), Some(Money::from_rupees(6000)))
        .sort(SortKey::PriceAsc)
        .with_ratings(false);

    c.bench_function("catalog/list_1000_filtered_no_ratings", |b| {
        b.iter(|| {
            rt.block_on(async {
                reader.list(&query).await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_listing_with_ratings, bench_listing_filtered);
criterion_main!(benches);
