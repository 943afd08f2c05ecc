//! Object storage for product images.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Result, StoreError};

/// Trait for a public object store bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores an object under `path`, replacing any existing object.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Returns the public URL an uploaded object is served from.
    fn public_url(&self, path: &str) -> String;
}

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct Bucket {
    objects: HashMap<String, StoredObject>,
    max_object_bytes: Option<usize>,
}

/// In-memory object store for tests and local runs.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStore {
    public_base: String,
    bucket_name: String,
    bucket: Arc<RwLock<Bucket>>,
}

impl InMemoryObjectStore {
    /// Creates an empty bucket served from `{public_base}/{bucket}/{path}`.
    pub fn new(public_base: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into().trim_end_matches('/').to_string(),
            bucket_name: bucket.into(),
            bucket: Arc::new(RwLock::new(Bucket::default())),
        }
    }

    /// Rejects objects larger than `max_bytes`.
    pub async fn set_max_object_bytes(&self, max_bytes: usize) {
        self.bucket.write().await.max_object_bytes = Some(max_bytes);
    }

    /// Returns the number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.bucket.read().await.objects.len()
    }

    /// Returns a stored object.
    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.bucket.read().await.objects.get(path).cloned()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let mut bucket = self.bucket.write().await;
        if let Some(max) = bucket.max_object_bytes
            && bytes.len() > max
        {
            return Err(StoreError::Unavailable(format!(
                "object {path} is {} bytes, limit is {max}",
                bytes.len()
            )));
        }
        tracing::debug!(path, bytes = bytes.len(), content_type, "object stored");
        bucket.objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket_name, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_and_get() {
        let store = InMemoryObjectStore::new("https://cdn.example/storage/", "product-images");
        store
            .put("1/a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        let object = store.get("1/a.png").await.unwrap();
        assert_eq!(object.bytes, vec![1, 2, 3]);
        assert_eq!(object.content_type, "image/png");
        assert_eq!(store.object_count().await, 1);
    }

    #[test]
    fn public_url_joins_base_bucket_and_path() {
        let store = InMemoryObjectStore::new("https://cdn.example/storage/", "product-images");
        assert_eq!(
            store.public_url("1/a.png"),
            "https://cdn.example/storage/product-images/1/a.png"
        );
    }

    #[tokio::test]
    async fn oversized_objects_are_rejected() {
        let store = InMemoryObjectStore::new("https://cdn.example", "images");
        store.set_max_object_bytes(2).await;

        assert!(store.put("big.png", vec![0; 3], "image/png").await.is_err());
        assert!(store.put("ok.png", vec![0; 2], "image/png").await.is_ok());
        assert_eq!(store.object_count().await, 1);
    }
}
