//! Product image uploads.

use common::ProductId;
use serde::Serialize;
use store::Product;

use crate::product::MAX_PRODUCT_IMAGES;

/// One file from an upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// File extension used in the object key.
    pub(crate) fn extension(&self) -> String {
        let from_name = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
        if let Some(ext) = from_name {
            return ext;
        }
        match self.content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
        .to_string()
    }

    /// Object key under the product's folder.
    pub(crate) fn object_key(&self, product_id: ProductId) -> String {
        format!("{product_id}/{}.{}", uuid::Uuid::new_v4(), self.extension())
    }
}

/// Outcome of an upload batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReport {
    /// The product with its extended image list.
    pub product: Product,
    /// Public URLs of the files that were stored.
    pub uploaded: Vec<String>,
    /// Names of files whose upload failed.
    pub failed: Vec<String>,
    /// Names of files dropped because the product already had enough images.
    pub ignored: Vec<String>,
}

/// Splits a batch into the files that fit under the image cap and the rest.
pub(crate) fn split_at_capacity(
    existing: usize,
    files: Vec<ImageUpload>,
) -> (Vec<ImageUpload>, Vec<ImageUpload>) {
    let room = MAX_PRODUCT_IMAGES.saturating_sub(existing);
    let mut files = files;
    let overflow = if files.len() > room {
        files.split_off(room)
    } else {
        Vec::new()
    };
    (files, overflow)
}
