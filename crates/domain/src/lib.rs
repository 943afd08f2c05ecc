//! Domain rules for the cash-on-delivery storefront.
//!
//! This crate provides the write side of the shop:
//! - Phone number validation for the regional mobile format
//! - The order writer (validate, snapshot product, compute total, insert)
//! - The review writer
//! - Admin mutations over products and orders, with a server-side allow-list
//! - Order relay text, WhatsApp deep links and CSV export

pub mod admin;
pub mod error;
pub mod order;
pub mod phone;
pub mod product;
pub mod review;

pub use admin::{AccessError, AdminPolicy, AdminService, ImageUpload, Refreshed, UploadReport};
pub use error::{DomainError, Result, ValidationError};
pub use order::{
    CONFIRMATION_PATH, MAX_ORDER_QUANTITY, OrderConfirmation, OrderDraft, OrderService,
    REDIRECT_DELAY_MS, encode_uri_component, orders_to_csv, product_whatsapp_link, relay_text,
    whatsapp_link,
};
pub use phone::PhoneNumber;
pub use product::{MAX_PRODUCT_IMAGES, StockLevel, validate_new_product, validate_patch};
pub use review::{ReviewDraft, ReviewService};
