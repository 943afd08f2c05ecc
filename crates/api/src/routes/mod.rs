//! HTTP handlers, grouped by audience.

pub mod admin;
pub mod orders;
pub mod products;
pub mod seo;
pub mod system;
