//! Search engine documents for the storefront.
//!
//! - [`sitemap_xml`] and [`robots_txt`] for crawlers
//! - [`product_json_ld`] and [`organization_json_ld`] structured data
//! - [`OpenGraph`] properties for product pages

pub mod error;
pub mod open_graph;
pub mod settings;
pub mod sitemap;
pub mod structured;

pub use error::{Result, SeoError};
pub use open_graph::OpenGraph;
pub use settings::SeoSettings;
pub use sitemap::{
    ChangeFrequency, STATIC_PAGES, SitemapEntry, render_sitemap, robots_txt, sitemap_entries,
    sitemap_xml,
};
pub use structured::{organization_json_ld, product_json_ld};
