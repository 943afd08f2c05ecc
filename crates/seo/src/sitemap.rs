//! Sitemap and robots directives.

use chrono::SecondsFormat;
use domain::encode_uri_component;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use store::Product;

use crate::Result;
use crate::settings::SeoSettings;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Pages that exist regardless of catalog content.
pub const STATIC_PAGES: [&str; 4] = ["", "/about", "/contact", "/shop"];

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    /// RFC 3339 timestamp.
    pub lastmod: Option<String>,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Collects sitemap entries: static pages, then categories, then products.
pub fn sitemap_entries(
    settings: &SeoSettings,
    categories: &[String],
    products: &[Product],
) -> Vec<SitemapEntry> {
    let pages = STATIC_PAGES.iter().map(|page| SitemapEntry {
        loc: settings.url(page),
        lastmod: None,
        changefreq: ChangeFrequency::Weekly,
        priority: 1.0,
    });

    let categories = categories.iter().map(|name| SitemapEntry {
        loc: settings.url(&format!("/category/{}", encode_uri_component(name))),
        lastmod: None,
        changefreq: ChangeFrequency::Weekly,
        priority: 0.9,
    });

    let products = products.iter().map(|product| SitemapEntry {
        loc: settings.url(&format!("/product/{}", product.id)),
        lastmod: Some(
            product
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        changefreq: ChangeFrequency::Daily,
        priority: 0.8,
    });

    pages.chain(categories).chain(products).collect()
}

/// Renders entries as a sitemap document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|w| -> std::io::Result<()> {
            for entry in entries {
                w.create_element("url")
                    .write_inner_content(|w| -> std::io::Result<()> {
                        w.create_element("loc")
                            .write_text_content(BytesText::new(&entry.loc))?;
                        if let Some(ref lastmod) = entry.lastmod {
                            w.create_element("lastmod")
                                .write_text_content(BytesText::new(lastmod))?;
                        }
                        w.create_element("changefreq")
                            .write_text_content(BytesText::new(entry.changefreq.as_str()))?;
                        w.create_element("priority")
                            .write_text_content(BytesText::new(&format!("{:.1}", entry.priority)))?;
                        Ok(())
                    })?;
            }
            Ok(())
        })?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Builds the sitemap for the given categories and products.
pub fn sitemap_xml(
    settings: &SeoSettings,
    categories: &[String],
    products: &[Product],
) -> Result<String> {
    render_sitemap(&sitemap_entries(settings, categories, products))
}

/// Builds `robots.txt`: everything allowed, sitemap advertised.
pub fn robots_txt(settings: &SeoSettings) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        settings.url("/sitemap.xml")
    )
}
