//! Site identity used across generated documents.

use serde::{Deserialize, Serialize};

/// Site-wide values every SEO document needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoSettings {
    /// Public origin without a trailing slash, e.g. `https://molvibusiness.shop`.
    pub site_url: String,
    pub site_name: String,
    pub description: String,
    /// Customer service phone, shown in the organization contact point.
    pub telephone: String,
    /// Social profile URLs.
    pub same_as: Vec<String>,
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self::new("https://molvibusiness.shop", "Molvi Business")
    }
}

impl SeoSettings {
    pub fn new(site_url: impl Into<String>, site_name: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
            site_name: site_name.into(),
            description: "Premium online shopping in Pakistan with cash on delivery".to_string(),
            telephone: "+92-300-0000000".to_string(),
            same_as: Vec::new(),
        }
    }

    pub fn with_telephone(mut self, telephone: impl Into<String>) -> Self {
        self.telephone = telephone.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_profiles(mut self, same_as: Vec<String>) -> Self {
        self.same_as = same_as;
        self
    }

    /// Joins a site-relative path onto the site URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }

    pub fn logo_url(&self) -> String {
        self.url("/logo.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let settings = SeoSettings::new("https://shop.example/", "Shop");
        assert_eq!(settings.url("/product/1"), "https://shop.example/product/1");
        assert_eq!(settings.url(""), "https://shop.example");
    }
}
