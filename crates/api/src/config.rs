//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: PostgreSQL connection string; unset runs on the in-memory store
/// - `SITE_URL`: public origin used in SEO documents (default: `"https://molvibusiness.shop"`)
/// - `SITE_NAME`: shop name (default: `"Molvi Business"`)
/// - `ADMIN_EMAILS`: comma separated admin allow-list
/// - `ADMIN_SESSIONS`: comma separated `token=email` pairs seeded into the session store
/// - `STORAGE_PUBLIC_URL`: public base of the image bucket (default: `"{SITE_URL}/storage/v1/object/public"`)
/// - `STORAGE_BUCKET`: image bucket name (default: `"product-images"`)
/// - `WHATSAPP_NUMBER`: business WhatsApp number in international digits (default: `"923000000000"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub site_url: String,
    pub site_name: String,
    pub admin_emails: Vec<String>,
    pub admin_sessions: Vec<(String, String)>,
    pub storage_public_url: String,
    pub storage_bucket: String,
    pub whatsapp_number: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let site_url = var("SITE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.site_url);
        let storage_public_url =
            var("STORAGE_PUBLIC_URL").unwrap_or_else(|| default_storage_url(&site_url));

        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: var("DATABASE_URL"),
            site_url,
            site_name: var("SITE_NAME").unwrap_or(defaults.site_name),
            admin_emails: var("ADMIN_EMAILS")
                .map(|list| split_list(&list))
                .unwrap_or_default(),
            admin_sessions: var("ADMIN_SESSIONS")
                .map(|list| parse_sessions(&list))
                .unwrap_or_default(),
            storage_public_url,
            storage_bucket: var("STORAGE_BUCKET").unwrap_or(defaults.storage_bucket),
            whatsapp_number: var("WHATSAPP_NUMBER").unwrap_or(defaults.whatsapp_number),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        let site_url = "https://molvibusiness.shop".to_string();
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            storage_public_url: default_storage_url(&site_url),
            site_url,
            site_name: "Molvi Business".to_string(),
            admin_emails: Vec::new(),
            admin_sessions: Vec::new(),
            storage_bucket: "product-images".to_string(),
            whatsapp_number: "923000000000".to_string(),
        }
    }
}

fn default_storage_url(site_url: &str) -> String {
    format!("{site_url}/storage/v1/object/public")
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `token=email` pairs. Malformed pairs are skipped.
fn parse_sessions(list: &str) -> Vec<(String, String)> {
    split_list(list)
        .into_iter()
        .filter_map(|pair| {
            let (token, email) = pair.split_once('=')?;
            let (token, email) = (token.trim(), email.trim());
            if token.is_empty() || email.is_empty() {
                return None;
            }
            Some((token.to_string(), email.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.database_url.is_none());
        assert_eq!(config.site_url, "https://molvibusiness.shop");
        assert_eq!(config.storage_bucket, "product-images");
        assert_eq!(config.whatsapp_number, "923000000000");
    }

    #[test]
    fn test_empty_environment_matches_defaults() {
        let config = from_map(&[]);
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(
            config.storage_public_url,
            "https://molvibusiness.shop/storage/v1/object/public"
        );
        assert!(config.admin_emails.is_empty());
    }

    #[test]
    fn test_addr_formatting() {
        let config = from_map(&[("HOST", "127.0.0.1"), ("PORT", "8080")]);
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = from_map(&[("PORT", "eighty")]);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_site_url_drives_storage_default() {
        let config = from_map(&[("SITE_URL", "http://localhost:3000/")]);
        assert_eq!(config.site_url, "http://localhost:3000");
        assert_eq!(
            config.storage_public_url,
            "http://localhost:3000/storage/v1/object/public"
        );
    }

    #[test]
    fn test_admin_lists() {
        let config = from_map(&[
            ("ADMIN_EMAILS", "owner@shop.pk, helper@shop.pk,"),
            ("ADMIN_SESSIONS", "tok-1=owner@shop.pk, broken, =x@y.z, tok-2 = helper@shop.pk"),
        ]);
        assert_eq!(config.admin_emails, vec!["owner@shop.pk", "helper@shop.pk"]);
        assert_eq!(
            config.admin_sessions,
            vec![
                ("tok-1".to_string(), "owner@shop.pk".to_string()),
                ("tok-2".to_string(), "helper@shop.pk".to_string()),
            ]
        );
    }
}
