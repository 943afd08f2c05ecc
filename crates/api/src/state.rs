//! Shared application state.

use std::sync::Arc;

use catalog::CatalogReader;
use domain::{AdminPolicy, AdminService, OrderService, ReviewService};
use seo::SeoSettings;
use store::{ObjectStore, SessionStore, Store};

use crate::config::Config;

/// Shared application state accessible from all handlers.
pub struct AppState<S: Store> {
    pub catalog: CatalogReader<S>,
    pub orders: OrderService<S>,
    pub reviews: ReviewService<S>,
    pub admin: AdminService<S>,
    pub sessions: Arc<dyn SessionStore>,
    pub policy: AdminPolicy,
    pub seo: SeoSettings,
    pub whatsapp_number: String,
}

impl<S: Store + Clone + 'static> AppState<S> {
    /// Wires every service over one row store.
    pub fn new(
        store: S,
        objects: Arc<dyn ObjectStore>,
        sessions: Arc<dyn SessionStore>,
        config: &Config,
    ) -> Self {
        Self {
            catalog: CatalogReader::new(store.clone()),
            orders: OrderService::new(store.clone()),
            reviews: ReviewService::new(store.clone()),
            admin: AdminService::new(store, objects),
            sessions,
            policy: AdminPolicy::new(&config.admin_emails),
            seo: SeoSettings::new(config.site_url.clone(), config.site_name.clone()),
            whatsapp_number: config.whatsapp_number.clone(),
        }
    }
}
