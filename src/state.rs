//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::shopify::AdminClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; each request gets a clone and there is no
/// shared mutable state across requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify: AdminClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify);

        Self {
            inner: Arc::new(AppStateInner { config, shopify }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopifyAdminConfig;
    use secrecy::SecretString;

    fn test_config() -> AdminConfig {
        AdminConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            shopify: ShopifyAdminConfig {
                store: "tidepool.myshopify.com".to_string(),
                api_version: "2026-01".to_string(),
                access_token: SecretString::from("shpat_test_token"),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_state_exposes_config_and_client() {
        // The startup log reads both accessors; keep them wired to the
        // values the state was built from.
        let state = AppState::new(test_config());
        assert_eq!(state.config().base_url, "http://localhost:3001");
        assert_eq!(state.shopify().store(), "tidepool.myshopify.com");
    }
}
