//! Application state shared across handlers.

use std::sync::Arc;

use crate::accounts::AccountClient;
use crate::config::StorefrontConfig;
use crate::store::{CartStore, CatalogStore, ProfileStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The stores are explicit dependencies
/// injected here rather than ambient global state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    cart: CartStore,
    profile: ProfileStore,
    accounts: AccountClient,
}

impl AppState {
    /// Create the application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogStore::new(&config.data_dir);
        let cart = CartStore::new(&config.data_dir);
        let profile = ProfileStore::new(&config.data_dir);
        let accounts = AccountClient::new(&config.accounts);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                profile,
                accounts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the profile store.
    #[must_use]
    pub fn profile(&self) -> &ProfileStore {
        &self.inner.profile
    }

    /// Get a reference to the account service client.
    #[must_use]
    pub fn accounts(&self) -> &AccountClient {
        &self.inner.accounts
    }
}
