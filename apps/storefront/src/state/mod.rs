//! # State Module
//!
//! Per-session state for the storefront.
//!
//! Instead of one `AppState` struct, each concern has its own state type
//! and each command takes only the ones it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Session::start                             │   │
//! │  │  config → catalog provider → shared store → restored cart       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<dyn     │  │  Arc<Mutex<  │  │  store id        │              │
//! │  │   Catalog    │  │    Cart      │  │  minimum order   │              │
//! │  │   Provider>  │  │  >>          │  │  currency, limits│              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: providers are Send + Sync, lock internally            │
//! │  • CartState: Arc<Mutex<Cart>>, never locked across .await             │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::ConfigState;

use crate::config::StoreConfig;
use crate::error::ApiError;
use crate::persistence::CartPersistence;

/// Everything one customer session needs.
#[derive(Debug, Clone)]
pub struct Session {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub config: ConfigState,
}

impl Session {
    /// Starts a session from configuration.
    ///
    /// ## Startup Sequence
    /// 1. Open the catalog named by `[catalog] path`
    /// 2. Attach the host's cart store (see [`persistence::for_config`])
    /// 3. Restore a stored cart for `session_id`, if any
    ///
    /// A stored cart that cannot be read is dropped with a warning; the
    /// session starts with an empty cart rather than failing.
    ///
    /// [`persistence::for_config`]: crate::persistence::for_config
    pub async fn start(
        config: StoreConfig,
        persistence: Arc<dyn CartPersistence>,
        session_id: Option<String>,
    ) -> Result<Self, ApiError> {
        let catalog = CatalogState::from_config(&config).await?;

        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let session = Session::with_parts(catalog, ConfigState::new(config), &session_id, persistence);

        if let Err(e) = session.cart.restore().await {
            warn!(session_id = %session_id, error = %e, "Discarding unreadable stored cart");
        }

        info!(
            session_id = %session_id,
            store_id = %session.config.store_id(),
            "Session started"
        );
        Ok(session)
    }

    /// Assembles a session from already built parts.
    pub fn with_parts(
        catalog: CatalogState,
        config: ConfigState,
        session_id: &str,
        persistence: Arc<dyn CartPersistence>,
    ) -> Self {
        Session {
            catalog,
            cart: CartState::with_persistence(session_id, persistence),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::products;
    use crate::persistence::{self, NonDurable};
    use vitrine_catalog::CatalogDocument;
    use vitrine_core::Selection;

    #[tokio::test]
    async fn test_start_with_defaults() {
        let session = Session::start(
            StoreConfig::default(),
            Arc::new(NonDurable),
            Some("s-1".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(session.cart.session_id(), "s-1");
        assert_eq!(session.config.store_id(), "demo");
        assert!(session.cart.with_cart(|cart| cart.is_empty()));
    }

    #[tokio::test]
    async fn test_start_with_missing_catalog_file_fails() {
        let mut config = StoreConfig::default();
        config.catalog.path = Some("/nonexistent/vitrine/catalog.json".into());

        assert!(Session::start(config, Arc::new(NonDurable), None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_persisted_cart_survives_into_next_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        CatalogDocument {
            store_id: "demo".to_string(),
            products: products(),
        }
        .write(&path)
        .await
        .unwrap();

        let mut config = StoreConfig::default();
        config.catalog.path = Some(path);
        config.cart.persist_cart = true;
        let store = persistence::for_config(&config);

        let first = Session::start(config.clone(), store.clone(), Some("sess".to_string()))
            .await
            .unwrap();
        first.cart.with_cart_mut(|cart| cart.add("soda", Selection::new()));
        first.cart.persist().await;

        let second = Session::start(config.clone(), store.clone(), Some("sess".to_string()))
            .await
            .unwrap();
        assert_eq!(second.cart.with_cart(|cart| cart.quantity_of("soda")), 1);

        let stranger = Session::start(config, store, Some("other".to_string()))
            .await
            .unwrap();
        assert!(stranger.cart.with_cart(|cart| cart.is_empty()));
    }

    #[tokio::test]
    async fn test_non_durable_config_restores_nothing() {
        let config = StoreConfig::default();
        let store = persistence::for_config(&config);

        let first = Session::start(config.clone(), store.clone(), Some("sess".to_string()))
            .await
            .unwrap();
        first.cart.with_cart_mut(|cart| cart.add("soda", Selection::new()));
        first.cart.persist().await;

        let second = Session::start(config, store, Some("sess".to_string()))
            .await
            .unwrap();
        assert!(second.cart.with_cart(|cart| cart.is_empty()));
    }
}
