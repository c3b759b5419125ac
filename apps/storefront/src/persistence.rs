//! # Cart Persistence
//!
//! Where a session's cart goes between restarts.
//!
//! ## Adapters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartPersistence (port)                                                 │
//! │  ├── NonDurable          default: load → None, save/discard → no-op    │
//! │  └── MemoryPersistence   JSON per session id, survives the session     │
//! │                          object but not the process                    │
//! │                                                                         │
//! │  [cart] persist_cart = false  →  NonDurable                             │
//! │  [cart] persist_cart = true   →  MemoryPersistence                      │
//! │                                                                         │
//! │  The host builds ONE store with `for_config` and hands the same Arc    │
//! │  to every Session::start, so a later session can restore the cart     │
//! │  an earlier session with the same id saved.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Cart` type itself never touches storage; `CartState` calls the port
//! after each mutation, outside the cart lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use vitrine_core::Cart;

use crate::config::StoreConfig;

/// Persistence failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Backing store cannot be reached.
    #[error("Cart storage unavailable: {0}")]
    Unavailable(String),

    /// A stored cart could not be decoded.
    #[error("Stored cart for session {session_id} is corrupt: {source}")]
    Corrupt {
        session_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage port for carts, keyed by session id.
#[async_trait]
pub trait CartPersistence: Send + Sync {
    /// Loads the stored cart, or `None` when there is nothing stored.
    async fn load(&self, session_id: &str) -> PersistenceResult<Option<Cart>>;

    /// Stores the cart, replacing any previous copy.
    async fn save(&self, session_id: &str, cart: &Cart) -> PersistenceResult<()>;

    /// Forgets the stored cart.
    async fn discard(&self, session_id: &str) -> PersistenceResult<()>;
}

/// Builds the store named by `[cart] persist_cart`.
///
/// Call once per process and share the result between sessions.
pub fn for_config(config: &StoreConfig) -> Arc<dyn CartPersistence> {
    if config.cart.persist_cart {
        debug!("Carts persist across sessions");
        Arc::new(MemoryPersistence::new())
    } else {
        Arc::new(NonDurable)
    }
}

// =============================================================================
// Non-Durable
// =============================================================================

/// Keeps nothing. The cart dies with the session.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonDurable;

#[async_trait]
impl CartPersistence for NonDurable {
    async fn load(&self, _session_id: &str) -> PersistenceResult<Option<Cart>> {
        Ok(None)
    }

    async fn save(&self, _session_id: &str, _cart: &Cart) -> PersistenceResult<()> {
        Ok(())
    }

    async fn discard(&self, _session_id: &str) -> PersistenceResult<()> {
        Ok(())
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Stores carts as JSON in process memory.
///
/// Carts are serialized exactly as a remote store would receive them, so a
/// stale or hand-edited payload surfaces as [`PersistenceError::Corrupt`].
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    carts: Mutex<HashMap<String, String>>,
}

impl MemoryPersistence {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored carts.
    pub async fn len(&self) -> usize {
        self.carts.lock().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.carts.lock().await.is_empty()
    }

    /// Stores a raw payload; lets tests plant corrupt data.
    #[cfg(test)]
    pub(crate) async fn insert_raw(&self, session_id: &str, payload: &str) {
        self.carts
            .lock()
            .await
            .insert(session_id.to_string(), payload.to_string());
    }
}

#[async_trait]
impl CartPersistence for MemoryPersistence {
    async fn load(&self, session_id: &str) -> PersistenceResult<Option<Cart>> {
        let carts = self.carts.lock().await;
        let Some(payload) = carts.get(session_id) else {
            return Ok(None);
        };

        let cart = serde_json::from_str(payload).map_err(|source| PersistenceError::Corrupt {
            session_id: session_id.to_string(),
            source,
        })?;
        Ok(Some(cart))
    }

    async fn save(&self, session_id: &str, cart: &Cart) -> PersistenceResult<()> {
        let payload = serde_json::to_string(cart)
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;

        debug!(session_id = %session_id, lines = cart.line_count(), "Saving cart");
        self.carts
            .lock()
            .await
            .insert(session_id.to_string(), payload);
        Ok(())
    }

    async fn discard(&self, session_id: &str) -> PersistenceResult<()> {
        self.carts.lock().await.remove(session_id);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::Selection;

    #[tokio::test]
    async fn test_non_durable_keeps_nothing() {
        let store = NonDurable;
        let mut cart = Cart::new();
        cart.add("p1", Selection::new());

        store.save("s1", &cart).await.unwrap();
        assert!(store.load("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = MemoryPersistence::new();
        let mut cart = Cart::new();
        let id = cart.add("p1", Selection::new().with("size", "m"));
        cart.add("p1", Selection::new().with("size", "m"));

        store.save("s1", &cart).await.unwrap();
        let loaded = store.load("s1").await.unwrap().unwrap();

        assert_eq!(loaded.lines(), cart.lines());
        assert_eq!(loaded.line(id).map(|line| line.quantity()), Some(2));
        assert!(store.load("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_discard() {
        let store = MemoryPersistence::new();
        store.save("s1", &Cart::new()).await.unwrap();
        assert_eq!(store.len().await, 1);

        store.discard("s1").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_corrupt_payload() {
        let store = MemoryPersistence::new();
        store.insert_raw("s1", "{\"lines\": 5}").await;

        let err = store.load("s1").await.unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
    }
}
