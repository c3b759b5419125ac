//! # Cart State
//!
//! Owns one session's cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several commands of one session may run concurrently
//! 2. Only one of them may mutate the cart at a time
//! 3. The lock is never held across an `.await`
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                  Under the lock              After the lock    │
//! │  ───────                  ──────────────              ──────────────    │
//! │                                                                         │
//! │  add_to_cart ───────────► cart.add(pid, sel) ───────► persist()        │
//! │                                                                         │
//! │  remove_cart_line ──────► cart.remove(line_id) ─────► persist()        │
//! │                                                                         │
//! │  update_line_selection ─► cart.set_selection(..) ───► persist()        │
//! │                                                                         │
//! │  get_cart ──────────────► (read only) ──────────────► (nothing)        │
//! │                                                                         │
//! │  NOTE: persist() clones the cart under the lock and saves the clone.   │
//! │        Saves of one CartState run one at a time, each cloning only    │
//! │        after the previous save finished, so the newest cart wins.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};
use uuid::Uuid;
use vitrine_core::Cart;

use crate::persistence::{CartPersistence, NonDurable, PersistenceResult};

/// Session-owned cart state.
///
/// ## Poisoning
/// Every `Cart` operation leaves the cart consistent even if the caller
/// panics afterwards, so a poisoned lock is recovered instead of failing.
#[derive(Clone)]
pub struct CartState {
    session_id: String,
    cart: Arc<Mutex<Cart>>,
    persistence: Arc<dyn CartPersistence>,
    /// Held for the whole of a save, across `.await`.
    save_lock: Arc<AsyncMutex<()>>,
}

impl CartState {
    /// Creates a non-durable cart state with a fresh session id.
    pub fn new() -> Self {
        Self::with_persistence(Uuid::new_v4().to_string(), Arc::new(NonDurable))
    }

    /// Creates an empty cart state backed by `persistence`.
    pub fn with_persistence(
        session_id: impl Into<String>,
        persistence: Arc<dyn CartPersistence>,
    ) -> Self {
        CartState {
            session_id: session_id.into(),
            cart: Arc::new(Mutex::new(Cart::new())),
            persistence,
            save_lock: Arc::new(AsyncMutex::new(())),
        }
    }

    /// Session this cart belongs to.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Replaces the in-memory cart with the stored one, if any.
    ///
    /// Returns true when a stored cart was found.
    pub async fn restore(&self) -> PersistenceResult<bool> {
        match self.persistence.load(&self.session_id).await? {
            Some(stored) => {
                debug!(
                    session_id = %self.session_id,
                    lines = stored.line_count(),
                    "Restored cart"
                );
                self.with_cart_mut(|cart| *cart = stored);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Saves a copy of the current cart.
    ///
    /// Failures are logged, not returned: the in-memory cart stays the
    /// source of truth for the running session.
    ///
    /// Concurrent calls are serialized and the cart is cloned only once the
    /// save lock is held, so a slow earlier save can never overwrite a
    /// newer one.
    pub async fn persist(&self) {
        let _saving = self.save_lock.lock().await;
        let snapshot = self.with_cart(Cart::clone);
        let result = if snapshot.is_empty() {
            self.persistence.discard(&self.session_id).await
        } else {
            self.persistence.save(&self.session_id, &snapshot).await
        };

        if let Err(e) = result {
            warn!(session_id = %self.session_id, error = %e, "Failed to persist cart");
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|cart| cart.line_count());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add("p1", Selection::new()));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartState")
            .field("session_id", &self.session_id)
            .field("lines", &self.with_cart(Cart::line_count))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use async_trait::async_trait;
    use tokio::sync::Notify;
    use vitrine_core::Selection;

    #[test]
    fn test_with_cart_mut() {
        let state = CartState::new();
        state.with_cart_mut(|cart| {
            cart.add("p1", Selection::new());
            cart.add("p1", Selection::new());
        });

        assert_eq!(state.with_cart(|cart| cart.quantity_of("p1")), 2);
    }

    #[test]
    fn test_clones_share_the_cart() {
        let state = CartState::new();
        let other = state.clone();
        other.with_cart_mut(|cart| cart.add("p1", Selection::new()));

        assert!(!state.with_cart(Cart::is_empty));
        assert_eq!(state.session_id(), other.session_id());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let state = CartState::new();
        let clone = state.clone();

        let _ = std::thread::spawn(move || {
            clone.with_cart_mut(|cart| {
                cart.add("p1", Selection::new());
                panic!("boom");
            })
        })
        .join();

        assert_eq!(state.with_cart(|cart| cart.quantity_of("p1")), 1);
    }

    #[tokio::test]
    async fn test_non_durable_restore_finds_nothing() {
        let state = CartState::new();
        state.with_cart_mut(|cart| cart.add("p1", Selection::new()));
        state.persist().await;

        let fresh = CartState::with_persistence(state.session_id(), Arc::new(NonDurable));
        assert!(!fresh.restore().await.unwrap());
        assert!(fresh.with_cart(Cart::is_empty));
    }

    #[tokio::test]
    async fn test_persist_and_restore() {
        let store: Arc<MemoryPersistence> = Arc::new(MemoryPersistence::new());

        let first = CartState::with_persistence("session-1", store.clone());
        first.with_cart_mut(|cart| cart.add("p1", Selection::new().with("size", "m")));
        first.persist().await;

        let second = CartState::with_persistence("session-1", store.clone());
        assert!(second.restore().await.unwrap());
        assert_eq!(second.with_cart(|cart| cart.quantity_of("p1")), 1);

        // emptying the cart discards the stored copy
        second.with_cart_mut(Cart::clear);
        second.persist().await;
        assert!(store.is_empty().await);
    }

    #[derive(Default)]
    struct GatedPersistence {
        inner: MemoryPersistence,
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CartPersistence for GatedPersistence {
        async fn load(&self, session_id: &str) -> PersistenceResult<Option<Cart>> {
            self.inner.load(session_id).await
        }

        async fn save(&self, session_id: &str, cart: &Cart) -> PersistenceResult<()> {
            // single-line carts stall until released
            if cart.line_count() == 1 {
                self.started.notify_one();
                self.release.notified().await;
            }
            self.inner.save(session_id, cart).await
        }

        async fn discard(&self, session_id: &str) -> PersistenceResult<()> {
            self.inner.discard(session_id).await
        }
    }

    #[tokio::test]
    async fn test_slow_save_does_not_overwrite_newer_cart() {
        let store = Arc::new(GatedPersistence::default());
        let state = CartState::with_persistence("session-1", store.clone());

        state.with_cart_mut(|cart| cart.add("p1", Selection::new()));
        let first = tokio::spawn({
            let state = state.clone();
            async move { state.persist().await }
        });
        store.started.notified().await;

        state.with_cart_mut(|cart| cart.add("p2", Selection::new()));
        let second = tokio::spawn({
            let state = state.clone();
            async move { state.persist().await }
        });
        tokio::task::yield_now().await;

        store.release.notify_one();
        first.await.unwrap();
        second.await.unwrap();

        let stored = store.inner.load("session-1").await.unwrap().unwrap();
        assert_eq!(stored.line_count(), 2);
    }
}
