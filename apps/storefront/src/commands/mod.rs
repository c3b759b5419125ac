//! # Commands Module
//!
//! All operations exposed to the storefront front end.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Cart manipulation and priced cart views
//! └── checkout.rs  ◄─── Minimum-order status and checkout hand-off
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  add_to_cart(&catalog, &cart, &config, "pizza", Some(selection))        │
//! │         │                                                               │
//! │         ├── catalog.product(..).await      (async, no lock held)        │
//! │         ├── validate_selection / is_complete (pure)                     │
//! │         ├── cart.with_cart_mut(..)          (sync, under the lock)      │
//! │         ├── cart.persist().await            (after the lock)            │
//! │         └── get_cart(..)                    (priced view, formatted)    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<CartResponse, ApiError>  → JSON for the front end               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! clear_cart(&session.catalog, &session.cart, &session.config).await?;
//!
//! // Needs catalog, cart and config
//! add_to_cart(&session.catalog, &session.cart, &session.config, id, None).await?;
//! ```

pub mod cart;
pub mod checkout;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use vitrine_catalog::InMemoryCatalog;
    use vitrine_core::{OptionGroup, Product, ProductOption};

    use crate::config::StoreConfig;
    use crate::persistence::NonDurable;
    use crate::state::{CatalogState, ConfigState, Session};

    /// Demo store: a discounted tee, an option-priced pizza, a burger with a
    /// required size, a soda, a retired hoodie and another store's product.
    pub fn products() -> Vec<Product> {
        let mut retired = Product::simple("hoodie", "Hoodie", 12990).in_store("demo");
        retired.is_active = false;

        vec![
            Product::simple("tee", "Tee", 7990)
                .with_previous_price(24990)
                .in_store("demo"),
            Product::simple("pizza", "Pizza", 0)
                .in_store("demo")
                .with_group(
                    OptionGroup::single("size", "Size", true)
                        .with_option(ProductOption::new("m", "Medium", 3990))
                        .with_option(ProductOption::new("l", "Large", 4990)),
                )
                .with_group(
                    OptionGroup::multiple("extras", "Extras", false, 0, Some(2))
                        .with_option(ProductOption::new("cheese", "Cheese", 500))
                        .with_option(ProductOption::new("bacon", "Bacon", 700))
                        .with_option(ProductOption::new("egg", "Egg", 300)),
                ),
            Product::simple("burger", "Burger", 2500)
                .in_store("demo")
                .with_group(
                    OptionGroup::single("g", "Size", true)
                        .with_option(ProductOption::new("A", "Regular", 0))
                        .with_option(ProductOption::new("B", "Double", 500)),
                ),
            Product::simple("soda", "Soda", 800).in_store("demo"),
            retired,
            Product::simple("elsewhere", "Elsewhere", 100).in_store("other"),
        ]
    }

    /// Session over [`products`] with the given minimum order.
    pub fn session(minimum_order_cents: i64) -> (Session, Arc<InMemoryCatalog>) {
        let catalog = Arc::new(InMemoryCatalog::with_products(products()).unwrap());
        let mut config = StoreConfig::default();
        config.store.minimum_order_cents = minimum_order_cents;

        let session = Session::with_parts(
            CatalogState::new(catalog.clone()),
            ConfigState::new(config),
            "test-session",
            Arc::new(NonDurable),
        );
        (session, catalog)
    }
}
