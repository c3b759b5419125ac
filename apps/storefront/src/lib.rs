//! # Vitrine Storefront Library
//!
//! Session layer of the Vitrine storefront: owns each customer's cart,
//! loads the store configuration and exposes the commands the front end
//! calls.
//!
//! ## Module Organization
//! ```text
//! vitrine_storefront/
//! ├── lib.rs          ◄─── You are here (logging setup, exports)
//! ├── config.rs       ◄─── StoreConfig: defaults → store.toml → env
//! ├── persistence.rs  ◄─── CartPersistence port (NonDurable, Memory)
//! ├── state/
//! │   ├── mod.rs      ◄─── Session: the state bundle of one customer
//! │   ├── cart.rs     ◄─── CartState: Arc<Mutex<Cart>>
//! │   ├── catalog.rs  ◄─── CatalogState: Arc<dyn CatalogProvider>
//! │   └── config.rs   ◄─── ConfigState: read-only config + money format
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── checkout.rs ◄─── Minimum-order gate, checkout hand-off
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use vitrine_storefront::{commands, persistence, Session, StoreConfig};
//!
//! let config = StoreConfig::load(None)?;
//! // one cart store per process, shared by every session
//! let carts = persistence::for_config(&config);
//! let session = Session::start(config, carts.clone(), None).await?;
//! let cart = commands::cart::add_to_cart(
//!     &session.catalog,
//!     &session.cart,
//!     &session.config,
//!     "pizza".to_string(),
//!     Some(Selection::new().with("size", "m")),
//! )
//! .await?;
//! println!("{}", cart.totals.total.formatted);
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod persistence;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, StoreConfig};
pub use error::{ApiError, ErrorCode};
pub use state::{CartState, CatalogState, ConfigState, Session};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vitrine_storefront=trace` - Trace this crate only
/// - Default: INFO, DEBUG for vitrine crates
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,vitrine_storefront=debug,vitrine_catalog=debug")
    });

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
