//! # Store Configuration
//!
//! Per-store settings for a storefront session.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. store.toml                                                          │
//! │     explicit path, or the platform config dir:                          │
//! │     • Linux: ~/.config/vitrine/store.toml                               │
//! │     • macOS: ~/Library/Application Support/com.vitrine.vitrine/         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  3. Environment (VITRINE_*)                                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example store.toml
//! ```toml
//! [store]
//! id = "loja-centro"
//! name = "Loja Centro"
//! minimum_order_cents = 2000
//!
//! [currency]
//! code = "BRL"
//!
//! [catalog]
//! path = "catalog.json"
//!
//! [cart]
//! max_lines = 50
//! max_line_quantity = 20
//! persist_cart = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use vitrine_core::validation::validate_id;
use vitrine_core::{CurrencyFormat, Money, MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Errors
// =============================================================================

/// Configuration load and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Currency code has no display preset.
    #[error("Unsupported currency: {0}")]
    UnknownCurrency(String),

    /// A value is out of its allowed range.
    #[error("Invalid store configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[store]`: which tenant this session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub id: String,
    pub name: String,
    /// Zero disables the minimum-order gate.
    pub minimum_order_cents: i64,
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            id: "demo".to_string(),
            name: "Vitrine Demo".to_string(),
            minimum_order_cents: 0,
        }
    }
}

/// `[currency]`: how prices are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySection {
    /// ISO 4217 code with a known preset (BRL, USD).
    pub code: String,
    /// Replaces the preset's symbol when set.
    pub symbol: Option<String>,
}

impl Default for CurrencySection {
    fn default() -> Self {
        CurrencySection {
            code: "BRL".to_string(),
            symbol: None,
        }
    }
}

/// `[catalog]`: where products come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// JSON catalog document; an empty in-memory catalog when unset.
    pub path: Option<PathBuf>,
}

/// `[cart]`: limits and durability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartSection {
    pub max_lines: usize,
    pub max_line_quantity: u32,
    /// Keep carts across session restarts. Off by default.
    pub persist_cart: bool,
}

impl Default for CartSection {
    fn default() -> Self {
        CartSection {
            max_lines: MAX_CART_LINES,
            max_line_quantity: MAX_LINE_QUANTITY,
            persist_cart: false,
        }
    }
}

// =============================================================================
// Store Config
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub store: StoreSection,
    pub currency: CurrencySection,
    pub catalog: CatalogSection,
    pub cart: CartSection,
}

impl StoreConfig {
    /// Loads configuration from defaults, file and environment.
    ///
    /// A missing file is not an error; a file that exists but cannot be
    /// read or parsed is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file without env overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_id("store id", &self.store.id)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name is required".into()));
        }

        if self.store.minimum_order_cents < 0 {
            return Err(ConfigError::Invalid(
                "minimum_order_cents must not be negative".into(),
            ));
        }

        if CurrencyFormat::for_code(&self.currency.code).is_none() {
            return Err(ConfigError::UnknownCurrency(self.currency.code.clone()));
        }

        if self.cart.max_lines == 0 {
            return Err(ConfigError::Invalid("max_lines must be greater than 0".into()));
        }

        if self.cart.max_line_quantity == 0 {
            return Err(ConfigError::Invalid(
                "max_line_quantity must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `VITRINE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// `VITRINE_MINIMUM_ORDER` is read as displayed money ("R$ 20,00",
    /// "20.00"); unparsable values become zero, which disables the gate.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("VITRINE_STORE_ID") {
            debug!(store_id = %id, "Overriding store id from environment");
            self.store.id = id;
        }

        if let Some(name) = lookup("VITRINE_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(minimum) = lookup("VITRINE_MINIMUM_ORDER") {
            let parsed = Money::parse(&minimum);
            debug!(minimum = %minimum, cents = parsed.cents(), "Overriding minimum order from environment");
            self.store.minimum_order_cents = parsed.cents();
        }

        if let Some(code) = lookup("VITRINE_CURRENCY") {
            self.currency.code = code.trim().to_ascii_uppercase();
        }

        if let Some(path) = lookup("VITRINE_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("VITRINE_PERSIST_CART") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.persist_cart = true,
                "0" | "false" | "no" | "off" => self.cart.persist_cart = false,
                _ => warn!(value = %flag, "Unknown VITRINE_PERSIST_CART value"),
            }
        }
    }

    /// `store.toml` inside the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vitrine", "vitrine")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the store id.
    pub fn store_id(&self) -> &str {
        &self.store.id
    }

    /// Returns the minimum order as Money.
    pub fn minimum_order(&self) -> Money {
        Money::from_cents(self.store.minimum_order_cents)
    }

    /// Display format for this store's currency.
    pub fn currency_format(&self) -> CurrencyFormat {
        let mut format = CurrencyFormat::for_code(&self.currency.code).unwrap_or_default();
        if let Some(symbol) = &self.currency.symbol {
            format.symbol = symbol.clone();
        }
        format
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
