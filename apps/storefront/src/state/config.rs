//! # Configuration State
//!
//! Read-only store configuration shared by every command of a session.
//!
//! ## Thread Safety
//! Configuration is read-only after startup, so an `Arc` is enough.
//! Hot reloading would wrap it in `RwLock`.

use std::sync::Arc;

use vitrine_core::{CurrencyFormat, Money};

use crate::config::StoreConfig;

/// Session view of the store configuration.
#[derive(Debug, Clone)]
pub struct ConfigState {
    config: Arc<StoreConfig>,
    currency: CurrencyFormat,
}

impl ConfigState {
    /// Wraps a loaded (and validated) configuration.
    pub fn new(config: StoreConfig) -> Self {
        let currency = config.currency_format();
        ConfigState {
            config: Arc::new(config),
            currency,
        }
    }

    /// The underlying configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Store (tenant) id.
    pub fn store_id(&self) -> &str {
        self.config.store_id()
    }

    /// Minimum order; zero when the store has none.
    pub fn minimum_order(&self) -> Money {
        self.config.minimum_order()
    }

    /// Maximum distinct lines per cart.
    pub fn max_lines(&self) -> usize {
        self.config.cart.max_lines
    }

    /// Maximum quantity per line.
    pub fn max_line_quantity(&self) -> u32 {
        self.config.cart.max_line_quantity
    }

    /// Formats money in the store's currency.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_cents(123456)), "R$ 1.234,56");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency)
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::new(StoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_brl() {
        let config = ConfigState::default();
        assert_eq!(config.format_money(Money::from_cents(7990)), "R$ 79,90");
        assert_eq!(config.format_money(Money::from_cents(123456)), "R$ 1.234,56");
        assert_eq!(config.format_money(Money::from_cents(-550)), "-R$ 5,50");
    }

    #[test]
    fn test_format_money_usd() {
        let mut store = StoreConfig::default();
        store.currency.code = "USD".to_string();
        let config = ConfigState::new(store);
        assert_eq!(config.format_money(Money::from_cents(123456)), "$1,234.56");
    }

    #[test]
    fn test_limits_follow_config() {
        let mut store = StoreConfig::default();
        store.cart.max_lines = 3;
        store.cart.max_line_quantity = 5;
        let config = ConfigState::new(store);

        assert_eq!(config.max_lines(), 3);
        assert_eq!(config.max_line_quantity(), 5);
    }
}
