//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SEPET_ORDER_LATENCY_MS=250                                          │
//! │     SEPET_SHIPPING_OPTIONS=Kara,Hava                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sepet/sepet.toml (Linux)                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     1500 ms latency, 10% off from 100.00, Kara/Hava/Deniz              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [order]
//! latency_ms = 1500
//! order_id_bound = 10000
//!
//! [pricing]
//! discount_threshold_cents = 10000
//! discount_rate_bps = 1000
//!
//! [shipping]
//! options = ["Kara", "Hava", "Deniz"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use sepet_core::{
    DiscountPolicy, Money, DEFAULT_DISCOUNT_RATE_BPS, DEFAULT_DISCOUNT_THRESHOLD_CENTS,
    DEFAULT_SHIPPING_OPTIONS,
};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Order Settings
// =============================================================================

/// Simulated order backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSettings {
    /// Artificial latency of one order submission (milliseconds).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Order ids are drawn uniformly from `0..order_id_bound`.
    #[serde(default = "default_order_id_bound")]
    pub order_id_bound: u32,
}

fn default_latency_ms() -> u64 {
    1500
}

fn default_order_id_bound() -> u32 {
    10_000
}

impl Default for OrderSettings {
    fn default() -> Self {
        OrderSettings {
            latency_ms: default_latency_ms(),
            order_id_bound: default_order_id_bound(),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Inclusive cart total (cents) from which the discount applies.
    #[serde(default = "default_threshold")]
    pub discount_threshold_cents: i64,

    /// Discount rate in basis points (1000 = 10%).
    #[serde(default = "default_rate")]
    pub discount_rate_bps: u32,
}

fn default_threshold() -> i64 {
    DEFAULT_DISCOUNT_THRESHOLD_CENTS
}

fn default_rate() -> u32 {
    DEFAULT_DISCOUNT_RATE_BPS
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            discount_threshold_cents: default_threshold(),
            discount_rate_bps: default_rate(),
        }
    }
}

// =============================================================================
// Shipping Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSettings {
    /// Shipping method names in display order.
    #[serde(default = "default_shipping_options")]
    pub options: Vec<String>,
}

fn default_shipping_options() -> Vec<String> {
    DEFAULT_SHIPPING_OPTIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            options: default_shipping_options(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub order: OrderSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub shipping: ShippingSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (sepet.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections fall back to defaults.
    pub fn from_toml_str(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.order.order_id_bound == 0 {
            return Err(StoreError::InvalidConfig(
                "order_id_bound must be greater than 0".into(),
            ));
        }

        if self.pricing.discount_rate_bps > 10_000 {
            return Err(StoreError::InvalidConfig(format!(
                "discount_rate_bps must be at most 10000, got {}",
                self.pricing.discount_rate_bps
            )));
        }

        if self.pricing.discount_threshold_cents < 0 {
            return Err(StoreError::InvalidConfig(
                "discount_threshold_cents must not be negative".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(latency) = std::env::var("SEPET_ORDER_LATENCY_MS") {
            if let Ok(ms) = latency.parse::<u64>() {
                debug!(latency_ms = ms, "Overriding order latency from environment");
                self.order.latency_ms = ms;
            }
        }

        if let Ok(bound) = std::env::var("SEPET_ORDER_ID_BOUND") {
            if let Ok(b) = bound.parse::<u32>() {
                self.order.order_id_bound = b;
            }
        }

        if let Ok(threshold) = std::env::var("SEPET_DISCOUNT_THRESHOLD") {
            if let Ok(cents) = threshold.parse::<i64>() {
                self.pricing.discount_threshold_cents = cents;
            }
        }

        // Percentage, e.g. "12.5"
        if let Ok(rate) = std::env::var("SEPET_DISCOUNT_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) => self.pricing.discount_rate_bps = (pct * 100.0).round() as u32,
                Err(_) => warn!(rate = %rate, "Unparseable discount rate in environment"),
            }
        }

        if let Ok(options) = std::env::var("SEPET_SHIPPING_OPTIONS") {
            self.shipping.options = parse_option_list(&options);
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sepet", "cart")
            .map(|dirs| dirs.config_dir().join("sepet.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn order_latency(&self) -> Duration {
        Duration::from_millis(self.order.latency_ms)
    }

    pub fn discount_policy(&self) -> DiscountPolicy {
        DiscountPolicy::new(
            Money::from_cents(self.pricing.discount_threshold_cents),
            self.pricing.discount_rate_bps,
        )
    }
}

/// Splits a comma-separated list, dropping blank entries.
fn parse_option_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.order.latency_ms, 1500);
        assert_eq!(config.order.order_id_bound, 10_000);
        assert_eq!(config.shipping.options, vec!["Kara", "Hava", "Deniz"]);
        assert_eq!(config.discount_policy(), DiscountPolicy::default());
        assert_eq!(config.order_latency(), Duration::from_millis(1500));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StoreConfig::from_toml_str(
            r#"
            [order]
            latency_ms = 20

            [shipping]
            options = ["Posta"]
            "#,
        )
        .unwrap();

        assert_eq!(config.order.latency_ms, 20);
        assert_eq!(config.order.order_id_bound, 10_000);
        assert_eq!(config.pricing, PricingSettings::default());
        assert_eq!(config.shipping.options, vec!["Posta"]);
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();
        assert!(config.validate().is_ok());

        config.order.order_id_bound = 0;
        assert!(config.validate().is_err());

        config.order.order_id_bound = 10;
        config.pricing.discount_rate_bps = 10_001;
        assert!(config.validate().is_err());

        config.pricing.discount_rate_bps = 500;
        config.pricing.discount_threshold_cents = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_option_list() {
        assert_eq!(parse_option_list("Kara, Hava,,Deniz "), vec!["Kara", "Hava", "Deniz"]);
        assert!(parse_option_list(" , ").is_empty());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(config.validate().is_ok());
    }
}
