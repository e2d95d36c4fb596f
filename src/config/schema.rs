//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the pawn shop.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shop::validator::default_rule_names;

/// Root configuration for the pawn shop server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShopConfig {
    /// Listener configuration (bind address, hand-off queue).
    pub listener: ListenerConfig,

    /// Inventory settings.
    pub inventory: InventoryConfig,

    /// Offer validation rules.
    pub policy: PolicyConfig,

    /// Per-connection timeouts.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Capacity of the channel between the accept and dispatch tasks.
    pub dispatch_queue: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            dispatch_queue: 1024,
        }
    }
}

/// Inventory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of items held. Must be at least 1.
    pub size: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { size: 2 }
    }
}

/// Offer validation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Rule names, evaluated in order.
    pub rules: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            rules: default_rule_names(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long a connection may take to deliver its request, in seconds.
    pub read_secs: u64,
}

impl TimeoutConfig {
    pub fn read(&self) -> Duration {
        Duration::from_secs(self.read_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { read_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: ShopConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.inventory.size, 2);
        assert_eq!(config.policy.rules, vec!["ensure_profit".to_string()]);
        assert_eq!(config.timeouts.read(), Duration::from_secs(30));
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: ShopConfig = toml::from_str(
            r#"
            [inventory]
            size = 5

            [listener]
            bind_address = "0.0.0.0:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.inventory.size, 5);
        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.listener.dispatch_queue, 1024);
        assert_eq!(config.observability.log_level, "info");
    }
}
