//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (sizes and timeouts > 0, addresses parse)
//! - Check that every configured rule exists
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShopConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ShopConfig;
use crate::shop::rules::OfferRule;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("policy.rules: unknown rule {0:?}")]
    UnknownRule(String),
}

pub fn validate_config(config: &ShopConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.dispatch_queue == 0 {
        errors.push(ValidationError::Zero {
            field: "listener.dispatch_queue",
        });
    }
    if config.inventory.size == 0 {
        errors.push(ValidationError::Zero {
            field: "inventory.size",
        });
    }
    if config.timeouts.read_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "timeouts.read_secs",
        });
    }
    for rule in &config.policy.rules {
        if OfferRule::builtin(rule).is_none() {
            errors.push(ValidationError::UnknownRule(rule.clone()));
        }
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ShopConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = ShopConfig::default();
        config.listener.bind_address = "localhost".into();
        config.inventory.size = 0;
        config.policy.rules.push("be_nice".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "localhost".into(),
                },
                ValidationError::Zero {
                    field: "inventory.size"
                },
                ValidationError::UnknownRule("be_nice".into()),
            ]
        );
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = ShopConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_rule_list_is_allowed() {
        let mut config = ShopConfig::default();
        config.policy.rules.clear();
        assert!(validate_config(&config).is_ok());
    }
}
