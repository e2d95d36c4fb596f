//! Validation rules for incoming offers.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::protocol::Offer;

/// Configuration name of [`OfferRule::EnsureProfit`].
pub const ENSURE_PROFIT: &str = "ensure_profit";

/// Signature of a closure-backed rule. `Err` carries the reason.
pub type RuleCheck = dyn Fn(&Offer) -> Result<(), String> + Send + Sync;

/// An offer that broke a rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("rule {rule} failed: {reason}")]
pub struct RuleViolation {
    pub rule: String,
    pub reason: String,
}

/// A single predicate over an [`Offer`].
#[derive(Clone)]
pub enum OfferRule {
    /// The offer must be strictly greater than the demand.
    EnsureProfit,
    /// A named, caller-supplied predicate.
    Custom { name: String, check: Arc<RuleCheck> },
}

impl OfferRule {
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Offer) -> Result<(), String> + Send + Sync + 'static,
    {
        OfferRule::Custom {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Look up a built-in rule by its configuration name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            ENSURE_PROFIT => Some(OfferRule::EnsureProfit),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OfferRule::EnsureProfit => ENSURE_PROFIT,
            OfferRule::Custom { name, .. } => name,
        }
    }

    pub fn check(&self, offer: &Offer) -> Result<(), RuleViolation> {
        let outcome = match self {
            OfferRule::EnsureProfit => {
                if offer.offer <= offer.demand {
                    Err("offer must be greater than demand".to_string())
                } else {
                    Ok(())
                }
            }
            OfferRule::Custom { check, .. } => check(offer),
        };

        outcome.map_err(|reason| RuleViolation {
            rule: self.name().to_string(),
            reason,
        })
    }
}

impl fmt::Debug for OfferRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferRule::EnsureProfit => f.write_str("EnsureProfit"),
            OfferRule::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}
