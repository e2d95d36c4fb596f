//! Ordered chain of offer rules.

use thiserror::Error;

use crate::protocol::Offer;
use crate::shop::rules::{OfferRule, RuleViolation, ENSURE_PROFIT};

/// Errors raised while building a [`Validator`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("unknown validation rule {0:?}")]
    UnknownRule(String),

    #[error("validation rule at position {0} has no name")]
    UnnamedRule(usize),
}

/// Runs rules in order and stops at the first violation.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Vec<OfferRule>,
}

impl Validator {
    /// Build a validator, refusing any rule entry that is not usable.
    pub fn new(rules: Vec<OfferRule>) -> Result<Self, ValidatorError> {
        for (position, rule) in rules.iter().enumerate() {
            if rule.name().trim().is_empty() {
                return Err(ValidatorError::UnnamedRule(position));
            }
        }
        Ok(Self { rules })
    }

    /// Build a validator from configured rule names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ValidatorError> {
        let rules = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                OfferRule::builtin(name)
                    .ok_or_else(|| ValidatorError::UnknownRule(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    pub fn validate(&self, offer: &Offer) -> Result<(), RuleViolation> {
        self.rules.iter().try_for_each(|rule| rule.check(offer))
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(OfferRule::name)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![OfferRule::EnsureProfit],
        }
    }
}

/// Rule names a default configuration enables.
pub fn default_rule_names() -> Vec<String> {
    vec![ENSURE_PROFIT.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn builds_from_known_names() {
        let validator = Validator::from_names(&["ensure_profit"]).unwrap();
        assert_eq!(validator.rule_names().collect::<Vec<_>>(), vec!["ensure_profit"]);
    }

    #[test]
    fn unknown_name_fails_construction() {
        let err = Validator::from_names(&["ensure_profit", "be_nice"]).unwrap_err();
        assert_eq!(err, ValidatorError::UnknownRule("be_nice".into()));
    }

    #[test]
    fn unnamed_rule_fails_construction() {
        let rules = vec![OfferRule::EnsureProfit, OfferRule::custom("  ", |_: &Offer| Ok(()))];
        assert_eq!(Validator::new(rules).unwrap_err(), ValidatorError::UnnamedRule(1));
    }

    #[test]
    fn empty_chain_accepts_everything() {
        let validator = Validator::new(Vec::new()).unwrap();
        assert!(validator.validate(&Offer::pawn(0, 10)).is_ok());
    }

    #[test]
    fn default_checks_profit() {
        let validator = Validator::default();
        assert!(validator.validate(&Offer::pawn(2, 1)).is_ok());
        assert!(validator.validate(&Offer::pawn(2, 3)).is_err());
    }

    #[test]
    fn stops_at_first_violation() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = later_calls.clone();
        let validator = Validator::new(vec![
            OfferRule::EnsureProfit,
            OfferRule::custom("counting", move |_: &Offer| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ])
        .unwrap();

        let err = validator.validate(&Offer::pawn(2, 3)).unwrap_err();
        assert_eq!(err.rule, "ensure_profit");
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);

        assert!(validator.validate(&Offer::pawn(3, 2)).is_ok());
        assert_eq!(later_calls.load(Ordering::SeqCst), 1);
    }
}
