//! Offer policy subsystem.
//!
//! # Data Flow
//! ```text
//! Offer (kind already checked by the router)
//!     → pawnshop.rs (run the validator, log holdings once it passes)
//!     → validator.rs (ordered rules, first violation wins)
//!     → rules.rs (individual predicates)
//!     → inventory (only if every rule passes)
//! ```
//!
//! # Design Decisions
//! - Rules are values: built-in variants plus named closures
//! - Invalid rule entries fail construction instead of being skipped
//! - A rejected offer never takes the inventory lock

pub mod pawnshop;
pub mod rules;
pub mod validator;

pub use pawnshop::PawnShop;
pub use rules::{OfferRule, RuleViolation, ENSURE_PROFIT};
pub use validator::{Validator, ValidatorError};
