//! The capability shared by everything that can answer an offer.

use std::fmt;

use crate::protocol::{Answer, Offer};

/// Something that can evaluate an offer and, if it accepts, perform the
/// exchange.
///
/// Implemented by the inventory itself, by the pawn shop that guards it with
/// validation rules, and by test doubles. `Display` renders the current
/// holdings for logging.
pub trait OfferHandler: fmt::Display + Send + Sync {
    fn handle_offer(&self, offer: &Offer) -> Answer;
}
