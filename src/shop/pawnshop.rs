//! The pawn shop: validation in front of an inventory.

use std::fmt;
use std::sync::Arc;

use crate::handler::OfferHandler;
use crate::observability::metrics;
use crate::protocol::{Answer, Offer};
use crate::shop::validator::Validator;

/// Guards an inventory with a [`Validator`].
///
/// Offers that break a rule are rejected here and never reach the inventory.
pub struct PawnShop {
    inventory: Arc<dyn OfferHandler>,
    validator: Validator,
}

impl PawnShop {
    /// Create a pawn shop with the default rule set.
    pub fn new(inventory: Arc<dyn OfferHandler>) -> Self {
        Self::with_validator(inventory, Validator::default())
    }

    pub fn with_validator(inventory: Arc<dyn OfferHandler>, validator: Validator) -> Self {
        Self {
            inventory,
            validator,
        }
    }
}

impl OfferHandler for PawnShop {
    fn handle_offer(&self, offer: &Offer) -> Answer {
        if let Err(violation) = self.validator.validate(offer) {
            tracing::debug!(
                offer = offer.offer,
                demand = offer.demand,
                rule = %violation.rule,
                reason = %violation.reason,
                "Offer is not valid"
            );
            metrics::record_policy_rejection(&violation.rule);
            return Answer::reject();
        }

        tracing::info!(inventory = %self.inventory, "Inventory before handling offer");
        self.inventory.handle_offer(offer)
    }
}

impl fmt::Display for PawnShop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inventory, f)
    }
}
