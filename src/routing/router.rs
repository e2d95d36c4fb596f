//! Request dispatch by kind.

use std::sync::Arc;

use crate::handler::OfferHandler;
use crate::protocol::{Answer, Offer, RequestKind};

/// Sends each request to the handler for its kind.
#[derive(Clone)]
pub struct Router {
    pawn: Arc<dyn OfferHandler>,
}

impl Router {
    /// Route `PAWN` requests to `pawn`.
    pub fn new(pawn: Arc<dyn OfferHandler>) -> Self {
        Self { pawn }
    }

    pub fn route(&self, offer: &Offer) -> Answer {
        match &offer.kind {
            RequestKind::Pawn => self.pawn.handle_offer(offer),
            RequestKind::Unsupported(code) => {
                tracing::debug!(code = %code, "Unsupported request kind");
                Answer::reject()
            }
        }
    }

    /// Current holdings of the pawn handler, for logging.
    pub fn holdings(&self) -> String {
        self.pawn.to_string()
    }
}
