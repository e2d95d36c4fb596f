//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Decoded Offer (kind, offer, demand)
//!     → router.rs (match on kind)
//!     → PAWN: pawn shop (policy, then inventory)
//!     → anything else: REJECT, nothing else touched
//! ```
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Explicit rejection rather than a silent default handler
//! - New request kinds extend the match, not the matching algorithm

pub mod router;

pub use router::Router;
