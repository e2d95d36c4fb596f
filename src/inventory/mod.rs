//! Matching store subsystem.
//!
//! # Data Flow
//! ```text
//! Validated Offer
//!     → store.rs (lock, fast reject against cached minimum)
//!     → full scan for the cheapest unit in [demand, offer)
//!     → swap, rescan minimum only if the minimum slot was replaced
//!     → Answer (ACCEPT with the released value, or REJECT)
//! ```
//!
//! # Design Decisions
//! - Fixed capacity, fixed at construction
//! - Items and cached minimum change together inside one critical section
//! - The cheap rejection path never scans

pub mod store;

pub use store::{Inventory, InventoryError, InventorySnapshot, DEFAULT_ITEM_VALUE};
