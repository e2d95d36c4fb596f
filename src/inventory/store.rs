//! Fixed-size inventory with a cached minimum.

use std::fmt;
use std::sync::Mutex;

use thiserror::Error;

use crate::handler::OfferHandler;
use crate::observability::metrics;
use crate::protocol::{Answer, Offer};

/// Value every slot holds when the inventory is created.
pub const DEFAULT_ITEM_VALUE: i64 = 1;

/// Errors raised while building an inventory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("inventory size must be at least 1")]
    Empty,
}

/// Items plus the cached position of the smallest one.
///
/// Only ever touched while the owning [`Inventory`] holds its lock.
#[derive(Debug)]
struct Holdings {
    items: Vec<i64>,
    smallest_value: i64,
    smallest_index: usize,
}

impl Holdings {
    /// Pick the slot to give away for `offer`.
    ///
    /// The cheapest item that still satisfies the demand and is strictly
    /// below the offer. Ties go to the lowest index.
    fn most_profitable(&self, offer: &Offer) -> Option<usize> {
        if offer.offer <= self.smallest_value {
            return None;
        }

        let mut best: Option<(usize, i64)> = None;
        for (idx, &item) in self.items.iter().enumerate() {
            if item < offer.demand || item >= offer.offer {
                continue;
            }
            match best {
                Some((_, value)) if item >= value => {}
                _ => best = Some((idx, item)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    fn rescan_smallest(&mut self) {
        let (idx, value) = first_minimum(&self.items);
        self.smallest_index = idx;
        self.smallest_value = value;
    }
}

impl fmt::Display for Holdings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

/// First index holding the smallest value. `items` must not be empty.
fn first_minimum(items: &[i64]) -> (usize, i64) {
    let mut idx = 0;
    let mut value = items[0];
    for (j, &item) in items.iter().enumerate().skip(1) {
        if item < value {
            value = item;
            idx = j;
        }
    }
    (idx, value)
}

/// Point-in-time copy of an inventory's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    pub items: Vec<i64>,
    pub smallest_value: i64,
    pub smallest_index: usize,
}

/// A thread-safe inventory of unit values.
///
/// Accepts an offer only when handing back one of its items is strictly
/// profitable and the item satisfies the caller's demand.
#[derive(Debug)]
pub struct Inventory {
    holdings: Mutex<Holdings>,
}

impl Inventory {
    /// Create an inventory of `size` items, all worth [`DEFAULT_ITEM_VALUE`].
    pub fn new(size: usize) -> Result<Self, InventoryError> {
        Self::from_items(vec![DEFAULT_ITEM_VALUE; size])
    }

    /// Create an inventory seeded with explicit values.
    pub fn from_items(items: Vec<i64>) -> Result<Self, InventoryError> {
        if items.is_empty() {
            return Err(InventoryError::Empty);
        }
        let (smallest_index, smallest_value) = first_minimum(&items);
        metrics::record_inventory_min(smallest_value);

        Ok(Self {
            holdings: Mutex::new(Holdings {
                items,
                smallest_value,
                smallest_index,
            }),
        })
    }

    /// Number of slots. Never changes.
    pub fn len(&self) -> usize {
        self.holdings.lock().expect("inventory mutex poisoned").items.len()
    }

    /// Always false; an inventory cannot be built empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        let holdings = self.holdings.lock().expect("inventory mutex poisoned");
        InventorySnapshot {
            items: holdings.items.clone(),
            smallest_value: holdings.smallest_value,
            smallest_index: holdings.smallest_index,
        }
    }
}

impl OfferHandler for Inventory {
    fn handle_offer(&self, offer: &Offer) -> Answer {
        let mut holdings = self.holdings.lock().expect("inventory mutex poisoned");

        let Some(idx) = holdings.most_profitable(offer) else {
            let smallest_value = holdings.smallest_value;
            drop(holdings);

            tracing::debug!(
                offer = offer.offer,
                demand = offer.demand,
                smallest_value,
                "Offer is not profitable for the inventory"
            );
            tracing::info!(inventory = %self, "Inventory after handling offer");
            return Answer::reject();
        };

        let released = holdings.items[idx];
        holdings.items[idx] = offer.offer;

        if idx == holdings.smallest_index {
            holdings.rescan_smallest();
            metrics::record_inventory_min(holdings.smallest_value);
        }
        drop(holdings);

        // Rendered after unlocking, so a concurrent exchange may already show.
        tracing::info!(
            slot = idx,
            released,
            inventory = %self,
            "Inventory after handling offer"
        );
        Answer::accept(released)
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let holdings = self.holdings.lock().expect("inventory mutex poisoned");
        fmt::Display::fmt(&*holdings, f)
    }
}
