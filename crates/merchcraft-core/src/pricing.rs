//! Running price estimate.
//!
//! The price is kept as a ledger: it starts from the product's base price
//! and moves by a fixed surcharge every time an element is added or
//! removed. It is never recomputed from the scene; [`PriceLedger::reconcile`]
//! only reports what a recomputation would give so callers can detect drift.

use crate::elements::ElementKind;
use serde::{Deserialize, Serialize};

/// Whole currency units (rubles).
pub type Price = i64;

/// Surcharge for each placed image.
pub const IMAGE_SURCHARGE: Price = 50;
/// Surcharge for each placed text.
pub const TEXT_SURCHARGE: Price = 30;

/// Price delta associated with an element kind.
pub fn surcharge(kind: ElementKind) -> Price {
    match kind {
        ElementKind::Image => IMAGE_SURCHARGE,
        ElementKind::Text => TEXT_SURCHARGE,
    }
}

/// Format a price for display.
pub fn format_price(price: Price) -> String {
    format!("{price} ₽")
}

/// Incrementally maintained price total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLedger {
    base: Price,
    total: Price,
}

impl PriceLedger {
    /// Start a ledger at the given base price.
    pub fn new(base: Price) -> Self {
        Self { base, total: base }
    }

    /// Base price the ledger started from.
    pub fn base(&self) -> Price {
        self.base
    }

    /// Current running total.
    pub fn total(&self) -> Price {
        self.total
    }

    /// Record an added element.
    pub fn charge(&mut self, kind: ElementKind) {
        self.total += surcharge(kind);
    }

    /// Record a removed element.
    pub fn refund(&mut self, kind: ElementKind) {
        self.total -= surcharge(kind);
    }

    /// Total a full recomputation over `kinds` would produce.
    pub fn reconcile(&self, kinds: impl IntoIterator<Item = ElementKind>) -> Price {
        self.base + kinds.into_iter().map(surcharge).sum::<Price>()
    }

    /// Check the running total against a recomputation.
    pub fn is_consistent(&self, kinds: impl IntoIterator<Item = ElementKind>) -> bool {
        self.reconcile(kinds) == self.total
    }
}
