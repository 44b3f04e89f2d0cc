//! Recompute notifications

use crate::pricing::QuotationTotals;

/// Subscriber notified after every completed recompute pass
#[cfg_attr(test, mockall::automock)]
pub trait DraftObserver {
    fn on_recomputed(&self, totals: &QuotationTotals);
}
