//! Pricing core
//!
//! Bottom-up roll-up: entry subtotals, then costing group figures, then the quotation
//! total. Every pass recomputes everything from the leaf inputs.

mod costing;
mod quotation;
mod valuator;

pub use costing::{costing_figures, recompute_costing, CostingTotals};
pub use quotation::{recompute_quotation, QuotationTotals};
pub use valuator::valuate_entry;

use rust_decimal::Decimal;

/// General overhead markup on direct cost (GG, 10 %)
pub const OVERHEAD_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Profit markup on direct cost (utilidad, 30 %)
pub const PROFIT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);
