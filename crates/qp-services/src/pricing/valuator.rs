//! Line entry valuation

use qp_core::{mul_amount, QpError, QpResult};
use qp_models::{EntryKind, LineEntry};
use rust_decimal::Decimal;

/// Subtotal of one entry from its variant inputs.
///
/// OTROS entries have no valuation rule and fail with `UnsupportedVariant`. Products
/// beyond the decimal range fail with `Overflow`.
pub fn valuate_entry(entry: &LineEntry) -> QpResult<Decimal> {
    match &entry.kind {
        EntryKind::Area { hours, hourly_cost } => mul_amount(*hours, *hourly_cost, "subtotal"),
        EntryKind::Servicio {
            quantity,
            unit_price,
        } => mul_amount(*quantity, *unit_price, "subtotal"),
        EntryKind::Otros => Err(QpError::UnsupportedVariant {
            variant: entry.service_type().to_string(),
        }),
    }
}
