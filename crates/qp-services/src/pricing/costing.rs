//! Costing group aggregation

use qp_core::{add_amount, mul_amount, sum_amounts, QpResult};
use qp_models::CostingGroup;
use rust_decimal::Decimal;
use serde::Serialize;

use super::valuator::valuate_entry;
use super::{OVERHEAD_RATE, PROFIT_RATE};

/// Derived figures of one costing group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostingTotals {
    pub direct_cost: Decimal,
    /// GG
    pub overhead: Decimal,
    /// Utilidad
    pub profit: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Figures for a set of entry subtotals and a costing quantity.
///
/// The unit price is final before the total price reads it. Amounts beyond the decimal
/// range fail with `Overflow`.
pub fn costing_figures(
    subtotals: impl IntoIterator<Item = Decimal>,
    quantity: Decimal,
) -> QpResult<CostingTotals> {
    let direct_cost = sum_amounts(subtotals, "costo_directo")?;
    let overhead = mul_amount(direct_cost, OVERHEAD_RATE, "gg")?;
    let profit = mul_amount(direct_cost, PROFIT_RATE, "utilidad")?;
    let unit_price = add_amount(add_amount(direct_cost, overhead, "precio_unit")?, profit, "precio_unit")?;

    Ok(CostingTotals {
        direct_cost,
        overhead,
        profit,
        unit_price,
        total_price: mul_amount(quantity, unit_price, "precio_total")?,
    })
}

/// Valuate every entry of the group and write back subtotals and group figures.
///
/// Nothing is written when an entry cannot be valuated or a figure is out of range.
pub fn recompute_costing(costing: &mut CostingGroup) -> QpResult<CostingTotals> {
    let subtotals = costing
        .entries
        .iter()
        .map(valuate_entry)
        .collect::<QpResult<Vec<_>>>()?;
    let totals = costing_figures(subtotals.iter().copied(), costing.quantity)?;

    for (entry, subtotal) in costing.entries.iter_mut().zip(&subtotals) {
        entry.subtotal = *subtotal;
    }
    costing.direct_cost = totals.direct_cost;
    costing.overhead = totals.overhead;
    costing.profit = totals.profit;
    costing.unit_price = totals.unit_price;
    costing.total_price = totals.total_price;

    Ok(totals)
}
