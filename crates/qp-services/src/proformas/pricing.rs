//! Proforma totals
//!
//! Line totals, then subtotal, sales value, IGV and the final amount. The header discount
//! is carried on the proforma but not applied. An over-discounted line keeps its negative
//! total so the proforma contract can reject it.

use qp_core::{add_amount, days_between, mul_amount, sub_amount, sum_amounts, QpResult};
use qp_models::{ProformaDraft, ProformaLine};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProformaTotals {
    pub subtotal: Decimal,
    pub sale_value: Decimal,
    pub igv: Decimal,
    pub total_amount: Decimal,
    pub days: i64,
}

/// `quantity × unit_price − discount`
pub fn line_total(line: &ProformaLine) -> QpResult<Decimal> {
    let gross = mul_amount(Decimal::from(line.quantity), line.unit_price, "total")?;
    sub_amount(gross, line.discount, "total")
}

/// Recompute every line total and the header figures in place.
///
/// Nothing is written when an amount is out of range.
pub fn recompute_proforma(proforma: &mut ProformaDraft, igv_rate: Decimal) -> QpResult<ProformaTotals> {
    let line_totals = proforma
        .lines
        .iter()
        .map(line_total)
        .collect::<QpResult<Vec<_>>>()?;

    let subtotal = sum_amounts(line_totals.iter().copied(), "subtotal")?;
    let sale_value = subtotal;
    let igv = mul_amount(subtotal, igv_rate, "igv")?;
    let totals = ProformaTotals {
        subtotal,
        sale_value,
        igv,
        total_amount: add_amount(sale_value, igv, "importe_total")?,
        days: days_between(&proforma.start_date, &proforma.delivery_date),
    };

    for (line, total) in proforma.lines.iter_mut().zip(line_totals) {
        line.total = total;
    }
    proforma.subtotal = totals.subtotal;
    proforma.sale_value = totals.sale_value;
    proforma.igv = totals.igv;
    proforma.total_amount = totals.total_amount;
    proforma.days = totals.days;

    Ok(totals)
}
