//! Quotation aggregation

use qp_core::{add_amount, days_between, QpResult};
use qp_models::QuotationDraft;
use rust_decimal::Decimal;
use serde::Serialize;

use super::costing::recompute_costing;

/// Derived figures of a whole quotation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuotationTotals {
    pub total_price: Decimal,
    pub days: i64,
}

/// Recompute every costing group, then the quotation total and day count.
///
/// Runs on a working copy of the groups so a failing entry leaves the draft as it was.
pub fn recompute_quotation(draft: &mut QuotationDraft) -> QpResult<QuotationTotals> {
    let mut costings = draft.costings.clone();
    let mut total_price = Decimal::ZERO;
    for costing in &mut costings {
        total_price = add_amount(total_price, recompute_costing(costing)?.total_price, "precio_total")?;
    }

    let days = days_between(&draft.start_date, &draft.end_date);

    draft.costings = costings;
    draft.total_price = total_price;
    draft.days = days;

    Ok(QuotationTotals { total_price, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qp_core::QpError;
    use qp_models::{CostingGroup, EntryKind, LineEntry};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn draft() -> QuotationDraft {
        QuotationDraft::new()
            .with_dates("2024-01-01", "2024-01-10")
            .with_costing(
                CostingGroup::new("c1")
                    .with_entry(LineEntry::servicio("e1", 2, dec(3), dec(100))),
            )
            .with_costing(
                CostingGroup::new("c2")
                    .with_quantity(dec(2))
                    .with_entry(LineEntry::area("e2", 1, dec(10), Decimal::new(125, 1))),
            )
    }

    #[test]
    fn test_single_group_scenario() {
        let mut draft = QuotationDraft::new().with_costing(
            CostingGroup::new("c1").with_entry(LineEntry::servicio("e1", 2, dec(3), dec(100))),
        );

        let totals = recompute_quotation(&mut draft).unwrap();
        assert_eq!(totals.total_price, dec(420));
        assert_eq!(draft.total_price, dec(420));
        assert_eq!(draft.costings[0].unit_price, dec(420));
    }

    #[test]
    fn test_total_sums_groups() {
        let mut draft = draft();
        let totals = recompute_quotation(&mut draft).unwrap();

        // c2: 125 direct, 175 unit, 350 total
        assert_eq!(draft.costings[1].total_price, dec(350));
        assert_eq!(totals.total_price, dec(770));
        assert_eq!(totals.days, 9);
        assert_eq!(draft.days, 9);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut draft = draft();
        recompute_quotation(&mut draft).unwrap();
        let first = draft.clone();

        recompute_quotation(&mut draft).unwrap();
        assert_eq!(draft, first);
        assert_eq!(
            serde_json::to_string(&draft).unwrap(),
            serde_json::to_string(&first).unwrap()
        );
    }

    #[test]
    fn test_stale_derived_values_are_overwritten() {
        let mut draft = draft();
        draft.total_price = dec(99_999);
        draft.costings[0].direct_cost = dec(1);
        draft.costings[0].entries[0].subtotal = dec(7);

        recompute_quotation(&mut draft).unwrap();
        assert_eq!(draft.costings[0].entries[0].subtotal, dec(300));
        assert_eq!(draft.costings[0].direct_cost, dec(300));
        assert_eq!(draft.total_price, dec(770));
    }

    #[test]
    fn test_empty_draft() {
        let mut draft = QuotationDraft::new();
        let totals = recompute_quotation(&mut draft).unwrap();
        assert_eq!(totals, QuotationTotals::default());
    }

    #[test]
    fn test_invalid_dates_give_zero_days() {
        let mut draft = draft().with_dates("not a date", "2024-01-10");
        assert_eq!(recompute_quotation(&mut draft).unwrap().days, 0);

        let mut draft = draft.with_dates("2024-01-10", "2024-01-01");
        assert_eq!(recompute_quotation(&mut draft).unwrap().days, 0);
    }

    #[test]
    fn test_total_overflow_keeps_draft_unchanged() {
        let big = Decimal::MAX / Decimal::from(2);
        let group = |id: &str| {
            CostingGroup::new(id).with_entry(LineEntry::servicio(format!("{id}-e"), 2, big / Decimal::new(14, 1), Decimal::ONE))
        };
        let mut draft = QuotationDraft::new()
            .with_costing(group("c1"))
            .with_costing(group("c2"))
            .with_costing(group("c3"));
        let before = draft.clone();

        let err = recompute_quotation(&mut draft).unwrap_err();
        assert!(matches!(err, QpError::Overflow { field: "precio_total" }));
        assert_eq!(draft, before);
    }

    #[test]
    fn test_failure_keeps_draft_unchanged() {
        let mut draft = draft();
        recompute_quotation(&mut draft).unwrap();
        draft.costings[1].entries[0].kind = EntryKind::Otros;
        let before = draft.clone();

        assert!(recompute_quotation(&mut draft).is_err());
        assert_eq!(draft, before);
    }
}
