//! Base contract for quotations

use qp_core::error::ValidationErrors;
use qp_models::{CostingGroup, EntryKind, LineEntry, QuotationDraft};
use rust_decimal::Decimal;

use crate::base::{path, validate_min, validate_present, Contract, ValidationResult};

/// Field rules shared by every quotation submission
#[derive(Debug, Default, Clone, Copy)]
pub struct QuotationBaseContract;

impl QuotationBaseContract {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_header(&self, draft: &QuotationDraft, errors: &mut ValidationErrors) {
        validate_present(&draft.subject, "descripcion", errors);
        validate_present(&draft.start_date, "fecha_inicial", errors);
        validate_present(&draft.end_date, "fecha_final", errors);
        validate_min(draft.total_price, Decimal::ZERO, "precio_total", errors);

        if draft.client_id <= 0 {
            errors.add("id_cliente", "must be selected");
        }
        if draft.days < 0 {
            errors.add("dias", "must be greater than or equal to 0");
        }
    }

    pub fn validate_costing(&self, prefix: &str, costing: &CostingGroup, errors: &mut ValidationErrors) {
        validate_present(&costing.id, &path(prefix, "id"), errors);
        validate_present(&costing.description, &path(prefix, "descripcion"), errors);
        validate_min(costing.quantity, Decimal::ONE, &path(prefix, "cantidad"), errors);
        validate_min(costing.direct_cost, Decimal::ZERO, &path(prefix, "costo_directo"), errors);
        validate_min(costing.profit, Decimal::ZERO, &path(prefix, "utilidad"), errors);
        validate_min(costing.overhead, Decimal::ZERO, &path(prefix, "gg"), errors);
        validate_min(costing.unit_price, Decimal::ZERO, &path(prefix, "precio_unit"), errors);
        validate_min(costing.total_price, Decimal::ZERO, &path(prefix, "precio_total"), errors);

        for (index, entry) in costing.entries.iter().enumerate() {
            let entry_prefix = path(prefix, &format!("servicios.{}", index));
            self.validate_entry(&entry_prefix, entry, errors);
        }
    }

    pub fn validate_entry(&self, prefix: &str, entry: &LineEntry, errors: &mut ValidationErrors) {
        validate_present(&entry.id, &path(prefix, "id"), errors);
        validate_present(&entry.description, &path(prefix, "descripcion"), errors);
        validate_min(entry.subtotal, Decimal::ZERO, &path(prefix, "subtotal"), errors);

        if entry.service_ref_id <= 0 {
            errors.add(path(prefix, "servicioId"), "must be selected");
        }

        match &entry.kind {
            EntryKind::Area { hours, hourly_cost } => {
                validate_min(*hours, Decimal::ZERO, &path(prefix, "horas"), errors);
                validate_min(*hourly_cost, Decimal::ZERO, &path(prefix, "costo"), errors);
            }
            EntryKind::Servicio {
                quantity,
                unit_price,
            } => {
                validate_min(*quantity, Decimal::ZERO, &path(prefix, "cantidad"), errors);
                validate_min(*unit_price, Decimal::ZERO, &path(prefix, "precio_unit"), errors);
            }
            EntryKind::Otros => {}
        }
    }
}

impl Contract<QuotationDraft> for QuotationBaseContract {
    fn validate(&self, draft: &QuotationDraft) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_header(draft, &mut errors);

        if draft.costings.is_empty() {
            errors.add("cotizaciones", "must contain at least one costing");
        }
        for (index, costing) in draft.costings.iter().enumerate() {
            self.validate_costing(&format!("cotizaciones.{}", index), costing, &mut errors);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> QuotationDraft {
        QuotationDraft::new()
            .with_subject("Mantenimiento")
            .with_client(3)
            .with_dates("2024-01-01", "2024-01-10")
            .with_costing(
                CostingGroup::new("c1").with_description("Tablero").with_entry(
                    LineEntry::servicio("e1", 2, Decimal::from(3), Decimal::from(100))
                        .with_description("Grúa"),
                ),
            )
    }

    #[test]
    fn test_valid_draft() {
        assert!(QuotationBaseContract::new().validate(&valid_draft()).is_ok());
    }

    #[test]
    fn test_blank_header_fields() {
        let draft = QuotationDraft::new();
        let errors = QuotationBaseContract::new().validate(&draft).unwrap_err();

        assert!(errors.has_error("descripcion"));
        assert!(errors.has_error("fecha_inicial"));
        assert!(errors.has_error("fecha_final"));
        assert!(errors.has_error("id_cliente"));
    }

    #[test]
    fn test_requires_a_costing() {
        let mut draft = valid_draft();
        draft.costings.clear();

        let errors = QuotationBaseContract::new().validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("cotizaciones").unwrap()[0],
            "must contain at least one costing"
        );
        assert!(!errors.has_error("descripcion"));
    }

    #[test]
    fn test_costing_quantity_minimum() {
        let mut draft = valid_draft();
        draft.costings[0].quantity = Decimal::ZERO;

        let errors = QuotationBaseContract::new().validate(&draft).unwrap_err();
        assert!(errors.has_error("cotizaciones.0.cantidad"));
    }

    #[test]
    fn test_negative_entry_inputs() {
        let mut draft = valid_draft();
        draft.costings[0].entries.push(
            LineEntry::area("e2", 1, Decimal::NEGATIVE_ONE, Decimal::from(10))
                .with_description("Ingeniero"),
        );

        let errors = QuotationBaseContract::new().validate(&draft).unwrap_err();
        assert!(errors.has_error("cotizaciones.0.servicios.1.horas"));
        assert!(!errors.has_error("cotizaciones.0.servicios.0.cantidad"));
    }
}
