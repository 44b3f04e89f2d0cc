//! Base contract for proformas

use qp_core::error::ValidationErrors;
use qp_core::types::parse_instant;
use qp_models::{ProformaDraft, ProformaLine};
use rust_decimal::Decimal;

use crate::base::{path, validate_min, validate_present, Contract, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct ProformaContract;

impl ProformaContract {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_header(&self, proforma: &ProformaDraft, errors: &mut ValidationErrors) {
        validate_present(&proforma.subject, "asunto", errors);
        validate_present(&proforma.delivery_place, "lugar_entrega", errors);
        validate_present(&proforma.payment_terms, "forma_pago", errors);
        validate_present(&proforma.currency, "moneda", errors);

        validate_min(proforma.subtotal, Decimal::ZERO, "subtotal", errors);
        validate_min(proforma.discount, Decimal::ZERO, "descuento", errors);
        validate_min(proforma.sale_value, Decimal::ZERO, "valor_venta", errors);
        validate_min(proforma.igv, Decimal::ZERO, "igv", errors);
        validate_min(proforma.total_amount, Decimal::ZERO, "importe_total", errors);

        if proforma.client_id < 1 {
            errors.add("id_cliente", "must be selected");
        }
        if proforma.seller_id < 1 {
            errors.add("id_vendedor", "must be selected");
        }
    }

    /// Both dates present and parseable, delivery not before start
    pub fn validate_dates(&self, proforma: &ProformaDraft, errors: &mut ValidationErrors) {
        let start = self.parse_date(&proforma.start_date, "fecha_inicial", errors);
        let delivery = self.parse_date(&proforma.delivery_date, "fecha_entrega", errors);

        if let (Some(start), Some(delivery)) = (start, delivery) {
            if delivery < start {
                errors.add("fecha_entrega", "can't be before fecha_inicial");
            }
        }
    }

    fn parse_date(
        &self,
        raw: &str,
        field: &str,
        errors: &mut ValidationErrors,
    ) -> Option<chrono::DateTime<chrono::Utc>> {
        if raw.trim().is_empty() {
            errors.add(field, "can't be blank");
            return None;
        }
        let parsed = parse_instant(raw);
        if parsed.is_none() {
            errors.add(field, "is not a valid date");
        }
        parsed
    }

    pub fn validate_line(&self, prefix: &str, line: &ProformaLine, errors: &mut ValidationErrors) {
        validate_present(&line.description, &path(prefix, "descripcion"), errors);
        validate_present(&line.unit_of_measure, &path(prefix, "UM"), errors);

        if line.quantity < 1 {
            errors.add(path(prefix, "cantidad"), "must be greater than 0");
        }
        validate_min(line.unit_price, Decimal::ZERO, &path(prefix, "precio_unit"), errors);
        validate_min(line.discount, Decimal::ZERO, &path(prefix, "descuento"), errors);
        validate_min(line.total, Decimal::ZERO, &path(prefix, "total"), errors);

        for (index, include) in line.includes.iter().enumerate() {
            validate_present(
                &include.name,
                &path(prefix, &format!("incluye.{}.nombre", index)),
                errors,
            );
        }
    }
}

impl Contract<ProformaDraft> for ProformaContract {
    fn validate(&self, proforma: &ProformaDraft) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_header(proforma, &mut errors);
        self.validate_dates(proforma, &mut errors);

        if proforma.lines.is_empty() {
            errors.add("detalles", "must contain at least one line");
        }
        for (index, line) in proforma.lines.iter().enumerate() {
            self.validate_line(&format!("detalles.{}", index), line, &mut errors);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_proforma() -> ProformaDraft {
        ProformaDraft {
            subject: "Suministro".into(),
            delivery_place: "Lima".into(),
            payment_terms: "Contado".into(),
            currency: "PEN".into(),
            start_date: "2024-03-01".into(),
            delivery_date: "2024-03-15".into(),
            client_id: 4,
            seller_id: 2,
            lines: vec![ProformaLine::new("Cable", "m", 10, Decimal::new(25, 1))
                .with_include("Instalación")],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_proforma() {
        assert!(ProformaContract::new().validate(&valid_proforma()).is_ok());
    }

    #[test]
    fn test_requires_lines() {
        let mut proforma = valid_proforma();
        proforma.lines.clear();

        let errors = ProformaContract::new().validate(&proforma).unwrap_err();
        assert!(errors.has_error("detalles"));
    }

    #[test]
    fn test_delivery_before_start() {
        let mut proforma = valid_proforma();
        proforma.delivery_date = "2024-02-01".into();

        let errors = ProformaContract::new().validate(&proforma).unwrap_err();
        assert!(errors.has_error("fecha_entrega"));
    }

    #[test]
    fn test_invalid_date_and_seller() {
        let mut proforma = valid_proforma();
        proforma.start_date = "mañana".into();
        proforma.seller_id = 0;

        let errors = ProformaContract::new().validate(&proforma).unwrap_err();
        assert_eq!(errors.get("fecha_inicial").unwrap()[0], "is not a valid date");
        assert!(errors.has_error("id_vendedor"));
    }

    #[test]
    fn test_line_rules() {
        let mut proforma = valid_proforma();
        proforma.lines[0].quantity = 0;
        proforma.lines[0].unit_of_measure = String::new();
        proforma.lines[0].includes[0].name = " ".into();

        let errors = ProformaContract::new().validate(&proforma).unwrap_err();
        assert!(errors.has_error("detalles.0.cantidad"));
        assert!(errors.has_error("detalles.0.UM"));
        assert!(errors.has_error("detalles.0.incluye.0.nombre"));
    }
}
