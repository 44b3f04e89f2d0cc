//! Load Service for Quotations
//!
//! Rebuilds an editing session from a stored document.

use qp_core::QpResult;
use qp_models::{QuotationDocument, ServiceCatalog};
use tracing::debug;

use super::session::QuotationSession;

pub struct LoadQuotationService<'a> {
    catalog: &'a ServiceCatalog,
}

impl<'a> LoadQuotationService<'a> {
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        Self { catalog }
    }

    /// Check references, rebuild the draft and recompute every derived value
    pub fn call(&self, document: &QuotationDocument) -> QpResult<QuotationSession> {
        debug!(quotation_id = ?document.id, costings = document.cotizaciones.len(), "loading quotation");
        let draft = document.into_draft(self.catalog)?;
        QuotationSession::with_draft(draft, self.catalog.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qp_core::QpError;
    use qp_models::{ServiceCatalogEntry, ServiceType};
    use rust_decimal::Decimal;

    const DOCUMENT: &str = r#"{
        "id": 12,
        "descripcion": "Mantenimiento",
        "precio_total": 1,
        "fecha_inicial": "2024-01-01",
        "fecha_final": "2024-01-03",
        "id_cliente": 3,
        "dias": 0,
        "cotizaciones": [{
            "id": "c1", "descripcion": "Tablero", "cantidad": 2,
            "costo_directo": 0, "utilidad": 0, "gg": 0, "precio_unit": 0, "precio_total": 0,
            "servicios": [
                {"id": "e1", "servicioId": 1, "descripcion": "Ingeniero", "subtotal": 0,
                 "tipo": "AREA", "horas": 8, "costo": 50, "cantidad": 0, "precio_unit": 0}
            ]
        }]
    }"#;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::from(vec![ServiceCatalogEntry::new(1, "Ingeniería", ServiceType::Area)])
    }

    #[test]
    fn test_load_recomputes_stale_figures() {
        let document: QuotationDocument = serde_json::from_str(DOCUMENT).unwrap();
        let catalog = catalog();
        let session = LoadQuotationService::new(&catalog).call(&document).unwrap();

        let draft = session.draft();
        assert_eq!(draft.id, Some(12));
        assert_eq!(draft.costings[0].direct_cost, Decimal::from(400));
        assert_eq!(draft.costings[0].unit_price, Decimal::from(560));
        assert_eq!(draft.total_price, Decimal::from(1120));
        assert_eq!(draft.days, 2);
    }

    #[test]
    fn test_load_rejects_unknown_service() {
        let document: QuotationDocument = serde_json::from_str(DOCUMENT).unwrap();
        let catalog = ServiceCatalog::new();

        assert!(matches!(
            LoadQuotationService::new(&catalog).call(&document),
            Err(QpError::NotFound { .. })
        ));
    }
}
