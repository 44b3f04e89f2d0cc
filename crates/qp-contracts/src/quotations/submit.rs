//! Submit contract for quotations

use qp_core::error::ValidationErrors;
use qp_models::{QuotationDraft, ServiceCatalog};

use super::base::QuotationBaseContract;
use crate::base::{Contract, ValidationResult};

/// Contract run before a quotation is sent
pub struct QuotationContract<'a> {
    base: QuotationBaseContract,
    catalog: Option<&'a ServiceCatalog>,
}

impl<'a> QuotationContract<'a> {
    /// Field rules only
    pub fn new() -> Self {
        Self {
            base: QuotationBaseContract::new(),
            catalog: None,
        }
    }

    /// Field rules plus service references checked against the catalog
    pub fn with_catalog(catalog: &'a ServiceCatalog) -> Self {
        Self {
            base: QuotationBaseContract::new(),
            catalog: Some(catalog),
        }
    }

    /// Every entry must reference an existing service of the same type
    fn validate_references(
        &self,
        catalog: &ServiceCatalog,
        draft: &QuotationDraft,
        errors: &mut ValidationErrors,
    ) {
        for (c_index, costing) in draft.costings.iter().enumerate() {
            for (e_index, entry) in costing.entries.iter().enumerate() {
                let field = format!("cotizaciones.{}.servicios.{}.servicioId", c_index, e_index);
                match catalog.get(entry.service_ref_id) {
                    None => errors.add(field, "does not reference a known service"),
                    Some(service) if service.service_type != entry.service_type() => errors.add(
                        format!("cotizaciones.{}.servicios.{}.tipo", c_index, e_index),
                        format!("must be {}", service.service_type),
                    ),
                    Some(_) => {}
                }
            }
        }
    }
}

impl Default for QuotationContract<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Contract<QuotationDraft> for QuotationContract<'_> {
    fn validate(&self, draft: &QuotationDraft) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(base_errors) = self.base.validate(draft) {
            errors.merge(base_errors);
        }

        if let Some(catalog) = self.catalog {
            self.validate_references(catalog, draft, &mut errors);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qp_models::{CostingGroup, LineEntry, ServiceCatalogEntry, ServiceType};
    use rust_decimal::Decimal;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::from(vec![
            ServiceCatalogEntry::new(1, "Ingeniería", ServiceType::Area),
            ServiceCatalogEntry::new(2, "Equipos", ServiceType::Servicio),
        ])
    }

    fn draft_with(entry: LineEntry) -> QuotationDraft {
        QuotationDraft::new()
            .with_subject("Mantenimiento")
            .with_client(3)
            .with_dates("2024-01-01", "2024-01-10")
            .with_costing(
                CostingGroup::new("c1")
                    .with_description("Tablero")
                    .with_entry(entry.with_description("Detalle")),
            )
    }

    #[test]
    fn test_known_reference_passes() {
        let catalog = catalog();
        let contract = QuotationContract::with_catalog(&catalog);
        let draft = draft_with(LineEntry::servicio("e1", 2, Decimal::ONE, Decimal::TEN));
        assert!(contract.validate(&draft).is_ok());
    }

    #[test]
    fn test_unknown_reference_fails() {
        let catalog = catalog();
        let contract = QuotationContract::with_catalog(&catalog);
        let draft = draft_with(LineEntry::servicio("e1", 42, Decimal::ONE, Decimal::TEN));

        let errors = contract.validate(&draft).unwrap_err();
        assert!(errors.has_error("cotizaciones.0.servicios.0.servicioId"));
    }

    #[test]
    fn test_type_mismatch_fails() {
        let catalog = catalog();
        let contract = QuotationContract::with_catalog(&catalog);
        let draft = draft_with(LineEntry::area("e1", 2, Decimal::ONE, Decimal::TEN));

        let errors = contract.validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("cotizaciones.0.servicios.0.tipo").unwrap()[0],
            "must be SERVICIO"
        );
    }

    #[test]
    fn test_without_catalog_skips_references() {
        let contract = QuotationContract::new();
        let draft = draft_with(LineEntry::servicio("e1", 42, Decimal::ONE, Decimal::TEN));
        assert!(contract.validate(&draft).is_ok());
    }
}
