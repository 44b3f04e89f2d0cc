//! Submission document for quotations
//!
//! The JSON shape posted to (and read back from) the `cotizaciones` resource. Entries are
//! flattened: inputs that do not belong to an entry's variant travel as 0.

use qp_core::{Id, QpError, QpResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{ServiceCatalog, ServiceType};
use crate::costing::CostingGroup;
use crate::line_entry::{EntryKind, LineEntry};
use crate::quotation::QuotationDraft;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub descripcion: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub precio_total: Decimal,
    pub fecha_inicial: String,
    pub fecha_final: String,
    pub id_cliente: Id,
    #[serde(default)]
    pub dias: i64,
    #[serde(default)]
    pub cotizaciones: Vec<CostingDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostingDocument {
    pub id: String,
    pub descripcion: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cantidad: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub costo_directo: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub utilidad: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub gg: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub precio_unit: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub precio_total: Decimal,
    #[serde(default)]
    pub servicios: Vec<EntryDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDocument {
    pub id: String,
    #[serde(rename = "servicioId")]
    pub servicio_id: Id,
    pub descripcion: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub tipo: ServiceType,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub horas: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub costo: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cantidad: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub precio_unit: Decimal,
}

impl From<&LineEntry> for EntryDocument {
    fn from(entry: &LineEntry) -> Self {
        let (horas, costo, cantidad, precio_unit) = match &entry.kind {
            EntryKind::Area { hours, hourly_cost } => (*hours, *hourly_cost, Decimal::ZERO, Decimal::ZERO),
            EntryKind::Servicio {
                quantity,
                unit_price,
            } => (Decimal::ZERO, Decimal::ZERO, *quantity, *unit_price),
            EntryKind::Otros => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        };

        Self {
            id: entry.id.clone(),
            servicio_id: entry.service_ref_id,
            descripcion: entry.description.clone(),
            subtotal: entry.subtotal,
            tipo: entry.service_type(),
            horas,
            costo,
            cantidad,
            precio_unit,
        }
    }
}

impl From<&EntryDocument> for LineEntry {
    fn from(doc: &EntryDocument) -> Self {
        let kind = match doc.tipo {
            ServiceType::Area => EntryKind::Area {
                hours: doc.horas,
                hourly_cost: doc.costo,
            },
            ServiceType::Servicio => EntryKind::Servicio {
                quantity: doc.cantidad,
                unit_price: doc.precio_unit,
            },
            ServiceType::Otros => EntryKind::Otros,
        };

        Self {
            id: doc.id.clone(),
            service_ref_id: doc.servicio_id,
            description: doc.descripcion.clone(),
            subtotal: doc.subtotal,
            kind,
        }
    }
}

impl From<&CostingGroup> for CostingDocument {
    fn from(costing: &CostingGroup) -> Self {
        Self {
            id: costing.id.clone(),
            descripcion: costing.description.clone(),
            cantidad: costing.quantity,
            costo_directo: costing.direct_cost,
            utilidad: costing.profit,
            gg: costing.overhead,
            precio_unit: costing.unit_price,
            precio_total: costing.total_price,
            servicios: costing.entries.iter().map(EntryDocument::from).collect(),
        }
    }
}

impl From<&CostingDocument> for CostingGroup {
    fn from(doc: &CostingDocument) -> Self {
        Self {
            id: doc.id.clone(),
            description: doc.descripcion.clone(),
            quantity: doc.cantidad,
            direct_cost: doc.costo_directo,
            overhead: doc.gg,
            profit: doc.utilidad,
            unit_price: doc.precio_unit,
            total_price: doc.precio_total,
            entries: doc.servicios.iter().map(LineEntry::from).collect(),
        }
    }
}

impl From<&QuotationDraft> for QuotationDocument {
    fn from(draft: &QuotationDraft) -> Self {
        Self {
            id: draft.id,
            descripcion: draft.subject.clone(),
            precio_total: draft.total_price,
            fecha_inicial: draft.start_date.clone(),
            fecha_final: draft.end_date.clone(),
            id_cliente: draft.client_id,
            dias: draft.days,
            cotizaciones: draft.costings.iter().map(CostingDocument::from).collect(),
        }
    }
}

impl From<&QuotationDocument> for QuotationDraft {
    fn from(doc: &QuotationDocument) -> Self {
        Self {
            id: doc.id,
            subject: doc.descripcion.clone(),
            client_id: doc.id_cliente,
            start_date: doc.fecha_inicial.clone(),
            end_date: doc.fecha_final.clone(),
            days: doc.dias,
            total_price: doc.precio_total,
            costings: doc.cotizaciones.iter().map(CostingGroup::from).collect(),
        }
    }
}

impl QuotationDocument {
    /// Rebuild a draft, checking every entry against the catalog.
    ///
    /// Fails with `NotFound` for unknown services and `CatalogMismatch` when `tipo`
    /// disagrees with the catalog entry.
    pub fn into_draft(&self, catalog: &ServiceCatalog) -> QpResult<QuotationDraft> {
        for entry in self.cotizaciones.iter().flat_map(|c| c.servicios.iter()) {
            let service = catalog.require(entry.servicio_id)?;
            if service.service_type != entry.tipo {
                return Err(QpError::CatalogMismatch {
                    service_id: entry.servicio_id,
                    expected: service.service_type.to_string(),
                    found: entry.tipo.to_string(),
                });
            }
        }
        Ok(QuotationDraft::from(self))
    }
}
