//! Line entry model
//!
//! One service or area row inside a costing group. The variant is fixed when the entry is
//! created from a catalog entry and decides which inputs exist.

use qp_core::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{ServiceCatalogEntry, ServiceType};

/// Variant-specific valuation inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// Subtotal is `hours × hourly_cost`
    Area { hours: Decimal, hourly_cost: Decimal },
    /// Subtotal is `quantity × unit_price`
    Servicio { quantity: Decimal, unit_price: Decimal },
    /// Declared by the catalog, never valuated
    Otros,
}

impl EntryKind {
    /// Zeroed inputs for a catalog type
    pub fn blank(service_type: ServiceType) -> Self {
        match service_type {
            ServiceType::Area => EntryKind::Area {
                hours: Decimal::ZERO,
                hourly_cost: Decimal::ZERO,
            },
            ServiceType::Servicio => EntryKind::Servicio {
                quantity: Decimal::ZERO,
                unit_price: Decimal::ZERO,
            },
            ServiceType::Otros => EntryKind::Otros,
        }
    }

    pub fn service_type(&self) -> ServiceType {
        match self {
            EntryKind::Area { .. } => ServiceType::Area,
            EntryKind::Servicio { .. } => ServiceType::Servicio,
            EntryKind::Otros => ServiceType::Otros,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEntry {
    /// Client-generated id, unique within the draft
    pub id: String,
    pub service_ref_id: Id,
    pub description: String,
    /// Derived by the valuator
    pub subtotal: Decimal,
    pub kind: EntryKind,
}

impl LineEntry {
    /// Blank entry linked to a catalog service
    pub fn for_service(id: impl Into<String>, service: &ServiceCatalogEntry) -> Self {
        Self {
            id: id.into(),
            service_ref_id: service.id,
            description: String::new(),
            subtotal: Decimal::ZERO,
            kind: EntryKind::blank(service.service_type),
        }
    }

    /// Area entry valued by the hour
    pub fn area(id: impl Into<String>, service_ref_id: Id, hours: Decimal, hourly_cost: Decimal) -> Self {
        Self {
            id: id.into(),
            service_ref_id,
            description: String::new(),
            subtotal: Decimal::ZERO,
            kind: EntryKind::Area { hours, hourly_cost },
        }
    }

    pub fn servicio(
        id: impl Into<String>,
        service_ref_id: Id,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            service_ref_id,
            description: String::new(),
            subtotal: Decimal::ZERO,
            kind: EntryKind::Servicio {
                quantity,
                unit_price,
            },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn service_type(&self) -> ServiceType {
        self.kind.service_type()
    }
}
