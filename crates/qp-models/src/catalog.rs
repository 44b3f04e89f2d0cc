//! Service catalog model
//!
//! Read-only entries supplied by the catalog listing (`servicios`). Pricing only reads the
//! type tag, to pick a line entry variant, and the id, to link entries.

use std::collections::BTreeMap;
use std::fmt;

use qp_core::{Id, QpError, QpResult};
use serde::{Deserialize, Serialize};

/// Catalog type tag deciding which valuation formula a line entry uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceType {
    /// Billed by hours worked
    Area,
    /// Billed by quantity
    Servicio,
    Otros,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Area => "AREA",
            ServiceType::Servicio => "SERVICIO",
            ServiceType::Otros => "OTROS",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the service catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceCatalogEntry {
    pub id: Id,

    #[serde(rename = "nombre", alias = "name")]
    pub name: String,

    #[serde(rename = "tipo", alias = "type")]
    pub service_type: ServiceType,
}

impl ServiceCatalogEntry {
    pub fn new(id: Id, name: impl Into<String>, service_type: ServiceType) -> Self {
        Self {
            id,
            name: name.into(),
            service_type,
        }
    }
}

/// Id-indexed lookup over catalog entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ServiceCatalogEntry>", into = "Vec<ServiceCatalogEntry>")]
pub struct ServiceCatalog {
    entries: BTreeMap<Id, ServiceCatalogEntry>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ServiceCatalogEntry) {
        self.entries.insert(entry.id, entry);
    }

    pub fn get(&self, id: Id) -> Option<&ServiceCatalogEntry> {
        self.entries.get(&id)
    }

    /// Look up an entry, failing with `NotFound` for unknown ids
    pub fn require(&self, id: Id) -> QpResult<&ServiceCatalogEntry> {
        self.get(id)
            .ok_or_else(|| QpError::not_found("service", "id", id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceCatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ServiceCatalogEntry>> for ServiceCatalog {
    fn from(entries: Vec<ServiceCatalogEntry>) -> Self {
        let mut catalog = ServiceCatalog::new();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }
}

impl From<ServiceCatalog> for Vec<ServiceCatalogEntry> {
    fn from(catalog: ServiceCatalog) -> Self {
        catalog.entries.into_values().collect()
    }
}
