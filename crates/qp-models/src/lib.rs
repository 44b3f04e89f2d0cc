//! # qp-models
//!
//! Domain models for quotation pricing.
//!
//! A quotation draft holds costing groups; each costing group holds line entries whose
//! variant is picked from the service catalog. Derived figures live on the models and are
//! written by the pricing services in `qp-services`.

pub mod catalog;
pub mod costing;
pub mod document;
pub mod ids;
pub mod line_entry;
pub mod proforma;
pub mod quotation;

// Re-exports for convenience
pub use catalog::{ServiceCatalog, ServiceCatalogEntry, ServiceType};
pub use costing::CostingGroup;
pub use document::{CostingDocument, EntryDocument, QuotationDocument};
pub use line_entry::{EntryKind, LineEntry};
pub use proforma::{ProformaDraft, ProformaInclude, ProformaLine};
pub use quotation::QuotationDraft;
