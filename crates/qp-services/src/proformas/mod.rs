//! Proforma services

mod pricing;
mod submit;

pub use pricing::{line_total, recompute_proforma, ProformaTotals};
pub use submit::SubmitProformaService;
