//! # qp-services
//!
//! Pricing logic for quotation pricing.
//!
//! - `pricing`: pure valuation and roll-up of entries, costing groups and quotations
//! - `quotations`: the editing session that recomputes after every mutation, plus the
//!   load and submit services
//! - `proformas`: proforma totals and submit service
//! - `worker`: optional background recompute over a request/response channel

pub mod pricing;
pub mod proformas;
pub mod quotations;
pub mod result;
pub mod worker;

pub use result::ServiceResult;
