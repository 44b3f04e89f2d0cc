//! Proforma contracts

mod base;

pub use base::ProformaContract;
