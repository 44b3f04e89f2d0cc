//! # qp-contracts
//!
//! Contract validation for quotation pricing.
//!
//! Contracts validate a draft right before it is submitted. Field errors are keyed by
//! the dotted path of the submission document (`cotizaciones.0.servicios.1.horas`).

pub mod base;
pub mod proformas;
pub mod quotations;

pub use base::*;
