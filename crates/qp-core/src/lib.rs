//! # qp-core
//!
//! Core types and utilities for quotation pricing.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Result type aliases
//! - Configuration types
//! - Form-boundary value helpers (decimal coercion, day ranges, rounding)

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::*;
pub use result::*;
pub use types::*;
