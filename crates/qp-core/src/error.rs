//! Core error types for quotation pricing
//!
//! Operation failures of the pricing core and field messages collected by contracts.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Core error type for all pricing operations
#[derive(Error, Debug)]
pub enum QpError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unsupported line entry variant: {variant}")]
    UnsupportedVariant { variant: String },

    #[error("Catalog mismatch for service {service_id}: expected {expected}, found {found}")]
    CatalogMismatch {
        service_id: i64,
        expected: String,
        found: String,
    },

    #[error("Field {field} does not apply to {variant} entries")]
    FieldNotApplicable {
        field: &'static str,
        variant: String,
    },

    #[error("Amount out of range while computing {field}")]
    Overflow { field: &'static str },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pricing worker unavailable: {0}")]
    WorkerUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QpError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        QpError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            QpError::NotFound { .. } => "not_found",
            QpError::UnsupportedVariant { .. } => "unsupported_variant",
            QpError::CatalogMismatch { .. } => "catalog_mismatch",
            QpError::FieldNotApplicable { .. } => "field_not_applicable",
            QpError::Overflow { .. } => "overflow",
            QpError::Validation(_) => "validation_failed",
            QpError::Config(_) => "configuration_error",
            QpError::WorkerUnavailable(_) => "worker_unavailable",
            QpError::Internal(_) => "internal_error",
        }
    }
}

/// Messages collected by a contract, keyed by the dotted path of the submitted document
/// (`cotizaciones.0.servicios.1.horas`)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    /// Field-specific errors: field path -> messages
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
