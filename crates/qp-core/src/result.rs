//! Result type aliases

use crate::error::{QpError, ValidationErrors};

/// Standard Result type for pricing operations
pub type QpResult<T> = Result<T, QpError>;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;
