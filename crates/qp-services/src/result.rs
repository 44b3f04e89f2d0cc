//! Outcome of a submit service
//!
//! Either the value ready to send or the contract messages explaining why it is not.

use qp_core::error::{QpError, ValidationErrors};
use qp_core::result::{QpResult, ValidationResult};

/// Value produced by a service together with the errors that blocked it
#[derive(Debug)]
pub struct ServiceResult<T> {
    /// Whether the service succeeded
    success: bool,
    /// Produced value, empty on failure or once taken
    result: Option<T>,
    /// Field and base errors, empty on success
    errors: ValidationErrors,
}

impl<T> ServiceResult<T> {
    /// Successful outcome carrying `result`
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
        }
    }

    /// Failed outcome with the contract errors
    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }

    /// Failure not tied to a document field (an entry that cannot be valuated)
    pub fn failure_with_base_error(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    /// Keep `value` when the contract passed
    pub fn validated(value: T, validation: ValidationResult) -> Self {
        match validation {
            Ok(()) => Self::success(value),
            Err(errors) => Self::failure(errors),
        }
    }

    /// Whether the service succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Whether the service failed
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Borrow the produced value, if any
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Move the value out, leaving `None` behind
    pub fn take_result(&mut self) -> Option<T> {
        self.result.take()
    }

    /// Errors collected by the service
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Messages as `"<field path> <message>"`, base messages first
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.full_messages()
    }

    /// Convert into a `QpResult`
    ///
    /// Failures become `QpError::Validation`. A success whose value was already taken is an
    /// internal error.
    pub fn into_result(self) -> QpResult<T> {
        match (self.success, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(QpError::Internal("result already taken".into())),
            (false, _) => Err(QpError::Validation(self.errors)),
        }
    }
}

impl<T> From<QpResult<T>> for ServiceResult<T> {
    fn from(result: QpResult<T>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(QpError::Validation(errors)) => ServiceResult::failure(errors),
            Err(e) => ServiceResult::failure_with_base_error(e.to_string()),
        }
    }
}
