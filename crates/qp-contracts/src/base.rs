//! Base contract system

use qp_core::error::ValidationErrors;
use rust_decimal::Decimal;

pub use qp_core::result::ValidationResult;

/// Base contract trait
pub trait Contract<T> {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Presence check for required text
pub fn validate_present(value: &str, field: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    }
}

/// Lower bound check for amounts
pub fn validate_min(value: Decimal, min: Decimal, field: &str, errors: &mut ValidationErrors) {
    if value < min {
        errors.add(field, format!("must be greater than or equal to {}", min));
    }
}

/// Nested field path (`cotizaciones.0.servicios`)
pub fn path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_present() {
        let mut errors = ValidationErrors::new();
        validate_present("  ", "descripcion", &mut errors);
        validate_present("ok", "asunto", &mut errors);
        assert!(errors.has_error("descripcion"));
        assert!(!errors.has_error("asunto"));
    }

    #[test]
    fn test_validate_min() {
        let mut errors = ValidationErrors::new();
        validate_min(Decimal::NEGATIVE_ONE, Decimal::ZERO, "gg", &mut errors);
        validate_min(Decimal::ZERO, Decimal::ZERO, "utilidad", &mut errors);
        assert_eq!(
            errors.get("gg").unwrap()[0],
            "must be greater than or equal to 0"
        );
        assert!(!errors.has_error("utilidad"));
    }

    #[test]
    fn test_path() {
        assert_eq!(path("", "dias"), "dias");
        assert_eq!(path("cotizaciones.0", "cantidad"), "cotizaciones.0.cantidad");
    }
}
