//! Value helpers applied at the form-to-model boundary

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::QpError;
use crate::result::QpResult;

/// Server-side primary key (clients, sellers, catalog services)
pub type Id = i64;

/// Milliseconds in one calendar day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Local date-time layouts accepted besides RFC 3339
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Coerce user-typed text into a decimal.
///
/// Blank, non-numeric, NaN and infinite input all become zero; no error is raised.
pub fn parse_decimal_or_zero(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// [`parse_decimal_or_zero`] with negative values clamped to zero.
pub fn parse_amount(input: &str) -> Decimal {
    parse_decimal_or_zero(input).max(Decimal::ZERO)
}

/// Parse a form date into an instant. Date-only and local date-time values are read as UTC.
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Whole days elapsed between two form dates.
///
/// Returns 0 for equal or inverted ranges and when either side fails to parse.
pub fn days_between(start: &str, end: &str) -> i64 {
    let (Some(start_at), Some(end_at)) = (parse_instant(start), parse_instant(end)) else {
        tracing::warn!(start, end, "one or both dates are invalid, using 0 days");
        return 0;
    };

    if start_at < end_at {
        let elapsed = (end_at - start_at).num_milliseconds();
        elapsed.div_euclid(MILLIS_PER_DAY)
    } else {
        0
    }
}

/// Round an amount for presentation, midpoints away from zero.
pub fn round_money(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// `a × b`, failing with `Overflow` instead of panicking on out-of-range amounts
pub fn mul_amount(a: Decimal, b: Decimal, field: &'static str) -> QpResult<Decimal> {
    a.checked_mul(b).ok_or(QpError::Overflow { field })
}

/// `a + b`, failing with `Overflow` on out-of-range amounts
pub fn add_amount(a: Decimal, b: Decimal, field: &'static str) -> QpResult<Decimal> {
    a.checked_add(b).ok_or(QpError::Overflow { field })
}

/// `a − b`, failing with `Overflow` on out-of-range amounts
pub fn sub_amount(a: Decimal, b: Decimal, field: &'static str) -> QpResult<Decimal> {
    a.checked_sub(b).ok_or(QpError::Overflow { field })
}

/// Checked sum of amounts
pub fn sum_amounts(
    values: impl IntoIterator<Item = Decimal>,
    field: &'static str,
) -> QpResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| add_amount(total, value, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_or_zero() {
        assert_eq!(parse_decimal_or_zero("12.5"), Decimal::new(125, 1));
        assert_eq!(parse_decimal_or_zero("  3 "), Decimal::from(3));
        assert_eq!(parse_decimal_or_zero("1e3"), Decimal::from(1000));
        assert_eq!(parse_decimal_or_zero("-4"), Decimal::from(-4));
        assert_eq!(parse_decimal_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("abc"), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("NaN"), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("Infinity"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_clamps_negatives() {
        assert_eq!(parse_amount("-4"), Decimal::ZERO);
        assert_eq!(parse_amount("7"), Decimal::from(7));
        assert_eq!(parse_amount("x"), Decimal::ZERO);
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between("2024-01-01", "2024-01-10"), 9);
        assert_eq!(days_between("2024-01-10", "2024-01-01"), 0);
        assert_eq!(days_between("2024-01-10", "2024-01-10"), 0);
        assert_eq!(days_between("invalid", "2024-01-10"), 0);
        assert_eq!(days_between("2024-01-01", ""), 0);
    }

    #[test]
    fn test_days_between_floors_partial_days() {
        assert_eq!(days_between("2024-01-01T00:00", "2024-01-02T23:59"), 1);
        assert_eq!(days_between("2024-01-01 08:00:00", "2024-01-01 20:00:00"), 0);
        assert_eq!(
            days_between("2024-02-28T00:00:00Z", "2024-03-01T00:00:00+00:00"),
            2
        );
    }

    #[test]
    fn test_checked_amounts() {
        assert_eq!(mul_amount(Decimal::from(3), Decimal::from(100), "subtotal").unwrap(), Decimal::from(300));
        assert_eq!(
            sum_amounts([Decimal::ONE, Decimal::TWO], "costo_directo").unwrap(),
            Decimal::from(3)
        );
        assert_eq!(sub_amount(Decimal::ONE, Decimal::TWO, "total").unwrap(), Decimal::from(-1));

        assert!(matches!(
            mul_amount(Decimal::MAX, Decimal::TWO, "subtotal"),
            Err(QpError::Overflow { field: "subtotal" })
        ));
        assert!(matches!(
            sum_amounts([Decimal::MAX, Decimal::ONE], "costo_directo"),
            Err(QpError::Overflow { field: "costo_directo" })
        ));
        assert!(add_amount(Decimal::MAX, Decimal::MAX, "precio_total").is_err());
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(Decimal::new(12345, 3), 2), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(420, 0), 2), Decimal::from(420));
    }
}
