//! Order-number generation.
//!
//! Order numbers have the shape `ORD-###`: a fixed prefix followed by a decimal
//! sequence number zero-padded to at least three digits. A new form seeds its draft
//! with the number following the most recently persisted order.

use crate::errors::{Error, Result};
use tracing::warn;

/// Prefix shared by every order number
pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Minimum number of digits after the prefix
const MIN_DIGITS: usize = 3;

/// Parses the sequence number out of an order number such as `ORD-042`.
///
/// # Errors
/// Returns [`Error::InvalidOrderNumber`] if the prefix is missing or the suffix is
/// not a non-empty run of ASCII digits that fits in a `u32`.
pub fn parse_order_number(value: &str) -> Result<u32> {
    let invalid = || Error::InvalidOrderNumber {
        value: value.to_string(),
    };

    let digits = value.trim().strip_prefix(ORDER_NUMBER_PREFIX).ok_or_else(invalid)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    digits.parse().map_err(|_| invalid())
}

/// Formats a sequence number as an order number.
#[must_use]
pub fn format_order_number(sequence: u32) -> String {
    format!("{ORDER_NUMBER_PREFIX}{sequence:0width$}", width = MIN_DIGITS)
}

/// Produces the order number that follows `previous`.
///
/// With no previous order the sequence starts at `ORD-001`. A malformed previous
/// number is logged and treated the same way, so a bad seed never blocks a new draft.
#[must_use]
pub fn generate_order_number(previous: Option<&str>) -> String {
    let Some(previous) = previous else {
        return format_order_number(1);
    };

    match parse_order_number(previous) {
        Ok(sequence) => format_order_number(sequence.saturating_add(1)),
        Err(e) => {
            warn!("{e}; restarting order numbers at {}", format_order_number(1));
            format_order_number(1)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_first_order_number() {
        assert_eq!(generate_order_number(None), "ORD-001");
    }

    #[test]
    fn test_next_order_number() {
        assert_eq!(generate_order_number(Some("ORD-007")), "ORD-008");
        assert_eq!(generate_order_number(Some("ORD-099")), "ORD-100");
        assert_eq!(generate_order_number(Some("ORD-999")), "ORD-1000");
    }

    #[test]
    fn test_malformed_previous_falls_back() {
        assert_eq!(generate_order_number(Some("PO-12")), "ORD-001");
        assert_eq!(generate_order_number(Some("ORD-")), "ORD-001");
        assert_eq!(generate_order_number(Some("ORD-12a")), "ORD-001");
        assert_eq!(generate_order_number(Some("")), "ORD-001");
    }

    #[test]
    fn test_parse_order_number() {
        assert_eq!(parse_order_number("ORD-042").unwrap(), 42);
        assert_eq!(parse_order_number(" ORD-1000 ").unwrap(), 1000);
        assert!(matches!(
            parse_order_number("ORD--1"),
            Err(Error::InvalidOrderNumber { value: _ })
        ));
        assert!(matches!(
            parse_order_number("ORD-99999999999"),
            Err(Error::InvalidOrderNumber { value: _ })
        ));
    }
}
