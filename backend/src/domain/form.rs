//! Shared shape of form validation failures.
//!
//! Every portal form rejects a submission on the first field that breaks its
//! rules. Violations name the offending field (in the wire casing clients
//! send) and a stable machine code so adapters can highlight the input.

use std::fmt;

/// A single rejected form field.
pub trait FieldViolation: fmt::Display {
    /// Wire name of the offending field, e.g. `fullName`.
    fn field(&self) -> &'static str;

    /// Stable machine-readable reason, e.g. `empty_full_name`.
    fn code(&self) -> &'static str;
}

/// Trim `value` and reject it when nothing is left.
pub(crate) fn required(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Loose shape check: one `@` with text on both sides and no whitespace.
///
/// The platform performs authoritative address validation; this only stops
/// obviously broken input before a network round trip.
pub(crate) fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Sarah  ", Some("Sarah"))]
    #[case("   ", None)]
    #[case("", None)]
    fn required_trims(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(required(raw), expected);
    }

    #[rstest]
    #[case("sarah@example.com", true)]
    #[case("sarah@", false)]
    #[case("@example.com", false)]
    #[case("sarah example.com", false)]
    #[case("a@b@c", false)]
    #[case("sa rah@example.com", false)]
    fn email_shape(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(looks_like_email(raw), expected);
    }
}
