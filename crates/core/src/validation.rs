//! Field validation predicates.
//!
//! Each predicate is total: it never fails and never panics, it just answers
//! whether the value is acceptable for the field it guards.

/// Length of a national identity document number (DNI).
pub const NATIONAL_ID_LEN: usize = 8;

/// `true` iff `value` is exactly eight ASCII decimal digits.
///
/// No whitespace trimming, signs or separators are tolerated.
pub fn is_valid_national_id(value: &str) -> bool {
    value.len() == NATIONAL_ID_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// `true` iff `value` is a non-negative whole number. NaN is rejected.
pub fn is_valid_stock(value: f64) -> bool {
    value.is_finite() && value >= 0.0 && value.fract() == 0.0
}

/// `true` iff `value` is a non-negative number. NaN is rejected, zero is valid.
pub fn is_valid_price(value: f64) -> bool {
    !value.is_nan() && value >= 0.0
}
