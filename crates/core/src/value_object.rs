//! Value object trait: equality by value, not identity.
//!
//! Value objects are defined entirely by their attribute values. Two value
//! objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (a national id `"12345678"` is the same
///   value wherever it appears)
/// - **Entity**: has identity (two clients with the same id are the same client)
///
/// Value objects are immutable: to "modify" one, build a new one. Constructors
/// are expected to validate, so an instance in hand is always well-formed.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct NationalId(String);
///
/// impl ValueObject for NationalId {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
