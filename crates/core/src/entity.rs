//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records keep their identifier for their whole lifetime; everything else
/// may be replaced by an update.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
