//! Entity trait: a named record with a typed identifier.

/// Entity marker.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Human-readable entity name used in store errors and logs.
    const NAME: &'static str;
}
