//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Shows and venues are entities: a show keeps its identity while seats are
/// taken, a venue keeps its identity while shows are added.
pub trait Entity {
    /// Identity key.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `self` and `other` denote the same entity, regardless of state.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
