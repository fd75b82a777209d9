use std::fmt;

/// Value stored in a duplicate-checked collection.
///
/// `is_same` is the weaker identity used for duplicate detection; the derived
/// `PartialEq` remains full structural equality.
pub trait Entry: Clone + PartialEq + fmt::Debug + fmt::Display {
    fn is_same(&self, other: &Self) -> bool;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}
