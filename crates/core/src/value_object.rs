//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two with the
/// same attribute values are the same value. To "modify" one, create a new
/// one. `Money { 10.00 }` is the canonical example in this workspace; a
/// catalog entry is another (same brand/reference/price = same entry).
///
/// The trait requires:
/// - **Clone**: values are cheap to copy, not shared by reference
/// - **PartialEq**: comparison is attribute-wise
/// - **Debug**: values show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
