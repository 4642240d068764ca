//! Monoid type class - semigroups with an identity element.
//!
//! A monoid is a semigroup with an identity element. A type `T` is a monoid
//! if it has:
//!
//! 1. An associative binary operation `combine: (T, T) -> T` (from Semigroup)
//! 2. An identity element `empty: T` such that for all `a`:
//!    - `T::empty().combine(a) == a` (left identity)
//!    - `a.combine(T::empty()) == a` (right identity)
//!
//! This is the accumulation capability the accumulating effect layers
//! consume: `empty` seeds a fresh accumulator when a computation is captured,
//! and `combine` merges output from sequenced computations.
//!
//! # Laws
//!
//! For all `a`, `b`, `c` of type `T`:
//!
//! ## Left Identity
//!
//! ```text
//! T::empty().combine(a) == a
//! ```
//!
//! ## Right Identity
//!
//! ```text
//! a.combine(T::empty()) == a
//! ```
//!
//! ## Associativity (inherited from Semigroup)
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use strata::typeclass::{Monoid, Semigroup};
//!
//! assert_eq!(String::empty(), "");
//! assert_eq!(String::empty().combine(String::from("hello")), "hello");
//!
//! let vec: Vec<i32> = Vec::empty();
//! assert!(vec.is_empty());
//! ```

use super::semigroup::Semigroup;

/// A type class for semigroups with an identity element.
///
/// # Laws
///
/// In addition to Semigroup associativity:
///
/// - `Self::empty().combine(a) == a`
/// - `a.combine(Self::empty()) == a`
pub trait Monoid: Semigroup {
    /// Returns the identity element for this monoid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Monoid;
    ///
    /// assert_eq!(String::empty(), "");
    /// assert!(Vec::<i32>::empty().is_empty());
    /// ```
    fn empty() -> Self;

    /// Combines all elements in an iterator, starting from the identity
    /// element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Monoid;
    ///
    /// let strings = vec![
    ///     String::from("a"),
    ///     String::from("b"),
    ///     String::from("c"),
    /// ];
    /// assert_eq!(String::combine_all(strings), "abc");
    /// ```
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), |accumulator, element| {
                accumulator.combine(element)
            })
    }
}

// =============================================================================
// String Implementation
// =============================================================================

impl Monoid for String {
    fn empty() -> Self {
        Self::new()
    }
}

// =============================================================================
// Vec Implementation
// =============================================================================

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Implementation
// =============================================================================

impl Monoid for () {
    fn empty() -> Self {}
}

// =============================================================================
// Option Implementation
// =============================================================================

/// Option forms a monoid when its inner type is a semigroup.
/// The identity element is `None`.
impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_string_left_identity(a in ".*") {
            prop_assert_eq!(String::empty().combine(a.clone()), a);
        }

        #[test]
        fn prop_string_right_identity(a in ".*") {
            prop_assert_eq!(a.clone().combine(String::empty()), a);
        }

        #[test]
        fn prop_vec_identity(a in prop::collection::vec(any::<i32>(), 0..8)) {
            prop_assert_eq!(Vec::empty().combine(a.clone()), a.clone());
            prop_assert_eq!(a.clone().combine(Vec::empty()), a);
        }
    }
}
