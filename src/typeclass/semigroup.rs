//! Semigroup type class - types with an associative binary operation.
//!
//! A semigroup is a set together with an associative binary operation. In
//! programming terms, a type `T` is a semigroup if there exists a function
//! `combine: (T, T) -> T` that is associative.
//!
//! # Laws
//!
//! For all `a`, `b`, `c` of type `T`:
//!
//! ## Associativity
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use strata::typeclass::Semigroup;
//!
//! // String concatenation
//! let hello = String::from("Hello, ");
//! let world = String::from("World!");
//! assert_eq!(hello.combine(world), "Hello, World!");
//!
//! // Vec concatenation
//! let vec1 = vec![1, 2];
//! let vec2 = vec![3, 4];
//! assert_eq!(vec1.combine(vec2), vec![1, 2, 3, 4]);
//! ```

/// A type class for types with an associative binary operation.
///
/// # Laws
///
/// For all `a`, `b`, `c`:
/// ```text
/// (a.combine(b)).combine(c) == a.combine(b.combine(c))
/// ```
pub trait Semigroup {
    /// Combines two values into one.
    ///
    /// This operation must be associative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Semigroup;
    ///
    /// let result = String::from("Hello, ").combine(String::from("World!"));
    /// assert_eq!(result, "Hello, World!");
    /// ```
    #[must_use]
    fn combine(self, other: Self) -> Self;
}

// =============================================================================
// String Implementation
// =============================================================================

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

// =============================================================================
// Vec Implementation
// =============================================================================

impl<T> Semigroup for Vec<T> {
    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

// =============================================================================
// Unit Implementation
// =============================================================================

/// The trivial semigroup: combining units yields unit.
impl Semigroup for () {
    fn combine(self, (): Self) -> Self {}
}

// =============================================================================
// Option Implementation
// =============================================================================

/// Option combines by combining present values; `None` is absorbed.
impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.combine(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn string_combine_concatenates() {
        let result = String::from("foo").combine(String::from("bar"));
        assert_eq!(result, "foobar");
    }

    #[rstest]
    fn vec_combine_concatenates() {
        assert_eq!(vec![1, 2].combine(vec![3, 4]), vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn option_combine_merges_values() {
        let a = Some(String::from("a"));
        let b = Some(String::from("b"));
        assert_eq!(a.combine(b), Some(String::from("ab")));
    }

    #[rstest]
    fn option_combine_absorbs_none() {
        let a = Some(String::from("a"));
        assert_eq!(a.clone().combine(None), a);
        assert_eq!(None.combine(Some(String::from("b"))), Some(String::from("b")));
    }

    // Associativity Law

    #[rstest]
    #[case("a", "b", "c")]
    #[case("", "b", "")]
    #[case("x", "", "z")]
    fn string_associativity_law(#[case] a: &str, #[case] b: &str, #[case] c: &str) {
        let (a, b, c) = (a.to_string(), b.to_string(), c.to_string());
        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));
        assert_eq!(left, right);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_string_associativity(a in ".*", b in ".*", c in ".*") {
            let left = a.clone().combine(b.clone()).combine(c.clone());
            let right = a.combine(b.combine(c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_vec_associativity(
            a in prop::collection::vec(any::<i32>(), 0..8),
            b in prop::collection::vec(any::<i32>(), 0..8),
            c in prop::collection::vec(any::<i32>(), 0..8),
        ) {
            let left = a.clone().combine(b.clone()).combine(c.clone());
            let right = a.combine(b.combine(c));
            prop_assert_eq!(left, right);
        }
    }
}
