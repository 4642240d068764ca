//! Applicative type class - lifting values and combining independent
//! computations.
//!
//! `Applicative` extends `Functor` with `pure` (lifting a plain value into
//! the context) and `map2` (combining two independent computations).
//!
//! # Laws
//!
//! All `Applicative` implementations must satisfy:
//!
//! ## Homomorphism Law
//!
//! ```text
//! Self::pure(a).map2(Self::pure(b), f) == Self::pure(f(a, b))
//! ```
//!
//! ## Left Identity via map2
//!
//! ```text
//! Self::pure(()).map2(y, |_, b| b) == y
//! ```
//!
//! # Examples
//!
//! ```rust
//! use strata::typeclass::Applicative;
//!
//! let x: Option<i32> = <Option<()>>::pure(42);
//! assert_eq!(x, Some(42));
//!
//! let sum = Some(1).map2(Some(2), |a, b| a + b);
//! assert_eq!(sum, Some(3));
//! ```

use super::functor::Functor;

/// A type class for contexts that support lifting values and combining
/// independent computations.
pub trait Applicative: Functor {
    /// Lifts a pure value into the applicative context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Applicative;
    ///
    /// let x: Option<i32> = <Option<()>>::pure(42);
    /// assert_eq!(x, Some(42));
    ///
    /// let y: Result<String, ()> = <Result<(), ()>>::pure("hello".to_string());
    /// assert_eq!(y, Ok("hello".to_string()));
    /// ```
    fn pure<B>(value: B) -> Self::WithType<B>;

    /// Combines two applicative values using a binary function.
    ///
    /// If either computation fails (in the sense appropriate to the
    /// context), the result fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Applicative;
    ///
    /// let sum = Some(1).map2(Some(2), |a, b| a + b);
    /// assert_eq!(sum, Some(3));
    ///
    /// let none = Some(1).map2(None::<i32>, |a, b| a + b);
    /// assert_eq!(none, None);
    /// ```
    fn map2<B, C, F>(self, other: Self::WithType<B>, function: F) -> Self::WithType<C>
    where
        F: FnOnce(Self::Inner, B) -> C + 'static,
        B: 'static,
        C: 'static;

    /// Combines two applicative values into a tuple.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Applicative;
    ///
    /// let pair = Some(1).product(Some("a"));
    /// assert_eq!(pair, Some((1, "a")));
    /// ```
    #[inline]
    fn product<B>(self, other: Self::WithType<B>) -> Self::WithType<(Self::Inner, B)>
    where
        Self: Sized,
        Self::Inner: 'static,
        B: 'static,
    {
        self.map2(other, |a, b| (a, b))
    }
}

// =============================================================================
// Option<A> Implementation
// =============================================================================

impl<A> Applicative for Option<A> {
    #[inline]
    fn pure<B>(value: B) -> Option<B> {
        Some(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Option<B>, function: F) -> Option<C>
    where
        F: FnOnce(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        match (self, other) {
            (Some(a), Some(b)) => Some(function(a, b)),
            _ => None,
        }
    }
}

// =============================================================================
// Result<T, E> Implementation
// =============================================================================

impl<T, E> Applicative for Result<T, E> {
    #[inline]
    fn pure<B>(value: B) -> Result<B, E> {
        Ok(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Result<B, E>, function: F) -> Result<C, E>
    where
        F: FnOnce(T, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        match (self, other) {
            (Ok(a), Ok(b)) => Ok(function(a, b)),
            (Err(error), _) | (_, Err(error)) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn option_pure_wraps_value() {
        let x: Option<i32> = <Option<()>>::pure(42);
        assert_eq!(x, Some(42));
    }

    #[rstest]
    fn option_map2_combines_somes() {
        assert_eq!(Some(1).map2(Some(2), |a, b| a + b), Some(3));
    }

    #[rstest]
    fn option_map2_short_circuits_none() {
        assert_eq!(Some(1).map2(None::<i32>, |a, b| a + b), None);
        assert_eq!(None::<i32>.map2(Some(2), |a, b| a + b), None);
    }

    #[rstest]
    fn result_pure_wraps_value() {
        let x: Result<i32, String> = <Result<(), String>>::pure(42);
        assert_eq!(x, Ok(42));
    }

    #[rstest]
    fn result_map2_first_error_wins() {
        let left: Result<i32, &str> = Err("left");
        let right: Result<i32, &str> = Err("right");
        assert_eq!(left.map2(right, |a, b| a + b), Err("left"));
    }

    #[rstest]
    fn product_pairs_values() {
        assert_eq!(Some(1).product(Some("a")), Some((1, "a")));
    }

    // Homomorphism Law: pure(a).map2(pure(b), f) == pure(f(a, b))

    #[rstest]
    fn option_homomorphism_law() {
        let f = |a: i32, b: i32| a + b;
        let left = <Option<()>>::pure(2).map2(<Option<()>>::pure(3), f);
        let right: Option<i32> = <Option<()>>::pure(f(2, 3));
        assert_eq!(left, right);
    }
}
