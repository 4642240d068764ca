//! Monad type class - sequencing computations within a context.
//!
//! This module provides the `Monad` trait, which extends `Applicative` with
//! the ability to sequence computations where each step can depend on the
//! result of the previous step, and `MonadVec`, the list-monad counterpart
//! that needs `FnMut` because its function runs once per element.
//!
//! # Laws
//!
//! All `Monad` implementations must satisfy these laws:
//!
//! ## Left Identity Law
//!
//! ```text
//! Self::pure(a).flat_map(f) == f(a)
//! ```
//!
//! ## Right Identity Law
//!
//! ```text
//! m.flat_map(Self::pure) == m
//! ```
//!
//! ## Associativity Law
//!
//! ```text
//! m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use strata::typeclass::Monad;
//!
//! let x = Some(5);
//! let y = x.flat_map(|n| if n > 0 { Some(n * 2) } else { None });
//! assert_eq!(y, Some(10));
//! ```

use super::applicative::Applicative;

/// A type class for types that support sequencing of computations.
///
/// `Monad` extends `Applicative` with `flat_map`, which allows the result
/// of one computation to determine what computation to perform next.
///
/// # Laws
///
/// - Left identity: `Self::pure(a).flat_map(f) == f(a)`
/// - Right identity: `m.flat_map(Self::pure) == m`
/// - Associativity: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub trait Monad: Applicative {
    /// Applies a function to the value inside the monad and flattens the
    /// result.
    ///
    /// In Haskell this is `>>=` (bind); in Rust's standard library it
    /// corresponds to `and_then` on `Option` and `Result`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Monad;
    ///
    /// let x = Some(5);
    /// let y = x.flat_map(|n| Some(n * 2));
    /// assert_eq!(y, Some(10));
    /// ```
    fn flat_map<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Self::WithType<B>;

    /// Alias for `flat_map` to match Rust's naming conventions.
    #[inline]
    fn and_then<B, F>(self, function: F) -> Self::WithType<B>
    where
        Self: Sized,
        F: FnOnce(Self::Inner) -> Self::WithType<B>,
    {
        self.flat_map(function)
    }

    /// Sequences two monadic computations, discarding the first result.
    ///
    /// If `self` represents a failure, the failure propagates and `next`
    /// is not returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::Monad;
    ///
    /// let x = Some(5);
    /// assert_eq!(x.then(Some("hello")), Some("hello"));
    ///
    /// let y: Option<i32> = None;
    /// assert_eq!(y.then(Some("hello")), None);
    /// ```
    #[inline]
    fn then<B>(self, next: Self::WithType<B>) -> Self::WithType<B>
    where
        Self: Sized,
    {
        self.flat_map(|_| next)
    }
}

// =============================================================================
// Option<A> Implementation
// =============================================================================

impl<A> Monad for Option<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(A) -> Option<B>,
    {
        self.and_then(function)
    }
}

// =============================================================================
// Result<T, E> Implementation
// =============================================================================

impl<T, E> Monad for Result<T, E> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Result<B, E>
    where
        F: FnOnce(T) -> Result<B, E>,
    {
        self.and_then(function)
    }
}

// =============================================================================
// Identity<A> Implementation
// =============================================================================

use super::identity::Identity;

impl<A> Monad for Identity<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Identity<B>
    where
        F: FnOnce(A) -> Identity<B>,
    {
        function(self.into_inner())
    }
}

// =============================================================================
// Vec<A>: the list monad
//
// Vec requires FnMut for flat_map because the function is called once per
// element, so it gets its own trait rather than an impl of `Monad`.
// =============================================================================

/// Extension trait providing the list monad's operations for `Vec`.
///
/// `flat_map` applies a function to each element and concatenates all
/// results; this is non-deterministic computation, where each element can
/// produce any number of outcomes.
///
/// # Examples
///
/// ```rust
/// use strata::typeclass::MonadVec;
///
/// let numbers = vec![1, 2, 3];
/// let result = numbers.flat_map(|n| vec![n, n * 10]);
/// assert_eq!(result, vec![1, 10, 2, 20, 3, 30]);
/// ```
pub trait MonadVec: Sized {
    /// The element type of the Vec.
    type VecInner;

    /// Applies a function to each element and flattens the results.
    fn flat_map<B, F>(self, function: F) -> Vec<B>
    where
        F: FnMut(Self::VecInner) -> Vec<B>;

    /// Flattens a nested Vec one level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::typeclass::MonadVec;
    ///
    /// let nested = vec![vec![1, 2], vec![3, 4]];
    /// let flat: Vec<i32> = nested.flatten();
    /// assert_eq!(flat, vec![1, 2, 3, 4]);
    /// ```
    fn flatten<B>(self) -> Vec<B>
    where
        Self::VecInner: IntoIterator<Item = B>;
}

impl<A> MonadVec for Vec<A> {
    type VecInner = A;

    #[inline]
    fn flat_map<B, F>(self, function: F) -> Vec<B>
    where
        F: FnMut(A) -> Vec<B>,
    {
        self.into_iter().flat_map(function).collect()
    }

    fn flatten<B>(self) -> Vec<B>
    where
        A: IntoIterator<Item = B>,
    {
        self.into_iter().flat_map(IntoIterator::into_iter).collect()
    }
}
