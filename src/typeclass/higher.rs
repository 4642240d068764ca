//! Higher-Kinded Type emulation through Generic Associated Types.
//!
//! Rust cannot abstract over type constructors like `Option<_>` directly.
//! This module provides [`TypeConstructor`], the GAT-based workaround that
//! lets the value-level type classes (`Functor`, `Applicative`, `Monad`)
//! speak about "the same container at a different element type".
//!
//! The family-level counterpart, used by the capture/restore control core,
//! is [`super::MonadFamily`].
//!
//! # Example
//!
//! ```rust
//! use strata::typeclass::TypeConstructor;
//!
//! fn rebuild_empty<T: TypeConstructor>(_value: T) -> T::WithType<String>
//! where
//!     T::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let none_string: Option<String> = rebuild_empty(Some(42));
//! assert_eq!(none_string, None);
//! ```

/// A trait representing a type constructor.
///
/// Implementors are a type constructor applied to some element type; the
/// associated types recover the element (`Inner`) and re-apply the
/// constructor at another element (`WithType<B>`).
///
/// # Laws
///
/// For any `F: TypeConstructor`:
///
/// 1. **Consistency**: `<F as TypeConstructor>::WithType<F::Inner>` is the
///    same type as `F`.
///
/// # Example
///
/// ```rust
/// use strata::typeclass::TypeConstructor;
///
/// fn assert_inner<T: TypeConstructor<Inner = i32>>() {}
/// assert_inner::<Option<i32>>();
/// assert_inner::<Result<i32, String>>();
/// ```
pub trait TypeConstructor {
    /// The element type this constructor is currently applied to.
    type Inner;

    /// The same constructor applied to a different element type `B`.
    ///
    /// The constraint `TypeConstructor<Inner = B>` keeps the result usable
    /// for further transformations.
    type WithType<B>: TypeConstructor<Inner = B>;
}

// =============================================================================
// Standard Library Type Implementations
// =============================================================================

impl<A> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B> = Option<B>;
}

impl<T, E> TypeConstructor for Result<T, E> {
    type Inner = T;
    type WithType<B> = Result<B, E>;
}

impl<T> TypeConstructor for Vec<T> {
    type Inner = T;
    type WithType<B> = Vec<B>;
}
