//! Family-level Higher-Kinded Type emulation.
//!
//! [`super::TypeConstructor`] lets an *applied* type such as `Option<i32>`
//! talk about `Option<String>`. That is enough for the value-level type
//! classes, but not for the capture/restore control core: a captured run
//! function must execute nested computations *at every result type*, and in
//! Rust that requires all those applied types to be projections of one
//! common witness. [`MonadFamily`] is that witness: a zero-sized type
//! standing for the constructor itself (`OptionFamily` for `Option<_>`),
//! with `Member<A>` recovering the applied type.
//!
//! A base context consumed by the control core needs exactly two
//! operations: value injection ([`MonadFamily::pure`]) and sequencing
//! ([`MonadFamily::bind`]). Everything else is derived.
//!
//! Members are re-runnable, single-threaded computations, so they are
//! required to be `Clone + 'static`, and result types carry the same
//! bounds. This is the family-level form of the `Clone` bounds the
//! concrete transformer constructors already carry.
//!
//! # Laws
//!
//! All `MonadFamily` implementations must satisfy the monad laws:
//!
//! ```text
//! F::bind(F::pure(a), f)  == f(a)
//! F::bind(m, F::pure)     == m
//! F::bind(F::bind(m, f), g) == F::bind(m, |x| F::bind(f(x), g))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use strata::typeclass::{MonadFamily, OptionFamily, VecFamily};
//!
//! let doubled = OptionFamily::bind(Some(21), |n| Some(n * 2));
//! assert_eq!(doubled, Some(42));
//!
//! let branched = VecFamily::bind(vec![1, 2], |n| vec![n, n * 10]);
//! assert_eq!(branched, vec![1, 10, 2, 20]);
//! ```

use std::marker::PhantomData;

use super::applicative::Applicative;
use super::functor::Functor;
use super::identity::Identity;
use super::monad::{Monad, MonadVec};

/// A monadic type constructor, abstracted as a family.
///
/// Implementors are zero-sized witnesses; `Member<A>` is the constructor
/// applied at result type `A`. The two required operations are the full
/// interface a base context must supply to the control core.
pub trait MonadFamily: Sized + 'static {
    /// The constructor applied at result type `A`.
    type Member<A: Clone + 'static>: Clone + 'static;

    /// Injects a plain value into the context.
    fn pure<A>(value: A) -> Self::Member<A>
    where
        A: Clone + 'static;

    /// Sequences two computations, feeding the first result to `function`.
    ///
    /// The function must be re-callable (`Fn`): choice-like members invoke
    /// it once per branch, and suspended members (state, reader) invoke it
    /// once per run.
    fn bind<A, B, F>(computation: Self::Member<A>, function: F) -> Self::Member<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Self::Member<B> + 'static;

    /// Maps a plain function over the result.
    fn map<A, B, F>(computation: Self::Member<A>, function: F) -> Self::Member<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        Self::bind(computation, move |value| Self::pure(function(value)))
    }
}

// =============================================================================
// IdentityFamily
// =============================================================================

/// Family witness for [`Identity`]: computation with no effect at all.
pub struct IdentityFamily;

impl MonadFamily for IdentityFamily {
    type Member<A: Clone + 'static> = Identity<A>;

    fn pure<A>(value: A) -> Identity<A>
    where
        A: Clone + 'static,
    {
        <Identity<()>>::pure(value)
    }

    fn bind<A, B, F>(computation: Identity<A>, function: F) -> Identity<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Identity<B> + 'static,
    {
        computation.flat_map(function)
    }

    fn map<A, B, F>(computation: Identity<A>, function: F) -> Identity<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.fmap(function)
    }
}

// =============================================================================
// OptionFamily
// =============================================================================

/// Family witness for `Option<_>`: computation that may produce nothing.
pub struct OptionFamily;

impl MonadFamily for OptionFamily {
    type Member<A: Clone + 'static> = Option<A>;

    fn pure<A>(value: A) -> Option<A>
    where
        A: Clone + 'static,
    {
        <Option<()>>::pure(value)
    }

    fn bind<A, B, F>(computation: Option<A>, function: F) -> Option<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Option<B> + 'static,
    {
        computation.flat_map(function)
    }

    fn map<A, B, F>(computation: Option<A>, function: F) -> Option<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.fmap(function)
    }
}

// =============================================================================
// ResultFamily
// =============================================================================

/// Family witness for `Result<_, E>`: computation that may fail with `E`.
pub struct ResultFamily<E>(PhantomData<E>);

impl<E> MonadFamily for ResultFamily<E>
where
    E: Clone + 'static,
{
    type Member<A: Clone + 'static> = Result<A, E>;

    fn pure<A>(value: A) -> Result<A, E>
    where
        A: Clone + 'static,
    {
        <Result<(), E>>::pure(value)
    }

    fn bind<A, B, F>(computation: Result<A, E>, function: F) -> Result<B, E>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Result<B, E> + 'static,
    {
        computation.flat_map(function)
    }

    fn map<A, B, F>(computation: Result<A, E>, function: F) -> Result<B, E>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.fmap(function)
    }
}

// =============================================================================
// VecFamily
// =============================================================================

/// Family witness for `Vec<_>`: non-deterministic computation whose member
/// holds every outcome in order.
pub struct VecFamily;

impl MonadFamily for VecFamily {
    type Member<A: Clone + 'static> = Vec<A>;

    fn pure<A>(value: A) -> Vec<A>
    where
        A: Clone + 'static,
    {
        vec![value]
    }

    fn bind<A, B, F>(computation: Vec<A>, function: F) -> Vec<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Vec<B> + 'static,
    {
        MonadVec::flat_map(computation, function)
    }

    fn map<A, B, F>(computation: Vec<A>, function: F) -> Vec<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.into_iter().map(function).collect()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_option_family_left_identity(value in any::<i32>()) {
            let function = |n: i32| if n % 2 == 0 { Some(n.wrapping_mul(2)) } else { None };
            prop_assert_eq!(
                OptionFamily::bind(OptionFamily::pure(value), function),
                function(value)
            );
        }

        #[test]
        fn prop_vec_family_right_identity(m in prop::collection::vec(any::<i32>(), 0..8)) {
            prop_assert_eq!(VecFamily::bind(m.clone(), VecFamily::pure), m);
        }

        #[test]
        fn prop_result_family_associativity(value in any::<i32>()) {
            let m: Result<i32, String> = Ok(value);
            let f = |n: i32| -> Result<i32, String> { Ok(n.wrapping_add(1)) };
            let g = |n: i32| -> Result<i32, String> { Ok(n.wrapping_mul(2)) };
            let left = <ResultFamily<String>>::bind(<ResultFamily<String>>::bind(m.clone(), f), g);
            let right = <ResultFamily<String>>::bind(m, move |x| <ResultFamily<String>>::bind(f(x), g));
            prop_assert_eq!(left, right);
        }
    }
}
