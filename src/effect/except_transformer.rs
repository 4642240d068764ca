//! `ExceptT` - Except Monad Transformer.
//!
//! `ExceptT` adds early exit to any inner context: a computation either
//! produces a value or exits with an error of type `E`, and every step after
//! an exit is skipped.
//!
//! # Overview
//!
//! `ExceptT<E, F, A>` encapsulates `F::Member<Result<A, E>>` where `E` is
//! the exit type and `F` is the inner context's family. The exit value is
//! ordinary data in the inner context, which is exactly what allows the
//! capture/restore machinery to carry it across a base-context boundary and
//! re-raise it faithfully.
//!
//! # Examples
//!
//! ```rust
//! use strata::effect::ExceptT;
//! use strata::typeclass::OptionFamily;
//!
//! fn validate_positive(value: i32) -> ExceptT<String, OptionFamily, i32> {
//!     if value > 0 {
//!         ExceptT::pure(value)
//!     } else {
//!         ExceptT::throw("Value must be positive".to_string())
//!     }
//! }
//!
//! assert_eq!(validate_positive(5).run(), Some(Ok(5)));
//! assert_eq!(
//!     validate_positive(-1).run(),
//!     Some(Err("Value must be positive".to_string()))
//! );
//! ```

#![forbid(unsafe_code)]

use std::rc::Rc;

use crate::typeclass::MonadFamily;

/// A monad transformer that adds early-exit capability.
///
/// `ExceptT<E, F, A>` represents a computation that may exit early with an
/// error of type `E`, wrapped in the inner context `F`.
///
/// # Type Parameters
///
/// - `E`: The exit/error type
/// - `F`: The inner context's family
/// - `A`: The result type
pub struct ExceptT<E, F, A>
where
    E: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// The wrapped inner computation producing `Result<A, E>`.
    inner: F::Member<Result<A, E>>,
}

impl<E, F, A> ExceptT<E, F, A>
where
    E: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// Creates a new `ExceptT` from an inner computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ExceptT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let except: ExceptT<String, OptionFamily, i32> = ExceptT::new(Some(Ok(42)));
    /// assert_eq!(except.run(), Some(Ok(42)));
    /// ```
    pub fn new(inner: F::Member<Result<A, E>>) -> Self {
        Self { inner }
    }

    /// Runs the `ExceptT` computation, returning the inner computation.
    pub fn run(self) -> F::Member<Result<A, E>> {
        self.inner
    }

    /// Creates an `ExceptT` that returns a constant value.
    pub fn pure(value: A) -> Self {
        Self::new(F::pure(Ok(value)))
    }

    /// Creates an `ExceptT` that exits with an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ExceptT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let except: ExceptT<String, OptionFamily, i32> = ExceptT::throw("error".to_string());
    /// assert_eq!(except.run(), Some(Err("error".to_string())));
    /// ```
    pub fn throw(error: E) -> Self {
        Self::new(F::pure(Err(error)))
    }

    /// Lifts an inner computation into `ExceptT`, treating its result as a
    /// success.
    pub fn lift(computation: F::Member<A>) -> Self {
        Self::new(F::map(computation, |value| Ok(value)))
    }

    /// Maps a function over the success value.
    pub fn fmap<B, G>(self, function: G) -> ExceptT<E, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> B + 'static,
    {
        ExceptT::new(F::map(self.inner, move |result| result.map(|v| function(v))))
    }

    /// Chains `ExceptT` computations; an exit skips the rest of the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ExceptT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let thrown: ExceptT<String, OptionFamily, i32> = ExceptT::throw("boom".to_string());
    /// let chained = thrown.flat_map(|v| ExceptT::pure(v * 2));
    /// assert_eq!(chained.run(), Some(Err("boom".to_string())));
    /// ```
    pub fn flat_map<B, G>(self, function: G) -> ExceptT<E, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> ExceptT<E, F, B> + 'static,
    {
        let function = Rc::new(function);
        ExceptT::new(F::bind(self.inner, move |result| {
            let function = function.clone();
            match result {
                Ok(value) => function(value).inner,
                Err(error) => F::pure(Err(error)),
            }
        }))
    }

    /// Handles an exit, resuming with the handler's computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ExceptT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let failing: ExceptT<String, OptionFamily, i32> = ExceptT::throw("err".to_string());
    /// let recovered = ExceptT::catch(failing, |error| ExceptT::pure(error.len() as i32));
    /// assert_eq!(recovered.run(), Some(Ok(3)));
    /// ```
    pub fn catch<G>(computation: Self, handler: G) -> Self
    where
        G: Fn(E) -> Self + 'static,
    {
        let handler = Rc::new(handler);
        Self::new(F::bind(computation.inner, move |result| {
            let handler = handler.clone();
            match result {
                Ok(value) => F::pure(Ok(value)),
                Err(error) => handler(error).inner,
            }
        }))
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<E, F, A> Clone for ExceptT<E, F, A>
where
    E: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// ExceptTFamily
// =============================================================================

/// Family witness for `ExceptT<E, F, _>`.
pub struct ExceptTFamily<E, F>(std::marker::PhantomData<(E, F)>);

impl<E, F> MonadFamily for ExceptTFamily<E, F>
where
    E: Clone + 'static,
    F: MonadFamily,
{
    type Member<A: Clone + 'static> = ExceptT<E, F, A>;

    fn pure<A>(value: A) -> ExceptT<E, F, A>
    where
        A: Clone + 'static,
    {
        ExceptT::pure(value)
    }

    fn bind<A, B, G>(computation: ExceptT<E, F, A>, function: G) -> ExceptT<E, F, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        G: Fn(A) -> ExceptT<E, F, B> + 'static,
    {
        computation.flat_map(function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{IO, IoFamily};
    use crate::typeclass::OptionFamily;
    use rstest::rstest;

    #[rstest]
    fn except_transformer_new_and_run() {
        let except: ExceptT<String, OptionFamily, i32> = ExceptT::new(Some(Ok(42)));
        assert_eq!(except.run(), Some(Ok(42)));
    }

    #[rstest]
    fn except_transformer_pure_succeeds() {
        let except: ExceptT<String, OptionFamily, i32> = ExceptT::pure(42);
        assert_eq!(except.run(), Some(Ok(42)));
    }

    #[rstest]
    fn except_transformer_throw_exits() {
        let except: ExceptT<String, OptionFamily, i32> = ExceptT::throw("error".to_string());
        assert_eq!(except.run(), Some(Err("error".to_string())));
    }

    #[rstest]
    fn except_transformer_flat_map_skips_after_exit() {
        let thrown: ExceptT<String, OptionFamily, i32> = ExceptT::throw("boom".to_string());
        let chained = thrown.flat_map(|v| ExceptT::pure(v * 2));
        assert_eq!(chained.run(), Some(Err("boom".to_string())));
    }

    #[rstest]
    fn except_transformer_flat_map_chains_successes() {
        let except: ExceptT<String, OptionFamily, i32> = ExceptT::pure(10);
        let chained = except.flat_map(|v| ExceptT::pure(v * 2));
        assert_eq!(chained.run(), Some(Ok(20)));
    }

    #[rstest]
    fn except_transformer_catch_recovers() {
        let failing: ExceptT<String, OptionFamily, i32> = ExceptT::throw("err".to_string());
        let recovered = ExceptT::catch(failing, |error| ExceptT::pure(error.len() as i32));
        assert_eq!(recovered.run(), Some(Ok(3)));
    }

    #[rstest]
    fn except_transformer_catch_passes_through_success() {
        let succeeding: ExceptT<String, OptionFamily, i32> = ExceptT::pure(42);
        let result = ExceptT::catch(succeeding, |_| ExceptT::pure(0));
        assert_eq!(result.run(), Some(Ok(42)));
    }

    #[rstest]
    fn except_transformer_lift_wraps_success() {
        let except: ExceptT<String, OptionFamily, i32> = ExceptT::lift(Some(7));
        assert_eq!(except.run(), Some(Ok(7)));
    }

    #[rstest]
    fn except_transformer_over_io() {
        let except: ExceptT<String, IoFamily, i32> = ExceptT::throw("boom".to_string());
        let chained = except.flat_map(|v| ExceptT::lift(IO::pure(v)));
        assert_eq!(chained.run().run_unsafe(), Err("boom".to_string()));
    }
}
