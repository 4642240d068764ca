//! `ReaderT` - Reader Monad Transformer.
//!
//! `ReaderT` adds read-only environment access to any inner context.
//!
//! # Overview
//!
//! `ReaderT<R, F, A>` encapsulates a function `R -> F::Member<A>` where `R`
//! is the environment type and `F` is the inner context's family. The
//! environment is distributed to every step of the computation but never
//! modified, so no extra information accrues while the computation runs.
//! That is why this layer's captured-state shape is just the plain result.
//!
//! # Examples
//!
//! ```rust
//! use strata::effect::ReaderT;
//! use strata::typeclass::OptionFamily;
//!
//! let reader: ReaderT<i32, OptionFamily, i32> = ReaderT::new(|environment| Some(environment * 2));
//! assert_eq!(reader.run(21), Some(42));
//! ```
//!
//! With a configuration environment:
//!
//! ```rust
//! use strata::effect::ReaderT;
//! use strata::typeclass::OptionFamily;
//!
//! #[derive(Clone)]
//! struct Config { port: u16 }
//!
//! fn get_port() -> ReaderT<Config, OptionFamily, u16> {
//!     ReaderT::asks(|config: &Config| config.port)
//! }
//!
//! let config = Config { port: 8080 };
//! assert_eq!(get_port().run(config), Some(8080));
//! ```

#![forbid(unsafe_code)]

use std::rc::Rc;

use crate::typeclass::MonadFamily;

/// A monad transformer that adds environment reading capability.
///
/// `ReaderT<R, F, A>` represents a computation that, given an environment of
/// type `R`, produces a value wrapped in the inner context `F`.
///
/// # Type Parameters
///
/// - `R`: The environment type (read-only context)
/// - `F`: The inner context's family
/// - `A`: The result type
pub struct ReaderT<R, F, A>
where
    R: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// The wrapped function from environment to inner computation.
    /// Uses Rc to allow cloning of the `ReaderT` for `flat_map`.
    run_function: Rc<dyn Fn(R) -> F::Member<A>>,
}

impl<R, F, A> ReaderT<R, F, A>
where
    R: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// Creates a new `ReaderT` from a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ReaderT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let reader: ReaderT<i32, OptionFamily, i32> = ReaderT::new(|environment| Some(environment * 2));
    /// assert_eq!(reader.run(21), Some(42));
    /// ```
    pub fn new<G>(function: G) -> Self
    where
        G: Fn(R) -> F::Member<A> + 'static,
    {
        Self {
            run_function: Rc::new(function),
        }
    }

    /// Runs the `ReaderT` computation with the given environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ReaderT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let reader: ReaderT<i32, OptionFamily, i32> = ReaderT::new(|environment| Some(environment + 1));
    /// assert_eq!(reader.run(41), Some(42));
    /// // ReaderT can be run multiple times
    /// assert_eq!(reader.run(0), Some(1));
    /// ```
    pub fn run(&self, environment: R) -> F::Member<A> {
        (self.run_function)(environment)
    }

    /// Creates a `ReaderT` that returns a constant value, ignoring the
    /// environment.
    pub fn pure(value: A) -> Self {
        Self::new(move |_| F::pure(value.clone()))
    }

    /// Lifts an inner computation into `ReaderT`.
    pub fn lift(computation: F::Member<A>) -> Self {
        Self::new(move |_| computation.clone())
    }

    /// Projects a value out of the environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ReaderT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let reader: ReaderT<String, OptionFamily, usize> = ReaderT::asks(|s: &String| s.len());
    /// assert_eq!(reader.run("hello".to_string()), Some(5));
    /// ```
    pub fn asks<G>(projection: G) -> Self
    where
        G: Fn(&R) -> A + 'static,
    {
        Self::new(move |environment| F::pure(projection(&environment)))
    }

    /// Runs a computation under a locally modified environment.
    ///
    /// The modification is scoped: only `computation` sees it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ReaderT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let doubled: ReaderT<i32, OptionFamily, i32> =
    ///     ReaderT::local(|environment| environment * 2, ReaderT::ask());
    /// assert_eq!(doubled.run(21), Some(42));
    /// ```
    pub fn local<G>(modifier: G, computation: Self) -> Self
    where
        G: Fn(R) -> R + 'static,
    {
        Self::new(move |environment| computation.run(modifier(environment)))
    }

    /// Maps a function over the result value.
    pub fn fmap<B, G>(self, function: G) -> ReaderT<R, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> B + 'static,
    {
        let original = self.run_function;
        let function = Rc::new(function);
        ReaderT::new(move |environment| {
            let function = function.clone();
            F::map(original(environment), move |value| function(value))
        })
    }

    /// Chains `ReaderT` computations, distributing the environment to both.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ReaderT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let reader: ReaderT<i32, OptionFamily, i32> = ReaderT::ask();
    /// let chained = reader.flat_map(|v| ReaderT::asks(move |environment: &i32| v + environment));
    /// assert_eq!(chained.run(21), Some(42));
    /// ```
    pub fn flat_map<B, G>(self, function: G) -> ReaderT<R, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> ReaderT<R, F, B> + 'static,
    {
        let original = self.run_function;
        let function = Rc::new(function);
        ReaderT::new(move |environment: R| {
            let function = function.clone();
            let distributed = environment.clone();
            F::bind(original(environment), move |value| {
                function(value).run(distributed.clone())
            })
        })
    }
}

// =============================================================================
// Environment Access
// =============================================================================

impl<R, F> ReaderT<R, F, R>
where
    R: Clone + 'static,
    F: MonadFamily,
{
    /// Returns the whole environment as the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ReaderT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let reader: ReaderT<i32, OptionFamily, i32> = ReaderT::ask();
    /// assert_eq!(reader.run(42), Some(42));
    /// ```
    #[must_use]
    pub fn ask() -> Self {
        Self::new(|environment: R| F::pure(environment))
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<R, F, A> Clone for ReaderT<R, F, A>
where
    R: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            run_function: self.run_function.clone(),
        }
    }
}

// =============================================================================
// ReaderTFamily
// =============================================================================

/// Family witness for `ReaderT<R, F, _>`.
pub struct ReaderTFamily<R, F>(std::marker::PhantomData<(R, F)>);

impl<R, F> MonadFamily for ReaderTFamily<R, F>
where
    R: Clone + 'static,
    F: MonadFamily,
{
    type Member<A: Clone + 'static> = ReaderT<R, F, A>;

    fn pure<A>(value: A) -> ReaderT<R, F, A>
    where
        A: Clone + 'static,
    {
        ReaderT::pure(value)
    }

    fn bind<A, B, G>(computation: ReaderT<R, F, A>, function: G) -> ReaderT<R, F, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        G: Fn(A) -> ReaderT<R, F, B> + 'static,
    {
        computation.flat_map(function)
    }
}
