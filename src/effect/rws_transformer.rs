//! `RwsT` - Reader + Writer + State combined transformer.
//!
//! `RwsT` adds three capabilities to any inner context in a single layer:
//!
//! - **Reader**: read-only access to an environment `R`
//! - **Writer**: accumulated output `W` (a [`Monoid`])
//! - **State**: mutable state threading `S`
//!
//! This is equivalent to stacking `ReaderT<R, WriterT<W, StateT<S, _>>>`
//! but pays for one layer instead of three.
//!
//! # Overview
//!
//! An `RwsT<R, W, S, F, A>` encapsulates a function
//! `(R, S) -> F::Member<(A, S, W)>`: it takes an environment and an initial
//! state, and produces a result, a new state, and accumulated output inside
//! the inner context.
//!
//! # Examples
//!
//! ```rust
//! use strata::effect::RwsT;
//! use strata::typeclass::OptionFamily;
//!
//! #[derive(Clone)]
//! struct Config { multiplier: i32 }
//!
//! let computation: RwsT<Config, Vec<String>, i32, OptionFamily, i32> = RwsT::ask()
//!     .flat_map(|config: Config| RwsT::get().flat_map(move |state| {
//!         let result = state * config.multiplier;
//!         RwsT::put(state + 1)
//!             .flat_map(move |()| RwsT::tell(vec![format!("result: {result}")]))
//!             .flat_map(move |()| RwsT::pure(result))
//!     }));
//!
//! let outcome = computation.run(Config { multiplier: 3 }, 10);
//! assert_eq!(outcome, Some((30, 11, vec!["result: 30".to_string()])));
//! ```

#![forbid(unsafe_code)]

use std::rc::Rc;

use crate::typeclass::{MonadFamily, Monoid};

/// A monad transformer combining reader, writer, and state capabilities.
///
/// # Type Parameters
///
/// - `R`: The environment type (read-only)
/// - `W`: The output type (must implement `Monoid`)
/// - `S`: The state type
/// - `F`: The inner context's family
/// - `A`: The result type
pub struct RwsT<R, W, S, F, A>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// The wrapped function from (environment, state) to inner computation.
    run_function: Rc<dyn Fn(R, S) -> F::Member<(A, S, W)>>,
}

impl<R, W, S, F, A> RwsT<R, W, S, F, A>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// Creates a new `RwsT` from a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::RwsT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let rws: RwsT<i32, String, i32, OptionFamily, i32> =
    ///     RwsT::new(|environment, state| Some((environment + state, state + 1, String::new())));
    /// assert_eq!(rws.run(40, 2), Some((42, 3, String::new())));
    /// ```
    pub fn new<G>(function: G) -> Self
    where
        G: Fn(R, S) -> F::Member<(A, S, W)> + 'static,
    {
        Self {
            run_function: Rc::new(function),
        }
    }

    /// Runs the computation with the given environment and initial state.
    pub fn run(&self, environment: R, initial_state: S) -> F::Member<(A, S, W)> {
        (self.run_function)(environment, initial_state)
    }

    /// Runs the computation and keeps only the result value.
    pub fn eval(&self, environment: R, initial_state: S) -> F::Member<A> {
        F::map(self.run(environment, initial_state), |(value, _, _)| value)
    }

    /// Runs the computation and keeps only the final state and output.
    pub fn exec(&self, environment: R, initial_state: S) -> F::Member<(S, W)> {
        F::map(self.run(environment, initial_state), |(_, state, output)| {
            (state, output)
        })
    }

    /// Creates an `RwsT` that returns a constant value.
    ///
    /// State is untouched and no output is produced.
    pub fn pure(value: A) -> Self {
        Self::new(move |_, state| F::pure((value.clone(), state, W::empty())))
    }

    /// Lifts an inner computation into `RwsT`.
    pub fn lift(computation: F::Member<A>) -> Self {
        Self::new(move |_, state: S| {
            F::map(computation.clone(), move |value| {
                (value, state.clone(), W::empty())
            })
        })
    }

    /// Projects a value from the environment.
    pub fn asks<G>(projection: G) -> Self
    where
        G: Fn(&R) -> A + 'static,
    {
        Self::new(move |environment, state| F::pure((projection(&environment), state, W::empty())))
    }

    /// Projects a value from the state without modifying it.
    pub fn gets<G>(projection: G) -> Self
    where
        G: Fn(&S) -> A + 'static,
    {
        Self::new(move |_, state: S| {
            let value = projection(&state);
            F::pure((value, state, W::empty()))
        })
    }

    /// Runs a computation under a locally modified environment.
    pub fn local<G>(modifier: G, computation: Self) -> Self
    where
        G: Fn(R) -> R + 'static,
    {
        Self::new(move |environment, state| computation.run(modifier(environment), state))
    }

    /// Maps a function over the result value.
    pub fn fmap<B, G>(self, function: G) -> RwsT<R, W, S, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> B + 'static,
    {
        let original = self.run_function;
        let function = Rc::new(function);
        RwsT::new(move |environment, state| {
            let function = function.clone();
            F::map(original(environment, state), move |(value, new_state, output)| {
                (function(value), new_state, output)
            })
        })
    }

    /// Chains `RwsT` computations: the environment is distributed, the state
    /// is threaded, and the outputs are combined.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::RwsT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let rws: RwsT<i32, String, i32, OptionFamily, i32> = RwsT::get();
    /// let chained = rws.flat_map(|seen| {
    ///     RwsT::put(seen + 1).flat_map(move |()| RwsT::pure(seen * 2))
    /// });
    /// assert_eq!(chained.run(0, 10), Some((20, 11, String::new())));
    /// ```
    pub fn flat_map<B, G>(self, function: G) -> RwsT<R, W, S, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> RwsT<R, W, S, F, B> + 'static,
    {
        let original = self.run_function;
        let function = Rc::new(function);
        RwsT::new(move |environment: R, state: S| {
            let function = function.clone();
            let distributed = environment.clone();
            F::bind(
                original(environment, state),
                move |(value, intermediate_state, first_output)| {
                    let next = function(value).run(distributed.clone(), intermediate_state);
                    F::map(next, move |(result, final_state, second_output)| {
                        (result, final_state, first_output.clone().combine(second_output))
                    })
                },
            )
        })
    }
}

// =============================================================================
// Environment, State, and Output Access
// =============================================================================

impl<R, W, S, F> RwsT<R, W, S, F, R>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
{
    /// Returns the whole environment as the result.
    #[must_use]
    pub fn ask() -> Self {
        Self::new(|environment: R, state| F::pure((environment, state, W::empty())))
    }
}

impl<R, W, S, F> RwsT<R, W, S, F, S>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
{
    /// Returns the current state as the result.
    #[must_use]
    pub fn get() -> Self {
        Self::new(|_, state: S| F::pure((state.clone(), state, W::empty())))
    }
}

impl<R, W, S, F> RwsT<R, W, S, F, ()>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
{
    /// Replaces the current state with a new value.
    pub fn put(new_state: S) -> Self {
        Self::new(move |_, _| F::pure(((), new_state.clone(), W::empty())))
    }

    /// Modifies the current state using a function.
    pub fn modify<G>(modifier: G) -> Self
    where
        G: Fn(S) -> S + 'static,
    {
        Self::new(move |_, state| F::pure(((), modifier(state), W::empty())))
    }

    /// Appends output.
    pub fn tell(output: W) -> Self {
        Self::new(move |_, state| F::pure(((), state, output.clone())))
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<R, W, S, F, A> Clone for RwsT<R, W, S, F, A>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
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
// RwsTFamily
// =============================================================================

/// Family witness for `RwsT<R, W, S, F, _>`.
pub struct RwsTFamily<R, W, S, F>(std::marker::PhantomData<(R, W, S, F)>);

impl<R, W, S, F> MonadFamily for RwsTFamily<R, W, S, F>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
{
    type Member<A: Clone + 'static> = RwsT<R, W, S, F, A>;

    fn pure<A>(value: A) -> RwsT<R, W, S, F, A>
    where
        A: Clone + 'static,
    {
        RwsT::pure(value)
    }

    fn bind<A, B, G>(computation: RwsT<R, W, S, F, A>, function: G) -> RwsT<R, W, S, F, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        G: Fn(A) -> RwsT<R, W, S, F, B> + 'static,
    {
        computation.flat_map(function)
    }
}
