//! `StateT` - State Monad Transformer.
//!
//! `StateT` adds local mutable state to any inner context. It transforms a
//! context `F` into one that can read and write state `S`.
//!
//! # Overview
//!
//! `StateT<S, F, A>` encapsulates a function `S -> F::Member<(A, S)>` where
//! `S` is the state type and `F` is the inner context's family. Running the
//! computation threads the state through every step and returns the result
//! paired with the final state, inside the inner context.
//!
//! # Design Note
//!
//! The inner context is abstracted as a [`MonadFamily`], so a single
//! implementation serves every inner context: `Option`, `Result`, `IO`, or
//! another transformer. [`StateTFamily`] is this transformer's own family
//! witness, which is what lets `StateT` itself appear as the inner context
//! of a further layer.
//!
//! # Examples
//!
//! Over `Option`:
//!
//! ```rust
//! use strata::effect::StateT;
//! use strata::typeclass::OptionFamily;
//!
//! let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s * 2, s + 1)));
//! assert_eq!(state.run(10), Some((20, 11)));
//! ```
//!
//! Over `IO`:
//!
//! ```rust
//! use strata::effect::{IO, IoFamily, StateT};
//!
//! let state: StateT<i32, IoFamily, i32> = StateT::new(|s| IO::pure((s * 2, s + 1)));
//! assert_eq!(state.run(10).run_unsafe(), (20, 11));
//! ```

#![forbid(unsafe_code)]

use std::rc::Rc;

use crate::typeclass::MonadFamily;

/// A monad transformer that adds state manipulation capability.
///
/// `StateT<S, F, A>` represents a computation that, given an initial state
/// of type `S`, produces a value of type `A` and a new state, wrapped in the
/// inner context `F`.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `F`: The inner context's family (e.g. `OptionFamily`, `IoFamily`)
/// - `A`: The result type
///
/// # Examples
///
/// ```rust
/// use strata::effect::StateT;
/// use strata::typeclass::OptionFamily;
///
/// fn increment() -> StateT<i32, OptionFamily, ()> {
///     StateT::modify(|count| count + 1)
/// }
///
/// let computation = increment()
///     .flat_map(|()| increment())
///     .flat_map(|()| StateT::get());
///
/// assert_eq!(computation.run(0), Some((2, 2)));
/// ```
pub struct StateT<S, F, A>
where
    S: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// The wrapped state transition function.
    /// Uses Rc to allow cloning of the `StateT` for `flat_map`.
    run_function: Rc<dyn Fn(S) -> F::Member<(A, S)>>,
}

impl<S, F, A> StateT<S, F, A>
where
    S: Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// Creates a new `StateT` from a state transition function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s * 2, s + 1)));
    /// assert_eq!(state.run(10), Some((20, 11)));
    /// ```
    pub fn new<G>(transition: G) -> Self
    where
        G: Fn(S) -> F::Member<(A, S)> + 'static,
    {
        Self {
            run_function: Rc::new(transition),
        }
    }

    /// Runs the `StateT` computation with the given initial state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s + 1, s * 2)));
    /// assert_eq!(state.run(10), Some((11, 20)));
    /// ```
    pub fn run(&self, initial_state: S) -> F::Member<(A, S)> {
        (self.run_function)(initial_state)
    }

    /// Runs the `StateT` and keeps only the result value.
    pub fn eval(&self, initial_state: S) -> F::Member<A> {
        F::map(self.run(initial_state), |(value, _)| value)
    }

    /// Runs the `StateT` and keeps only the final state.
    pub fn exec(&self, initial_state: S) -> F::Member<S> {
        F::map(self.run(initial_state), |(_, state)| state)
    }

    /// Creates a `StateT` that returns a constant value without modifying
    /// the state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, String> = StateT::pure("hello".to_string());
    /// assert_eq!(state.run(42), Some(("hello".to_string(), 42)));
    /// ```
    pub fn pure(value: A) -> Self {
        Self::new(move |state| F::pure((value.clone(), state)))
    }

    /// Lifts an inner computation into `StateT`, leaving the state
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, String> = StateT::lift(Some("hello".to_string()));
    /// assert_eq!(state.run(42), Some(("hello".to_string(), 42)));
    /// ```
    pub fn lift(computation: F::Member<A>) -> Self {
        Self::new(move |state: S| {
            F::map(computation.clone(), move |value| (value, state.clone()))
        })
    }

    /// Projects a value from the state without modifying it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, i32> = StateT::gets(|s: &i32| s * 2);
    /// assert_eq!(state.run(21), Some((42, 21)));
    /// ```
    pub fn gets<G>(projection: G) -> Self
    where
        G: Fn(&S) -> A + 'static,
    {
        Self::new(move |state: S| {
            let value = projection(&state);
            F::pure((value, state))
        })
    }

    /// Executes a state transition function returning both a result and the
    /// new state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, i32> = StateT::state(|s| (s, s + 1));
    /// assert_eq!(state.run(5), Some((5, 6)));
    /// ```
    pub fn state<G>(transition: G) -> Self
    where
        G: Fn(S) -> (A, S) + 'static,
    {
        Self::new(move |state| F::pure(transition(state)))
    }

    /// Maps a function over the result value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s, s + 1)));
    /// let mapped = state.fmap(|v| v * 2);
    /// assert_eq!(mapped.run(10), Some((20, 11)));
    /// ```
    pub fn fmap<B, G>(self, function: G) -> StateT<S, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> B + 'static,
    {
        let original = self.run_function;
        let function = Rc::new(function);
        StateT::new(move |state| {
            let function = function.clone();
            F::map(original(state), move |(value, new_state)| {
                (function(value), new_state)
            })
        })
    }

    /// Chains `StateT` computations, threading the state through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s, s + 1)));
    /// let chained = state.flat_map(|v| StateT::new(move |s| Some((v + s, s * 2))));
    /// // Initial state 10: first (10, 11), then (10 + 11, 22) = (21, 22)
    /// assert_eq!(chained.run(10), Some((21, 22)));
    /// ```
    pub fn flat_map<B, G>(self, function: G) -> StateT<S, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> StateT<S, F, B> + 'static,
    {
        let original = self.run_function;
        let function = Rc::new(function);
        StateT::new(move |state| {
            let function = function.clone();
            F::bind(original(state), move |(value, intermediate_state)| {
                function(value).run(intermediate_state)
            })
        })
    }
}

// =============================================================================
// State Access
// =============================================================================

impl<S, F> StateT<S, F, S>
where
    S: Clone + 'static,
    F: MonadFamily,
{
    /// Returns the current state as the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, i32> = StateT::get();
    /// assert_eq!(state.run(42), Some((42, 42)));
    /// ```
    #[must_use]
    pub fn get() -> Self {
        Self::new(|state: S| F::pure((state.clone(), state)))
    }
}

impl<S, F> StateT<S, F, ()>
where
    S: Clone + 'static,
    F: MonadFamily,
{
    /// Replaces the current state with a new value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, ()> = StateT::put(100);
    /// assert_eq!(state.run(42), Some(((), 100)));
    /// ```
    pub fn put(new_state: S) -> Self {
        Self::new(move |_| F::pure(((), new_state.clone())))
    }

    /// Modifies the current state using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::StateT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let state: StateT<i32, OptionFamily, ()> = StateT::modify(|s| s * 2);
    /// assert_eq!(state.run(21), Some(((), 42)));
    /// ```
    pub fn modify<G>(modifier: G) -> Self
    where
        G: Fn(S) -> S + 'static,
    {
        Self::new(move |state| F::pure(((), modifier(state))))
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<S, F, A> Clone for StateT<S, F, A>
where
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
// StateTFamily
// =============================================================================

/// Family witness for `StateT<S, F, _>`.
///
/// This is what allows a `StateT` layer to serve as the inner context of
/// another transformer, and what the control core composes over.
pub struct StateTFamily<S, F>(std::marker::PhantomData<(S, F)>);

impl<S, F> MonadFamily for StateTFamily<S, F>
where
    S: Clone + 'static,
    F: MonadFamily,
{
    type Member<A: Clone + 'static> = StateT<S, F, A>;

    fn pure<A>(value: A) -> StateT<S, F, A>
    where
        A: Clone + 'static,
    {
        StateT::pure(value)
    }

    fn bind<A, B, G>(computation: StateT<S, F, A>, function: G) -> StateT<S, F, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        G: Fn(A) -> StateT<S, F, B> + 'static,
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
    fn state_transformer_new_and_run() {
        let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s * 2, s + 1)));
        assert_eq!(state.run(10), Some((20, 11)));
    }

    #[rstest]
    fn state_transformer_clone() {
        let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s * 2, s + 1)));
        let cloned = state.clone();
        assert_eq!(state.run(10), Some((20, 11)));
        assert_eq!(cloned.run(10), Some((20, 11)));
    }

    #[rstest]
    fn state_transformer_pure() {
        let state: StateT<i32, OptionFamily, i32> = StateT::pure(42);
        assert_eq!(state.run(10), Some((42, 10)));
    }

    #[rstest]
    fn state_transformer_eval_and_exec() {
        let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s * 2, s + 1)));
        assert_eq!(state.eval(10), Some(20));
        assert_eq!(state.exec(10), Some(11));
    }

    #[rstest]
    fn state_transformer_get() {
        let state: StateT<i32, OptionFamily, i32> = StateT::get();
        assert_eq!(state.run(42), Some((42, 42)));
    }

    #[rstest]
    fn state_transformer_put_then_get() {
        let computation: StateT<i32, OptionFamily, i32> =
            StateT::put(100).flat_map(|()| StateT::get());
        assert_eq!(computation.run(42), Some((100, 100)));
    }

    #[rstest]
    fn state_transformer_modify() {
        let state: StateT<i32, OptionFamily, ()> = StateT::modify(|s| s * 2);
        assert_eq!(state.run(21), Some(((), 42)));
    }

    #[rstest]
    fn state_transformer_gets_projects_without_modifying() {
        let state: StateT<i32, OptionFamily, i32> = StateT::gets(|s: &i32| s * 2);
        assert_eq!(state.run(21), Some((42, 21)));
    }

    #[rstest]
    fn state_transformer_flat_map_threads_state() {
        let state: StateT<i32, OptionFamily, i32> = StateT::new(|s| Some((s, s + 1)));
        let chained = state.flat_map(|v| StateT::new(move |s| Some((v + s, s * 2))));
        assert_eq!(chained.run(10), Some((21, 22)));
    }

    #[rstest]
    fn state_transformer_lift_keeps_state() {
        let state: StateT<i32, OptionFamily, i32> = StateT::lift(Some(7));
        assert_eq!(state.run(42), Some((7, 42)));

        let failed: StateT<i32, OptionFamily, i32> = StateT::lift(None);
        assert_eq!(failed.run(42), None);
    }

    #[rstest]
    fn state_transformer_over_io() {
        let state: StateT<i32, IoFamily, i32> = StateT::new(|s| IO::pure((s, s + 1)));
        let chained = state.flat_map(|v| StateT::state(move |s| (v + s, s * 2)));
        assert_eq!(chained.run(10).run_unsafe(), (21, 22));
    }

    #[rstest]
    fn state_family_bind_matches_flat_map() {
        let direct: StateT<i32, OptionFamily, i32> =
            StateT::state(|s| (s, s + 1)).flat_map(|v| StateT::pure(v * 2));
        let through_family = StateTFamily::<i32, OptionFamily>::bind(
            StateT::state(|s| (s, s + 1)),
            |v| StateT::pure(v * 2),
        );
        assert_eq!(direct.run(5), through_family.run(5));
    }
}
