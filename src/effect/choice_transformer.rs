//! `ChoiceT` - Ordered Choice Monad Transformer.
//!
//! `ChoiceT` adds non-deterministic choice to any inner context: a
//! computation produces an ordered sequence of outcomes, and chaining
//! explores every branch in order, concatenating the results.
//!
//! # Overview
//!
//! `ChoiceT<F, A>` encapsulates `F::Member<Vec<A>>` where `F` is the inner
//! context's family. An empty sequence means failure; `or_else` appends the
//! branches of an alternative.
//!
//! # Examples
//!
//! ```rust
//! use strata::effect::ChoiceT;
//! use strata::typeclass::OptionFamily;
//!
//! let choice: ChoiceT<OptionFamily, i32> = ChoiceT::choices(vec![1, 2]);
//! let branched = choice.flat_map(|n| ChoiceT::choices(vec![n, n * 10]));
//! assert_eq!(branched.run(), Some(vec![1, 10, 2, 20]));
//! ```

#![forbid(unsafe_code)]

use std::rc::Rc;

use crate::typeclass::MonadFamily;

/// A monad transformer that adds ordered non-deterministic choice.
///
/// `ChoiceT<F, A>` represents a computation producing any number of
/// outcomes in a fixed order, wrapped in the inner context `F`.
///
/// # Type Parameters
///
/// - `F`: The inner context's family
/// - `A`: The result type of each branch
pub struct ChoiceT<F, A>
where
    F: MonadFamily,
    A: Clone + 'static,
{
    /// The wrapped inner computation producing the ordered outcomes.
    inner: F::Member<Vec<A>>,
}

impl<F, A> ChoiceT<F, A>
where
    F: MonadFamily,
    A: Clone + 'static,
{
    /// Creates a new `ChoiceT` from an inner computation.
    pub fn new(inner: F::Member<Vec<A>>) -> Self {
        Self { inner }
    }

    /// Runs the `ChoiceT` computation, returning the inner computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ChoiceT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let choice: ChoiceT<OptionFamily, i32> = ChoiceT::choices(vec![1, 2, 3]);
    /// assert_eq!(choice.run(), Some(vec![1, 2, 3]));
    /// ```
    pub fn run(self) -> F::Member<Vec<A>> {
        self.inner
    }

    /// Creates a `ChoiceT` with a single outcome.
    pub fn pure(value: A) -> Self {
        Self::new(F::pure(vec![value]))
    }

    /// Creates a `ChoiceT` from an ordered list of outcomes.
    pub fn choices(branches: Vec<A>) -> Self {
        Self::new(F::pure(branches))
    }

    /// Creates a failed `ChoiceT` with no outcomes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ChoiceT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let none: ChoiceT<OptionFamily, i32> = ChoiceT::empty();
    /// assert_eq!(none.run(), Some(vec![]));
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self::new(F::pure(Vec::new()))
    }

    /// Lifts an inner computation into `ChoiceT` as a single outcome.
    pub fn lift(computation: F::Member<A>) -> Self {
        Self::new(F::map(computation, |value| vec![value]))
    }

    /// Maps a function over every outcome.
    pub fn fmap<B, G>(self, function: G) -> ChoiceT<F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> B + 'static,
    {
        ChoiceT::new(F::map(self.inner, move |branches| {
            branches.into_iter().map(|value| function(value)).collect()
        }))
    }

    /// Chains `ChoiceT` computations, exploring every branch in order.
    ///
    /// Each outcome of `self` is fed to `function`, and the resulting
    /// outcome sequences are concatenated left to right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ChoiceT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let choice: ChoiceT<OptionFamily, i32> = ChoiceT::choices(vec![1, 2, 3]);
    /// let branched = choice.flat_map(|n| {
    ///     if n % 2 == 1 {
    ///         ChoiceT::choices(vec![n, n * 10])
    ///     } else {
    ///         ChoiceT::empty()
    ///     }
    /// });
    /// assert_eq!(branched.run(), Some(vec![1, 10, 3, 30]));
    /// ```
    pub fn flat_map<B, G>(self, function: G) -> ChoiceT<F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> ChoiceT<F, B> + 'static,
    {
        let function = Rc::new(function);
        ChoiceT::new(F::bind(self.inner, move |branches: Vec<A>| {
            let function = function.clone();
            branches
                .into_iter()
                .fold(F::pure(Vec::new()), move |collected, branch| {
                    let function = function.clone();
                    F::bind(collected, move |gathered: Vec<B>| {
                        let gathered_so_far = gathered;
                        F::map(function(branch.clone()).inner, move |more: Vec<B>| {
                            let mut combined = gathered_so_far.clone();
                            combined.extend(more);
                            combined
                        })
                    })
                })
        }))
    }

    /// Appends the outcomes of an alternative computation after this one's.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::ChoiceT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let first: ChoiceT<OptionFamily, i32> = ChoiceT::choices(vec![1, 2]);
    /// let second: ChoiceT<OptionFamily, i32> = ChoiceT::choices(vec![3]);
    /// assert_eq!(first.or_else(second).run(), Some(vec![1, 2, 3]));
    /// ```
    #[must_use]
    pub fn or_else(self, other: Self) -> Self {
        Self::new(F::bind(self.inner, move |branches: Vec<A>| {
            F::map(other.inner.clone(), move |more: Vec<A>| {
                let mut combined = branches.clone();
                combined.extend(more);
                combined
            })
        }))
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<F, A> Clone for ChoiceT<F, A>
where
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
// ChoiceTFamily
// =============================================================================

/// Family witness for `ChoiceT<F, _>`.
pub struct ChoiceTFamily<F>(std::marker::PhantomData<F>);

impl<F> MonadFamily for ChoiceTFamily<F>
where
    F: MonadFamily,
{
    type Member<A: Clone + 'static> = ChoiceT<F, A>;

    fn pure<A>(value: A) -> ChoiceT<F, A>
    where
        A: Clone + 'static,
    {
        ChoiceT::pure(value)
    }

    fn bind<A, B, G>(computation: ChoiceT<F, A>, function: G) -> ChoiceT<F, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        G: Fn(A) -> ChoiceT<F, B> + 'static,
    {
        computation.flat_map(function)
    }
}
