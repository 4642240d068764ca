//! `WriterT` - Writer Monad Transformer.
//!
//! `WriterT` adds output accumulation to any inner context.
//!
//! # Overview
//!
//! `WriterT<W, F, A>` encapsulates `F::Member<(A, W)>` where `W` is the
//! output type (a [`Monoid`], so outputs from sequenced computations can be
//! combined) and `F` is the inner context's family. The accumulated output
//! rides alongside the result; `tell` appends to it.
//!
//! # Examples
//!
//! ```rust
//! use strata::effect::WriterT;
//! use strata::typeclass::OptionFamily;
//!
//! fn log(message: &str) -> WriterT<Vec<String>, OptionFamily, ()> {
//!     WriterT::tell(vec![message.to_string()])
//! }
//!
//! let computation = log("step 1")
//!     .flat_map(|()| log("step 2"))
//!     .flat_map(|()| WriterT::pure(42));
//!
//! assert_eq!(
//!     computation.run(),
//!     Some((42, vec!["step 1".to_string(), "step 2".to_string()]))
//! );
//! ```

#![forbid(unsafe_code)]

use std::rc::Rc;

use crate::typeclass::{MonadFamily, Monoid};

/// A monad transformer that adds output accumulation capability.
///
/// `WriterT<W, F, A>` represents a computation that produces a value and
/// accumulated output, wrapped in the inner context `F`.
///
/// # Type Parameters
///
/// - `W`: The output type (must implement `Monoid`)
/// - `F`: The inner context's family
/// - `A`: The result type
pub struct WriterT<W, F, A>
where
    W: Monoid + Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// The wrapped inner computation producing (value, output).
    inner: F::Member<(A, W)>,
}

impl<W, F, A> WriterT<W, F, A>
where
    W: Monoid + Clone + 'static,
    F: MonadFamily,
    A: Clone + 'static,
{
    /// Creates a new `WriterT` from an inner computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::WriterT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let writer: WriterT<Vec<String>, OptionFamily, i32> =
    ///     WriterT::new(Some((42, vec!["log".to_string()])));
    /// assert_eq!(writer.run(), Some((42, vec!["log".to_string()])));
    /// ```
    pub fn new(inner: F::Member<(A, W)>) -> Self {
        Self { inner }
    }

    /// Runs the `WriterT` computation, returning the inner computation.
    pub fn run(self) -> F::Member<(A, W)> {
        self.inner
    }

    /// Creates a `WriterT` that returns a constant value with empty output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::WriterT;
    /// use strata::typeclass::{Monoid, OptionFamily};
    ///
    /// let writer: WriterT<Vec<String>, OptionFamily, i32> = WriterT::pure(42);
    /// assert_eq!(writer.run(), Some((42, Vec::<String>::empty())));
    /// ```
    pub fn pure(value: A) -> Self {
        Self::new(F::pure((value, W::empty())))
    }

    /// Lifts an inner computation into `WriterT` with empty output.
    pub fn lift(computation: F::Member<A>) -> Self {
        Self::new(F::map(computation, |value| (value, W::empty())))
    }

    /// Maps a function over the result value.
    pub fn fmap<B, G>(self, function: G) -> WriterT<W, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> B + 'static,
    {
        WriterT::new(F::map(self.inner, move |(value, output)| {
            (function(value), output)
        }))
    }

    /// Chains `WriterT` computations, combining their outputs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::WriterT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let writer: WriterT<Vec<String>, OptionFamily, i32> =
    ///     WriterT::new(Some((10, vec!["first".to_string()])));
    /// let chained = writer.flat_map(|v| {
    ///     WriterT::new(Some((v * 2, vec!["second".to_string()])))
    /// });
    /// assert_eq!(
    ///     chained.run(),
    ///     Some((20, vec!["first".to_string(), "second".to_string()]))
    /// );
    /// ```
    pub fn flat_map<B, G>(self, function: G) -> WriterT<W, F, B>
    where
        B: Clone + 'static,
        G: Fn(A) -> WriterT<W, F, B> + 'static,
    {
        let function = Rc::new(function);
        WriterT::new(F::bind(self.inner, move |(value, first_output)| {
            let function = function.clone();
            F::map(function(value).inner, move |(result, second_output)| {
                (result, first_output.clone().combine(second_output))
            })
        }))
    }

    /// Executes a computation and additionally returns its own output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::WriterT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let writer: WriterT<Vec<String>, OptionFamily, i32> =
    ///     WriterT::new(Some((42, vec!["log".to_string()])));
    /// let listened = WriterT::listen(writer);
    /// assert_eq!(
    ///     listened.run(),
    ///     Some(((42, vec!["log".to_string()]), vec!["log".to_string()]))
    /// );
    /// ```
    pub fn listen(computation: Self) -> WriterT<W, F, (A, W)> {
        WriterT::new(F::map(computation.inner, |(value, output)| {
            ((value, output.clone()), output)
        }))
    }
}

// =============================================================================
// Output Emission
// =============================================================================

impl<W, F> WriterT<W, F, ()>
where
    W: Monoid + Clone + 'static,
    F: MonadFamily,
{
    /// Creates a `WriterT` that appends output without producing a
    /// meaningful result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::WriterT;
    /// use strata::typeclass::OptionFamily;
    ///
    /// let writer: WriterT<Vec<String>, OptionFamily, ()> =
    ///     WriterT::tell(vec!["message".to_string()]);
    /// assert_eq!(writer.run(), Some(((), vec!["message".to_string()])));
    /// ```
    pub fn tell(output: W) -> Self {
        Self::new(F::pure(((), output)))
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<W, F, A> Clone for WriterT<W, F, A>
where
    W: Monoid + Clone + 'static,
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
// WriterTFamily
// =============================================================================

/// Family witness for `WriterT<W, F, _>`.
pub struct WriterTFamily<W, F>(std::marker::PhantomData<(W, F)>);

impl<W, F> MonadFamily for WriterTFamily<W, F>
where
    W: Monoid + Clone + 'static,
    F: MonadFamily,
{
    type Member<A: Clone + 'static> = WriterT<W, F, A>;

    fn pure<A>(value: A) -> WriterT<W, F, A>
    where
        A: Clone + 'static,
    {
        WriterT::pure(value)
    }

    fn bind<A, B, G>(computation: WriterT<W, F, A>, function: G) -> WriterT<W, F, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        G: Fn(A) -> WriterT<W, F, B> + 'static,
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
    fn writer_transformer_new_and_run() {
        let writer: WriterT<Vec<String>, OptionFamily, i32> =
            WriterT::new(Some((42, vec!["log".to_string()])));
        assert_eq!(writer.run(), Some((42, vec!["log".to_string()])));
    }

    #[rstest]
    fn writer_transformer_pure_has_empty_output() {
        let writer: WriterT<Vec<String>, OptionFamily, i32> = WriterT::pure(42);
        assert_eq!(writer.run(), Some((42, vec![])));
    }

    #[rstest]
    fn writer_transformer_tell_appends() {
        let writer: WriterT<Vec<String>, OptionFamily, ()> =
            WriterT::tell(vec!["log".to_string()]);
        assert_eq!(writer.run(), Some(((), vec!["log".to_string()])));
    }

    #[rstest]
    fn writer_transformer_flat_map_combines_outputs() {
        let writer: WriterT<Vec<String>, OptionFamily, i32> =
            WriterT::new(Some((10, vec!["first".to_string()])));
        let chained =
            writer.flat_map(|v| WriterT::new(Some((v * 2, vec!["second".to_string()]))));
        assert_eq!(
            chained.run(),
            Some((20, vec!["first".to_string(), "second".to_string()]))
        );
    }

    #[rstest]
    fn writer_transformer_string_output() {
        let computation: WriterT<String, OptionFamily, i32> = WriterT::tell("a".to_string())
            .flat_map(|()| WriterT::tell("b".to_string()))
            .flat_map(|()| WriterT::pure(42));
        assert_eq!(computation.run(), Some((42, "ab".to_string())));
    }

    #[rstest]
    fn writer_transformer_listen_exposes_output() {
        let writer: WriterT<Vec<String>, OptionFamily, i32> =
            WriterT::new(Some((42, vec!["log".to_string()])));
        let listened = WriterT::listen(writer);
        assert_eq!(
            listened.run(),
            Some(((42, vec!["log".to_string()]), vec!["log".to_string()]))
        );
    }

    #[rstest]
    fn writer_transformer_lift_has_empty_output() {
        let writer: WriterT<Vec<String>, OptionFamily, i32> = WriterT::lift(Some(7));
        assert_eq!(writer.run(), Some((7, vec![])));
    }

    #[rstest]
    fn writer_transformer_over_io() {
        let computation: WriterT<String, IoFamily, i32> = WriterT::tell("x".to_string())
            .flat_map(|()| WriterT::new(IO::pure((7, "y".to_string()))));
        assert_eq!(computation.run().run_unsafe(), (7, "xy".to_string()));
    }

    #[rstest]
    fn writer_transformer_none_short_circuits() {
        let writer: WriterT<Vec<String>, OptionFamily, i32> = WriterT::new(None);
        let chained = writer.flat_map(|v| WriterT::pure(v * 2));
        assert_eq!(chained.run(), None);
    }
}
