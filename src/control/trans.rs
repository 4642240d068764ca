//! Per-layer capture/restore capability.
//!
//! [`LayerControl`] is the contract a single effect layer fulfils so that it
//! can be temporarily unwrapped down to its inner context: `lift_with` hands
//! its continuation a *run function* that executes nested layer computations
//! in the inner context, yielding each one's captured effect-state, and
//! `restore` rebuilds a layer computation from such a snapshot.
//!
//! The captured-state shape is the layer's identity:
//!
//! | Layer     | `Captured<A>` | snapshot carries                      |
//! |-----------|---------------|----------------------------------------|
//! | `ReaderT` | `A`           | nothing extra, environment never accrues |
//! | `StateT`  | `(A, S)`      | the final local state                  |
//! | `WriterT` | `(A, W)`      | the accumulated output                 |
//! | `ExceptT` | `Result<A, E>`| the early exit, as data                |
//! | `ChoiceT` | `Vec<A>`      | every branch, in order                 |
//! | `RwsT`    | `(A, S, W)`   | final state and accumulated output     |
//!
//! # Laws
//!
//! For every layer `L` with inner family `F`:
//!
//! ## Return Law
//!
//! ```text
//! L::lift_with(|_| F::pure(x))  ==  L::pure(x)
//! ```
//!
//! ## Bind Law
//!
//! ```text
//! L::lift_with(|_| F::bind(m, f))
//!     ==  L::bind(L::lift_with(|_| m), |a| L::lift_with(move |_| f(a)))
//! ```
//!
//! ## Round-Trip Law
//!
//! ```text
//! L::bind(L::lift_with(|run| run.run(t)), |st| L::restore(F::pure(st)))  ==  t
//! ```
//!
//! The run function closes over the layer's effect-state *as of the
//! `lift_with` entry* (the current state for `StateT`, the current
//! environment for `ReaderT`), so running the same nested computation twice
//! through one run function starts from the same snapshot both times.
//!
//! # Examples
//!
//! ```rust
//! use strata::control::{LayerControl, RunLayer};
//! use strata::effect::{StateT, StateTFamily};
//! use strata::typeclass::OptionFamily;
//!
//! type Layer = StateTFamily<i32, OptionFamily>;
//!
//! let t: StateT<i32, OptionFamily, i32> = StateT::state(|s| (s, s + 1));
//! let captured = Layer::lift_with(move |run| run.run(t.clone()));
//! // the snapshot pairs result and final state; the outer computation's
//! // own state is the untouched entry state
//! assert_eq!(captured.run(5), Some(((5, 6), 5)));
//! ```

use crate::effect::{
    ChoiceT, ChoiceTFamily, ExceptT, ExceptTFamily, ReaderT, ReaderTFamily, RwsT, RwsTFamily,
    StateT, StateTFamily, WriterT, WriterTFamily,
};
use crate::typeclass::{MonadFamily, Monoid};

/// The capture/restore capability of a single effect layer.
///
/// Implemented once per layer family. `Inner` is the context the layer
/// wraps, `Captured<A>` is the extra structure a suspended computation of
/// this layer carries, and `Runner` is the concrete run-function type handed
/// to `lift_with` continuations.
pub trait LayerControl: MonadFamily {
    /// The inner context this layer wraps.
    type Inner: MonadFamily;

    /// Captured-state shape: what a suspended computation with result `A`
    /// must carry to be resumed exactly.
    type Captured<A: Clone + 'static>: Clone + 'static;

    /// The run-function type supplied to `lift_with` continuations.
    type Runner: RunLayer<Self>;

    /// Unwraps this layer: the continuation receives a run function and
    /// produces an inner-context action, which is re-wrapped as a layer
    /// computation.
    ///
    /// The layer's current effect-state is snapshotted once, at the moment
    /// the resulting computation runs into `lift_with`, and the run function
    /// closes over that snapshot.
    fn lift_with<A, G>(scope: G) -> Self::Member<A>
    where
        A: Clone + 'static,
        G: Fn(Self::Runner) -> <Self::Inner as MonadFamily>::Member<A> + 'static;

    /// Rebuilds a layer computation from an inner-context action yielding a
    /// captured snapshot. The observable layer effects replay the snapshot
    /// exactly.
    fn restore<A>(
        captured: <Self::Inner as MonadFamily>::Member<Self::Captured<A>>,
    ) -> Self::Member<A>
    where
        A: Clone + 'static;
}

/// A run function scoped to one `lift_with` invocation.
///
/// The single method is generic over the nested computation's result type:
/// one captured run function may execute arbitrarily many nested
/// computations, of arbitrarily many result types.
pub trait RunLayer<L>: Clone + 'static
where
    L: LayerControl,
{
    /// Executes a nested layer computation down to the inner context,
    /// yielding its captured effect-state.
    fn run<A>(&self, computation: L::Member<A>) -> <L::Inner as MonadFamily>::Member<L::Captured<A>>
    where
        A: Clone + 'static;
}

// =============================================================================
// ReaderT: Captured<A> = A
// =============================================================================

/// Run function for [`ReaderTFamily`], closing over the current environment.
#[derive(Clone)]
pub struct ReaderRunner<R: Clone + 'static> {
    environment: R,
}

impl<R, F> RunLayer<ReaderTFamily<R, F>> for ReaderRunner<R>
where
    R: Clone + 'static,
    F: MonadFamily,
{
    fn run<A>(&self, computation: ReaderT<R, F, A>) -> F::Member<A>
    where
        A: Clone + 'static,
    {
        computation.run(self.environment.clone())
    }
}

impl<R, F> LayerControl for ReaderTFamily<R, F>
where
    R: Clone + 'static,
    F: MonadFamily,
{
    type Inner = F;
    type Captured<A: Clone + 'static> = A;
    type Runner = ReaderRunner<R>;

    fn lift_with<A, G>(scope: G) -> ReaderT<R, F, A>
    where
        A: Clone + 'static,
        G: Fn(ReaderRunner<R>) -> F::Member<A> + 'static,
    {
        ReaderT::new(move |environment: R| scope(ReaderRunner { environment }))
    }

    fn restore<A>(captured: F::Member<A>) -> ReaderT<R, F, A>
    where
        A: Clone + 'static,
    {
        ReaderT::lift(captured)
    }
}

// =============================================================================
// StateT: Captured<A> = (A, S)
// =============================================================================

/// Run function for [`StateTFamily`], closing over the state at capture
/// time.
#[derive(Clone)]
pub struct StateRunner<S: Clone + 'static> {
    state: S,
}

impl<S, F> RunLayer<StateTFamily<S, F>> for StateRunner<S>
where
    S: Clone + 'static,
    F: MonadFamily,
{
    fn run<A>(&self, computation: StateT<S, F, A>) -> F::Member<(A, S)>
    where
        A: Clone + 'static,
    {
        computation.run(self.state.clone())
    }
}

impl<S, F> LayerControl for StateTFamily<S, F>
where
    S: Clone + 'static,
    F: MonadFamily,
{
    type Inner = F;
    type Captured<A: Clone + 'static> = (A, S);
    type Runner = StateRunner<S>;

    fn lift_with<A, G>(scope: G) -> StateT<S, F, A>
    where
        A: Clone + 'static,
        G: Fn(StateRunner<S>) -> F::Member<A> + 'static,
    {
        StateT::new(move |state: S| {
            let runner = StateRunner {
                state: state.clone(),
            };
            // the outer result is paired with the *unchanged* entry state
            F::map(scope(runner), move |value| (value, state.clone()))
        })
    }

    fn restore<A>(captured: F::Member<(A, S)>) -> StateT<S, F, A>
    where
        A: Clone + 'static,
    {
        // drop the incoming state, install the captured one
        StateT::new(move |_| captured.clone())
    }
}

// =============================================================================
// WriterT: Captured<A> = (A, W)
// =============================================================================

/// Run function for [`WriterTFamily`]. Output always starts from the monoid
/// zero, so there is no state to close over.
#[derive(Clone)]
pub struct WriterRunner;

impl<W, F> RunLayer<WriterTFamily<W, F>> for WriterRunner
where
    W: Monoid + Clone + 'static,
    F: MonadFamily,
{
    fn run<A>(&self, computation: WriterT<W, F, A>) -> F::Member<(A, W)>
    where
        A: Clone + 'static,
    {
        computation.run()
    }
}

impl<W, F> LayerControl for WriterTFamily<W, F>
where
    W: Monoid + Clone + 'static,
    F: MonadFamily,
{
    type Inner = F;
    type Captured<A: Clone + 'static> = (A, W);
    type Runner = WriterRunner;

    fn lift_with<A, G>(scope: G) -> WriterT<W, F, A>
    where
        A: Clone + 'static,
        G: Fn(WriterRunner) -> F::Member<A> + 'static,
    {
        // the outer result is paired with the zero element
        WriterT::new(F::map(scope(WriterRunner), |value| (value, W::empty())))
    }

    fn restore<A>(captured: F::Member<(A, W)>) -> WriterT<W, F, A>
    where
        A: Clone + 'static,
    {
        // re-emits the captured output verbatim
        WriterT::new(captured)
    }
}

// =============================================================================
// ExceptT: Captured<A> = Result<A, E>
// =============================================================================

/// Run function for [`ExceptTFamily`]. The exit channel carries no entry
/// state, so there is nothing to close over.
#[derive(Clone)]
pub struct ExceptRunner;

impl<E, F> RunLayer<ExceptTFamily<E, F>> for ExceptRunner
where
    E: Clone + 'static,
    F: MonadFamily,
{
    fn run<A>(&self, computation: ExceptT<E, F, A>) -> F::Member<Result<A, E>>
    where
        A: Clone + 'static,
    {
        computation.run()
    }
}

impl<E, F> LayerControl for ExceptTFamily<E, F>
where
    E: Clone + 'static,
    F: MonadFamily,
{
    type Inner = F;
    type Captured<A: Clone + 'static> = Result<A, E>;
    type Runner = ExceptRunner;

    fn lift_with<A, G>(scope: G) -> ExceptT<E, F, A>
    where
        A: Clone + 'static,
        G: Fn(ExceptRunner) -> F::Member<A> + 'static,
    {
        ExceptT::new(F::map(scope(ExceptRunner), |value| Ok(value)))
    }

    fn restore<A>(captured: F::Member<Result<A, E>>) -> ExceptT<E, F, A>
    where
        A: Clone + 'static,
    {
        // a captured exit re-raises instead of reading as success
        ExceptT::new(captured)
    }
}

// =============================================================================
// ChoiceT: Captured<A> = Vec<A>
// =============================================================================

/// Run function for [`ChoiceTFamily`].
#[derive(Clone)]
pub struct ChoiceRunner;

impl<F> RunLayer<ChoiceTFamily<F>> for ChoiceRunner
where
    F: MonadFamily,
{
    fn run<A>(&self, computation: ChoiceT<F, A>) -> F::Member<Vec<A>>
    where
        A: Clone + 'static,
    {
        computation.run()
    }
}

impl<F> LayerControl for ChoiceTFamily<F>
where
    F: MonadFamily,
{
    type Inner = F;
    type Captured<A: Clone + 'static> = Vec<A>;
    type Runner = ChoiceRunner;

    fn lift_with<A, G>(scope: G) -> ChoiceT<F, A>
    where
        A: Clone + 'static,
        G: Fn(ChoiceRunner) -> F::Member<A> + 'static,
    {
        ChoiceT::new(F::map(scope(ChoiceRunner), |value| vec![value]))
    }

    fn restore<A>(captured: F::Member<Vec<A>>) -> ChoiceT<F, A>
    where
        A: Clone + 'static,
    {
        // re-expands the captured sequence into branches
        ChoiceT::new(captured)
    }
}

// =============================================================================
// RwsT: Captured<A> = (A, S, W)
// =============================================================================

/// Run function for [`RwsTFamily`], closing over the environment and the
/// state at capture time.
#[derive(Clone)]
pub struct RwsRunner<R: Clone + 'static, S: Clone + 'static> {
    environment: R,
    state: S,
}

impl<R, W, S, F> RunLayer<RwsTFamily<R, W, S, F>> for RwsRunner<R, S>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
{
    fn run<A>(&self, computation: RwsT<R, W, S, F, A>) -> F::Member<(A, S, W)>
    where
        A: Clone + 'static,
    {
        computation.run(self.environment.clone(), self.state.clone())
    }
}

impl<R, W, S, F> LayerControl for RwsTFamily<R, W, S, F>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily,
{
    type Inner = F;
    type Captured<A: Clone + 'static> = (A, S, W);
    type Runner = RwsRunner<R, S>;

    fn lift_with<A, G>(scope: G) -> RwsT<R, W, S, F, A>
    where
        A: Clone + 'static,
        G: Fn(RwsRunner<R, S>) -> F::Member<A> + 'static,
    {
        RwsT::new(move |environment: R, state: S| {
            let runner = RwsRunner {
                environment: environment.clone(),
                state: state.clone(),
            };
            F::map(scope(runner), move |value| {
                (value, state.clone(), W::empty())
            })
        })
    }

    fn restore<A>(captured: F::Member<(A, S, W)>) -> RwsT<R, W, S, F, A>
    where
        A: Clone + 'static,
    {
        RwsT::new(move |_, _| captured.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::OptionFamily;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    type StateLayer = StateTFamily<i32, OptionFamily>;
    type WriterLayer = WriterTFamily<String, OptionFamily>;
    type ExceptLayer = ExceptTFamily<String, OptionFamily>;
    type ChoiceLayer = ChoiceTFamily<OptionFamily>;
    type ReaderLayer = ReaderTFamily<i32, OptionFamily>;
    type RwsLayer = RwsTFamily<i32, String, i32, OptionFamily>;

    // =========================================================================
    // Return and Bind Laws
    // =========================================================================

    #[rstest]
    fn state_return_law() {
        let lifted: StateT<i32, OptionFamily, i32> = StateLayer::lift_with(|_| Some(42));
        let direct: StateT<i32, OptionFamily, i32> = StateT::pure(42);
        assert_eq!(lifted.run(5), direct.run(5));
    }

    #[rstest]
    fn writer_return_law() {
        let lifted: WriterT<String, OptionFamily, i32> = WriterLayer::lift_with(|_| Some(42));
        assert_eq!(lifted.run(), Some((42, String::new())));
    }

    #[rstest]
    fn state_bind_law() {
        let f = |n: i32| Some(n + 1);
        let left: StateT<i32, OptionFamily, i32> =
            StateLayer::lift_with(move |_| OptionFamily::bind(Some(1), f));
        let right: StateT<i32, OptionFamily, i32> =
            StateLayer::lift_with(|_| Some(1)).flat_map(move |n| StateLayer::lift_with(move |_| f(n)));
        assert_eq!(left.run(5), right.run(5));
        assert_eq!(left.run(5), Some((2, 5)));
    }

    // =========================================================================
    // Reader: Captured<A> = A
    // =========================================================================

    #[rstest]
    fn reader_runner_supplies_current_environment() {
        let t: ReaderT<i32, OptionFamily, i32> = ReaderT::asks(|environment: &i32| environment * 2);
        let captured = ReaderLayer::lift_with(move |run| run.run(t.clone()));
        assert_eq!(captured.run(21), Some(42));
    }

    #[rstest]
    fn reader_restore_leaves_environment_untouched() {
        let restored: ReaderT<i32, OptionFamily, i32> = ReaderLayer::restore(Some(7));
        assert_eq!(restored.run(999), Some(7));
    }

    // =========================================================================
    // State: Captured<A> = (A, S)
    // =========================================================================

    #[rstest]
    fn state_capture_pairs_result_with_final_state() {
        // initial state 5, action "add 1, return old value"
        let t: StateT<i32, OptionFamily, i32> = StateT::state(|s| (s, s + 1));
        let captured = StateLayer::lift_with(move |run| run.run(t.clone()));
        // captured pair is (5, 6); the outer state is still the entry state
        assert_eq!(captured.run(5), Some(((5, 6), 5)));
    }

    #[rstest]
    fn state_restore_installs_captured_state() {
        let restored: StateT<i32, OptionFamily, i32> = StateLayer::restore(Some((5, 6)));
        // local state reads 6, result reads 5, whatever state we start from
        assert_eq!(restored.run(5), Some((5, 6)));
        assert_eq!(restored.run(999), Some((5, 6)));
    }

    #[rstest]
    fn state_round_trip_law() {
        let t: StateT<i32, OptionFamily, i32> = StateT::state(|s| (s, s + 1));
        let expected = t.clone();
        let round = StateLayer::lift_with(move |run| run.run(t.clone()))
            .flat_map(|snapshot| StateLayer::restore(Some(snapshot)));
        assert_eq!(round.run(5), expected.run(5));
    }

    #[rstest]
    fn state_runner_reuses_entry_snapshot() {
        let t: StateT<i32, OptionFamily, i32> = StateT::state(|s| (s, s + 1));
        let both = StateLayer::lift_with(move |run| {
            let first = run.run(t.clone());
            let second = run.run(t.clone());
            OptionFamily::bind(first, move |a| {
                OptionFamily::map(second.clone(), move |b| (a, b))
            })
        });
        // both executions start from the state captured at entry
        assert_eq!(both.run(5), Some((((5, 6), (5, 6)), 5)));
    }

    // =========================================================================
    // Writer: Captured<A> = (A, W)
    // =========================================================================

    #[rstest]
    fn writer_capture_collects_output() {
        let t: WriterT<String, OptionFamily, i32> = WriterT::tell("a".to_string())
            .flat_map(|()| WriterT::tell("b".to_string()))
            .flat_map(|()| WriterT::pure(42));
        let captured = WriterLayer::lift_with(move |run| run.run(t.clone()));
        // snapshot is (42, "ab"); the outer computation emits the zero element
        assert_eq!(captured.run(), Some(((42, "ab".to_string()), String::new())));
    }

    #[rstest]
    fn writer_restore_replays_output() {
        let restored: WriterT<String, OptionFamily, i32> =
            WriterLayer::restore(Some((42, "ab".to_string())));
        assert_eq!(restored.run(), Some((42, "ab".to_string())));
    }

    // =========================================================================
    // Except: Captured<A> = Result<A, E>
    // =========================================================================

    #[rstest]
    fn except_capture_carries_exit_as_data() {
        let t: ExceptT<String, OptionFamily, i32> = ExceptT::throw("err".to_string());
        let captured = ExceptLayer::lift_with(move |run| run.run(t.clone()));
        assert_eq!(captured.run(), Some(Ok(Err("err".to_string()))));
    }

    #[rstest]
    fn except_restore_re_raises_exit() {
        let reached = Rc::new(Cell::new(false));
        let witness = reached.clone();
        let restored: ExceptT<String, OptionFamily, i32> =
            ExceptLayer::restore(Some(Err("err".to_string())));
        let chained = restored.flat_map(move |v| {
            witness.set(true);
            ExceptT::pure(v * 2)
        });
        assert_eq!(chained.run(), Some(Err("err".to_string())));
        assert!(!reached.get(), "downstream bind must not run after a restored exit");
    }

    #[rstest]
    fn except_restore_continues_on_success() {
        let restored: ExceptT<String, OptionFamily, i32> = ExceptLayer::restore(Some(Ok(21)));
        let chained = restored.flat_map(|v| ExceptT::pure(v * 2));
        assert_eq!(chained.run(), Some(Ok(42)));
    }

    // =========================================================================
    // Choice: Captured<A> = Vec<A>
    // =========================================================================

    #[rstest]
    fn choice_capture_collects_branches_in_order() {
        let t: ChoiceT<OptionFamily, i32> = ChoiceT::choices(vec![1, 2, 3]);
        let captured = ChoiceLayer::lift_with(move |run| run.run(t.clone()));
        assert_eq!(captured.run(), Some(vec![vec![1, 2, 3]]));
    }

    #[rstest]
    fn choice_restore_re_expands_branches() {
        let restored: ChoiceT<OptionFamily, i32> = ChoiceLayer::restore(Some(vec![1, 2, 3]));
        let branched = restored.flat_map(|n| ChoiceT::choices(vec![n, n * 10]));
        assert_eq!(branched.run(), Some(vec![1, 10, 2, 20, 3, 30]));
    }

    // =========================================================================
    // Rws: Captured<A> = (A, S, W)
    // =========================================================================

    #[rstest]
    fn rws_capture_snapshots_environment_and_state() {
        let t: RwsT<i32, String, i32, OptionFamily, i32> = RwsT::get().flat_map(|s: i32| {
            RwsT::put(s + 1)
                .flat_map(move |()| RwsT::tell("x".to_string()))
                .flat_map(move |()| RwsT::pure(s))
        });
        let captured = RwsLayer::lift_with(move |run| run.run(t.clone()));
        // snapshot (5, 6, "x"); outer state unchanged, outer output empty
        assert_eq!(captured.run(3, 5), Some(((5, 6, "x".to_string()), 5, String::new())));
    }

    #[rstest]
    fn rws_restore_installs_state_and_output() {
        let restored: RwsT<i32, String, i32, OptionFamily, i32> =
            RwsLayer::restore(Some((5, 6, "x".to_string())));
        assert_eq!(restored.run(3, 999), Some((5, 6, "x".to_string())));
    }
}
