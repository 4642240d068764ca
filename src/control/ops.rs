//! Control-lifting combinators.
//!
//! Four idioms cover the common shapes of base-level control operations:
//!
//! - [`control`]: capture, run, restore in one call. The building block
//!   of the other three.
//! - [`lift_op`]: operations of shape "callback-to-action → action", e.g.
//!   scoped resource acquisition (`with_file(|handle| ...)`).
//! - [`lift_through`]: operations of shape "action → action", e.g.
//!   exception masking or [`crate::effect::IO::catch`].
//! - [`lift_discard`]: operations of shape "unit-action → action", e.g.
//!   spawning; the nested computation runs for its base-context effects
//!   only, and its stack effects are deliberately discarded.
//!
//! All four assume at most one live nested computation per callback
//! invocation; captured snapshots are never shared between invocations.
//!
//! # Examples
//!
//! ```rust
//! use strata::control::{control, RunBase};
//! use strata::effect::{IoFamily, StateT, StateTFamily};
//!
//! type Stack = StateTFamily<i32, IoFamily>;
//!
//! let computation: StateT<i32, IoFamily, i32> = StateT::state(|s| (s, s + 1));
//! let round_tripped = control::<Stack, i32, _>(move |run| run.run(computation.clone()));
//! // behaviorally identical to the computation itself
//! assert_eq!(round_tripped.run(5).run_unsafe(), (5, 6));
//! ```

use std::rc::Rc;

use super::base::{BaseControl, RunBase};
use crate::typeclass::MonadFamily;

/// Captures the stack, runs the continuation, and restores the snapshot it
/// returns.
///
/// After `control`, the stack's effect-state reflects exactly the snapshot
/// the continuation produced, with no intervening effects.
///
/// # Examples
///
/// ```rust
/// use strata::control::{control, RunBase};
/// use strata::effect::{IO, IoFamily, StateT, StateTFamily};
///
/// type Stack = StateTFamily<i32, IoFamily>;
///
/// // run a stack computation inside a base-level wrapper that doubles its
/// // result before the stack state is restored
/// let computation: StateT<i32, IoFamily, i32> = StateT::state(|s| (s, s + 1));
/// let doubled = control::<Stack, i32, _>(move |run| {
///     run.run(computation.clone())
///         .fmap(|(value, state)| (value * 2, state))
/// });
/// assert_eq!(doubled.run(5).run_unsafe(), (10, 6));
/// ```
pub fn control<S, A, G>(scope: G) -> S::Member<A>
where
    S: BaseControl,
    A: Clone + 'static,
    G: Fn(S::BaseRunner) -> <S::Base as MonadFamily>::Member<S::CapturedBase<A>> + 'static,
{
    S::bind(S::lift_with_base(scope), |captured| {
        S::restore_base(captured)
    })
}

/// Lifts a base-level operation of shape "callback-to-action → action" into
/// the stack.
///
/// `operation` is a base-context control operation that drives a callback
/// (resource scoping, iteration, retry); `callback` is the stack-level
/// function to feed it. Each callback invocation runs through the captured
/// run function, and the snapshot the operation finally returns is
/// restored, so stack effects performed inside the callback survive.
///
/// The base-level callback is boxed because the operation must accept a
/// closure created inside the capture scope.
///
/// # Examples
///
/// ```rust
/// use strata::control::lift_op;
/// use strata::effect::{IO, IoFamily, StateT, StateTFamily};
///
/// type Stack = StateTFamily<i32, IoFamily>;
///
/// // a base-level scoped-resource operation
/// let with_resource = |callback: Box<dyn Fn(i32) -> IO<(i32, i32)>>| {
///     IO::new(move || callback(10).run_unsafe())
/// };
///
/// let lifted = lift_op::<Stack, i32, i32, i32, _, _>(with_resource, |resource| {
///     StateT::state(move |s| (resource + s, s + 1))
/// });
/// assert_eq!(lifted.run(5).run_unsafe(), (15, 6));
/// ```
pub fn lift_op<S, Argument, B, C, Operation, Callback>(
    operation: Operation,
    callback: Callback,
) -> S::Member<C>
where
    S: BaseControl,
    Argument: 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    Operation: Fn(
            Box<dyn Fn(Argument) -> <S::Base as MonadFamily>::Member<S::CapturedBase<B>>>,
        ) -> <S::Base as MonadFamily>::Member<S::CapturedBase<C>>
        + 'static,
    Callback: Fn(Argument) -> S::Member<B> + 'static,
{
    let callback = Rc::new(callback);
    control::<S, C, _>(move |run| {
        let callback = callback.clone();
        operation(Box::new(move |argument| run.run(callback(argument))))
    })
}

/// Lifts a base-level operation of shape "action → action" into the stack.
///
/// This is the idiom for wrapping a stack computation in a base-context
/// bracket that takes no callback argument (masking, catching, timing). The
/// nested computation runs through the captured run function, the operation
/// wraps the resulting base action, and whatever snapshot it yields is
/// restored.
///
/// # Examples
///
/// ```rust
/// use strata::control::lift_through;
/// use strata::effect::{IO, IoFamily, StateT, StateTFamily};
///
/// type Stack = StateTFamily<i32, IoFamily>;
///
/// // a base-level panic handler, applied through the state layer
/// let computation: StateT<i32, IoFamily, i32> = StateT::new(|_s| IO::new(|| panic!("kaboom")));
/// let guarded = lift_through::<Stack, i32, i32, _>(
///     |action| IO::catch(action, |_| (0, 0)),
///     computation,
/// );
/// assert_eq!(guarded.run(5).run_unsafe(), (0, 0));
/// ```
pub fn lift_through<S, B, C, Operation>(
    operation: Operation,
    computation: S::Member<B>,
) -> S::Member<C>
where
    S: BaseControl,
    B: Clone + 'static,
    C: Clone + 'static,
    Operation: Fn(
            <S::Base as MonadFamily>::Member<S::CapturedBase<B>>,
        ) -> <S::Base as MonadFamily>::Member<S::CapturedBase<C>>
        + 'static,
{
    control::<S, C, _>(move |run| operation(run.run(computation.clone())))
}

/// Lifts a base-level operation of shape "unit-action → action",
/// discarding the nested computation's stack effects.
///
/// The nested computation still runs through the captured run function, so
/// base-context side effects it performs are observed by the operation; but
/// its snapshot is thrown away and no restoration happens. The final result
/// comes solely from the base context. This is the spawning idiom: the
/// spawned unit sees the ambient effect-state, yet cannot mutate the
/// caller's.
///
/// # Examples
///
/// ```rust
/// use strata::control::lift_discard;
/// use strata::effect::{IO, IoFamily, StateT, StateTFamily};
///
/// type Stack = StateTFamily<i32, IoFamily>;
///
/// let computation: StateT<i32, IoFamily, ()> = StateT::modify(|s| s + 100);
/// let spawned = lift_discard::<Stack, i32, _>(|action| action.fmap(|()| 99), computation);
/// // the result comes from the base operation, and the state mutation is
/// // confined to the discarded execution
/// assert_eq!(spawned.run(5).run_unsafe(), (99, 5));
/// ```
pub fn lift_discard<S, A, Operation>(
    operation: Operation,
    computation: S::Member<()>,
) -> S::Member<A>
where
    S: BaseControl,
    A: Clone + 'static,
    Operation: Fn(<S::Base as MonadFamily>::Member<()>) -> <S::Base as MonadFamily>::Member<A>
        + 'static,
{
    S::lift_with_base(move |run| {
        let discarded = <S::Base as MonadFamily>::map(run.run(computation.clone()), |_| ());
        operation(discarded)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{
        ExceptT, ExceptTFamily, IO, IoFamily, StateT, StateTFamily, WriterT, WriterTFamily,
    };
    use rstest::rstest;
    use std::cell::RefCell;

    type Logged = WriterTFamily<String, IoFamily>;
    type Stack = StateTFamily<i32, Logged>;
    type Simple = StateTFamily<i32, IoFamily>;

    // =========================================================================
    // control
    // =========================================================================

    #[rstest]
    fn control_round_trip_reproduces_all_layer_effects() {
        // mutates state to 9, emits "x", returns 7
        let m: StateT<i32, Logged, i32> = StateT::put(9)
            .flat_map(|()| StateT::lift(WriterT::tell("x".to_string())))
            .flat_map(|()| StateT::pure(7));
        let round = control::<Stack, i32, _>(move |run| run.run(m.clone()));
        let ((result, state), output) = round.run(5).run().run_unsafe();
        assert_eq!(result, 7);
        assert_eq!(state, 9);
        assert_eq!(output, "x".to_string());
    }

    #[rstest]
    fn control_restores_exactly_the_returned_snapshot() {
        let tampered = control::<Simple, i32, _>(|_run| IO::pure((7, 123)));
        assert_eq!(tampered.run(5).run_unsafe(), (7, 123));
    }

    #[rstest]
    fn control_propagates_early_exit() {
        type Failing = ExceptTFamily<String, IoFamily>;
        let m: ExceptT<String, IoFamily, i32> = ExceptT::throw("err".to_string());
        let round = control::<Failing, i32, _>(move |run| run.run(m.clone()));
        let chained = round.flat_map(|v| ExceptT::pure(v * 2));
        assert_eq!(chained.run().run_unsafe(), Err("err".to_string()));
    }

    // =========================================================================
    // lift_op
    // =========================================================================

    #[rstest]
    fn lift_op_scopes_a_resource_around_the_callback() {
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let operation_log = log.clone();

        let with_resource = move |callback: Box<dyn Fn(i32) -> IO<(i32, i32)>>| {
            let operation_log = operation_log.clone();
            IO::new(move || {
                operation_log.borrow_mut().push("acquire".to_string());
                let outcome = callback(10).run_unsafe();
                operation_log.borrow_mut().push("release".to_string());
                outcome
            })
        };

        let lifted = lift_op::<Simple, i32, i32, i32, _, _>(with_resource, |resource| {
            StateT::state(move |s| (resource + s, s + 1))
        });

        // callback's state effect survives restoration
        assert_eq!(lifted.run(5).run_unsafe(), (15, 6));
        assert_eq!(*log.borrow(), vec!["acquire".to_string(), "release".to_string()]);
    }

    #[rstest]
    fn lift_op_callback_may_run_multiple_times() {
        let retry_twice = |callback: Box<dyn Fn(i32) -> IO<(i32, i32)>>| {
            IO::new(move || {
                let _first_attempt = callback(1).run_unsafe();
                callback(2).run_unsafe()
            })
        };
        let lifted = lift_op::<Simple, i32, i32, i32, _, _>(retry_twice, |attempt| {
            StateT::state(move |s| (attempt * 100, s + 1))
        });
        // each attempt starts from the entry snapshot; the kept attempt's
        // state is what gets restored
        assert_eq!(lifted.run(5).run_unsafe(), (200, 6));
    }

    // =========================================================================
    // lift_through
    // =========================================================================

    #[rstest]
    fn lift_through_wraps_the_base_action() {
        let operation = |action: IO<(i32, i32)>| action.fmap(|(value, state)| (value * 100, state));
        let computation: StateT<i32, IoFamily, i32> = StateT::state(|s| (s + 1, s * 2));
        let lifted = lift_through::<Simple, i32, i32, _>(operation, computation);
        assert_eq!(lifted.run(5).run_unsafe(), (600, 10));
    }

    #[rstest]
    fn lift_through_applies_base_level_catch() {
        let computation: StateT<i32, IoFamily, i32> =
            StateT::new(|_s| IO::new(|| panic!("kaboom")));
        let guarded = lift_through::<Simple, i32, i32, _>(
            |action| IO::catch(action, |_| (0, 0)),
            computation,
        );
        assert_eq!(guarded.run(5).run_unsafe(), (0, 0));
    }

    #[rstest]
    fn lift_through_base_failure_bypasses_restoration() {
        let witnessed = Rc::new(RefCell::new(Vec::new()));
        let witness = witnessed.clone();
        let computation: StateT<i32, IoFamily, i32> =
            StateT::new(|_s| IO::new(|| panic!("kaboom")));
        let guarded = lift_through::<Simple, i32, i32, _>(
            move |action| {
                let witness = witness.clone();
                IO::catch(action, move |message| {
                    witness.borrow_mut().push(message);
                    (0, -1)
                })
            },
            computation,
        );
        // no snapshot was produced by the failed run; the handler's stands
        assert_eq!(guarded.run(5).run_unsafe(), (0, -1));
        assert_eq!(*witnessed.borrow(), vec!["kaboom".to_string()]);
    }

    // =========================================================================
    // lift_discard
    // =========================================================================

    #[rstest]
    fn lift_discard_discards_stack_effects() {
        let spawned = lift_discard::<Simple, i32, _>(
            |action| action.fmap(|()| 99),
            StateT::modify(|s| s + 100),
        );
        assert_eq!(spawned.run(5).run_unsafe(), (99, 5));
    }

    #[rstest]
    fn lift_discard_still_performs_base_effects() {
        let effects = Rc::new(RefCell::new(Vec::new()));
        let seen = effects.clone();
        let computation: StateT<i32, IoFamily, ()> =
            StateT::modify(|s| s + 100).flat_map(move |()| {
                let seen = seen.clone();
                StateT::lift(IO::new(move || seen.borrow_mut().push("ran")))
            });
        let spawned = lift_discard::<Simple, i32, _>(|action| action.fmap(|()| 99), computation);
        assert_eq!(spawned.run(5).run_unsafe(), (99, 5));
        assert_eq!(*effects.borrow(), vec!["ran"]);
    }

    #[rstest]
    fn lift_discard_result_is_independent_of_stack_effects() {
        // two computations with different stack effects, same base effects
        let first = lift_discard::<Simple, i32, _>(
            |action| action.fmap(|()| 1),
            StateT::modify(|s| s + 1),
        );
        let second = lift_discard::<Simple, i32, _>(
            |action| action.fmap(|()| 1),
            StateT::modify(|s| s * 31),
        );
        assert_eq!(first.run(5).run_unsafe(), second.run(5).run_unsafe());
    }
}
