//! Whole-stack capture/restore capability.
//!
//! [`BaseControl`] is [`super::LayerControl`] at stack granularity: one
//! `lift_with_base` call unwraps *every* layer down to the base context in a
//! single step, and `restore_base` splices a stack-wide snapshot back into a
//! stack computation. A context that is its own base (no layering) has the
//! trivial instance: identity captured shape, no bookkeeping.
//!
//! Stacks acquire the capability by recursion: the instance for
//! `Layer ∘ Inner` is derived from the layer's `LayerControl` and the inner
//! stack's `BaseControl`, with
//!
//! ```text
//! CapturedBase<A> = Inner::CapturedBase<Layer::Captured<A>>
//! ```
//!
//! so the snapshot nests exactly as the layers do, and restoring unwinds
//! them in reverse order. The generic recipe lives in
//! [`stacked_lift_with_base`] / [`stacked_restore_base`]; each transformer's
//! impl is those helpers applied.
//!
//! # Laws
//!
//! The per-layer laws hold at stack granularity, plus *single capture per
//! call*: effect-state is snapshotted exactly once, when the computation
//! produced by `lift_with_base` runs into it, and never re-sampled per use
//! of the run function.
//!
//! # Examples
//!
//! ```rust
//! use strata::control::{BaseControl, RunBase};
//! use strata::effect::{IoFamily, StateT, StateTFamily, WriterTFamily, WriterT};
//!
//! // state over writer over IO
//! type Stack = StateTFamily<i32, WriterTFamily<String, IoFamily>>;
//!
//! let m: StateT<i32, WriterTFamily<String, IoFamily>, i32> = StateT::put(9)
//!     .flat_map(|()| StateT::lift(WriterT::tell("x".to_string())))
//!     .flat_map(|()| StateT::pure(7));
//!
//! // one call captures both layers; the snapshot nests innermost-last
//! let captured = Stack::lift_with_base(move |run| run.run(m.clone()));
//! let ((snapshot, state), output) = captured.run(5).run().run_unsafe();
//! assert_eq!(snapshot, ((7, 9), "x".to_string()));
//! assert_eq!(state, 5);              // outer state untouched
//! assert_eq!(output, String::new()); // outer output is the zero element
//! ```

use std::rc::Rc;

use super::trans::{
    ChoiceRunner, ExceptRunner, LayerControl, ReaderRunner, RunLayer, RwsRunner, StateRunner,
    WriterRunner,
};
use crate::effect::{
    ChoiceT, ChoiceTFamily, ExceptT, ExceptTFamily, IoFamily, ReaderT, ReaderTFamily, RwsT,
    RwsTFamily, StateT, StateTFamily, WriterT, WriterTFamily,
};
use crate::typeclass::{
    IdentityFamily, MonadFamily, Monoid, OptionFamily, ResultFamily, VecFamily,
};

/// The capture/restore capability of an entire stack down to its base
/// context.
pub trait BaseControl: MonadFamily {
    /// The base context at the root of the stack.
    type Base: MonadFamily;

    /// Stack-wide captured-state shape: the composition of every layer's
    /// captured shape, innermost layer nested last.
    type CapturedBase<A: Clone + 'static>: Clone + 'static;

    /// The run-function type supplied to `lift_with_base` continuations.
    type BaseRunner: RunBase<Self>;

    /// Unwraps the whole stack: the continuation receives a run function
    /// that executes nested stack computations down to the base context,
    /// yielding stack-wide snapshots.
    fn lift_with_base<A, G>(scope: G) -> Self::Member<A>
    where
        A: Clone + 'static,
        G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static;

    /// Rebuilds a stack computation from a stack-wide snapshot.
    ///
    /// Unlike the per-layer [`LayerControl::restore`], the snapshot is taken
    /// bare rather than wrapped in a context action: it is meant to be used
    /// immediately after a run function produced it (see
    /// [`super::control`]).
    fn restore_base<A>(captured: Self::CapturedBase<A>) -> Self::Member<A>
    where
        A: Clone + 'static;
}

/// A stack-wide run function scoped to one `lift_with_base` invocation.
pub trait RunBase<S>: Clone + 'static
where
    S: BaseControl,
{
    /// Executes a nested stack computation down to the base context,
    /// yielding its stack-wide captured effect-state.
    fn run<A>(
        &self,
        computation: S::Member<A>,
    ) -> <S::Base as MonadFamily>::Member<S::CapturedBase<A>>
    where
        A: Clone + 'static;
}

// =============================================================================
// Primitive Instances
//
// A context that is its own base captures nothing: the snapshot is the
// plain result and the run function is the identity.
// =============================================================================

/// Run function for contexts that are their own base: running is the
/// identity.
#[derive(Clone)]
pub struct PrimitiveRunner;

macro_rules! primitive_base_control {
    (impl BaseControl for $family:ty) => {
        primitive_base_control!(@imp [] $family);
    };
    (impl<$param:ident> BaseControl for $family:ty) => {
        primitive_base_control!(@imp [$param: Clone + 'static] $family);
    };
    (@imp [$($generics:tt)*] $family:ty) => {
        impl<$($generics)*> BaseControl for $family {
            type Base = Self;
            type CapturedBase<A: Clone + 'static> = A;
            type BaseRunner = PrimitiveRunner;

            fn lift_with_base<A, G>(scope: G) -> Self::Member<A>
            where
                A: Clone + 'static,
                G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static,
            {
                scope(PrimitiveRunner)
            }

            fn restore_base<A>(captured: A) -> Self::Member<A>
            where
                A: Clone + 'static,
            {
                <$family as MonadFamily>::pure(captured)
            }
        }

        impl<$($generics)*> RunBase<$family> for PrimitiveRunner {
            fn run<A>(
                &self,
                computation: <$family as MonadFamily>::Member<A>,
            ) -> <$family as MonadFamily>::Member<A>
            where
                A: Clone + 'static,
            {
                computation
            }
        }
    };
}

primitive_base_control!(impl BaseControl for IdentityFamily);
primitive_base_control!(impl BaseControl for OptionFamily);
primitive_base_control!(impl<E> BaseControl for ResultFamily<E>);
primitive_base_control!(impl BaseControl for VecFamily);
primitive_base_control!(impl BaseControl for IoFamily);

// =============================================================================
// Default Derivation
// =============================================================================

/// A stack-wide run function built from a layer run function and the inner
/// stack's run function: chains the first into the second, so a nested
/// computation runs through the layer, then through the rest of the stack.
pub struct StackedRunner<LayerRun, InnerRun> {
    layer: LayerRun,
    inner: InnerRun,
}

impl<LayerRun: Clone, InnerRun: Clone> Clone for StackedRunner<LayerRun, InnerRun> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
            inner: self.inner.clone(),
        }
    }
}

/// The generic `lift_with_base` recipe for `Layer ∘ Inner`: capture the
/// layer, then inside its continuation capture the inner stack, and hand the
/// caller the composed run function.
pub fn stacked_lift_with_base<L, A, G>(scope: G) -> L::Member<A>
where
    L: LayerControl,
    L::Inner: BaseControl,
    A: Clone + 'static,
    G: Fn(
            StackedRunner<L::Runner, <L::Inner as BaseControl>::BaseRunner>,
        ) -> <<L::Inner as BaseControl>::Base as MonadFamily>::Member<A>
        + 'static,
{
    let scope = Rc::new(scope);
    L::lift_with(move |layer_runner| {
        let scope = scope.clone();
        <L::Inner as BaseControl>::lift_with_base(move |inner_runner| {
            scope(StackedRunner {
                layer: layer_runner.clone(),
                inner: inner_runner,
            })
        })
    })
}

/// The generic `restore_base` recipe for `Layer ∘ Inner`: restore the inner
/// stack from the outer part of the snapshot, then the layer from what it
/// yields.
pub fn stacked_restore_base<L, A>(
    captured: <L::Inner as BaseControl>::CapturedBase<L::Captured<A>>,
) -> L::Member<A>
where
    L: LayerControl,
    L::Inner: BaseControl,
    A: Clone + 'static,
{
    L::restore(<L::Inner as BaseControl>::restore_base(captured))
}

// =============================================================================
// Derived Instances: ReaderT
// =============================================================================

impl<R, F> BaseControl for ReaderTFamily<R, F>
where
    R: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    type Base = <F as BaseControl>::Base;
    type CapturedBase<A: Clone + 'static> = F::CapturedBase<A>;
    type BaseRunner = StackedRunner<ReaderRunner<R>, <F as BaseControl>::BaseRunner>;

    fn lift_with_base<A, G>(scope: G) -> ReaderT<R, F, A>
    where
        A: Clone + 'static,
        G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static,
    {
        stacked_lift_with_base::<Self, A, G>(scope)
    }

    fn restore_base<A>(captured: F::CapturedBase<A>) -> ReaderT<R, F, A>
    where
        A: Clone + 'static,
    {
        stacked_restore_base::<Self, A>(captured)
    }
}

impl<R, F> RunBase<ReaderTFamily<R, F>>
    for StackedRunner<ReaderRunner<R>, <F as BaseControl>::BaseRunner>
where
    R: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    fn run<A>(
        &self,
        computation: ReaderT<R, F, A>,
    ) -> <<F as BaseControl>::Base as MonadFamily>::Member<F::CapturedBase<A>>
    where
        A: Clone + 'static,
    {
        self.inner.run(self.layer.run(computation))
    }
}

// =============================================================================
// Derived Instances: StateT
// =============================================================================

impl<S, F> BaseControl for StateTFamily<S, F>
where
    S: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    type Base = <F as BaseControl>::Base;
    type CapturedBase<A: Clone + 'static> = F::CapturedBase<(A, S)>;
    type BaseRunner = StackedRunner<StateRunner<S>, <F as BaseControl>::BaseRunner>;

    fn lift_with_base<A, G>(scope: G) -> StateT<S, F, A>
    where
        A: Clone + 'static,
        G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static,
    {
        stacked_lift_with_base::<Self, A, G>(scope)
    }

    fn restore_base<A>(captured: F::CapturedBase<(A, S)>) -> StateT<S, F, A>
    where
        A: Clone + 'static,
    {
        stacked_restore_base::<Self, A>(captured)
    }
}

impl<S, F> RunBase<StateTFamily<S, F>>
    for StackedRunner<StateRunner<S>, <F as BaseControl>::BaseRunner>
where
    S: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    fn run<A>(
        &self,
        computation: StateT<S, F, A>,
    ) -> <<F as BaseControl>::Base as MonadFamily>::Member<F::CapturedBase<(A, S)>>
    where
        A: Clone + 'static,
    {
        self.inner.run(self.layer.run(computation))
    }
}

// =============================================================================
// Derived Instances: WriterT
// =============================================================================

impl<W, F> BaseControl for WriterTFamily<W, F>
where
    W: Monoid + Clone + 'static,
    F: MonadFamily + BaseControl,
{
    type Base = <F as BaseControl>::Base;
    type CapturedBase<A: Clone + 'static> = F::CapturedBase<(A, W)>;
    type BaseRunner = StackedRunner<WriterRunner, <F as BaseControl>::BaseRunner>;

    fn lift_with_base<A, G>(scope: G) -> WriterT<W, F, A>
    where
        A: Clone + 'static,
        G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static,
    {
        stacked_lift_with_base::<Self, A, G>(scope)
    }

    fn restore_base<A>(captured: F::CapturedBase<(A, W)>) -> WriterT<W, F, A>
    where
        A: Clone + 'static,
    {
        stacked_restore_base::<Self, A>(captured)
    }
}

impl<W, F> RunBase<WriterTFamily<W, F>>
    for StackedRunner<WriterRunner, <F as BaseControl>::BaseRunner>
where
    W: Monoid + Clone + 'static,
    F: MonadFamily + BaseControl,
{
    fn run<A>(
        &self,
        computation: WriterT<W, F, A>,
    ) -> <<F as BaseControl>::Base as MonadFamily>::Member<F::CapturedBase<(A, W)>>
    where
        A: Clone + 'static,
    {
        self.inner.run(self.layer.run(computation))
    }
}

// =============================================================================
// Derived Instances: ExceptT
// =============================================================================

impl<E, F> BaseControl for ExceptTFamily<E, F>
where
    E: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    type Base = <F as BaseControl>::Base;
    type CapturedBase<A: Clone + 'static> = F::CapturedBase<Result<A, E>>;
    type BaseRunner = StackedRunner<ExceptRunner, <F as BaseControl>::BaseRunner>;

    fn lift_with_base<A, G>(scope: G) -> ExceptT<E, F, A>
    where
        A: Clone + 'static,
        G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static,
    {
        stacked_lift_with_base::<Self, A, G>(scope)
    }

    fn restore_base<A>(captured: F::CapturedBase<Result<A, E>>) -> ExceptT<E, F, A>
    where
        A: Clone + 'static,
    {
        stacked_restore_base::<Self, A>(captured)
    }
}

impl<E, F> RunBase<ExceptTFamily<E, F>>
    for StackedRunner<ExceptRunner, <F as BaseControl>::BaseRunner>
where
    E: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    fn run<A>(
        &self,
        computation: ExceptT<E, F, A>,
    ) -> <<F as BaseControl>::Base as MonadFamily>::Member<F::CapturedBase<Result<A, E>>>
    where
        A: Clone + 'static,
    {
        self.inner.run(self.layer.run(computation))
    }
}

// =============================================================================
// Derived Instances: ChoiceT
// =============================================================================

impl<F> BaseControl for ChoiceTFamily<F>
where
    F: MonadFamily + BaseControl,
{
    type Base = <F as BaseControl>::Base;
    type CapturedBase<A: Clone + 'static> = F::CapturedBase<Vec<A>>;
    type BaseRunner = StackedRunner<ChoiceRunner, <F as BaseControl>::BaseRunner>;

    fn lift_with_base<A, G>(scope: G) -> ChoiceT<F, A>
    where
        A: Clone + 'static,
        G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static,
    {
        stacked_lift_with_base::<Self, A, G>(scope)
    }

    fn restore_base<A>(captured: F::CapturedBase<Vec<A>>) -> ChoiceT<F, A>
    where
        A: Clone + 'static,
    {
        stacked_restore_base::<Self, A>(captured)
    }
}

impl<F> RunBase<ChoiceTFamily<F>> for StackedRunner<ChoiceRunner, <F as BaseControl>::BaseRunner>
where
    F: MonadFamily + BaseControl,
{
    fn run<A>(
        &self,
        computation: ChoiceT<F, A>,
    ) -> <<F as BaseControl>::Base as MonadFamily>::Member<F::CapturedBase<Vec<A>>>
    where
        A: Clone + 'static,
    {
        self.inner.run(self.layer.run(computation))
    }
}

// =============================================================================
// Derived Instances: RwsT
// =============================================================================

impl<R, W, S, F> BaseControl for RwsTFamily<R, W, S, F>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    type Base = <F as BaseControl>::Base;
    type CapturedBase<A: Clone + 'static> = F::CapturedBase<(A, S, W)>;
    type BaseRunner = StackedRunner<RwsRunner<R, S>, <F as BaseControl>::BaseRunner>;

    fn lift_with_base<A, G>(scope: G) -> RwsT<R, W, S, F, A>
    where
        A: Clone + 'static,
        G: Fn(Self::BaseRunner) -> <Self::Base as MonadFamily>::Member<A> + 'static,
    {
        stacked_lift_with_base::<Self, A, G>(scope)
    }

    fn restore_base<A>(captured: F::CapturedBase<(A, S, W)>) -> RwsT<R, W, S, F, A>
    where
        A: Clone + 'static,
    {
        stacked_restore_base::<Self, A>(captured)
    }
}

impl<R, W, S, F> RunBase<RwsTFamily<R, W, S, F>>
    for StackedRunner<RwsRunner<R, S>, <F as BaseControl>::BaseRunner>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    F: MonadFamily + BaseControl,
{
    fn run<A>(
        &self,
        computation: RwsT<R, W, S, F, A>,
    ) -> <<F as BaseControl>::Base as MonadFamily>::Member<F::CapturedBase<(A, S, W)>>
    where
        A: Clone + 'static,
    {
        self.inner.run(self.layer.run(computation))
    }
}
