//! Capture/restore derivation for newtype wrapper layers.
//!
//! A user-defined layer is often a newtype over an existing one, say a
//! domain name for `StateT<Counter, _, _>`. Such a layer's capture/restore
//! behavior is entirely determined by the wrapped layer's, composed with the
//! wrapping isomorphism, so it should never be written by hand.
//!
//! Supply the isomorphism by implementing [`LayerIso`], then invoke
//! [`wrapper_layer_control!`](crate::wrapper_layer_control) to stamp the
//! [`MonadFamily`], [`LayerControl`], and [`RunLayer`] implementations:
//!
//! ```rust
//! use std::marker::PhantomData;
//! use strata::control::{LayerControl, LayerIso, RunLayer};
//! use strata::effect::{StateT, StateTFamily};
//! use strata::typeclass::{MonadFamily, OptionFamily};
//! use strata::wrapper_layer_control;
//!
//! /// A counting layer: a domain name for `StateT<u32, _, _>`.
//! struct CountT<F: MonadFamily, A: Clone + 'static> {
//!     inner: StateT<u32, F, A>,
//! }
//!
//! impl<F: MonadFamily, A: Clone + 'static> Clone for CountT<F, A> {
//!     fn clone(&self) -> Self {
//!         CountT { inner: self.inner.clone() }
//!     }
//! }
//!
//! struct CountTFamily<F>(PhantomData<F>);
//!
//! impl<F: MonadFamily> LayerIso for CountTFamily<F> {
//!     type Wrapped = StateTFamily<u32, F>;
//!
//!     fn wrap<A: Clone + 'static>(inner: StateT<u32, F, A>) -> CountT<F, A> {
//!         CountT { inner }
//!     }
//!
//!     fn unwrap<A: Clone + 'static>(outer: CountT<F, A>) -> StateT<u32, F, A> {
//!         outer.inner
//!     }
//! }
//!
//! wrapper_layer_control! {
//!     impl[F: strata::typeclass::MonadFamily] LayerControl for CountTFamily<F> {
//!         wraps StateTFamily<u32, F>;
//!         member CountT<F, A>;
//!     }
//! }
//!
//! // The wrapper now captures and restores exactly like the layer it wraps.
//! let tick: CountT<OptionFamily, u32> =
//!     CountTFamily::wrap(StateT::state(|count: u32| (count, count + 1)));
//! let captured = CountTFamily::<OptionFamily>::lift_with(move |run| run.run(tick.clone()));
//! assert_eq!(CountTFamily::unwrap(captured).run(5), Some(((5, 6), 5)));
//! ```

use super::trans::{LayerControl, RunLayer};
use crate::typeclass::MonadFamily;

/// Identifies a family as a newtype wrapper over an existing layer family,
/// via a member-level isomorphism.
///
/// This is the only thing a wrapper layer needs to supply; everything else
/// is derived mechanically.
pub trait LayerIso: MonadFamily {
    /// The layer family being wrapped.
    type Wrapped: LayerControl;

    /// Wraps a computation of the underlying layer.
    fn wrap<A>(inner: <Self::Wrapped as MonadFamily>::Member<A>) -> Self::Member<A>
    where
        A: Clone + 'static;

    /// Unwraps back to the underlying layer.
    fn unwrap<A>(outer: Self::Member<A>) -> <Self::Wrapped as MonadFamily>::Member<A>
    where
        A: Clone + 'static;
}

/// Run function for a wrapper layer: unwraps the nested computation and
/// delegates to the wrapped layer's run function.
pub struct WrappedRunner<L: LayerIso> {
    inner: <L::Wrapped as LayerControl>::Runner,
}

impl<L: LayerIso> WrappedRunner<L> {
    /// Builds a wrapper run function around the wrapped layer's.
    pub fn new(inner: <L::Wrapped as LayerControl>::Runner) -> Self {
        Self { inner }
    }

    /// The wrapped layer's run function.
    pub fn inner(&self) -> &<L::Wrapped as LayerControl>::Runner {
        &self.inner
    }
}

impl<L: LayerIso> Clone for WrappedRunner<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Generic `lift_with` for a wrapper layer: capture through the wrapped
/// layer, handing the continuation a [`WrappedRunner`].
pub fn wrapped_lift_with<L, A, G>(scope: G) -> L::Member<A>
where
    L: LayerIso,
    A: Clone + 'static,
    G: Fn(WrappedRunner<L>) -> <<L::Wrapped as LayerControl>::Inner as MonadFamily>::Member<A>
        + 'static,
{
    L::wrap(<L::Wrapped as LayerControl>::lift_with(move |runner| {
        scope(WrappedRunner::new(runner))
    }))
}

/// Generic `restore` for a wrapper layer: restore through the wrapped layer
/// and re-wrap.
pub fn wrapped_restore<L, A>(
    captured: <<L::Wrapped as LayerControl>::Inner as MonadFamily>::Member<
        <L::Wrapped as LayerControl>::Captured<A>,
    >,
) -> L::Member<A>
where
    L: LayerIso,
    A: Clone + 'static,
{
    L::wrap(<L::Wrapped as LayerControl>::restore(captured))
}

/// Stamps `MonadFamily`, [`LayerControl`], and [`RunLayer`] for a newtype
/// wrapper layer from its [`LayerIso`].
///
/// The captured-state shape, inner context, and both operations delegate to
/// the wrapped layer; the member type is the wrapper's own. See the module
/// documentation for a complete example.
#[macro_export]
macro_rules! wrapper_layer_control {
    (
        impl[$($generics:tt)*] LayerControl for $family:ty {
            wraps $wrapped:ty;
            member $member:ty;
        }
    ) => {
        impl<$($generics)*> $crate::typeclass::MonadFamily for $family {
            type Member<A: Clone + 'static> = $member;

            fn pure<A>(value: A) -> Self::Member<A>
            where
                A: Clone + 'static,
            {
                <Self as $crate::control::LayerIso>::wrap(
                    <$wrapped as $crate::typeclass::MonadFamily>::pure(value),
                )
            }

            fn bind<A, B, G>(computation: Self::Member<A>, function: G) -> Self::Member<B>
            where
                A: Clone + 'static,
                B: Clone + 'static,
                G: Fn(A) -> Self::Member<B> + 'static,
            {
                <Self as $crate::control::LayerIso>::wrap(
                    <$wrapped as $crate::typeclass::MonadFamily>::bind(
                        <Self as $crate::control::LayerIso>::unwrap(computation),
                        move |value| <Self as $crate::control::LayerIso>::unwrap(function(value)),
                    ),
                )
            }
        }

        impl<$($generics)*> $crate::control::LayerControl for $family {
            type Inner = <$wrapped as $crate::control::LayerControl>::Inner;
            type Captured<A: Clone + 'static> =
                <$wrapped as $crate::control::LayerControl>::Captured<A>;
            type Runner = $crate::control::WrappedRunner<$family>;

            fn lift_with<A, G>(scope: G) -> Self::Member<A>
            where
                A: Clone + 'static,
                G: Fn(Self::Runner) -> <Self::Inner as $crate::typeclass::MonadFamily>::Member<A>
                    + 'static,
            {
                $crate::control::wrapped_lift_with::<Self, A, G>(scope)
            }

            fn restore<A>(
                captured: <Self::Inner as $crate::typeclass::MonadFamily>::Member<
                    Self::Captured<A>,
                >,
            ) -> Self::Member<A>
            where
                A: Clone + 'static,
            {
                $crate::control::wrapped_restore::<Self, A>(captured)
            }
        }

        impl<$($generics)*> $crate::control::RunLayer<$family>
            for $crate::control::WrappedRunner<$family>
        {
            fn run<A>(
                &self,
                computation: <$family as $crate::typeclass::MonadFamily>::Member<A>,
            ) -> <<$family as $crate::control::LayerControl>::Inner as $crate::typeclass::MonadFamily>::Member<
                <$family as $crate::control::LayerControl>::Captured<A>,
            >
            where
                A: Clone + 'static,
            {
                $crate::control::RunLayer::run(
                    self.inner(),
                    <$family as $crate::control::LayerIso>::unwrap(computation),
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{StateT, StateTFamily, WriterT, WriterTFamily};
    use crate::typeclass::OptionFamily;
    use rstest::rstest;
    use std::marker::PhantomData;

    /// An audit-trail layer: a domain name for `WriterT<Vec<String>, _, _>`.
    struct AuditT<F: MonadFamily, A: Clone + 'static> {
        inner: WriterT<Vec<String>, F, A>,
    }

    impl<F: MonadFamily, A: Clone + 'static> Clone for AuditT<F, A> {
        fn clone(&self) -> Self {
            AuditT {
                inner: self.inner.clone(),
            }
        }
    }

    struct AuditTFamily<F>(PhantomData<F>);

    impl<F: MonadFamily> LayerIso for AuditTFamily<F> {
        type Wrapped = WriterTFamily<Vec<String>, F>;

        fn wrap<A: Clone + 'static>(inner: WriterT<Vec<String>, F, A>) -> AuditT<F, A> {
            AuditT { inner }
        }

        fn unwrap<A: Clone + 'static>(outer: AuditT<F, A>) -> WriterT<Vec<String>, F, A> {
            outer.inner
        }
    }

    wrapper_layer_control! {
        impl[F: crate::typeclass::MonadFamily] LayerControl for AuditTFamily<F> {
            wraps WriterTFamily<Vec<String>, F>;
            member AuditT<F, A>;
        }
    }

    fn record(entry: &str) -> AuditT<OptionFamily, ()> {
        AuditTFamily::wrap(WriterT::tell(vec![entry.to_string()]))
    }

    #[rstest]
    fn wrapper_family_delegates_through_iso() {
        let t: AuditT<OptionFamily, i32> = AuditTFamily::bind(record("a"), |()| {
            AuditTFamily::bind(record("b"), |()| AuditTFamily::pure(42))
        });
        assert_eq!(
            AuditTFamily::unwrap(t).run(),
            Some((42, vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[rstest]
    fn wrapper_captures_like_the_wrapped_layer() {
        let t: AuditT<OptionFamily, i32> =
            AuditTFamily::bind(record("a"), |()| AuditTFamily::pure(42));
        let captured = AuditTFamily::<OptionFamily>::lift_with(move |run| run.run(t.clone()));
        assert_eq!(
            AuditTFamily::unwrap(captured).run(),
            Some(((42, vec!["a".to_string()]), vec![]))
        );
    }

    #[rstest]
    fn wrapper_restores_like_the_wrapped_layer() {
        let restored: AuditT<OptionFamily, i32> =
            AuditTFamily::restore(Some((42, vec!["a".to_string()])));
        assert_eq!(
            AuditTFamily::unwrap(restored).run(),
            Some((42, vec!["a".to_string()]))
        );
    }

    #[rstest]
    fn wrapper_round_trip_law() {
        let t: AuditT<OptionFamily, i32> =
            AuditTFamily::bind(record("a"), |()| AuditTFamily::pure(7));
        let expected = t.clone();
        let round = AuditTFamily::<OptionFamily>::lift_with(move |run| run.run(t.clone()));
        let round = AuditTFamily::bind(round, |snapshot| AuditTFamily::restore(Some(snapshot)));
        assert_eq!(
            AuditTFamily::unwrap(round).run(),
            AuditTFamily::unwrap(expected).run()
        );
    }

    /// A wrapper over a state layer, to exercise a runner that closes over
    /// entry state.
    struct GaugeT<F: MonadFamily, A: Clone + 'static> {
        inner: StateT<i64, F, A>,
    }

    impl<F: MonadFamily, A: Clone + 'static> Clone for GaugeT<F, A> {
        fn clone(&self) -> Self {
            GaugeT {
                inner: self.inner.clone(),
            }
        }
    }

    struct GaugeTFamily<F>(PhantomData<F>);

    impl<F: MonadFamily> LayerIso for GaugeTFamily<F> {
        type Wrapped = StateTFamily<i64, F>;

        fn wrap<A: Clone + 'static>(inner: StateT<i64, F, A>) -> GaugeT<F, A> {
            GaugeT { inner }
        }

        fn unwrap<A: Clone + 'static>(outer: GaugeT<F, A>) -> StateT<i64, F, A> {
            outer.inner
        }
    }

    wrapper_layer_control! {
        impl[F: crate::typeclass::MonadFamily] LayerControl for GaugeTFamily<F> {
            wraps StateTFamily<i64, F>;
            member GaugeT<F, A>;
        }
    }

    #[rstest]
    fn stateful_wrapper_snapshots_entry_state() {
        let t: GaugeT<OptionFamily, i64> =
            GaugeTFamily::wrap(StateT::state(|gauge: i64| (gauge, gauge + 1)));
        let captured = GaugeTFamily::<OptionFamily>::lift_with(move |run| run.run(t.clone()));
        assert_eq!(GaugeTFamily::unwrap(captured).run(5), Some(((5, 6), 5)));
    }
}
