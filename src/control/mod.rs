//! Capture/restore control lifting for effect-layer stacks.
//!
//! A base-context control operation ("run this masking interrupts", "run
//! this with a scoped resource", "spawn this") is defined in terms of base
//! actions. This module makes such operations applicable to computations
//! built from an arbitrary stack of effect layers, without the layers
//! knowing anything about the operation:
//!
//! - [`LayerControl`] / [`RunLayer`]: the per-layer capture/restore
//!   contract. One implementation per layer family; the recursive building
//!   block.
//! - [`BaseControl`] / [`RunBase`]: the same contract for a whole stack down
//!   to its base context, with trivial instances for the primitive base
//!   families and derived instances composing a layer's capability with the
//!   inner stack's.
//! - [`LayerIso`] + [`wrapper_layer_control!`](crate::wrapper_layer_control):
//!   derivation for user-defined newtype layers: supply the isomorphism,
//!   get the capability.
//! - [`control`], [`lift_op`], [`lift_through`], [`lift_discard`]: the
//!   ergonomic idioms for the common operation shapes.
//!
//! # The capture/restore contract
//!
//! `lift_with_base` hands its continuation a *run function*: a value that
//! executes any nested stack computation down to the base context,
//! producing that computation's *captured snapshot*: result plus every
//! layer's accrued effect-state, nested in layer order. `restore_base`
//! turns a snapshot back into a stack computation that replays those
//! effects exactly. Round-tripping is behaviorally the identity; anything
//! the base-level operation does between capture and restore happens in
//! plain base actions.
//!
//! ```rust
//! use strata::control::{control, RunBase};
//! use strata::effect::{IoFamily, StateT, StateTFamily, WriterT, WriterTFamily};
//!
//! type Stack = StateTFamily<i32, WriterTFamily<String, IoFamily>>;
//!
//! let m: StateT<i32, WriterTFamily<String, IoFamily>, i32> = StateT::put(9)
//!     .flat_map(|()| StateT::lift(WriterT::tell("x".to_string())))
//!     .flat_map(|()| StateT::pure(7));
//!
//! let round = control::<Stack, i32, _>(move |run| run.run(m.clone()));
//! let ((result, state), output) = round.run(5).run().run_unsafe();
//! assert_eq!((result, state, output), (7, 9, "x".to_string()));
//! ```

mod base;
mod ops;
mod trans;
mod wrapper;

pub use base::{
    BaseControl, PrimitiveRunner, RunBase, StackedRunner, stacked_lift_with_base,
    stacked_restore_base,
};
pub use ops::{control, lift_discard, lift_op, lift_through};
pub use trans::{
    ChoiceRunner, ExceptRunner, LayerControl, ReaderRunner, RunLayer, RwsRunner, StateRunner,
    WriterRunner,
};
pub use wrapper::{LayerIso, WrappedRunner, wrapped_lift_with, wrapped_restore};

// Every shipped layer keeps both capabilities wired through the derivations.
use crate::effect::{
    ChoiceTFamily, ExceptTFamily, IoFamily, ReaderTFamily, RwsTFamily, StateTFamily, WriterTFamily,
};
use static_assertions::assert_impl_all;

assert_impl_all!(StateTFamily<i32, IoFamily>: LayerControl, BaseControl);
assert_impl_all!(ReaderTFamily<u8, ChoiceTFamily<IoFamily>>: LayerControl, BaseControl);
assert_impl_all!(ExceptTFamily<String, WriterTFamily<String, IoFamily>>: LayerControl, BaseControl);
assert_impl_all!(RwsTFamily<u8, String, i32, IoFamily>: LayerControl, BaseControl);
