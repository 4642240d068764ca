//! # strata
//!
//! Capture/restore control lifting for stacked effect layers.
//!
//! ## Overview
//!
//! This library lets a computation built from a stack of effect layers
//! (local state, accumulated output, read-only environment, early exit,
//! non-deterministic choice) be temporarily "unwrapped" down to its base
//! context, run there, and reconstructed afterwards. That is the protocol a
//! base-level control operation ("run this masking interrupts", "run this
//! with a scoped resource", "spawn this") needs to be applied transparently
//! through an arbitrary stack without each layer knowing about the operation.
//!
//! It includes:
//!
//! - **Type Classes**: `TypeConstructor`, `Functor`, `Applicative`, `Monad`,
//!   `Semigroup`/`Monoid`, and the family-level `MonadFamily` encoding
//! - **Effect Layers**: `ReaderT`, `StateT`, `WriterT`, `ExceptT`, `ChoiceT`,
//!   `RwsT` over any inner family, plus the `IO` base context
//! - **Control Core**: per-layer `LayerControl`, whole-stack `BaseControl`,
//!   the default derivation composing them, the newtype-wrapper derivation,
//!   and the `control` / `lift_op` / `lift_through` / `lift_discard`
//!   combinators
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits (Functor, Monad, MonadFamily, etc.)
//! - `effect`: Effect layers (transformers) and the `IO` base context
//! - `control`: The capture/restore control-lifting core
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use strata::control::{control, RunBase};
//! use strata::effect::{IoFamily, StateT, StateTFamily};
//!
//! type Stack = StateTFamily<i32, IoFamily>;
//!
//! // Mutate state inside a computation, capture it through the base
//! // context, and restore it afterwards: behaviorally a no-op.
//! let computation: StateT<i32, IoFamily, i32> =
//!     StateT::state(|count| (count, count + 1));
//! let round_tripped = control::<Stack, i32, _>(move |run| {
//!     run.run(computation.clone())
//! });
//! assert_eq!(round_tripped.run(5).run_unsafe(), (5, 6));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "effect")]
pub mod effect;

#[cfg(feature = "control")]
pub mod control;
