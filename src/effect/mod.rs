//! Effect layers and the `IO` base context.
//!
//! Each layer in this module wraps an inner computation context and adds one
//! capability:
//!
//! - [`ReaderT`]: read-only environment
//! - [`StateT`]: local mutable state
//! - [`WriterT`]: accumulated output (requires a [`crate::typeclass::Monoid`])
//! - [`ExceptT`]: early exit / short-circuiting errors
//! - [`ChoiceT`]: ordered non-deterministic choice
//! - [`RwsT`]: combined reader/writer/state
//!
//! Unlike a per-monad method family (`flat_map_option`, `flat_map_io`, …),
//! every transformer here is generic over its inner context through
//! [`crate::typeclass::MonadFamily`]: `StateT<S, F, A>` works identically
//! over `OptionFamily`, [`IoFamily`], or another transformer's family. Each
//! transformer has a family witness of its own (`StateTFamily<S, F>` etc.),
//! which is what makes arbitrary stacks expressible, and what the
//! capture/restore core in [`crate::control`] composes over.
//!
//! # Stacking
//!
//! ```rust
//! use strata::effect::{IoFamily, StateT, WriterT, WriterTFamily};
//!
//! // State over writer over IO: i32 state, String output.
//! type Logged = WriterTFamily<String, IoFamily>;
//!
//! let computation: StateT<i32, Logged, i32> = StateT::put(9)
//!     .flat_map(|()| StateT::lift(WriterT::tell("x".to_string())))
//!     .flat_map(|()| StateT::pure(7));
//!
//! let ((result, state), output) = computation.run(5).run().run_unsafe();
//! assert_eq!((result, state, output), (7, 9, "x".to_string()));
//! ```

// =============================================================================
// IO Base Context
// =============================================================================

mod io;

pub use io::{IO, IoFamily};

// =============================================================================
// Effect Layers (Monad Transformers)
// =============================================================================

mod choice_transformer;
mod except_transformer;
mod reader_transformer;
mod rws_transformer;
mod state_transformer;
mod writer_transformer;

pub use choice_transformer::{ChoiceT, ChoiceTFamily};
pub use except_transformer::{ExceptT, ExceptTFamily};
pub use reader_transformer::{ReaderT, ReaderTFamily};
pub use rws_transformer::{RwsT, RwsTFamily};
pub use state_transformer::{StateT, StateTFamily};
pub use writer_transformer::{WriterT, WriterTFamily};
