//! Type class traits for functional programming abstractions.
//!
//! This module provides the fundamental type classes (traits) that the rest
//! of the library stands on:
//!
//! - [`Functor`]: Mapping over container values
//! - [`Applicative`]: Lifting values and combining independent computations
//! - [`Monad`]: Sequencing computations with dependency
//! - [`MonadVec`]: The list monad, split out because it needs `FnMut`
//! - [`Semigroup`]: Associative binary operations
//! - [`Monoid`]: Semigroup with identity element
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native support for higher-kinded types (HKT). This
//! library uses Generic Associated Types (GAT) at two levels:
//!
//! - [`TypeConstructor`]: the applied-type encoding (`Option<i32>` knows how
//!   to become `Option<String>`), which carries the value-level classes
//!   above.
//! - [`MonadFamily`]: the family encoding (`OptionFamily` stands for
//!   `Option<_>` itself), which the capture/restore control core composes
//!   over. The family encoding is what makes a single run function usable at
//!   every result type.
//!
//! ## Foundation Types
//!
//! - [`Identity`]: Identity wrapper type (the trivial base context)
//! - [`IdentityFamily`], [`OptionFamily`], [`ResultFamily`], [`VecFamily`]:
//!   family witnesses for the primitive base contexts
//!
//! # Examples
//!
//! ## Using Semigroup
//!
//! ```rust
//! use strata::typeclass::Semigroup;
//!
//! // String concatenation
//! let hello = String::from("Hello, ");
//! let world = String::from("World!");
//! assert_eq!(hello.combine(world), "Hello, World!");
//! ```
//!
//! ## Using Applicative
//!
//! ```rust
//! use strata::typeclass::Applicative;
//!
//! // Lifting a pure value
//! let x: Option<i32> = <Option<()>>::pure(42);
//! assert_eq!(x, Some(42));
//!
//! // Combining two Option values
//! let a = Some(1);
//! let b = Some(2);
//! let sum = a.map2(b, |x, y| x + y);
//! assert_eq!(sum, Some(3));
//! ```
//!
//! ## Using a family
//!
//! ```rust
//! use strata::typeclass::{MonadFamily, OptionFamily};
//!
//! let doubled = OptionFamily::bind(Some(21), |n| Some(n * 2));
//! assert_eq!(doubled, Some(42));
//! ```

mod applicative;
mod family;
mod functor;
mod higher;
mod identity;
mod monad;
mod monoid;
mod semigroup;

pub use applicative::Applicative;
pub use family::{IdentityFamily, MonadFamily, OptionFamily, ResultFamily, VecFamily};
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use identity::Identity;
pub use monad::{Monad, MonadVec};
pub use monoid::Monoid;
pub use semigroup::Semigroup;
