//! IO Monad - Deferred side effect handling.
//!
//! The `IO` type represents a computation that may perform side effects.
//! Side effects are not executed until `run_unsafe` is called, maintaining
//! referential transparency in pure code.
//!
//! # Design Philosophy
//!
//! IO "describes" side effects but doesn't "execute" them. Execution happens
//! only via `run_unsafe`, which should be called at the program's "edge"
//! (e.g., in the `main` function).
//!
//! An `IO<A>` here is a *re-runnable* description: it wraps `Rc<dyn Fn()
//! -> A>`, so cloning is cheap and the same description may be executed any
//! number of times. Captured run functions rely on this: a base-level
//! control operation may execute the action it is handed more than once (or
//! not at all), and the description must survive that.
//!
//! # Examples
//!
//! ```rust
//! use strata::effect::IO;
//!
//! // Create a pure IO action
//! let io = IO::pure(42);
//! assert_eq!(io.run_unsafe(), 42);
//!
//! // Chain IO actions
//! let io = IO::pure(10)
//!     .fmap(|x| x * 2)
//!     .flat_map(|x| IO::pure(x + 1));
//! assert_eq!(io.run_unsafe(), 21);
//! ```
//!
//! # Side Effect Deferral
//!
//! ```rust
//! use strata::effect::IO;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let executed = Rc::new(Cell::new(false));
//! let executed_inner = executed.clone();
//!
//! let io = IO::new(move || {
//!     executed_inner.set(true);
//!     42
//! });
//!
//! // Not executed yet
//! assert!(!executed.get());
//!
//! // Execute the IO action
//! assert_eq!(io.run_unsafe(), 42);
//! assert!(executed.get());
//! ```

#![forbid(unsafe_code)]

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use crate::typeclass::MonadFamily;

/// A monad representing deferred, re-runnable side effects.
///
/// `IO<A>` wraps a computation that produces a value of type `A` and may
/// perform side effects. The computation is not executed until `run_unsafe`
/// is called, and may be executed repeatedly.
///
/// # Monad Laws
///
/// 1. **Left Identity**: `IO::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(IO::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct IO<A> {
    /// The wrapped computation that produces a value of type `A`.
    run_io: Rc<dyn Fn() -> A>,
}

impl<A: 'static> IO<A> {
    /// Creates a new IO action from a closure.
    ///
    /// The closure will not be executed until `run_unsafe` is called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::IO;
    ///
    /// let io = IO::new(|| 10 + 20);
    /// assert_eq!(io.run_unsafe(), 30);
    /// ```
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() -> A + 'static,
    {
        Self {
            run_io: Rc::new(action),
        }
    }

    /// Wraps a pure value in an IO action.
    ///
    /// The value is cloned out on every execution.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::IO;
    ///
    /// let io = IO::pure(42);
    /// assert_eq!(io.run_unsafe(), 42);
    /// ```
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move || value.clone())
    }

    /// Executes the IO action and returns the result.
    ///
    /// This is the only way to extract a value from an IO action. It should
    /// be called at the program's "edge". The name marks the break in
    /// referential transparency, not a memory-safety hazard.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::IO;
    ///
    /// let io = IO::pure(42);
    /// assert_eq!(io.run_unsafe(), 42);
    /// // Re-runnable: the description is not consumed.
    /// assert_eq!(io.run_unsafe(), 42);
    /// ```
    pub fn run_unsafe(&self) -> A {
        (self.run_io)()
    }

    /// Transforms the result of an IO action using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::IO;
    ///
    /// let io = IO::pure(21).fmap(|x| x * 2);
    /// assert_eq!(io.run_unsafe(), 42);
    /// ```
    pub fn fmap<B, F>(self, function: F) -> IO<B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        let run_io = self.run_io;
        IO::new(move || function(run_io()))
    }

    /// Chains IO actions, passing the result of the first to a function
    /// that produces the second.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::IO;
    ///
    /// let io = IO::pure(10).flat_map(|x| IO::pure(x * 2));
    /// assert_eq!(io.run_unsafe(), 20);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> IO<B>
    where
        F: Fn(A) -> IO<B> + 'static,
        B: 'static,
    {
        let run_io = self.run_io;
        IO::new(move || function(run_io()).run_unsafe())
    }

    /// Alias for `flat_map`.
    pub fn and_then<B, F>(self, function: F) -> IO<B>
    where
        F: Fn(A) -> IO<B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two IO actions, discarding the result of the first.
    ///
    /// The first action is still executed for its side effects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::IO;
    ///
    /// let io = IO::pure(10).then(IO::pure(20));
    /// assert_eq!(io.run_unsafe(), 20);
    /// ```
    pub fn then<B>(self, next: IO<B>) -> IO<B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next.clone())
    }

    /// Catches panics in an IO action and converts them to a recovery value.
    ///
    /// If the IO action panics, the handler is called with the panic message
    /// and its result replaces the action's. This is the canonical example
    /// of a base-level "action to action" control operation; see
    /// `control::lift_through` for applying it through a layer stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::effect::IO;
    ///
    /// let panicking: IO<String> = IO::new(|| panic!("oops"));
    /// let recovered = IO::catch(panicking, |message| message);
    /// assert_eq!(recovered.run_unsafe(), "oops");
    ///
    /// let successful = IO::pure(42);
    /// assert_eq!(IO::catch(successful, |_| 0).run_unsafe(), 42);
    /// ```
    pub fn catch<F>(io: Self, handler: F) -> Self
    where
        F: Fn(String) -> A + 'static,
    {
        Self::new(move || {
            let result = catch_unwind(AssertUnwindSafe(|| io.run_unsafe()));
            match result {
                Ok(value) => value,
                Err(panic_info) => {
                    let message = if let Some(string) = panic_info.downcast_ref::<&str>() {
                        (*string).to_string()
                    } else if let Some(string) = panic_info.downcast_ref::<String>() {
                        string.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    handler(message)
                }
            }
        })
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<A> Clone for IO<A> {
    fn clone(&self) -> Self {
        Self {
            run_io: self.run_io.clone(),
        }
    }
}

// =============================================================================
// Convenience Constructors
// =============================================================================

impl IO<()> {
    /// Creates an IO action that prints a line to standard output.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use strata::effect::IO;
    ///
    /// let io = IO::print_line("Hello, World!");
    /// io.run_unsafe(); // Prints "Hello, World!"
    /// ```
    pub fn print_line<S: std::fmt::Display + 'static>(message: S) -> Self {
        Self::new(move || {
            println!("{message}");
        })
    }
}

// =============================================================================
// IoFamily
// =============================================================================

/// Family witness for [`IO`]: the side-effecting base context.
pub struct IoFamily;

impl MonadFamily for IoFamily {
    type Member<A: Clone + 'static> = IO<A>;

    fn pure<A>(value: A) -> IO<A>
    where
        A: Clone + 'static,
    {
        IO::pure(value)
    }

    fn bind<A, B, F>(computation: IO<A>, function: F) -> IO<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> IO<B> + 'static,
    {
        computation.flat_map(function)
    }

    fn map<A, B, F>(computation: IO<A>, function: F) -> IO<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.fmap(function)
    }
}
