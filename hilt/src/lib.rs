//! # Hilt
//!
//! First-class, scoped capability handles for effectful computations.
//!
//! A computation gains access to a capability (a mutable cell, a typed
//! exception channel, a structured early exit, host I/O, a suspendable
//! coroutine) by receiving a *handle* as an ordinary argument, never by
//! reaching into ambient context. Handlers mint handles, run a body with
//! them, and tear them down on return:
//!
//! - a handle can never be used after its handler has returned: the
//!   handle borrows the handler's stack frame, so the borrow checker
//!   rejects escape at compile time;
//! - any number of same-kind handles coexist without confusion: every
//!   operation names its handle, and unwinds route by scope identity.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                            HILT                               │
//! ├───────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────────────┐    │
//! │  │   scope    │   │  control   │   │      runtime       │    │
//! │  │ (tags, id) │   │ (unwinds)  │   │ (run_pure/with_io) │    │
//! │  └────────────┘   └────────────┘   └────────────────────┘    │
//! │        │                │                    │                │
//! │        └────────────────┼────────────────────┘                │
//! │                         │                                     │
//! │  ┌───────┐ ┌───────────┐ ┌──────────────┐ ┌────┐ ┌─────────┐ │
//! │  │ state │ │ exception │ │ early_return │ │ io │ │coroutine│ │
//! │  └───────┘ └───────────┘ └──────────────┘ └────┘ └─────────┘ │
//! │                         │                                     │
//! │                  ┌────────────┐                               │
//! │                  │ capability │  (interfaces, compounds)      │
//! │                  └────────────┘                               │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use hilt::{eval_state, run_pure};
//!
//! fn clamp_up(seed: i64) -> i64 {
//!     run_pure(move || {
//!         eval_state(seed, |s| {
//!             if s.get() < 10 {
//!                 s.modify(|v| *v += 10);
//!             }
//!             Ok(s.get())
//!         })
//!     })
//! }
//!
//! assert_eq!(clamp_up(5), 15);
//! assert_eq!(clamp_up(12), 12);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod capability;
pub mod control;
pub mod coroutine;
pub mod early_return;
pub mod exception;
pub mod io;
pub mod runtime;
pub mod scope;
pub mod state;

// Re-exports
pub use capability::{LoggedCounter, StateOps};
pub use control::{Control, Unwind};
pub use coroutine::{with_coroutine, Coroutine, Next, Resumed, Step, Stream};
pub use early_return::{with_early_return, EarlyReturn};
pub use exception::{catch, Exception};
pub use io::Io;
pub use runtime::{run_pure, run_with_io};
pub use scope::{Fault, Handle, ScopeId};
pub use state::{eval_state, run_state, State};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
