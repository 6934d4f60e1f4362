//! # Capability Interfaces & Compound Handles
//!
//! A capability is a set of operations, not a concrete type. Interfaces are
//! traits over those operations, so any value that can supply them (a
//! primitive handle or a bundle of several) qualifies wherever the
//! interface is asked for. This is capability polymorphism, not a type
//! hierarchy.
//!
//! A *compound* handle is a plain struct of constituent handles behind one
//! interface, with no runtime state of its own. [`LoggedCounter`] is the
//! worked example: one state cell plus the host I/O channel, presented as a
//! single [`StateOps`] value, so callers never learn the decomposition:
//!
//! ```
//! use hilt::{eval_state, run_with_io, LoggedCounter, StateOps};
//!
//! fn bump(counter: &impl StateOps<i64>, by: i64) {
//!     counter.modify(|v| *v += by);
//! }
//!
//! let total = run_with_io(|io| {
//!     eval_state(0i64, |cell| {
//!         let counter = LoggedCounter::new(*cell, io);
//!         bump(&counter, 2);
//!         bump(cell, 40); // the same interface, primitive handle
//!         Ok(counter.get())
//!     })
//! });
//! assert_eq!(total, 42);
//! ```

use crate::io::Io;
use crate::scope::{Handle, ScopeId};
use crate::state::State;

/// Mutable-cell operations, independent of the concrete handle supplying
/// them.
///
/// Implemented by the primitive [`State`] handle and by any compound that
/// can route the operations to a cell it bundles.
pub trait StateOps<T>: Handle {
    /// Read the current value.
    fn get(&self) -> T
    where
        T: Clone;

    /// Replace the value.
    fn set(&self, value: T);

    /// Read-modify-write the value in place.
    fn modify(&self, f: impl FnOnce(&mut T));
}

impl<T> StateOps<T> for State<'_, T> {
    fn get(&self) -> T
    where
        T: Clone,
    {
        State::get(self)
    }

    fn set(&self, value: T) {
        State::set(self, value)
    }

    fn modify(&self, f: impl FnOnce(&mut T)) {
        State::modify(self, f)
    }
}

/// Compound handle: a counter cell whose mutations are audited through the
/// host I/O channel.
///
/// Constituents may come from different enclosing scopes; variance lets
/// them coerce to the bundle's common lifetime. The bundle reports the
/// scope of its cell, the constituent whose extent bounds its usefulness.
pub struct LoggedCounter<'scope> {
    count: State<'scope, i64>,
    io: &'scope Io<'scope>,
}

impl<'scope> LoggedCounter<'scope> {
    /// Bundle a counter cell with the I/O channel that audits it.
    pub fn new(count: State<'scope, i64>, io: &'scope Io<'scope>) -> Self {
        Self { count, io }
    }
}

impl Handle for LoggedCounter<'_> {
    fn scope(&self) -> ScopeId {
        self.count.scope()
    }
}

impl StateOps<i64> for LoggedCounter<'_> {
    fn get(&self) -> i64 {
        self.count.get()
    }

    fn set(&self, value: i64) {
        self.io
            .perform(|| tracing::debug!(scope = %self.count.scope(), value, "counter set"));
        self.count.set(value);
    }

    fn modify(&self, f: impl FnOnce(&mut i64)) {
        self.count.modify(f);
        let value = self.count.get();
        self.io
            .perform(|| tracing::debug!(scope = %self.count.scope(), value, "counter updated"));
    }
}
