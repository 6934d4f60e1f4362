//! # Unwind Channel
//!
//! An effectful computation is an ordinary closure or function returning
//! [`Control<T>`]: it is inert until called, performs its operations in
//! program order when called, and either completes with `Ok` or unwinds
//! with `Err`.
//!
//! [`Unwind`] is the single non-local control channel. It is created only by
//! [`Exception::throw`](crate::exception::Exception::throw) and
//! [`EarlyReturn::exit`](crate::early_return::EarlyReturn::exit), propagates
//! outward through `?`, and is consumed only by the handler whose scope id
//! matches. Intervening handlers run their finalization as the propagation
//! returns through their frames, so unwinding past a handler behaves like a
//! normal exit from it.

use std::any::Any;
use std::fmt;

use crate::scope::{fatal, Fault, ScopeId};

/// Result of one step of an effectful computation.
///
/// `Err` carries an in-flight unwind destined for an enclosing handler;
/// thread it outward with `?`.
pub type Control<T> = Result<T, Unwind>;

/// An in-flight non-local exit.
///
/// Pairs the scope whose handler will consume it with an opaque payload.
/// The payload is only ever inspected by the matching handler, which knows
/// its concrete type.
pub struct Unwind {
    scope: ScopeId,
    payload: Box<dyn Any>,
}

impl Unwind {
    /// Start an unwind destined for `scope`, carrying `payload`.
    pub(crate) fn new<P: Any>(scope: ScopeId, payload: P) -> Self {
        Self {
            scope,
            payload: Box::new(payload),
        }
    }

    /// The scope whose handler this unwind is destined for.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Consume this unwind if it targets `scope`, recovering the payload.
    ///
    /// Returns the unwind unchanged when it is destined for an enclosing
    /// handler. A matching scope whose payload is not a `P` aborts with
    /// [`Fault::PayloadTypeMismatch`]; handles tie payload types to scopes
    /// at mint time, so that path is unreachable from safe code.
    pub(crate) fn consume<P: Any>(self, scope: ScopeId) -> Result<P, Unwind> {
        if self.scope != scope {
            return Err(self);
        }
        match self.payload.downcast::<P>() {
            Ok(payload) => Ok(*payload),
            Err(_) => fatal(Fault::PayloadTypeMismatch(scope)),
        }
    }
}

impl fmt::Debug for Unwind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unwind")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
