//! # EarlyReturn Capability
//!
//! A payload-less structured exit: [`EarlyReturn::exit`] jumps out of the
//! enclosing [`with_early_return`] block, and execution resumes immediately
//! after the handler call. It is the restricted cousin of
//! [`Exception`](crate::exception::Exception): pure control flow, no data
//! channel, so results are read back through whatever state cells the
//! block was threading.

use std::marker::PhantomData;

use crate::control::{Control, Unwind};
use crate::scope::{Brand, Handle, ScopeId};

/// Handle for the structured exit introduced by [`with_early_return`].
pub struct EarlyReturn<'scope> {
    scope: ScopeId,
    _brand: Brand<'scope>,
}

impl Clone for EarlyReturn<'_> {
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for EarlyReturn<'_> {}

impl EarlyReturn<'_> {
    /// Jump out of the enclosing [`with_early_return`] block.
    ///
    /// Never returns to the caller; typed so it can stand in any result
    /// position via `?` or `return`.
    pub fn exit<T>(&self) -> Control<T> {
        tracing::trace!(scope = %self.scope, "early exit");
        Err(Unwind::new(self.scope, ()))
    }
}

impl Handle for EarlyReturn<'_> {
    fn scope(&self) -> ScopeId {
        self.scope
    }
}

/// Run `body` with a structured-exit handle.
///
/// Returns `Ok(Some(result))` on normal completion and `Ok(None)` when the
/// body exited early. Unwinds destined for enclosing handlers pass through.
pub fn with_early_return<R, F>(body: F) -> Control<Option<R>>
where
    F: for<'scope> FnOnce(&'scope EarlyReturn<'scope>) -> Control<R>,
{
    let scope = ScopeId::fresh();
    tracing::trace!(%scope, "opening early-return scope");
    let result = body(&EarlyReturn {
        scope,
        _brand: PhantomData,
    });
    tracing::trace!(%scope, "closed early-return scope");
    match result {
        Ok(value) => Ok(Some(value)),
        Err(unwind) => match unwind.consume::<()>(scope) {
            Ok(()) => Ok(None),
            Err(unwind) => Err(unwind),
        },
    }
}
