//! # Scope Tags
//!
//! Every handler invocation opens a *scope*: the dynamic extent during which
//! the handles it mints are valid. This module provides the two halves of the
//! scope discipline:
//!
//! - **Lifetimes carry safety.** Handle storage lives in the handler's stack
//!   frame and the handle borrows it, so the borrow checker rejects any
//!   program in which a handle outlives its handler. There is no runtime
//!   representation of a "scope set"; it is erased into lifetimes.
//! - **[`ScopeId`] carries identity.** Each handler invocation additionally
//!   mints a process-unique id from a monotonic counter. Ids are never reused,
//!   which is what lets an unwinding exception find exactly its own handler
//!   among nested handlers of the same kind, and what makes diagnostics
//!   attributable.
//!
//! Contract violations that survive the static discipline (see [`Fault`])
//! are programming bugs, not data errors, and abort the computation.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a handler scope.
///
/// Two handler invocations always mint distinct ids, even when they are
/// lexically identical and textually nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

/// Global scope id counter.
static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

impl ScopeId {
    /// Mint a fresh id, distinct from every id minted before it in this
    /// process.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// Zero-sized marker tying a handle to its scope's lifetime.
///
/// `Cell` in the pointee keeps handles `!Send` and `!Sync`: the scope
/// discipline protects against temporal misuse, and cross-thread sharing is
/// outside its guarantee.
pub(crate) type Brand<'scope> = PhantomData<&'scope Cell<()>>;

/// Interface shared by every capability handle.
///
/// A handle is a first-class value granting access to one capability
/// instance, bound to the scope that minted it. Compound handles report the
/// scope of their primary constituent.
pub trait Handle {
    /// The scope this handle is bound to.
    fn scope(&self) -> ScopeId;
}

/// A contract violation detected at runtime.
///
/// These are the failure classes the lifetime discipline cannot express
/// statically. Each one indicates a programming bug; none is recoverable.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// An unwind reached a top-level entry point without a matching handler.
    #[error("{0} unwound past the top-level entry point without a matching handler")]
    UnhandledUnwind(ScopeId),
    /// An exception payload failed to downcast at its own handler.
    #[error("exception payload for {0} had an unexpected type")]
    PayloadTypeMismatch(ScopeId),
    /// A coroutine was resumed after its body already completed.
    #[error("coroutine {0} resumed after completion")]
    ResumeAfterCompletion(ScopeId),
    /// A coroutine was resumed from inside its own body.
    #[error("coroutine {0} resumed while already running")]
    ReentrantResume(ScopeId),
}

/// Abort the current computation with a contract-violation fault.
///
/// The fault is logged as a structured event and then raised as a panic so
/// the violating computation can never continue or silently corrupt state.
pub(crate) fn fatal(fault: Fault) -> ! {
    tracing::error!(%fault, "capability contract violation");
    panic!("{fault}");
}
