//! # Coroutine Capability
//!
//! A [`Coroutine`] handle represents a suspended computation that is fed an
//! input on every [`resume`](Coroutine::resume) and hands back either a
//! yielded output or its final result.
//!
//! ## Request/response bodies
//!
//! There is no stackful suspension here. A body is an explicit
//! request/response closure: it consumes one input and finishes with a
//! [`Step`], either [`Step::Done`] or [`Step::Yield`], the latter carrying
//! the output *and the closure to run on the next resume*. "Calling yield"
//! is returning a `Yield` step; the suspended continuation is just the
//! boxed closure sitting in the handle's slot. This keeps the
//! idle/suspended/completed state machine explicit and protocol violations
//! checkable.
//!
//! ```
//! use hilt::{run_pure, with_coroutine, Resumed, Step};
//!
//! let log = run_pure(|| {
//!     with_coroutine(
//!         |a: i32| Step::emit(a * 10, move |b: i32| Step::done(a + b)),
//!         |co| {
//!             let first = co.resume(3)?;
//!             let second = co.resume(4)?;
//!             Ok((first, second))
//!         },
//!     )
//! });
//! assert_eq!(log, (Resumed::Yielded(30), Resumed::Complete(7)));
//! ```
//!
//! ## States
//!
//! idle → (suspended | completed); suspended → (suspended | completed);
//! completed is terminal. Resuming a completed coroutine, or resuming
//! re-entrantly from inside the body, is a contract violation and aborts.
//!
//! ## Unwinds across a resume
//!
//! An unwind (exception or early exit) raised by the body during a resume
//! poisons the coroutine: the slot moves to completed before the unwind
//! propagates, so a later resume is the ordinary completed-coroutine fault
//! rather than a resurrection of a half-unwound body.

use std::cell::RefCell;
use std::fmt;

use crate::control::Control;
use crate::scope::{fatal, Fault, Handle, ScopeId};

/// Boxed continuation: consumes the next input, produces the next step.
pub type Next<'env, I, O, R> = Box<dyn FnOnce(I) -> Control<Step<'env, I, O, R>> + 'env>;

/// One step of a coroutine body.
pub enum Step<'env, I, O, R> {
    /// Suspend with an output; the closure runs on the next resume.
    Yield(O, Next<'env, I, O, R>),
    /// Finish with the final result.
    Done(R),
}

impl<'env, I, O, R> Step<'env, I, O, R> {
    /// Finish the body with `result`.
    pub fn done(result: R) -> Control<Self> {
        Ok(Step::Done(result))
    }

    /// Suspend with `output`, continuing with `next` on the following
    /// resume.
    pub fn emit(
        output: O,
        next: impl FnOnce(I) -> Control<Step<'env, I, O, R>> + 'env,
    ) -> Control<Self> {
        Ok(Step::Yield(output, Box::new(next)))
    }
}

/// What one `resume` call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resumed<O, R> {
    /// The body yielded an intermediate output and is suspended again.
    Yielded(O),
    /// The body ran to completion with its final result.
    Complete(R),
}

impl<O, R> Resumed<O, R> {
    /// The yielded output, if this resume suspended.
    pub fn yielded(self) -> Option<O> {
        match self {
            Resumed::Yielded(output) => Some(output),
            Resumed::Complete(_) => None,
        }
    }

    /// The final result, if this resume completed the body.
    pub fn complete(self) -> Option<R> {
        match self {
            Resumed::Yielded(_) => None,
            Resumed::Complete(result) => Some(result),
        }
    }
}

/// The coroutine state machine.
enum Slot<'env, I, O, R> {
    /// Never resumed; holds the body's entry closure.
    Idle(Next<'env, I, O, R>),
    /// Awaiting its next input.
    Suspended(Next<'env, I, O, R>),
    /// A resume is currently executing the body.
    Running,
    /// The body ran to completion (or was poisoned by an unwind).
    Completed,
}

/// Handle to a suspendable computation introduced by [`with_coroutine`].
pub struct Coroutine<'env, I, O, R> {
    slot: RefCell<Slot<'env, I, O, R>>,
    scope: ScopeId,
}

impl<'env, I, O, R> Coroutine<'env, I, O, R> {
    /// Feed `input` to the body and run it to its next step.
    ///
    /// Returns [`Resumed::Yielded`] while the body keeps yielding and
    /// [`Resumed::Complete`] once it finishes. An unwind raised by the body
    /// poisons the coroutine and propagates.
    ///
    /// # Panics
    ///
    /// Resuming after completion, or re-entrantly from inside the body, is
    /// a contract violation and aborts the computation.
    pub fn resume(&self, input: I) -> Control<Resumed<O, R>> {
        let next = match self.slot.replace(Slot::Running) {
            Slot::Idle(next) | Slot::Suspended(next) => next,
            Slot::Completed => fatal(Fault::ResumeAfterCompletion(self.scope)),
            Slot::Running => fatal(Fault::ReentrantResume(self.scope)),
        };
        match next(input) {
            Ok(Step::Yield(output, next)) => {
                *self.slot.borrow_mut() = Slot::Suspended(next);
                tracing::trace!(scope = %self.scope, "coroutine suspended");
                Ok(Resumed::Yielded(output))
            }
            Ok(Step::Done(result)) => {
                *self.slot.borrow_mut() = Slot::Completed;
                tracing::trace!(scope = %self.scope, "coroutine completed");
                Ok(Resumed::Complete(result))
            }
            Err(unwind) => {
                *self.slot.borrow_mut() = Slot::Completed;
                tracing::trace!(scope = %self.scope, "coroutine poisoned by unwind");
                Err(unwind)
            }
        }
    }

    /// Whether the body has never been resumed.
    pub fn is_idle(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Idle(_))
    }

    /// Whether the body is suspended awaiting its next input.
    pub fn is_suspended(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Suspended(_))
    }

    /// Whether the body has run to completion.
    pub fn is_completed(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Completed)
    }
}

impl<I, O, R> Handle for Coroutine<'_, I, O, R> {
    fn scope(&self) -> ScopeId {
        self.scope
    }
}

impl<I, O, R> fmt::Debug for Coroutine<'_, I, O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match *self.slot.borrow() {
            Slot::Idle(_) => "idle",
            Slot::Suspended(_) => "suspended",
            Slot::Running => "running",
            Slot::Completed => "completed",
        };
        f.debug_struct("Coroutine")
            .field("scope", &self.scope)
            .field("state", &state)
            .finish()
    }
}

/// Run `driver` with a fresh coroutine whose body starts at `start`.
///
/// The handle is valid for the duration of the driver call; the slot is
/// torn down when `with_coroutine` returns, whatever state it reached.
pub fn with_coroutine<'env, I, O, R, T, B, F>(start: B, driver: F) -> Control<T>
where
    B: FnOnce(I) -> Control<Step<'env, I, O, R>> + 'env,
    F: FnOnce(&Coroutine<'env, I, O, R>) -> Control<T>,
{
    let scope = ScopeId::fresh();
    tracing::trace!(%scope, "opening coroutine scope");
    let coroutine = Coroutine {
        slot: RefCell::new(Slot::Idle(Box::new(start))),
        scope,
    };
    let result = driver(&coroutine);
    tracing::trace!(%scope, "closed coroutine scope");
    result
}

/// A coroutine that needs no input: every resume feeds `()`.
pub type Stream<'env, O, R> = Coroutine<'env, (), O, R>;

impl<'env, O, R> Coroutine<'env, (), O, R> {
    /// Drive the stream to completion, feeding every yielded element to
    /// `consumer`.
    ///
    /// Stops early, leaving the stream suspended, if the consumer
    /// unwinds.
    pub fn for_each(&self, mut consumer: impl FnMut(O) -> Control<()>) -> Control<R> {
        loop {
            match self.resume(())? {
                Resumed::Yielded(item) => consumer(item)?,
                Resumed::Complete(result) => return Ok(result),
            }
        }
    }
}
