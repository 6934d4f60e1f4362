//! # Top-Level Entry Points
//!
//! Two ways out of the effectful world:
//!
//! - [`run_pure`]: the escape hatch for fully-handled computations. The
//!   `'static` bound on the computation is the "no open scopes" proof:
//!   handles borrow their handler's frame, so a computation that still
//!   needs one cannot be `'static` and is rejected before it ever runs.
//! - [`run_with_io`]: for computations that still need the ambient host.
//!   Mints the one [`Io`] handle for this execution and hands it to the
//!   body.
//!
//! Both treat an unwind that survives to the top as a contract violation.
//! Under the lifetime discipline that path is unreachable from safe code;
//! the check stays as defense in depth at the boundary where the safety
//! argument is load-bearing.

use crate::control::Control;
use crate::io::Io;
use crate::scope::{fatal, Fault, Handle, ScopeId};

/// Run a fully-handled computation and extract its plain value.
///
/// ```
/// let n = hilt::run_pure(|| {
///     hilt::eval_state(2i32, |s| {
///         s.modify(|v| *v *= 21);
///         Ok(s.get())
///     })
/// });
/// assert_eq!(n, 42);
/// ```
///
/// A computation that still requires a live handle does not compile:
///
/// ```compile_fail
/// hilt::run_pure(|| {
///     hilt::eval_state(0i32, |s| {
///         // `s` borrows the state handler's frame, so this inner
///         // computation is not `'static` and is rejected here.
///         let v = hilt::run_pure(|| Ok(s.get()));
///         Ok(v)
///     })
/// });
/// ```
pub fn run_pure<R, F>(computation: F) -> R
where
    F: FnOnce() -> Control<R> + 'static,
{
    match computation() {
        Ok(value) => value,
        Err(unwind) => fatal(Fault::UnhandledUnwind(unwind.scope())),
    }
}

/// Run a computation that needs the host-I/O capability.
///
/// Mints the single [`Io`] handle for this execution; everything else the
/// body uses must be handled inside it, enforced by the same `'static`
/// bound as [`run_pure`].
pub fn run_with_io<R, F>(body: F) -> R
where
    F: for<'scope> FnOnce(&'scope Io<'scope>) -> Control<R> + 'static,
{
    let io = Io::new(ScopeId::fresh());
    tracing::trace!(scope = %io.scope(), "opening host I/O scope");
    let result = body(&io);
    tracing::trace!(scope = %io.scope(), "closed host I/O scope");
    match result {
        Ok(value) => value,
        Err(unwind) => fatal(Fault::UnhandledUnwind(unwind.scope())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::exception::catch;

    #[test]
    fn test_run_pure_extracts_the_value() {
        assert_eq!(run_pure(|| Ok(11)), 11);
    }

    #[test]
    fn test_run_pure_sees_no_residual_exception() {
        // A fully-handled throw is invisible at the top.
        let got: Result<(), char> = run_pure(|| catch(|e| e.throw('x')));
        assert_eq!(got, Err('x'));
    }

    #[test]
    fn test_run_with_io_threads_host_results() {
        let got = run_with_io(|io| Ok(io.perform(|| "host value")));
        assert_eq!(got, "host value");
    }
}
