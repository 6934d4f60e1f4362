//! # Exception Capability
//!
//! An [`Exception`] handle is one typed failure channel. [`Exception::throw`]
//! starts an unwind that returns control to the matching [`catch`], and only
//! to it: nested `catch` handlers over the same error type own distinct
//! channels, and an unwind routes by scope identity, never by type.
//!
//! ```
//! use hilt::{catch, run_pure};
//!
//! let outcome: Result<u32, String> = run_pure(|| {
//!     catch(|overflow| {
//!         let doubled = 2u32
//!             .checked_mul(3)
//!             .map_or_else(|| overflow.throw("overflowed".to_string()), Ok)?;
//!         Ok(doubled)
//!     })
//! });
//! assert_eq!(outcome, Ok(6));
//! ```

use std::any::Any;
use std::marker::PhantomData;

use crate::control::{Control, Unwind};
use crate::scope::{Brand, Handle, ScopeId};

/// Handle to one typed failure channel introduced by [`catch`].
pub struct Exception<'scope, E> {
    scope: ScopeId,
    _brand: Brand<'scope>,
    _error: PhantomData<fn() -> E>,
}

impl<E> Clone for Exception<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Exception<'_, E> {}

impl<E: Any> Exception<'_, E> {
    /// Throw `error` on this channel.
    ///
    /// Never returns to the caller: the result is always an unwind, typed so
    /// it can stand in any result position via `?`.
    pub fn throw<T>(&self, error: E) -> Control<T> {
        tracing::trace!(scope = %self.scope, "throwing");
        Err(Unwind::new(self.scope, error))
    }
}

impl<E> Handle for Exception<'_, E> {
    fn scope(&self) -> ScopeId {
        self.scope
    }
}

/// Introduce an exception channel of type `E` around `body`.
///
/// Returns `Ok(Err(thrown))` when the body threw on this handle and
/// `Ok(Ok(result))` when it completed; the thrown value never escapes
/// further. An unwind destined for an enclosing handler passes through
/// untouched, after this scope has closed.
pub fn catch<E, R, F>(body: F) -> Control<Result<R, E>>
where
    E: Any,
    F: for<'scope> FnOnce(&'scope Exception<'scope, E>) -> Control<R>,
{
    let scope = ScopeId::fresh();
    tracing::trace!(%scope, "opening exception scope");
    let result = body(&Exception {
        scope,
        _brand: PhantomData,
        _error: PhantomData,
    });
    tracing::trace!(%scope, "closed exception scope");
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(unwind) => match unwind.consume::<E>(scope) {
            Ok(error) => {
                tracing::trace!(%scope, "caught");
                Ok(Err(error))
            }
            Err(unwind) => Err(unwind),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::eval_state;

    #[test]
    fn test_throw_reaches_matching_catch() {
        let got: Control<Result<(), i64>> = catch(|e| e.throw(41));
        assert_eq!(got.unwrap(), Err(41));
    }

    #[test]
    fn test_pure_body_never_throws() {
        let got: Control<Result<&str, i64>> = catch(|_e| Ok("fine"));
        assert_eq!(got.unwrap(), Ok("fine"));
    }

    #[test]
    fn test_unwind_routes_past_same_typed_inner_catch() {
        // Two channels of the same error type: the inner catch must let the
        // outer channel's unwind through.
        let got: Control<Result<Result<(), u8>, u8>> =
            catch(|outer| catch(|_inner| outer.throw(7u8)));
        assert_eq!(got.unwrap(), Err(7));
    }

    #[test]
    fn test_unwind_runs_intervening_state_finalization() {
        // The state handler between the throw site and the catch closes
        // normally; the unwind just carries on past it.
        let got: Control<Result<(), &str>> = catch(|e| {
            eval_state(0u32, |s| {
                s.set(9);
                e.throw("bail")
            })
        });
        assert_eq!(got.unwrap(), Err("bail"));
    }
}
