//! # State Capability
//!
//! A [`State`] handle wraps one mutable cell. The cell lives in the frame of
//! the [`run_state`] or [`eval_state`] call that minted the handle, so the
//! handle cannot outlive its handler, and two nested handlers (even over
//! the same value type) own two unrelated cells.
//!
//! Operations take the handle explicitly; there is no ambient "current
//! state". That is what lets a computation thread several same-typed cells
//! at once:
//!
//! ```
//! use hilt::{run_pure, run_state};
//!
//! let (smaller_final, larger_final) = run_pure(|| {
//!     let (larger_final, smaller_final) = run_state(5i64, |smaller| {
//!         let ((), larger_final) = run_state(10i64, |larger| {
//!             if smaller.get() < larger.get() {
//!                 smaller.modify(|v| *v += 10);
//!             }
//!             Ok(())
//!         })?;
//!         Ok(larger_final)
//!     })?;
//!     Ok((smaller_final, larger_final))
//! });
//! assert_eq!((smaller_final, larger_final), (15, 10));
//! ```

use std::cell::RefCell;

use crate::control::Control;
use crate::scope::{Handle, ScopeId};

/// Handle to one mutable cell owned by an enclosing [`run_state`] or
/// [`eval_state`] frame.
///
/// Copyable: any code that can see the handle may operate on the cell, but
/// the cell itself is reachable only through the handle and is torn down
/// when the handler returns.
pub struct State<'scope, T> {
    cell: &'scope RefCell<T>,
    scope: ScopeId,
}

impl<T> Clone for State<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for State<'_, T> {}

impl<T> State<'_, T> {
    /// Read the current cell value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.cell.borrow().clone()
    }

    /// Replace the cell value.
    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }

    /// Read-modify-write the cell in place.
    ///
    /// Not atomic across threads; the cell is single-threaded by
    /// construction.
    ///
    /// # Panics
    ///
    /// Panics if `f` itself operates on the same cell: the cell is borrowed
    /// mutably for the duration of the call.
    pub fn modify(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.borrow_mut());
    }
}

impl<T> Handle for State<'_, T> {
    fn scope(&self) -> ScopeId {
        self.scope
    }
}

/// Run `body` with a fresh state cell seeded with `initial`, returning the
/// body result together with the final cell value.
///
/// The body may use every handle its environment already holds plus the new
/// one; once `run_state` returns, the new handle is unusable (its borrow of
/// the cell has ended). An unwind out of `body` tears the cell down and
/// propagates; there is no final value to report.
///
/// A handle cannot be smuggled out through an outer binding:
///
/// ```compile_fail
/// let mut leaked: Option<hilt::State<'_, i32>> = None;
/// let _ = hilt::eval_state(1i32, |s| {
///     leaked = Some(*s);
///     Ok(())
/// });
/// ```
pub fn run_state<T, R, F>(initial: T, body: F) -> Control<(R, T)>
where
    F: for<'scope> FnOnce(&'scope State<'scope, T>) -> Control<R>,
{
    let scope = ScopeId::fresh();
    let cell = RefCell::new(initial);
    tracing::trace!(%scope, "opening state scope");
    let result = body(&State { cell: &cell, scope });
    tracing::trace!(%scope, "closed state scope");
    let value = result?;
    Ok((value, cell.into_inner()))
}

/// Like [`run_state`], but discard the final cell value.
pub fn eval_state<T, R, F>(initial: T, body: F) -> Control<R>
where
    F: for<'scope> FnOnce(&'scope State<'scope, T>) -> Control<R>,
{
    Ok(run_state(initial, body)?.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_set_then_get_observes_last_write() {
        let got = eval_state(1i32, |s| {
            s.set(2);
            s.set(3);
            Ok(s.get())
        });
        assert_eq!(got.unwrap(), 3);
    }

    #[test]
    fn test_run_state_reports_final_value() {
        let got = run_state(10u64, |s| {
            s.modify(|v| *v *= 3);
            Ok("done")
        });
        assert_eq!(got.unwrap(), ("done", 30));
    }

    #[test]
    fn test_nested_handlers_mint_distinct_scopes() {
        let got = eval_state(0u8, |outer| {
            eval_state(0u8, |inner| Ok(outer.scope() != inner.scope()))
        });
        assert!(got.unwrap());
    }

    #[test]
    fn test_modify_sees_current_value() {
        let got = eval_state(vec![1, 2], |s| {
            s.modify(|v| v.push(3));
            Ok(s.get())
        });
        assert_eq!(got.unwrap(), vec![1, 2, 3]);
    }
}
