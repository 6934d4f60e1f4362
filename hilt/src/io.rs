//! # Host I/O Capability
//!
//! The [`Io`] handle is the single channel through which unconstrained host
//! effects enter an otherwise disciplined computation. It is minted exactly
//! once per top-level execution by
//! [`run_with_io`](crate::runtime::run_with_io) and shared by reference;
//! the type is deliberately neither `Copy` nor `Clone`.

use std::marker::PhantomData;

use crate::scope::{Brand, Handle, ScopeId};

/// Handle granting permission to perform arbitrary host-level effects.
pub struct Io<'scope> {
    scope: ScopeId,
    _brand: Brand<'scope>,
}

impl Io<'_> {
    pub(crate) fn new(scope: ScopeId) -> Self {
        Self {
            scope,
            _brand: PhantomData,
        }
    }

    /// Perform a host action synchronously and return its result.
    ///
    /// The action runs in program order relative to the surrounding
    /// computation; nothing is deferred or reordered.
    pub fn perform<T>(&self, action: impl FnOnce() -> T) -> T {
        action()
    }
}

impl Handle for Io<'_> {
    fn scope(&self) -> ScopeId {
        self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perform_runs_the_action_in_place() {
        let io = Io::new(ScopeId::fresh());
        let mut observed = Vec::new();
        observed.push("before");
        let n = io.perform(|| {
            observed.push("during");
            3
        });
        observed.push("after");
        assert_eq!(n, 3);
        assert_eq!(observed, ["before", "during", "after"]);
    }
}
