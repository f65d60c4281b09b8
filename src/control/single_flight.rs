//! Single-flight guard.
//!
//! At most one in-flight operation of a given kind at a time; concurrent
//! requests are dropped, never queued. The permit releases the guard on
//! drop, so every exit path - success, error, or panic unwind - releases
//! it and no failure can permanently lock out future operations.

use std::cell::Cell;

/// Guard enforcing at-most-one in-flight operation.
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: Cell<bool>,
}

impl SingleFlight {
    /// Creates an idle guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an operation currently holds the guard.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Attempt to start an operation.
    ///
    /// Returns a permit when idle; `None` when an operation is already in
    /// flight (the caller must drop the request, not retry-loop).
    pub fn try_acquire(&self) -> Option<FlightPermit<'_>> {
        if self.busy.get() {
            return None;
        }
        self.busy.set(true);
        Some(FlightPermit { busy: &self.busy })
    }
}

/// Proof of an acquired flight; releases the guard when dropped.
#[derive(Debug)]
pub struct FlightPermit<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_succeeds_when_idle() {
        let guard = SingleFlight::new();
        assert!(!guard.is_busy());
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_busy());
    }

    #[test]
    fn second_acquire_is_dropped_while_in_flight() {
        let guard = SingleFlight::new();
        let _held = guard.try_acquire().unwrap();
        assert!(guard.try_acquire().is_none());
    }

    #[test]
    fn dropping_permit_releases_guard() {
        let guard = SingleFlight::new();
        drop(guard.try_acquire().unwrap());
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn permit_releases_on_panic_unwind() {
        let guard = SingleFlight::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _permit = guard.try_acquire().unwrap();
            panic!("load blew up");
        }));
        assert!(result.is_err());
        assert!(!guard.is_busy(), "guard must release on unwind");
    }
}
