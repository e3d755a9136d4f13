// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Busy-wait helpers for flag polling.
//!
//! Every wait in the driver is expressed as a predicate over a status
//! register read. The predicate is re-evaluated on each iteration so a
//! hardware flag change is picked up on the next poll.

/// Spin until `ready` returns `true`.
///
/// The predicate is evaluated at least once. There is no iteration limit, so
/// a flag that never changes will stall the caller.
pub fn until<F>(mut ready: F)
where
    F: FnMut() -> bool,
{
    while !ready() {}
}

/// Spin until `ready` returns `true`, evaluating it at most `attempts`
/// times.
///
/// Returns `true` as soon as the predicate passes and `false` once the
/// attempt budget is exhausted. With `attempts` of zero the predicate is
/// never evaluated and the wait fails immediately.
pub fn until_bounded<F>(attempts: usize, mut ready: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..attempts {
        if ready() {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn until_spins_while_predicate_is_false() {
        let polls = Cell::new(0);
        until(|| {
            polls.set(polls.get() + 1);
            polls.get() == 4
        });
        assert_eq!(polls.get(), 4);
    }

    #[test]
    fn until_returns_immediately_when_ready() {
        let polls = Cell::new(0);
        until(|| {
            polls.set(polls.get() + 1);
            true
        });
        assert_eq!(polls.get(), 1);
    }

    #[test]
    fn until_bounded_stops_at_first_success() {
        let polls = Cell::new(0);
        let ready = until_bounded(10, || {
            polls.set(polls.get() + 1);
            polls.get() == 3
        });
        assert!(ready);
        assert_eq!(polls.get(), 3);
    }

    #[test]
    fn until_bounded_exhausts_budget() {
        let polls = Cell::new(0);
        let ready = until_bounded(5, || {
            polls.set(polls.get() + 1);
            false
        });
        assert!(!ready);
        assert_eq!(polls.get(), 5);
    }

    #[test]
    fn until_bounded_zero_attempts_never_polls() {
        let polls = Cell::new(0);
        let ready = until_bounded(0, || {
            polls.set(polls.get() + 1);
            true
        });
        assert!(!ready);
        assert_eq!(polls.get(), 0);
    }
}
