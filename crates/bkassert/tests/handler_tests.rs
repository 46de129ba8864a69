//! Behavior tests for the check macros, the throwing policy, and scoped
//! handler overrides.
//!
//! Everything here runs under the throwing policy or a recording policy;
//! the terminal policies (abort, stall) are exercised against child
//! processes in `process_exit.rs`.

use std::panic::catch_unwind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bkassert::{
    bk_assert, bk_assert_opt, bk_assert_safe, fail_stall, fail_throw, get_handler, set_handler,
    AssertionFailure, FailureInfo, Handler, HandlerGuard,
};

/// Serializes tests that touch the process-wide handler slot.
static HANDLER_LOCK: Mutex<()> = Mutex::new(());

fn handler_lock() -> MutexGuard<'static, ()> {
    HANDLER_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handler identity is fn-pointer identity; compare through `usize`.
fn same_handler(a: Handler, b: Handler) -> bool {
    a as usize == b as usize
}

/// Most recently recorded failure, for [`recording_handler`].
static RECORDED: Mutex<Option<FailureInfo>> = Mutex::new(None);

/// A continuing handler: records the failure and returns.
fn recording_handler(info: &FailureInfo) {
    *RECORDED.lock().unwrap() = Some(*info);
}

fn take_recorded() -> Option<FailureInfo> {
    RECORDED.lock().unwrap().take()
}

// ── Check primitive ──────────────────────────────────────────────────────

#[test]
fn true_condition_has_no_observable_effect() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::new(recording_handler);

    bk_assert!(1 + 1 == 2);
    bk_assert_safe!(true);
    bk_assert_opt!(!false);

    assert_eq!(take_recorded(), None);
}

#[test]
fn condition_is_evaluated_exactly_once_when_true() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::new(recording_handler);
    let calls = AtomicUsize::new(0);

    bk_assert!(calls.fetch_add(1, Ordering::Relaxed) == 0);

    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(take_recorded(), None);
}

#[test]
fn condition_is_evaluated_exactly_once_when_false() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::new(recording_handler);
    let calls = AtomicUsize::new(0);

    bk_assert!(calls.fetch_add(1, Ordering::Relaxed) == 7);

    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert!(take_recorded().is_some(), "the handler should have run once");
}

#[test]
fn control_returns_after_a_continuing_handler() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::new(recording_handler);

    bk_assert!(false);
    let first = take_recorded().expect("first failure should be recorded");
    assert_eq!(first.expression(), "false");

    // The check fell through, so a second check runs normally.
    bk_assert!(1 == 2);
    let second = take_recorded().expect("second failure should be recorded");
    assert_eq!(second.expression(), "1 == 2");
}

#[test]
fn aliases_report_their_own_call_sites() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::new(recording_handler);

    bk_assert_safe!(false);
    let safe_line = line!() - 1;
    let safe = take_recorded().expect("safe alias should reach the handler");
    assert_eq!(safe.expression(), "false");
    assert_eq!(safe.line(), safe_line);

    bk_assert_opt!(false);
    let opt_line = line!() - 1;
    let opt = take_recorded().expect("opt alias should reach the handler");
    assert_eq!(opt.expression(), "false");
    assert_eq!(opt.line(), opt_line);
}

// ── Throwing policy ──────────────────────────────────────────────────────

const TRIP_LINE: u32 = line!() + 2;
fn trip_failed_comparison() {
    bk_assert!(1 == 2);
}

#[test]
fn failed_check_raises_catchable_failure() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::default();

    let payload = catch_unwind(trip_failed_comparison).unwrap_err();
    let failure = payload
        .downcast::<AssertionFailure>()
        .expect("payload should be an AssertionFailure");

    assert_eq!(failure.expression(), "1 == 2");
    assert!(failure.file().ends_with("handler_tests.rs"));
    assert_eq!(failure.function(), "trip_failed_comparison");
    assert_eq!(failure.line(), TRIP_LINE);
    assert_eq!(failure.to_string(), "Assertion failure.");
}

#[test]
fn raised_failure_travels_as_standard_error() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::default();

    let payload = catch_unwind(|| bk_assert!(false)).unwrap_err();
    let failure = payload
        .downcast::<AssertionFailure>()
        .expect("payload should be an AssertionFailure");

    let dynamic: &dyn std::error::Error = failure.as_ref();
    assert_eq!(dynamic.to_string(), "Assertion failure.");
}

// ── Registry semantics ───────────────────────────────────────────────────

#[test]
fn set_handler_returns_the_previous_handler() {
    let _lock = handler_lock();
    let original = get_handler();

    let previous = set_handler(fail_stall);
    assert!(same_handler(previous, original));

    let previous = set_handler(recording_handler);
    assert!(same_handler(previous, fail_stall));

    let previous = set_handler(original);
    assert!(same_handler(previous, recording_handler));
}

#[test]
fn get_handler_is_idempotent() {
    let _lock = handler_lock();
    let first = get_handler();
    let second = get_handler();
    assert!(same_handler(first, second));
}

// ── Scoped overrides ─────────────────────────────────────────────────────

#[test]
fn nested_guards_restore_in_lifo_order() {
    let _lock = handler_lock();
    let original = get_handler();
    {
        let _outer = HandlerGuard::new(fail_stall);
        assert!(same_handler(get_handler(), fail_stall));
        {
            let _inner = HandlerGuard::new(recording_handler);
            assert!(same_handler(get_handler(), recording_handler));
        }
        assert!(same_handler(get_handler(), fail_stall));
    }
    assert!(same_handler(get_handler(), original));
}

#[test]
fn guard_restores_after_unwinding() {
    let _lock = handler_lock();
    let original = get_handler();

    let outcome = catch_unwind(|| {
        let _guard = HandlerGuard::default();
        bk_assert!(false);
    });

    assert!(outcome.is_err());
    assert!(same_handler(get_handler(), original));
}

#[test]
fn default_guard_installs_the_throwing_handler() {
    let _lock = handler_lock();
    let _guard = HandlerGuard::default();
    assert!(same_handler(get_handler(), fail_throw));
}
