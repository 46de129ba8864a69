//! The built-in failure policies.
//!
//! All three report through the same one-line stderr format before acting:
//!
//! ```text
//! Assertion failed: "<expression>", <file>:<line> (<function>)
//! ```
//!
//! The report is written and flushed before the policy takes effect, so the
//! line is visible even when the process dies immediately afterwards.

use std::io::{self, Write};
use std::panic;
use std::process;
use std::thread;
use std::time::Duration;

use crate::failure::{AssertionFailure, FailureInfo};

/// Render the one-line failure report.
///
/// Empty fields are substituted with the literal marker `(empty)` so the
/// line always carries four readable positions. Custom handlers can reuse
/// this to match the built-in output.
pub fn failure_message(info: &FailureInfo) -> String {
    format!(
        "Assertion failed: \"{}\", {}:{} ({})",
        non_empty(info.expression()),
        non_empty(info.file()),
        info.line(),
        non_empty(info.function()),
    )
}

fn non_empty(text: &'static str) -> &'static str {
    if text.is_empty() {
        "(empty)"
    } else {
        text
    }
}

/// Write the report line to stderr and flush it.
fn report(info: &FailureInfo) {
    let mut err = io::stderr().lock();
    let _ = writeln!(err, "{}", failure_message(info));
    let _ = err.flush();
}

/// Report the failure and terminate the process immediately.
///
/// This is the startup default. Termination goes through
/// [`std::process::abort`]: no unwinding, no destructors, and on Windows a
/// fast-fail rather than the interactive CRT report dialog, so the exit is
/// silent and non-interactive everywhere. Never returns.
pub fn fail_abort(info: &FailureInfo) {
    report(info);
    process::abort()
}

/// Report the failure, then sleep forever in one-second steps.
///
/// Keeps the process alive so a debugger can attach instead of losing it
/// to immediate termination. Never returns and cannot be cancelled; the
/// process is expected to be killed externally.
pub fn fail_stall(info: &FailureInfo) {
    report(info);
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}

/// Raise the failure as a catchable [`AssertionFailure`] panic payload.
///
/// If a panic is already unwinding on the calling thread, raising another
/// would escalate to an immediate process abort with no usable diagnostic,
/// so this prints a fallback line to stderr and goes through [`fail_abort`]
/// instead.
pub fn fail_throw(info: &FailureInfo) {
    if !thread::panicking() {
        panic::panic_any(AssertionFailure::new(*info));
    }

    {
        let mut err = io::stderr().lock();
        let _ = writeln!(
            err,
            "assertion failure cannot be raised while a panic is already unwinding"
        );
        let _ = err.flush();
    }
    fail_abort(info)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// The terminal paths of `fail_abort` and `fail_stall`, and the fallback
// path of `fail_throw`, are exercised against child processes in
// `tests/process_exit.rs`.
