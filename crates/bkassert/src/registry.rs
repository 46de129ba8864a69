//! The process-wide handler slot.
//!
//! Holds the currently active [`Handler`] and allows atomic get/swap. The
//! slot starts out holding [`fail_abort`] and is mutated only through
//! [`set_handler`], usually via a scoped `HandlerGuard`.
//!
//! ## Semantics
//!
//! - Exactly one handler is active at any instant.
//! - `set_handler` and `get_handler` are single-word atomic operations;
//!   readers never observe a torn value.
//! - `invoke_handler` is not ordered against a concurrent `set_handler`: a
//!   failure that races a swap may be reported through the handler that was
//!   active immediately before the swap.

use std::sync::OnceLock;

use crossbeam_utils::atomic::AtomicCell;

use crate::failure::FailureInfo;
use crate::handlers::fail_abort;

/// The policy invoked when an assertion fails.
///
/// The built-in handlers never return normally. A custom handler may
/// return, in which case the failed check simply falls through.
pub type Handler = fn(&FailureInfo);

// ---------------------------------------------------------------------------
// Global slot
// ---------------------------------------------------------------------------

/// The active handler, lazily initialized to the abort policy.
static ACTIVE_HANDLER: OnceLock<AtomicCell<Handler>> = OnceLock::new();

fn slot() -> &'static AtomicCell<Handler> {
    ACTIVE_HANDLER.get_or_init(|| AtomicCell::new(fail_abort as Handler))
}

/// Atomically install `handler`, returning the handler that was active
/// immediately before the call.
pub fn set_handler(handler: Handler) -> Handler {
    slot().swap(handler)
}

/// Atomically read the active handler without modifying it.
pub fn get_handler() -> Handler {
    slot().load()
}

/// Invoke the active handler with `info`, synchronously, on the calling
/// thread.
pub fn invoke_handler(info: &FailureInfo) {
    (slot().load())(info)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
