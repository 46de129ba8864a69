//! Scoped handler override with guaranteed restore.

use std::marker::PhantomData;

use crate::handlers::fail_throw;
use crate::registry::{set_handler, Handler};

/// Installs a handler on construction and restores the previous one when
/// dropped, however the scope exits (normal return, early return, or panic
/// unwinding).
///
/// Guards nest: an inner guard captures whatever the outer guard installed,
/// so destruction order unwinds back to the original handler in reverse
/// order of construction.
///
/// A guard is tied to the thread that created it (`!Send`). The handler
/// slot itself is process-wide, so guards created concurrently on
/// different threads interleave as "most recently installed wins"; keep
/// overrides to one thread at a time.
///
/// Not `Clone`: a guard's identity is its one restore obligation.
///
/// ```
/// use bkassert::{bk_assert, HandlerGuard};
///
/// let _guard = HandlerGuard::default();
/// let caught = std::panic::catch_unwind(|| bk_assert!(false));
/// assert!(caught.is_err());
/// ```
pub struct HandlerGuard {
    previous: Handler,
    _single_thread: PhantomData<*const ()>,
}

impl HandlerGuard {
    /// Install `handler`, capturing the previously active handler.
    pub fn new(handler: Handler) -> Self {
        HandlerGuard {
            previous: set_handler(handler),
            _single_thread: PhantomData,
        }
    }
}

impl Default for HandlerGuard {
    /// Install [`fail_throw`], the usual choice for tests that want to
    /// catch and inspect failures.
    fn default() -> Self {
        HandlerGuard::new(fail_throw)
    }
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        set_handler(self.previous);
    }
}
