//! Pluggable assertion-failure handling.
//!
//! `bk_assert!(cond)` evaluates `cond` once; on failure it hands a
//! [`FailureInfo`] describing the call site to the process-wide handler
//! held by the [`registry`]. The handler decides how the process responds:
//!
//! - [`fail_abort`]: report to stderr and terminate the process (the default)
//! - [`fail_stall`]: report to stderr and sleep forever so a debugger can attach
//! - [`fail_throw`]: raise a catchable [`AssertionFailure`]
//!
//! [`HandlerGuard`] temporarily overrides the handler for a lexical scope
//! and restores the previous one on scope exit, including during unwinding.
//!
//! ## Modules
//!
//! - [`failure`]: the immutable failure record and the catchable error object
//! - [`registry`]: the process-wide handler slot (atomic get/swap/invoke)
//! - [`handlers`]: the three built-in failure policies
//! - [`guard`]: scoped handler override with guaranteed restore
//! - [`check`]: the `bk_assert!` macro family and its cold failure path
//!
//! ## Usage
//!
//! ```
//! use bkassert::{bk_assert, AssertionFailure, HandlerGuard};
//!
//! // Install the throwing policy for this scope; the previous policy is
//! // restored when the guard drops.
//! let _guard = HandlerGuard::default();
//!
//! let payload = std::panic::catch_unwind(|| bk_assert!(1 == 2)).unwrap_err();
//! let failure = payload.downcast::<AssertionFailure>().unwrap();
//! assert_eq!(failure.expression(), "1 == 2");
//! assert_eq!(failure.to_string(), "Assertion failure.");
//! ```

pub mod check;
pub mod failure;
pub mod guard;
pub mod handlers;
pub mod registry;

pub use failure::{AssertionFailure, FailureInfo};
pub use guard::HandlerGuard;
pub use handlers::{fail_abort, fail_stall, fail_throw, failure_message};
pub use registry::{get_handler, invoke_handler, set_handler, Handler};
