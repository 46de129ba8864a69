//! The assertion failure record and the catchable error raised from it.

use std::error::Error;
use std::fmt;

use serde::Serialize;

/// Where and what assertion failed.
///
/// All fields reference compile-time constant text captured at the call
/// site by the check macros, so the record is a small `Copy` value with no
/// ownership to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FailureInfo {
    expression: &'static str,
    file: &'static str,
    function: &'static str,
    line: u32,
}

impl FailureInfo {
    /// Create the record for one assertion failure.
    pub const fn new(
        expression: &'static str,
        file: &'static str,
        function: &'static str,
        line: u32,
    ) -> Self {
        FailureInfo {
            expression,
            file,
            function,
            line,
        }
    }

    /// Source text of the failed expression.
    pub const fn expression(&self) -> &'static str {
        self.expression
    }

    /// Source file of the call site.
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Name of the enclosing function at the call site.
    pub const fn function(&self) -> &'static str {
        self.function
    }

    /// 1-based source line of the call site.
    pub const fn line(&self) -> u32 {
        self.line
    }
}

/// A failed assertion, raised by the throwing handler as a panic payload
/// and caught with `std::panic::catch_unwind` plus a downcast.
///
/// Carries the [`FailureInfo`] of the failed check by value; the `Display`
/// rendering is always `Assertion failure.`, with the details available
/// through the accessors.
#[derive(Debug, Clone, Serialize)]
pub struct AssertionFailure {
    info: FailureInfo,
}

impl AssertionFailure {
    /// Wrap a failure record in the catchable error object.
    pub const fn new(info: FailureInfo) -> Self {
        AssertionFailure { info }
    }

    /// The full failure record.
    pub const fn info(&self) -> &FailureInfo {
        &self.info
    }

    /// Source text of the failed expression.
    pub const fn expression(&self) -> &'static str {
        self.info.expression()
    }

    /// Source file of the call site.
    pub const fn file(&self) -> &'static str {
        self.info.file()
    }

    /// Name of the enclosing function at the call site.
    pub const fn function(&self) -> &'static str {
        self.info.function()
    }

    /// 1-based source line of the call site.
    pub const fn line(&self) -> u32 {
        self.info.line()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Assertion failure.")
    }
}

impl Error for AssertionFailure {}
