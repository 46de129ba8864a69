//! The assertion check primitive.
//!
//! `bk_assert!` evaluates its expression exactly once. On success nothing
//! happens; on failure the macro fires `bk_debug_break!` and then hands a
//! [`FailureInfo`] for the call site to the registry's active handler. The
//! failure path lives behind a `#[cold]` function so the passing check
//! compiles down to a single predictable branch.
//!
//! `bk_assert_safe!` and `bk_assert_opt!` are aliases with identical
//! runtime semantics; no build configuration strips any of the three.

use crate::failure::FailureInfo;
use crate::registry;

/// Hand a failed check to the active handler.
///
/// Out of line and cold so the passing path stays a bare branch.
#[cold]
#[inline(never)]
pub fn fail(info: &FailureInfo) {
    registry::invoke_handler(info);
}

/// Reduce `std::any::type_name` output for the call-site probe to the bare
/// enclosing-function name.
///
/// The probe is a local `fn f()`, so the raw name looks like
/// `crate::module::enclosing::f`; this drops the probe segment and the
/// leading path. Inside a closure the remaining segment is `{{closure}}`.
#[doc(hidden)]
pub fn function_from_probe(raw: &'static str) -> &'static str {
    let name = raw.strip_suffix("::f").unwrap_or(raw);
    match name.rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}

/// Capture the name of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __bk_function {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::check::function_from_probe(type_name_of(f))
    }};
}

/// Check that `cond` holds; on failure invoke the active handler with a
/// record of the call site.
///
/// The condition is evaluated exactly once, and a passing check has no
/// observable effect. This is a statement-level construct evaluating to
/// `()`; whether control returns after a failure depends entirely on the
/// installed handler.
#[macro_export]
macro_rules! bk_assert {
    ($cond:expr $(,)?) => {{
        if !($cond) {
            $crate::bk_debug_break!();
            $crate::check::fail(&$crate::FailureInfo::new(
                ::core::stringify!($cond),
                ::core::file!(),
                $crate::__bk_function!(),
                ::core::line!(),
            ));
        }
    }};
}

/// Alias of `bk_assert!` with identical runtime semantics, for checks that
/// must survive every build.
#[macro_export]
macro_rules! bk_assert_safe {
    ($cond:expr $(,)?) => {
        $crate::bk_assert!($cond)
    };
}

/// Alias of `bk_assert!` with identical runtime semantics, for checks
/// cheap enough to keep in optimized builds.
#[macro_export]
macro_rules! bk_assert_opt {
    ($cond:expr $(,)?) => {
        $crate::bk_assert!($cond)
    };
}

/// Emit an inline breakpoint trap, so an attached debugger stops at the
/// failed check itself rather than inside the handler.
///
/// Active only with the `debug-break` feature on an architecture with an
/// inline trap instruction; expands to an `unsafe` inline-asm statement at
/// the call site.
#[cfg(all(feature = "debug-break", target_arch = "x86_64"))]
#[macro_export]
macro_rules! bk_debug_break {
    () => {
        unsafe { ::core::arch::asm!("int3") }
    };
}

/// Emit an inline breakpoint trap, so an attached debugger stops at the
/// failed check itself rather than inside the handler.
///
/// Active only with the `debug-break` feature on an architecture with an
/// inline trap instruction; expands to an `unsafe` inline-asm statement at
/// the call site.
#[cfg(all(feature = "debug-break", target_arch = "aarch64"))]
#[macro_export]
macro_rules! bk_debug_break {
    () => {
        unsafe { ::core::arch::asm!("brk #0xf000") }
    };
}

/// Breakpoint trap placeholder: a no-op without the `debug-break` feature
/// or on architectures without an inline trap instruction.
#[cfg(not(all(
    feature = "debug-break",
    any(target_arch = "x86_64", target_arch = "aarch64")
)))]
#[macro_export]
macro_rules! bk_debug_break {
    () => {
        ()
    };
}
