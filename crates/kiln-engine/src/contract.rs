//! Contract checks for programmer errors.
//!
//! `contract!(cond, "fmt", args..)` evaluates `cond` and returns it. When the
//! check fails in a debug build (or with the `contracts` feature enabled) the
//! violation is logged with its source location and the thread panics. In
//! release builds a failed check only yields `false`, so callers can bail out:
//!
//! ```ignore
//! if !contract!(self.is_recording(), "submit outside begin/end") {
//!     return;
//! }
//! ```

use std::fmt;

/// Whether violated contracts abort in this build.
pub const CONTRACTS_ENABLED: bool = cfg!(any(debug_assertions, feature = "contracts"));

#[macro_export]
macro_rules! contract {
    ($cond:expr $(,)?) => {
        $crate::contract!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {{
        let ok: bool = $cond;
        if !ok && $crate::contract::CONTRACTS_ENABLED {
            $crate::contract::violated(format_args!($($arg)+), file!(), line!());
        }
        ok
    }};
}

#[cold]
#[doc(hidden)]
pub fn violated(message: fmt::Arguments<'_>, file: &str, line: u32) -> ! {
    log::error!("contract violated at {file}:{line}: {message}");
    panic!("contract violated: {message}");
}

#[cfg(test)]
mod tests {
    #[test]
    fn passing_contract_returns_true() {
        assert!(contract!(1 + 1 == 2, "arithmetic"));
    }

    #[test]
    #[should_panic(expected = "contract violated: slot busy 7")]
    fn failing_contract_panics_with_message() {
        let id = 7;
        contract!(id == 0, "slot busy {id}");
    }

    #[test]
    #[should_panic(expected = "contract violated: false")]
    fn bare_condition_uses_its_source_text() {
        contract!(false);
    }
}
