//! Logging macros that optionally forward to the `log` crate.
//!
//! Without the `logging` feature the macros expand to nothing beyond a borrow
//! of each argument, so call sites type-check the same way in both builds.

macro_rules! log_at {
    ($level:ident, $fmt:literal $(, $($arg:expr),* $(,)?)?) => {
        #[cfg(feature = "logging")]
        ::log::$level!(target: "bitpack", $fmt $(, $($arg),*)?);
        #[cfg(not(feature = "logging"))]
        { $($(let _ = &$arg;)*)? }
    };
}

macro_rules! ltrace {
    ($($tt:tt)*) => {
        log_at!(trace, $($tt)*)
    };
}

macro_rules! ldebug {
    ($($tt:tt)*) => {
        log_at!(debug, $($tt)*)
    };
}

macro_rules! lwarn {
    ($($tt:tt)*) => {
        log_at!(warn, $($tt)*)
    };
}
