//! Diagnostics hook.
//!
//! With the `trace` feature, `trace_step!` forwards to `log::debug!`.
//! Without it the arguments are type-checked but nothing is emitted.

#[cfg(feature = "trace")]
macro_rules! trace_step {
    ($($arg:tt)*) => {
        log::debug!(target: "natal_engine", $($arg)*)
    };
}

#[cfg(not(feature = "trace"))]
macro_rules! trace_step {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

pub(crate) use trace_step;
