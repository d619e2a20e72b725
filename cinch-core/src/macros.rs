//! Internal logging macro.

/// Emits a `tracing` event when the `tracing` feature is enabled and
/// compiles to nothing otherwise.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)+);
        }
    };
}
