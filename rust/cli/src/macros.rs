//! Macros for common CLI error handling patterns.

/// Write a line to a stream and return [`crate::exit_code::ERROR`] if writing fails.
///
/// # Examples
///
/// ```ignore
/// write_or_exit!(err, "Error: {}", message);
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}
