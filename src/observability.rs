//! This module provides the logging hooks of the crate.
//!
//! Library code only ever talks to the `log` facade. Binaries, tests and
//! benches that want to see the output call `init_logging` once; the
//! `log_metric!` macro emits structured key/value records at trace level and
//! costs a single level check when tracing is off.

use std::sync::Once;

use log::LevelFilter;

/// Logs a structured key-value metric record at `trace` level.
///
/// # Example
/// ```
/// use na_numerics::log_metric;
/// let patched = 3;
/// log_metric!("op" = "add", "patched" = patched);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::__log::log_enabled!($crate::__log::Level::Trace) {
            // Collect each pair as a JSON string fragment
            let mut parts: Vec<String> = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::__log::trace!("NA_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` printing `[LEVEL] message` lines at `level`.
///
/// Only the first call has any effect. If another logger is already
/// installed, it is left in place.
pub fn init_logging(level: LevelFilter) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(LevelFilter::Trace);
        init_logging(LevelFilter::Off);
        log_metric!("op" = "test", "len" = 3usize);
    }
}
