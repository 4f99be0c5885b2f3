//! Logging bootstrap.
//!
//! Logs go to stderr through `flexi_logger`. `NEONV_LOG_LEVEL=DEBUG` turns
//! on verbose output; any other value, or none, logs errors only.
//! Initialization happens at most once per process and never panics.

use flexi_logger::{Logger, LoggerHandle};
use log::info;
use once_cell::sync::OnceCell;

pub const LOG_LEVEL_ENV: &str = "NEONV_LOG_LEVEL";

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Maps the env value to a flexi_logger level string.
pub fn level_from_env_value(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if v.eq_ignore_ascii_case("debug") => "debug",
        _ => "error",
    }
}

/// Level selected by the environment, or `debug` when `verbose` is set.
pub fn resolve_level(verbose: bool) -> &'static str {
    if verbose {
        return "debug";
    }
    let value = std::env::var(LOG_LEVEL_ENV).ok();
    level_from_env_value(value.as_deref())
}

/// Starts the logger. Repeated calls are no-ops.
pub fn init_logging(level: &str) -> Result<(), String> {
    LOGGER
        .get_or_try_init(|| {
            let handle = Logger::try_with_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_stderr()
                .format(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;
            info!(
                "event=app_start module=logging level={} version={}",
                level,
                env!("CARGO_PKG_VERSION")
            );
            Ok::<_, String>(handle)
        })
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_case_insensitive() {
        assert_eq!(level_from_env_value(Some("DEBUG")), "debug");
        assert_eq!(level_from_env_value(Some("debug")), "debug");
    }

    #[test]
    fn everything_else_is_errors_only() {
        assert_eq!(level_from_env_value(None), "error");
        assert_eq!(level_from_env_value(Some("")), "error");
        assert_eq!(level_from_env_value(Some("TRACE")), "error");
        assert_eq!(level_from_env_value(Some("verbose")), "error");
    }

    #[test]
    fn verbose_flag_forces_debug() {
        assert_eq!(resolve_level(true), "debug");
    }
}
