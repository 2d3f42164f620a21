//! Tracing setup for the binary.
//!
//! Logs always go to stderr so `geolens analyze` can keep stdout for JSON.
//! `RUST_LOG`, when set, replaces the directive built from config and flags.

use geolens_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// HTTP client crates stay at `info` when everything else is at debug or trace.
const QUIET_DEPENDENCIES: &str = "hyper=info,reqwest=info";

/// Filter directive for a configured `level`, raised to at least `debug`
/// when `verbose` is set.
///
/// Unrecognised levels fall back to `info`.
fn default_directive(level: &str, verbose: bool) -> String {
    let level = match level {
        "error" | "warn" | "info" | "debug" | "trace" => level,
        _ => "info",
    };
    let level = match (verbose, level) {
        (true, "trace") => "trace",
        (true, _) => "debug",
        (false, level) => level,
    };
    match level {
        "debug" | "trace" => format!("{level},{QUIET_DEPENDENCIES}"),
        _ => level.to_string(),
    }
}

/// Install the global subscriber using `[logging]` from `config`.
///
/// `--verbose` and `--json-logs` take precedence over the file.
pub fn init_from_config(config: &Config, verbose: bool, json_logs: bool) {
    let directive = default_directive(&config.logging.level, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let registry = tracing_subscriber::registry().with(filter);

    if json_logs || config.logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_is_used() {
        assert_eq!(default_directive("warn", false), "warn");
        assert_eq!(default_directive("error", false), "error");
        assert_eq!(default_directive("info", false), "info");
    }

    #[test]
    fn test_debug_and_trace_quiet_http_crates() {
        assert_eq!(default_directive("debug", false), "debug,hyper=info,reqwest=info");
        assert_eq!(default_directive("trace", false), "trace,hyper=info,reqwest=info");
    }

    #[test]
    fn test_verbose_raises_to_debug() {
        assert_eq!(default_directive("warn", true), "debug,hyper=info,reqwest=info");
        assert_eq!(default_directive("trace", true), "trace,hyper=info,reqwest=info");
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(default_directive("loud", false), "info");
    }

    #[test]
    fn test_directive_parses_as_filter() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(EnvFilter::try_new(default_directive(level, false)).is_ok());
        }
    }
}
