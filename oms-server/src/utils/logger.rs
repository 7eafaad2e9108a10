//! Logging Infrastructure
//!
//! Structured logging setup for development (pretty, stdout) and production
//! (JSON and/or daily rolling files).

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("oms_server={level},shared={level},tower_http={level}"))
}

/// Initialize the logger with optional JSON format and file output
///
/// `RUST_LOG` takes precedence over `log_level`. File output is only used
/// when `log_dir` exists.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let json = json.unwrap_or(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "oms-server");
            let subscriber = subscriber.with_ansi(false).with_writer(file_appender);
            if json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }
            return;
        }
        eprintln!("Log directory {dir} does not exist, logging to stdout");
    }

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_crates() {
        let filter = default_filter("debug").to_string();
        assert!(filter.contains("oms_server=debug"));
        assert!(filter.contains("tower_http=debug"));
    }
}
