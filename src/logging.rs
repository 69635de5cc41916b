//! Structured logging configuration
//!
//! Logging is off unless `PROMPTVAULT_LOG_LEVEL` is set. Output goes to stderr,
//! or to a daily rolling file when `PROMPTVAULT_LOG_DIR` is set, which keeps the
//! terminal UI clean while it owns the screen.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Logging configuration for different environments
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    /// Log file directory (None for stderr only)
    pub file_dir: Option<PathBuf>,
    pub colored: bool,
    /// Enable source location logging
    pub with_location: bool,
    /// Enable span timing
    pub with_spans: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            format: LogFormat::Pretty,
            file_dir: None,
            colored: is_terminal::IsTerminal::is_terminal(&std::io::stderr()),
            with_location: false,
            with_spans: false,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.to_lowercase() == "true")
}

impl LogConfig {
    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        let level = env::var("PROMPTVAULT_LOG_LEVEL")
            .or_else(|_| env::var("LOG_LEVEL"))
            .unwrap_or_else(|_| "error".to_string());

        let format = match env::var("PROMPTVAULT_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let file_dir = env::var("PROMPTVAULT_LOG_DIR").ok().map(PathBuf::from);

        // Files never get ANSI escapes
        let colored = if file_dir.is_some() {
            false
        } else {
            env_flag("PROMPTVAULT_LOG_COLOR")
                .unwrap_or_else(|| is_terminal::IsTerminal::is_terminal(&std::io::stderr()))
        };

        Self {
            level,
            format,
            file_dir,
            colored,
            with_location: env_flag("PROMPTVAULT_LOG_LOCATION").unwrap_or(false),
            with_spans: env_flag("PROMPTVAULT_LOG_SPANS").unwrap_or(false),
        }
    }
}

/// Initialize the global tracing subscriber
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for as long as logging is wanted.
pub fn init_logging(config: LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("error"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    let span_events = if config.with_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let (writer, guard) = match &config.file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "promptvault.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (writer, Some(guard))
        }
        None => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            (writer, Some(guard))
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(config.colored)
        .with_span_events(span_events)
        .with_file(config.with_location)
        .with_line_number(config.with_location);

    match config.format {
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize JSON logging: {}", e))?,
        LogFormat::Pretty => subscriber
            .pretty()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize pretty logging: {}", e))?,
        LogFormat::Compact => subscriber
            .compact()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize compact logging: {}", e))?,
    }

    info!(
        level = %config.level,
        format = ?config.format,
        file_dir = ?config.file_dir,
        "Logging initialized"
    );

    Ok(guard)
}

/// Log a store mutation or slot access for the audit trail
pub fn log_store_operation(operation: &str, prompt_id: Option<&str>, success: bool) {
    let span = tracing::info_span!(
        "store_operation",
        operation = operation,
        prompt_id = prompt_id,
        success = success
    );

    let _enter = span.enter();

    if success {
        debug!(
            operation = operation,
            prompt_id = prompt_id,
            "Store operation completed"
        );
    } else {
        warn!(
            operation = operation,
            prompt_id = prompt_id,
            "Store operation failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_from_env() {
        env::set_var("PROMPTVAULT_LOG_LEVEL", "debug");
        env::set_var("PROMPTVAULT_LOG_FORMAT", "json");
        env::set_var("PROMPTVAULT_LOG_COLOR", "false");

        let config = LogConfig::from_env();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.colored);

        env::remove_var("PROMPTVAULT_LOG_LEVEL");
        env::remove_var("PROMPTVAULT_LOG_FORMAT");
        env::remove_var("PROMPTVAULT_LOG_COLOR");
    }

    #[test]
    fn test_store_operation_logging_without_subscriber() {
        log_store_operation("create", Some("prompt-1"), true);
        log_store_operation("save", None, false);
    }
}
