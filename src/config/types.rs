//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DB_PATH, DEFAULT_API_BASE, DEFAULT_MODEL};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Application configuration.
///
/// Parsed from the command line with environment-variable fallbacks, or
/// constructed programmatically via `Default`.
///
/// # Examples
///
/// ```no_run
/// use ip_intel::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     api_key: "secret".to_string(),
///     db_path: PathBuf::from("./history.db"),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Parser)]
#[command(
    name = "ip_intel",
    about = "Looks up WHOIS-style intelligence for IP addresses using a search-grounded model."
)]
pub struct Config {
    /// API credential for the completion service.
    ///
    /// Not checked up front: a missing key surfaces as a failed lookup.
    #[arg(long, env = "API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Generative model name
    #[arg(long, env = "IP_INTEL_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the completion service
    #[arg(long, env = "IP_INTEL_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Database path (SQLite file holding lookup history)
    #[arg(long, env = "IP_INTEL_DB_PATH", value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            db_path: PathBuf::from(DB_PATH),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}

// Keeps the credential out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("db_path", &self.db_path)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong and what is expected
    pub message: String,
}

impl Config {
    /// Checks option values that would otherwise fail obscurely at request time.
    ///
    /// The API key is not checked.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "model",
                message: "must not be empty (e.g. gemini-3-flash-preview)".to_string(),
            });
        }

        match url::Url::parse(&self.api_base) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            Ok(parsed) => Err(ConfigValidationError {
                field: "api_base",
                message: format!(
                    "unsupported scheme '{}', expected http or https",
                    parsed.scheme()
                ),
            }),
            Err(e) => Err(ConfigValidationError {
                field: "api_base",
                message: format!("must be an absolute URL such as {DEFAULT_API_BASE} ({e})"),
            }),
        }
    }
}
