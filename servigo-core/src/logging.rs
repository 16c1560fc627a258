//! Unified logging system
//!
//! Provides structured logging with configurable format and output

use serde::{Deserialize, Serialize};
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Whether to include file and line information
    pub include_location: bool,
    /// Log file path; stdout when absent
    pub log_file_path: Option<String>,
    /// Custom filter directives
    pub filter_directives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
            log_file_path: None,
            filter_directives: vec![
                "servigo_core=debug".to_string(),
                "servigo_session=debug".to_string(),
                "servigo_gateway=debug".to_string(),
                "servigo_routing=debug".to_string(),
            ],
        }
    }
}

/// Initialize the logging system
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Add custom filter directives
    for directive in &config.filter_directives {
        filter = filter.add_directive(directive.parse()?);
    }

    let registry = tracing_subscriber::registry().with(filter);

    let log_file = match &config.log_file_path {
        Some(log_path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?,
        ),
        None => None,
    };

    match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_file(config.include_location)
                .with_line_number(config.include_location);

            match log_file {
                Some(file) => registry.with(fmt_layer.with_writer(file)).init(),
                None => registry.with(fmt_layer.with_writer(io::stdout)).init(),
            }
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_file(config.include_location)
                .with_line_number(config.include_location);

            match log_file {
                Some(file) => registry.with(fmt_layer.with_writer(file)).init(),
                None => registry.with(fmt_layer.with_writer(io::stdout)).init(),
            }
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_file(config.include_location)
                .with_line_number(config.include_location);

            match log_file {
                Some(file) => registry.with(fmt_layer.with_writer(file)).init(),
                None => registry.with(fmt_layer.with_writer(io::stdout)).init(),
            }
        }
    }

    Ok(())
}
