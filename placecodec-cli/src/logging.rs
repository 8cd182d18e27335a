//! Logging setup for the CLI.
//!
//! Diagnostics go to stderr through `tracing`, so stdout only ever carries
//! converted values.

use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Single-line events
    #[default]
    Compact,
    /// Multi-field events with targets
    Full,
    /// JSON objects, one per line
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
    pub format: LogFormat,
    pub ansi: bool,
}

impl LoggingConfig {
    /// Maps `-v` repetitions to a level: warn, info, debug, then trace.
    pub fn from_verbosity(verbosity: u8, format: LogFormat) -> Self {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self {
            level: level.to_string(),
            format,
            ansi: format != LogFormat::Json && atty::is(atty::Stream::Stderr),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi);

    let result = match config.format {
        LogFormat::Compact => {
            tracing::subscriber::set_global_default(builder.compact().with_target(false).finish())
        }
        LogFormat::Full => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };
    result.map_err(|e| format!("Failed to initialize logging: {}", e))
}
