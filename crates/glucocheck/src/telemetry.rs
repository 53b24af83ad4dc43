use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Variable that overrides the configured log level when set.
const OVERRIDE_VAR: &str = "RUST_LOG";
const CONFIG_VAR: &str = "APP_LOG_LEVEL";

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter {
        variable: &'static str,
        directives: String,
        source: ParseError,
    },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter {
                variable,
                directives,
                ..
            } => write!(f, "{variable}='{directives}' is not a valid log filter"),
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a global log subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so CLI reports on stdout stay clean.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = log_filter(config, std::env::var(OVERRIDE_VAR).ok())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

/// A non-blank override wins over the configured level. Neither is silently discarded when invalid.
fn log_filter(
    config: &TelemetryConfig,
    override_directives: Option<String>,
) -> Result<EnvFilter, TelemetryError> {
    let (variable, directives) = match override_directives.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => (OVERRIDE_VAR, raw),
        None => (CONFIG_VAR, config.log_level.clone()),
    };

    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::InvalidFilter {
        variable,
        directives,
        source,
    })
}
