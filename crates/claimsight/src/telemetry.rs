use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow the configured level; everything else only
/// reports warnings.
const CLAIMSIGHT_TARGETS: [&str; 2] = ["claimsight", "claimsight_cli"];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter {
        directives: String,
        source: ParseError,
    },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directives, .. } => {
                write!(f, "log filter '{directives}' is not a valid directive set")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a global subscriber is already installed: {err}")
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

/// Expands a bare level such as `debug` into per-crate directives. Values that
/// already carry directives (`claimsight=trace,warn`) pass through unchanged.
pub fn default_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = String::from("warn");
    for target in CLAIMSIGHT_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push('=');
        directives.push_str(level);
    }
    directives
}

/// Builds the event filter: `RUST_LOG` when set and valid, otherwise the
/// configured level scoped to the claimsight crates.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directives = default_directives(&config.log_level);
    EnvFilter::try_new(&directives)
        .map_err(|source| TelemetryError::InvalidFilter { directives, source })
}

/// Installs the global subscriber. Logs go to stderr so rendered pages stay
/// alone on stdout.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_claimsight_crates() {
        assert_eq!(
            default_directives(" debug "),
            "warn,claimsight=debug,claimsight_cli=debug"
        );
    }

    #[test]
    fn explicit_directives_pass_through() {
        assert_eq!(
            default_directives("claimsight=trace,info"),
            "claimsight=trace,info"
        );
    }

    #[test]
    fn invalid_level_names_the_directives() {
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "loud".to_string(),
        };

        let err = build_filter(&config).expect_err("invalid level rejected");

        assert!(err.to_string().contains("claimsight=loud"));
    }
}
