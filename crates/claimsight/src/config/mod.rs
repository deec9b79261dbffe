use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_STORE_PATH: &str = ".claimsight/records.json";

/// Slowest accepted assessment pacing; the longest stage then takes just under
/// six minutes.
pub const MIN_ASSESSMENT_SPEED: f64 = 0.01;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }

    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub simulation: SimulationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let store_path = env::var("APP_STORE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let raw_speed = env::var("APP_ASSESSMENT_SPEED").unwrap_or_else(|_| "1.0".to_string());
        let speed = parse_speed(&raw_speed)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig { path: store_path },
            simulation: SimulationConfig { speed },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Parses an assessment speed multiplier. Shared by `APP_ASSESSMENT_SPEED` and
/// the CLI `--speed` flags.
pub fn parse_speed(raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|speed| speed.is_finite() && *speed >= MIN_ASSESSMENT_SPEED)
        .ok_or_else(|| ConfigError::InvalidSpeed {
            value: raw.to_string(),
        })
}

/// Location of the local record file backing the claim store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

/// Pacing of the simulated assessment; `speed` divides every stage delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub speed: f64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSpeed { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSpeed { value } => write!(
                f,
                "assessment speed must be a number of at least {MIN_ASSESSMENT_SPEED} (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
