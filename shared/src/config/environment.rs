//! Deployment environment and logging defaults

use serde::{Deserialize, Serialize};
use std::env;

/// Variables consulted, in order, to detect the environment
const ENVIRONMENT_VARS: [&str; 3] = ["ENVIRONMENT", "ENV", "RUST_ENV"];

/// Deployment environment the client runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Detect the environment from the first set variable of
    /// `ENVIRONMENT`, `ENV`, `RUST_ENV`; unknown values fall back to development
    pub fn from_env() -> Self {
        ENVIRONMENT_VARS
            .iter()
            .find_map(|name| env::var(name).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Lowercase name, as used in file names and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Optional TOML file layered over the client defaults, e.g. `config.staging.toml`
    pub fn config_file(&self) -> String {
        format!("config.{}.toml", self.as_str())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Unknown environment '{}'", other)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

/// Settings for the tracing subscriber
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `vc_core=debug,warn`
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// ANSI colors on terminal output
    #[serde(default = "enabled")]
    pub colored: bool,

    /// Emit file and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::default(),
            colored: true,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Defaults for `environment`: verbose pretty output in development,
    /// uncolored JSON elsewhere
    pub fn for_environment(environment: Environment) -> Self {
        let level = match environment {
            Environment::Development => "debug",
            Environment::Staging => "info",
            Environment::Production => "warn",
        };
        let development = environment == Environment::Development;

        Self {
            level: String::from(level),
            format: if development { LogFormat::Pretty } else { LogFormat::Json },
            colored: development,
            source_location: development,
        }
    }

    /// Defaults for the detected environment, with `LOG_LEVEL` overriding the level when set
    pub fn from_env() -> Self {
        let mut config = Self::for_environment(Environment::from_env());
        if let Some(level) = env::var("LOG_LEVEL").ok().filter(|l| !l.trim().is_empty()) {
            config.level = level;
        }
        config
    }
}

fn enabled() -> bool {
    true
}
