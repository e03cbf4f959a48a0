//! Run configuration for the `search` command.
//!
//! Settings are layered, highest precedence first:
//! 1. Command-line flags
//! 2. Environment variables (with `GROVER_` prefix)
//! 3. Configuration file (YAML)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use grover_hal::BackendConfig;

/// Execution settings for a search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Shots to sample.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Registered backend name.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Widest register the backend will accept.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Sampling seed; fresh entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub shots: Option<u32>,
    pub backend: Option<String>,
    pub seed: Option<u64>,
}

fn default_shots() -> u32 {
    10_000
}

fn default_backend() -> String {
    "simulator".to_string()
}

fn default_max_qubits() -> u32 {
    20
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            backend: default_backend(),
            max_qubits: default_max_qubits(),
            seed: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration with every layer applied.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &RunOverrides,
        known_backends: &[String],
    ) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config = config.merge_env()?;
        config.apply(overrides);

        config.validate(known_backends)?;
        Ok(config)
    }

    /// Merge `GROVER_*` variables from the process environment.
    fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge `GROVER_*` variables read through `lookup`.
    ///
    /// Only variables that are set override the current values; a set
    /// variable that does not parse is an error.
    pub fn merge_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("GROVER_SHOTS") {
            self.shots = parse_env("GROVER_SHOTS", &v)?;
        }
        if let Some(v) = lookup("GROVER_BACKEND") {
            self.backend = v;
        }
        if let Some(v) = lookup("GROVER_MAX_QUBITS") {
            self.max_qubits = parse_env("GROVER_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("GROVER_SEED") {
            self.seed = Some(parse_env("GROVER_SEED", &v)?);
        }
        Ok(self)
    }

    /// Apply command-line flags.
    pub fn apply(&mut self, overrides: &RunOverrides) {
        if let Some(shots) = overrides.shots {
            self.shots = shots;
        }
        if let Some(backend) = &overrides.backend {
            self.backend.clone_from(backend);
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
    }

    /// Validate the configuration.
    pub fn validate(&self, known_backends: &[String]) -> Result<(), ConfigError> {
        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        if self.max_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "max_qubits must be greater than 0".to_string(),
            ));
        }

        if !known_backends.iter().any(|b| *b == self.backend) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown backend: '{}' (available: {})",
                self.backend,
                known_backends.join(", ")
            )));
        }

        Ok(())
    }

    /// The backend construction context for this run.
    pub fn backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::new(self.backend.clone())
            .with_extra("max_qubits", serde_json::json!(self.max_qubits));
        if let Some(seed) = self.seed {
            config = config.with_extra("seed", serde_json::json!(seed));
        }
        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("{key}: invalid value '{value}'")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
