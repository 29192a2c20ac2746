//! Configuration system for solvebench.
//!
//! Load characterization settings from TOML or YAML files so that depth
//! ranges, trial counts and output paths can change without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use solvebench_config::CharacterizationConfig;
//! use std::time::Duration;
//!
//! let config = CharacterizationConfig::from_toml_str(r#"
//!     min_depth = 19
//!     max_depth = 25
//!     iteration_count = 200
//!     timeout_seconds = 1.0
//!     seconds_per_move = 0.15
//!
//!     [output]
//!     summary_csv = "summary.csv"
//! "#).unwrap();
//!
//! assert_eq!(config.depth_count(), 7);
//! assert_eq!(config.timeout(), Duration::from_secs(1));
//! assert_eq!(config.output.summary_csv.as_deref(), Some("summary.csv"));
//! ```
//!
//! Or build it in code:
//!
//! ```
//! use solvebench_config::CharacterizationConfig;
//!
//! let config = CharacterizationConfig::new(50, 0.2)
//!     .with_depth_range(20, 22)
//!     .with_timeout_seconds(0.5);
//!
//! assert!(config.validate().is_ok());
//! assert!(config.clone().with_depth_range(6, 4).validate().is_err());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest goal depth sampled when none is given.
pub const DEFAULT_MIN_DEPTH: u32 = 19;

/// Highest goal depth sampled when none is given.
pub const DEFAULT_MAX_DEPTH: u32 = 25;

/// Per-trial solver timeout when none is given.
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 1.0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for one characterization run.
///
/// The five sampling keys are required in configuration files; everything
/// else is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CharacterizationConfig {
    /// First goal depth sampled (inclusive).
    pub min_depth: u32,

    /// Last goal depth sampled (inclusive).
    pub max_depth: u32,

    /// Trials per goal depth.
    pub iteration_count: usize,

    /// Per-trial solver timeout in seconds.
    pub timeout_seconds: f64,

    /// Assumed execution time of one move, used for composite time estimates.
    pub seconds_per_move: f64,

    /// Seed for the state randomizer, for reproducible runs.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Reference completion time to compare composite estimates against.
    #[serde(default)]
    pub reference_time_seconds: Option<f64>,

    /// Report destinations.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CharacterizationConfig {
    /// Creates a configuration with default depth range and timeout.
    ///
    /// Defaults:
    /// - min_depth: 19
    /// - max_depth: 25
    /// - timeout_seconds: 1.0
    pub fn new(iteration_count: usize, seconds_per_move: f64) -> Self {
        Self {
            min_depth: DEFAULT_MIN_DEPTH,
            max_depth: DEFAULT_MAX_DEPTH,
            iteration_count,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            seconds_per_move,
            random_seed: None,
            reference_time_seconds: None,
            output: OutputConfig::default(),
        }
    }

    /// Loads configuration from a TOML or YAML file, chosen by extension.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or doesn't parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the inclusive goal depth range.
    pub fn with_depth_range(mut self, min_depth: u32, max_depth: u32) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    /// Sets the number of trials per depth.
    pub fn with_iteration_count(mut self, count: usize) -> Self {
        self.iteration_count = count;
        self
    }

    /// Sets the per-trial timeout.
    pub fn with_timeout_seconds(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the assumed time per move.
    pub fn with_seconds_per_move(mut self, seconds: f64) -> Self {
        self.seconds_per_move = seconds;
        self
    }

    /// Sets the randomizer seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the reference completion time.
    pub fn with_reference_time_seconds(mut self, seconds: f64) -> Self {
        self.reference_time_seconds = Some(seconds);
        self
    }

    /// Replaces the output configuration.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Checks every constraint a run depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated constraint.
    ///
    /// # Examples
    ///
    /// ```
    /// use solvebench_config::CharacterizationConfig;
    ///
    /// assert!(CharacterizationConfig::new(10, 0.5).validate().is_ok());
    /// assert!(CharacterizationConfig::new(0, 0.5).validate().is_err());
    /// assert!(CharacterizationConfig::new(10, 0.0).validate().is_err());
    /// assert!(CharacterizationConfig::new(10, 0.5)
    ///     .with_timeout_seconds(-1.0)
    ///     .validate()
    ///     .is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_depth > self.max_depth {
            return Err(ConfigError::Invalid(format!(
                "min_depth ({}) must not exceed max_depth ({})",
                self.min_depth, self.max_depth
            )));
        }
        if self.iteration_count == 0 {
            return Err(ConfigError::Invalid(
                "iteration_count must be at least 1".to_string(),
            ));
        }
        require_positive("timeout_seconds", self.timeout_seconds)?;
        match Duration::try_from_secs_f64(self.timeout_seconds) {
            Ok(timeout) if timeout.is_zero() => {
                return Err(ConfigError::Invalid(format!(
                    "timeout_seconds ({}) is shorter than one nanosecond",
                    self.timeout_seconds
                )));
            }
            Ok(_) => {}
            Err(_) => {
                return Err(ConfigError::Invalid(format!(
                    "timeout_seconds ({}) is too large to represent as a duration",
                    self.timeout_seconds
                )));
            }
        }
        require_positive("seconds_per_move", self.seconds_per_move)?;
        if let Some(reference) = self.reference_time_seconds {
            require_positive("reference_time_seconds", reference)?;
        }
        Ok(())
    }

    /// Returns the per-trial timeout as a Duration.
    ///
    /// Only meaningful after [`validate`](Self::validate) has succeeded.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds).unwrap_or(Duration::ZERO)
    }

    /// Number of goal depths in the range, zero if the range is inverted.
    pub fn depth_count(&self) -> usize {
        if self.min_depth > self.max_depth {
            0
        } else {
            (self.max_depth - self.min_depth) as usize + 1
        }
    }

    /// Goal depths in ascending order.
    pub fn depths(&self) -> std::ops::RangeInclusive<u32> {
        self.min_depth..=self.max_depth
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

/// Where reports are written. Every destination is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// One CSV row per trial.
    #[serde(default)]
    pub full_csv: Option<String>,

    /// One CSV row per goal depth.
    #[serde(default)]
    pub summary_csv: Option<String>,

    /// Markdown report.
    #[serde(default)]
    pub markdown: Option<String>,
}

impl OutputConfig {
    pub fn with_full_csv(mut self, path: impl Into<String>) -> Self {
        self.full_csv = Some(path.into());
        self
    }

    pub fn with_summary_csv(mut self, path: impl Into<String>) -> Self {
        self.summary_csv = Some(path.into());
        self
    }

    pub fn with_markdown(mut self, path: impl Into<String>) -> Self {
        self.markdown = Some(path.into());
        self
    }

    /// True if no report destination is configured.
    pub fn is_empty(&self) -> bool {
        self.full_csv.is_none() && self.summary_csv.is_none() && self.markdown.is_none()
    }
}
