//! Configuration APIs for sdkit
//!
//! Container capacity policy is configurable through [`ContainerConfig`]. The
//! [`Config`] trait gives every configuration type the same validation,
//! environment, preset, and file handling.
//!
//! # Environment Initialization
//!
//! ```rust
//! use sdkit::config::{Config, ContainerConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads SDKIT_ARRAY_INITIAL_CAPACITY and friends, falling back to defaults
//! let config = ContainerConfig::from_env()?;
//!
//! // Custom prefix
//! let config = ContainerConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Preset Configurations
//!
//! ```rust
//! use sdkit::config::{Config, ContainerConfig};
//!
//! let config = ContainerConfig::memory_preset();
//! assert!(config.validate().is_ok());
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod container;

#[cfg(test)]
mod tests;

pub use container::ContainerConfig;

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "SDKIT_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Variables use the format `SDKIT_{FIELD}`, for example
    /// `SDKIT_SET_MAX_LOAD_FACTOR=0.5`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// Unset or unparsable variables keep their default values; the result
    /// is validated before it is returned.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset favouring throughput over memory.
    fn performance_preset() -> Self;

    /// Preset favouring a small footprint.
    fn memory_preset() -> Self;

    /// Preset favouring predictable latency, with fewer large reallocations.
    fn realtime_preset() -> Self;

    /// Balanced preset; the defaults.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Configuration validation error details.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// The invalid value
    pub value: String,
    /// Description of why the value is invalid
    pub reason: String,
    /// Suggested valid values or ranges
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(field: &str, value: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
            suggestion: None,
        }
    }

    /// Add a suggestion for valid values.
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': value '{}' is invalid ({})",
            self.field, self.value, self.reason
        )?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". Suggested values: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for crate::error::ContainerError {
    fn from(err: ValidationError) -> Self {
        Self::configuration(err.to_string())
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or does not parse.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true, everything
/// else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.trim().to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
