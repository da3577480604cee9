//! Capacity policy for the growable containers.

use super::{parse_env_var, Config, ValidationError};
use crate::error::{ContainerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Growth and load policy for [`DynArray`](crate::DynArray) and
/// [`StringHashSet`](crate::StringHashSet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Capacity the array takes on its first growth
    pub array_initial_capacity: usize,
    /// Multiplier applied to a full array's capacity
    pub array_growth_factor: usize,
    /// Number of slots in a new hash set
    pub set_initial_capacity: usize,
    /// Occupied-plus-tombstone fraction that triggers a hash set rehash
    pub set_max_load_factor: f64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            array_initial_capacity: 4,
            array_growth_factor: 2,
            set_initial_capacity: 8,
            set_max_load_factor: 0.7,
        }
    }
}

impl Config for ContainerConfig {
    fn validate(&self) -> Result<()> {
        if self.array_initial_capacity == 0 {
            return Err(ValidationError::new(
                "array_initial_capacity",
                &self.array_initial_capacity.to_string(),
                "must be greater than 0",
            )
            .into());
        }
        if self.array_growth_factor < 2 {
            return Err(ValidationError::new(
                "array_growth_factor",
                &self.array_growth_factor.to_string(),
                "array would not grow",
            )
            .with_suggestion("2 or more")
            .into());
        }
        if self.set_initial_capacity == 0 {
            return Err(ValidationError::new(
                "set_initial_capacity",
                &self.set_initial_capacity.to_string(),
                "must be greater than 0",
            )
            .into());
        }
        if !(self.set_max_load_factor > 0.0 && self.set_max_load_factor < 1.0) {
            return Err(ValidationError::new(
                "set_max_load_factor",
                &self.set_max_load_factor.to_string(),
                "open addressing needs a free slot",
            )
            .with_suggestion("a value strictly between 0 and 1")
            .into());
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.array_initial_capacity = parse_env_var(
            &format!("{}ARRAY_INITIAL_CAPACITY", prefix),
            config.array_initial_capacity,
        );
        config.array_growth_factor = parse_env_var(
            &format!("{}ARRAY_GROWTH_FACTOR", prefix),
            config.array_growth_factor,
        );
        config.set_initial_capacity = parse_env_var(
            &format!("{}SET_INITIAL_CAPACITY", prefix),
            config.set_initial_capacity,
        );
        config.set_max_load_factor = parse_env_var(
            &format!("{}SET_MAX_LOAD_FACTOR", prefix),
            config.set_max_load_factor,
        );
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            array_initial_capacity: 64,
            array_growth_factor: 2,
            set_initial_capacity: 256,
            set_max_load_factor: 0.5,
        }
    }

    fn memory_preset() -> Self {
        Self {
            array_initial_capacity: 1,
            array_growth_factor: 2,
            set_initial_capacity: 4,
            set_max_load_factor: 0.85,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            array_initial_capacity: 1024,
            array_growth_factor: 4,
            set_initial_capacity: 1024,
            set_max_load_factor: 0.6,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            ContainerError::configuration(format!("Failed to serialize container config: {}", e))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            ContainerError::configuration(format!("Failed to write container config file: {}", e))
        })?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ContainerError::configuration(format!("Failed to read container config file: {}", e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ContainerError::configuration(format!("Failed to parse container config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
