//! Runtime configuration for the query engine.
//!
//! The model's own description lives in [`model_common::ModelConfiguration`];
//! this is the host-side storage policy.

use serde::{Deserialize, Serialize};

/// Largest grid that is loaded into memory by default.
pub const DEFAULT_MAX_RESIDENT_ELEMENTS: u64 = i32::MAX as u64;

/// Storage policy for the query engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grids with more values than this are read from disk per query
    /// instead of being loaded into memory.
    pub max_resident_elements: u64,

    /// Keep every property file on disk, even when it would fit in memory.
    pub force_on_disk: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_resident_elements: DEFAULT_MAX_RESIDENT_ELEMENTS,
            force_on_disk: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MODEL_MAX_RESIDENT_ELEMENTS") {
            if let Ok(max) = val.parse() {
                config.max_resident_elements = max;
            }
        }

        if let Ok(val) = std::env::var("MODEL_FORCE_ON_DISK") {
            config.force_on_disk = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Configuration that never loads property files into memory.
    pub fn on_disk() -> Self {
        Self {
            force_on_disk: true,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_resident_elements == 0 && !self.force_on_disk {
            return Err("max_resident_elements must be > 0".to_string());
        }
        Ok(())
    }

    /// Whether a grid of `elements` values may be loaded into memory.
    pub fn allows_resident(&self, elements: u64) -> bool {
        !self.force_on_disk && elements <= self.max_resident_elements
    }
}
