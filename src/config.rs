//! System configuration.
//!
//! Initial arming mode, the sensor roster to seed the store with, and which
//! cat detector to run.  Loaded from JSON; every field has a default so a
//! partial document is accepted.
//!
//! The cat confidence threshold is deliberately absent: it is the fixed
//! [`CAT_CONFIDENCE_THRESHOLD`](crate::alarm::rules::CAT_CONFIDENCE_THRESHOLD).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alarm::{ArmingStatus, Sensor, SensorType};
use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Arming mode the store starts in.
    pub initial_arming: ArmingStatus,
    /// Sensors registered at startup.
    pub sensors: Vec<SensorConfig>,
    /// Detector selection.
    pub detector: DetectorConfig,
}

/// One entry of the startup sensor roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    pub sensor_type: SensorType,
    #[serde(default)]
    pub active: bool,
}

impl SensorConfig {
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    pub fn to_sensor(&self) -> Result<Sensor, ConfigError> {
        Sensor::new(self.name.clone(), self.sensor_type)
            .map(|s| s.with_active(self.active))
            .map_err(|_| ConfigError::Validation("sensor name must not be empty"))
    }
}

/// Which [`FakeDetector`](crate::adapters::detector::FakeDetector) mode to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DetectorConfig {
    /// Always answer `cat_present`.
    Fixed { cat_present: bool },
    /// Answer at random; a seed makes the sequence reproducible.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::Fixed { cat_present: false }
    }
}

impl SystemConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject blank sensor names and duplicate `(name, type)` pairs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.sensors.len());
        for entry in &self.sensors {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::Validation("sensor name must not be empty"));
            }
            if !seen.insert((entry.name.as_str(), entry.sensor_type)) {
                return Err(ConfigError::Validation("duplicate sensor name and type"));
            }
        }
        Ok(())
    }
}
