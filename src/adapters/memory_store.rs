//! In-memory state store.
//!
//! Implements [`StateStore`] with one atomic per status field and a
//! read-write lock around the sensor roster.  Each field is individually
//! atomic; there are no cross-field transactions, matching what the
//! coordinator requires of a store.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{PoisonError, RwLock};

use log::{debug, info};

use crate::alarm::{AlarmStatus, ArmingStatus, Sensor};
use crate::app::ports::StateStore;
use crate::config::SystemConfig;
use crate::error::ConfigError;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    arming: AtomicU8,
    alarm: AtomicU8,
    sensors: RwLock<BTreeSet<Sensor>>,
}

impl InMemoryStore {
    /// Empty store: disarmed, no alarm, no sensors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a validated configuration.
    pub fn from_config(config: &SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = Self::new();
        store.set_arming_status(config.initial_arming);
        for entry in &config.sensors {
            store.add_sensor(entry.to_sensor()?);
        }
        info!(
            "Store seeded: arming={} sensors={}",
            config.initial_arming,
            config.sensors.len()
        );
        Ok(store)
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl StateStore for InMemoryStore {
    fn arming_status(&self) -> ArmingStatus {
        ArmingStatus::from_u8(self.arming.load(Ordering::SeqCst))
    }

    fn set_arming_status(&self, status: ArmingStatus) {
        self.arming.store(status as u8, Ordering::SeqCst);
    }

    fn alarm_status(&self) -> AlarmStatus {
        AlarmStatus::from_u8(self.alarm.load(Ordering::SeqCst))
    }

    fn set_alarm_status(&self, status: AlarmStatus) {
        self.alarm.store(status as u8, Ordering::SeqCst);
    }

    fn sensors(&self) -> Vec<Sensor> {
        self.sensors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    fn add_sensor(&self, sensor: Sensor) {
        debug!("Store: add sensor '{}'", sensor.name());
        self.sensors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(sensor);
    }

    fn remove_sensor(&self, sensor: &Sensor) {
        debug!("Store: remove sensor '{}'", sensor.name());
        self.sensors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(sensor);
    }

    fn update_sensor(&self, sensor: &Sensor) {
        self.sensors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(sensor.clone());
    }
}
