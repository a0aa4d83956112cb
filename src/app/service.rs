//! Alarm coordinator: the hexagonal core.
//!
//! [`AlarmCoordinator`] validates and applies arming, sensor and
//! cat-detection transitions, and fans out notifications.  All state lives
//! in the injected [`StateStore`] except the transient cat-detected flag,
//! which the coordinator owns.
//!
//! ```text
//!  arming toggle ──▶ ┌──────────────────────────┐ ──▶ StatusListener × N
//!  sensor reports ─▶ │     AlarmCoordinator     │
//!  camera frames ──▶ │  rules · cat flag        │ ◀─▶ StateStore
//!                    └──────────────────────────┘ ──▶ CatDetector
//! ```
//!
//! Every entry point takes `&self` and may be called concurrently from
//! several threads.  No lock is held across store access and listener
//! fan-out; each call acts on whatever store state is visible when it runs.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::alarm::rules::{self, CAT_CONFIDENCE_THRESHOLD, SensorVerdict};
use crate::alarm::{AlarmStatus, ArmingStatus, Sensor};
use crate::image::Image;

use super::events::AlarmEvent;
use super::listeners::{ListenerSet, SharedListener};
use super::ports::{CatDetector, StateStore};

// ───────────────────────────────────────────────────────────────
// AlarmCoordinator
// ───────────────────────────────────────────────────────────────

pub struct AlarmCoordinator<S, D> {
    store: S,
    detector: D,
    listeners: ListenerSet,
    /// Result of the most recent frame evaluation.
    cat_detected: AtomicBool,
}

impl<S: StateStore, D: CatDetector> AlarmCoordinator<S, D> {
    pub fn new(store: S, detector: D) -> Self {
        Self {
            store,
            detector,
            listeners: ListenerSet::new(),
            cat_detected: AtomicBool::new(false),
        }
    }

    // ── Arming ────────────────────────────────────────────────

    /// Apply a new arming mode.
    ///
    /// Arming deactivates every sensor (and latches the alarm at once when
    /// arming home with a cat in view); disarming clears the alarm.  The
    /// mode itself is persisted last.
    pub fn set_arming_mode(&self, mode: ArmingStatus) {
        if mode.is_armed() {
            self.deactivate_all_sensors();
        }
        if let Some(status) = rules::arming_verdict(mode, self.cat_detected()) {
            self.set_alarm_status(status);
        }
        self.store.set_arming_status(mode);
        info!("{}", AlarmEvent::ArmingChanged(mode));
    }

    fn deactivate_all_sensors(&self) {
        let store_arming = self.store.arming_status();
        for mut sensor in self.store.sensors() {
            let was_active = sensor.is_active();
            sensor.set_active(false);
            if rules::persist_on_arm(was_active, store_arming) {
                debug!("Arming: reset sensor '{}'", sensor.name());
                self.store.update_sensor(&sensor);
            }
        }
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Record a sensor report and derive the alarm transition.
    ///
    /// The prior state is taken from the store, not from `sensor`, since a
    /// caller's copy goes stale when arming resets the roster.  `sensor` is
    /// only trusted for sensors the store does not know yet.
    ///
    /// A complete no-op while the alarm is latched: `sensor` is left
    /// untouched, nothing is persisted and nobody is notified.
    pub fn set_sensor_active(&self, sensor: &mut Sensor, active: bool) {
        if !rules::accepts_sensor_updates(self.store.alarm_status()) {
            warn!(
                "Alarm latched; ignoring report active={} from '{}'",
                active,
                sensor.name()
            );
            return;
        }

        let was_active = self
            .stored_activity(sensor)
            .unwrap_or_else(|| sensor.is_active());
        sensor.set_active(active);
        self.store.update_sensor(sensor);
        debug!("Sensor '{}': {} -> {}", sensor.name(), was_active, active);

        let verdict = rules::sensor_verdict(
            was_active,
            active,
            self.store.arming_status(),
            self.store.alarm_status(),
        );
        match verdict {
            SensorVerdict::Hold => {}
            SensorVerdict::Escalate(status) => self.set_alarm_status(status),
            SensorVerdict::ReconcileIfIdle => self.reconcile_if_all_inactive(),
        }
    }

    /// Clear the alarm if no sensor is active.  Idempotent; safe to call
    /// from a periodic consistency check.
    pub fn reconcile_if_all_inactive(&self) {
        if self.all_sensors_inactive() {
            self.set_alarm_status(AlarmStatus::NoAlarm);
        }
    }

    // ── Camera ────────────────────────────────────────────────

    /// Run the cat detector on `image` and apply the result.
    ///
    /// `None` is a complete no-op.  Otherwise every listener receives exactly
    /// one cat-detection notification, whichever branch ran.
    pub fn evaluate_image(&self, image: Option<&Image>) {
        let Some(image) = image else {
            return;
        };

        let cat = self
            .detector
            .contains_cat(image, CAT_CONFIDENCE_THRESHOLD);
        self.cat_detected.store(cat, Ordering::SeqCst);
        debug!("Frame {}x{}: cat={}", image.width(), image.height(), cat);

        let all_inactive = !cat && self.all_sensors_inactive();
        if let Some(status) = rules::cat_verdict(
            cat,
            self.store.arming_status(),
            all_inactive,
            self.store.alarm_status(),
        ) {
            self.set_alarm_status(status);
        }

        self.listeners.for_each(|l| l.on_cat_detected(cat));
    }

    // ── Registration ──────────────────────────────────────────

    /// Register a listener.  Adding the same `Arc` twice is a no-op.
    pub fn add_listener(&self, listener: SharedListener) {
        self.listeners.add(listener);
    }

    /// Unregister a listener.  It receives nothing from later calls.
    pub fn remove_listener(&self, listener: &SharedListener) {
        self.listeners.remove(listener);
    }

    pub fn add_sensor(&self, sensor: Sensor) {
        self.store.add_sensor(sensor);
    }

    pub fn remove_sensor(&self, sensor: &Sensor) {
        self.store.remove_sensor(sensor);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn arming_status(&self) -> ArmingStatus {
        self.store.arming_status()
    }

    pub fn alarm_status(&self) -> AlarmStatus {
        self.store.alarm_status()
    }

    pub fn sensors(&self) -> Vec<Sensor> {
        self.store.sensors()
    }

    /// Result of the most recent evaluated frame (`false` before any).
    pub fn cat_detected(&self) -> bool {
        self.cat_detected.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    // ── Internal ──────────────────────────────────────────────

    /// The single path for alarm-status writes: persist, then notify.
    fn set_alarm_status(&self, status: AlarmStatus) {
        self.store.set_alarm_status(status);
        if status == AlarmStatus::Alarm {
            warn!("{}", AlarmEvent::AlarmStatusChanged(status));
        } else {
            info!("{}", AlarmEvent::AlarmStatusChanged(status));
        }
        self.listeners
            .for_each(|l| l.on_alarm_status_changed(status));
    }

    fn stored_activity(&self, sensor: &Sensor) -> Option<bool> {
        self.store
            .sensors()
            .iter()
            .find(|s| *s == sensor)
            .map(Sensor::is_active)
    }

    fn all_sensors_inactive(&self) -> bool {
        self.store.sensors().iter().all(|s| !s.is_active())
    }
}

impl<S, D> core::fmt::Debug for AlarmCoordinator<S, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AlarmCoordinator")
            .field("listeners", &self.listeners)
            .field("cat_detected", &self.cat_detected.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
