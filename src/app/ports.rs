//! Port traits: the hexagonal boundary between the alarm core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmCoordinator (domain)
//! ```
//!
//! Driven adapters (state store, cat detector, status listeners) implement
//! these traits.  The [`AlarmCoordinator`](super::service::AlarmCoordinator)
//! consumes the store and detector via generics and the listeners as trait
//! objects, so the core never touches persistence or a vision service
//! directly.
//!
//! ## Concurrency notes
//!
//! - Every port is `Send + Sync` and takes `&self`.  Entry points run on
//!   whichever thread calls them.
//! - **StateStore** implementations MUST make each field read return a value
//!   written by some prior write (no torn reads).  No cross-field
//!   transactions are required.
//! - **StatusListener** callbacks run on the caller's thread with no
//!   coordinator lock held.

use crate::alarm::{AlarmStatus, ArmingStatus, Sensor};
use crate::error::DetectionError;
use crate::image::Image;

// ───────────────────────────────────────────────────────────────
// State store (driven adapter: domain ↔ persisted status + sensors)
// ───────────────────────────────────────────────────────────────

/// Authoritative arming status, alarm status and sensor roster.
pub trait StateStore: Send + Sync {
    fn arming_status(&self) -> ArmingStatus;

    fn set_arming_status(&self, status: ArmingStatus);

    fn alarm_status(&self) -> AlarmStatus;

    fn set_alarm_status(&self, status: AlarmStatus);

    /// Snapshot of every known sensor.  Mutating the returned values has no
    /// effect until they are passed back through [`update_sensor`].
    ///
    /// [`update_sensor`]: StateStore::update_sensor
    fn sensors(&self) -> Vec<Sensor>;

    fn add_sensor(&self, sensor: Sensor);

    fn remove_sensor(&self, sensor: &Sensor);

    /// Persist the activation state of `sensor` (matched by identity).
    fn update_sensor(&self, sensor: &Sensor);
}

// ───────────────────────────────────────────────────────────────
// Cat detector (driven adapter: domain → classifier)
// ───────────────────────────────────────────────────────────────

/// Answers "does this frame contain a cat at or above this confidence".
///
/// Total by contract: implementations absorb their own failures and
/// report them as `false`.  The call may block for as long as the
/// classifier takes.
pub trait CatDetector: Send + Sync {
    /// `confidence_threshold` is a percentage in `0.0..=100.0`.
    fn contains_cat(&self, image: &Image, confidence_threshold: f32) -> bool;
}

impl<T: CatDetector + ?Sized> CatDetector for Box<T> {
    fn contains_cat(&self, image: &Image, confidence_threshold: f32) -> bool {
        (**self).contains_cat(image, confidence_threshold)
    }
}

impl<T: CatDetector + ?Sized> CatDetector for std::sync::Arc<T> {
    fn contains_cat(&self, image: &Image, confidence_threshold: f32) -> bool {
        (**self).contains_cat(image, confidence_threshold)
    }
}

// ───────────────────────────────────────────────────────────────
// Vision client (driven adapter: detector → label service)
// ───────────────────────────────────────────────────────────────

/// A label returned by a vision service.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    /// Percentage in `0.0..=100.0`.
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Fallible label detection (local model or remote API).
///
/// Wrapped by [`LabelDetector`](crate::adapters::detector::LabelDetector),
/// which turns every error into "no cat".
pub trait VisionClient: Send + Sync {
    fn detect_labels(
        &self,
        image: &Image,
        min_confidence: f32,
    ) -> Result<Vec<Label>, DetectionError>;
}

// ───────────────────────────────────────────────────────────────
// Status listener (domain → UI / telemetry)
// ───────────────────────────────────────────────────────────────

/// Observer notified synchronously from inside coordinator calls.
pub trait StatusListener: Send + Sync {
    /// Fired on every alarm-status write, even when the value is unchanged.
    fn on_alarm_status_changed(&self, status: AlarmStatus);

    /// Fired once per evaluated frame, even when the value is unchanged.
    fn on_cat_detected(&self, detected: bool);
}
