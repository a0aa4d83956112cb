//! Transition rules.
//!
//! Every function here is a total, side-effect-free function of the
//! current state and one input.  The coordinator reads state from the
//! store, asks these functions what to do, and performs the writes and
//! notifications itself.

use super::{AlarmStatus, ArmingStatus};

/// Confidence (0–100) a detector must reach before a frame counts as a cat.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

// ---------------------------------------------------------------------------
// Arming
// ---------------------------------------------------------------------------

/// Whether a sensor being force-deactivated by an arm request must be
/// written back to the store.
///
/// Arming from `Disarmed` only rewrites sensors that actually changed;
/// re-arming while already armed rewrites every sensor.
pub fn persist_on_arm(was_active: bool, store_arming: ArmingStatus) -> bool {
    was_active || store_arming.is_armed()
}

/// Alarm status forced by an arm request, if any.
pub fn arming_verdict(mode: ArmingStatus, cat_detected: bool) -> Option<AlarmStatus> {
    match mode {
        ArmingStatus::Disarmed => Some(AlarmStatus::NoAlarm),
        ArmingStatus::ArmedHome if cat_detected => Some(AlarmStatus::Alarm),
        ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => None,
    }
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// What a sensor activation change asks of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorVerdict {
    /// Leave the alarm status alone.
    Hold,
    /// Move the alarm status to the given value.
    Escalate(AlarmStatus),
    /// A sensor went idle while pending: clear the alarm if nothing else
    /// is still active.
    ReconcileIfIdle,
}

/// Sensor updates are ignored entirely while the alarm is latched.
pub fn accepts_sensor_updates(alarm: AlarmStatus) -> bool {
    alarm != AlarmStatus::Alarm
}

/// Decide the alarm transition for one sensor report.
pub fn sensor_verdict(
    was_active: bool,
    active: bool,
    arming: ArmingStatus,
    alarm: AlarmStatus,
) -> SensorVerdict {
    match (was_active, active) {
        (_, true) if !arming.is_armed() => SensorVerdict::Hold,
        // A repeat report from an already-active sensor is an aggravating
        // event, not a duplicate.
        (true, true) => SensorVerdict::Escalate(AlarmStatus::Alarm),
        (false, true) if alarm == AlarmStatus::PendingAlarm => {
            SensorVerdict::Escalate(AlarmStatus::Alarm)
        }
        (false, true) => SensorVerdict::Escalate(AlarmStatus::PendingAlarm),
        (true, false) if alarm == AlarmStatus::PendingAlarm => SensorVerdict::ReconcileIfIdle,
        (true, false) | (false, false) => SensorVerdict::Hold,
    }
}

// ---------------------------------------------------------------------------
// Cat detection
// ---------------------------------------------------------------------------

/// Alarm status forced by a cat-evaluation result, if any.
///
/// `all_inactive` is only consulted when no cat was seen.
pub fn cat_verdict(
    cat_detected: bool,
    arming: ArmingStatus,
    all_inactive: bool,
    alarm: AlarmStatus,
) -> Option<AlarmStatus> {
    if cat_detected {
        (arming == ArmingStatus::ArmedHome).then_some(AlarmStatus::Alarm)
    } else if all_inactive && alarm != AlarmStatus::Alarm {
        Some(AlarmStatus::NoAlarm)
    } else {
        None
    }
}
