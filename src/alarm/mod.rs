//! Alarm domain vocabulary.
//!
//! ```text
//!                 first sensor active (armed)
//!   NO_ALARM ───────────────────────────────▶ PENDING_ALARM
//!      ▲   ▲                                      │    │
//!      │   └──── last active sensor goes idle ────┘    │ second / repeated
//!      │                                               │ activation (armed)
//!      │   disarm (from any state)                     ▼
//!      └──────────────────────────────────────────  ALARM  ◀── cat while ARMED_HOME
//! ```
//!
//! [`ArmingStatus`] and [`AlarmStatus`] are `#[repr(u8)]` so a store can
//! hold them in a single atomic.  The transition rules themselves live in
//! [`rules`] as pure functions; the coordinator in
//! [`app::service`](crate::app::service) applies them against a store.

pub mod rules;
pub mod sensor;

pub use sensor::{Sensor, SensorType};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Arming
// ---------------------------------------------------------------------------

/// Whether sensor activity is allowed to raise the alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ArmingStatus {
    #[default]
    Disarmed = 0,
    ArmedHome = 1,
    ArmedAway = 2,
}

impl ArmingStatus {
    pub const ALL: [Self; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    /// Convert a raw discriminant back to `ArmingStatus`.
    ///
    /// Unknown values map to `Disarmed`, the state in which sensors are inert.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::ArmedHome,
            2 => Self::ArmedAway,
            _ => Self::Disarmed,
        }
    }

    pub fn is_armed(self) -> bool {
        self != Self::Disarmed
    }
}

// ---------------------------------------------------------------------------
// Alarm
// ---------------------------------------------------------------------------

/// Escalation level of the alarm.  `Alarm` is latched until a disarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AlarmStatus {
    #[default]
    NoAlarm = 0,
    PendingAlarm = 1,
    Alarm = 2,
}

impl AlarmStatus {
    pub const ALL: [Self; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];

    /// Convert a raw discriminant back to `AlarmStatus`.
    ///
    /// Unknown values map to `Alarm`: a corrupted status must never read as
    /// "all clear".
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::NoAlarm,
            1 => Self::PendingAlarm,
            _ => Self::Alarm,
        }
    }
}

impl core::fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Disarmed => "DISARMED",
            Self::ArmedHome => "ARMED_HOME",
            Self::ArmedAway => "ARMED_AWAY",
        })
    }
}

impl core::fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::NoAlarm => "NO_ALARM",
            Self::PendingAlarm => "PENDING_ALARM",
            Self::Alarm => "ALARM",
        })
    }
}
