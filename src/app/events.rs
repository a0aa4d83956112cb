//! Outbound alarm events.
//!
//! Log-oriented adapters translate listener callbacks into these so every
//! sink formats events the same way.

use core::fmt;

use crate::alarm::{AlarmStatus, ArmingStatus};

/// Structured events produced by the alarm core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEvent {
    /// The alarm status was written (possibly with an unchanged value).
    AlarmStatusChanged(AlarmStatus),

    /// A frame was evaluated.
    CatDetected(bool),

    /// The arming mode was persisted.
    ArmingChanged(ArmingStatus),
}

impl fmt::Display for AlarmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlarmStatusChanged(status) => write!(f, "ALARM | status={status}"),
            Self::CatDetected(true) => write!(f, "CAMERA | cat detected"),
            Self::CatDetected(false) => write!(f, "CAMERA | no cat"),
            Self::ArmingChanged(mode) => write!(f, "ARMING | mode={mode}"),
        }
    }
}
