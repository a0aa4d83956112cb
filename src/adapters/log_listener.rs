//! Log-based status listener.
//!
//! Implements [`StatusListener`] by writing each notification to the `log`
//! facade.  A UI or push-notification adapter would implement the same
//! trait.

use log::{info, warn};

use crate::alarm::AlarmStatus;
use crate::app::events::AlarmEvent;
use crate::app::ports::StatusListener;

/// Listener that logs every notification, tagged with a source name.
#[derive(Debug, Clone)]
pub struct LogListener {
    tag: String,
}

impl LogListener {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for LogListener {
    fn default() -> Self {
        Self::new("catpoint")
    }
}

impl StatusListener for LogListener {
    fn on_alarm_status_changed(&self, status: AlarmStatus) {
        let event = AlarmEvent::AlarmStatusChanged(status);
        if status == AlarmStatus::Alarm {
            warn!("[{}] {event}", self.tag);
        } else {
            info!("[{}] {event}", self.tag);
        }
    }

    fn on_cat_detected(&self, detected: bool) {
        info!("[{}] {}", self.tag, AlarmEvent::CatDetected(detected));
    }
}
