//! CatPoint alarm core.
//!
//! Decides whether the security alarm should sound from three concurrent
//! input sources: the arming control, door/window/motion sensors and a
//! camera feed classified for cats.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────┐
//!  │                  Adapters (outer ring)                   │
//!  │  InMemoryStore   FakeDetector / LabelDetector   LogListener
//!  │  (StateStore)    (CatDetector)                  (StatusListener)
//!  │  ─────────────────── Port Trait Boundary ─────────────── │
//!  │        ┌──────────────────────────────────────┐          │
//!  │        │   AlarmCoordinator (rules · cat flag) │          │
//!  │        └──────────────────────────────────────┘          │
//!  └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod error;
pub mod image;

pub use adapters::detector::{FakeDetector, LabelDetector};
pub use adapters::log_listener::LogListener;
pub use adapters::memory_store::InMemoryStore;
pub use alarm::rules::CAT_CONFIDENCE_THRESHOLD;
pub use alarm::{AlarmStatus, ArmingStatus, Sensor, SensorType};
pub use app::ports::{CatDetector, StateStore, StatusListener, VisionClient};
pub use app::service::AlarmCoordinator;
pub use config::SystemConfig;
pub use error::{Error, Result};
pub use image::Image;

/// Coordinator wired to the bundled in-memory store and fake detector.
pub type DefaultCoordinator = AlarmCoordinator<InMemoryStore, FakeDetector>;

/// Build a [`DefaultCoordinator`] from configuration.
pub fn bootstrap(config: &SystemConfig) -> Result<DefaultCoordinator> {
    let store = InMemoryStore::from_config(config)?;
    let detector = FakeDetector::from_config(&config.detector);
    log::info!("Coordinator ready with {detector:?}");
    Ok(AlarmCoordinator::new(store, detector))
}
