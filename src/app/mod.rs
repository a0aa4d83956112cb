//! Application core: alarm rules applied against ports, zero I/O.
//!
//! The [`service::AlarmCoordinator`] owns the transition logic and the
//! listener fan-out.  All interaction with persistence and image
//! classification happens through the **port traits** in [`ports`], keeping
//! this layer fully testable without a real store or vision service.

pub mod events;
pub mod listeners;
pub mod ports;
pub mod service;
