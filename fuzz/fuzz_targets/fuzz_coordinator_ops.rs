//! Fuzz target: arbitrary coordinator operation sequences
//!
//! The first byte seeds the fake detector; every following byte is decoded
//! into one entry-point call.  Verifies:
//! - A disarm always leaves the alarm at NO_ALARM
//! - A sensor report while latched leaves every sensor untouched
//!
//! cargo fuzz run fuzz_coordinator_ops

#![no_main]

use catpoint::{
    AlarmCoordinator, AlarmStatus, ArmingStatus, FakeDetector, Image, InMemoryStore, Sensor,
    SensorType,
};
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 4] = ["Front Door", "Back Door", "Living Window", "Hallway"];
const TYPES: [SensorType; 4] = [
    SensorType::Door,
    SensorType::Door,
    SensorType::Window,
    SensorType::Motion,
];

fuzz_target!(|data: &[u8]| {
    let Some((&seed, ops)) = data.split_first() else {
        return;
    };
    let app = AlarmCoordinator::new(InMemoryStore::new(), FakeDetector::seeded(u64::from(seed)));
    for (name, kind) in NAMES.iter().zip(TYPES) {
        app.add_sensor(Sensor::new(*name, kind).expect("static names are non-empty"));
    }
    let frame = Image::blank(2, 2).expect("non-zero dimensions");

    for &byte in ops {
        match byte % 4 {
            0 => {
                let mode = ArmingStatus::from_u8((byte >> 2) % 3);
                app.set_arming_mode(mode);
                if mode == ArmingStatus::Disarmed {
                    assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm);
                }
            }
            1 => {
                let idx = usize::from(byte >> 2) % NAMES.len();
                let active = byte & 0x80 != 0;
                let before = app.sensors();
                let latched = app.alarm_status() == AlarmStatus::Alarm;
                let Some(mut sensor) = before.iter().find(|s| s.name() == NAMES[idx]).cloned()
                else {
                    continue;
                };
                app.set_sensor_active(&mut sensor, active);
                if latched {
                    let after = app.sensors();
                    assert!(
                        before
                            .iter()
                            .zip(&after)
                            .all(|(a, b)| a.is_active() == b.is_active())
                    );
                }
            }
            2 => app.evaluate_image((byte & 0x80 != 0).then_some(&frame)),
            _ => app.reconcile_if_all_inactive(),
        }
    }
});
