//! Fuzz target: `SystemConfig` JSON parsing
//!
//! Feeds arbitrary bytes to the config loader and verifies:
//! - No panics under arbitrary input
//! - Any config that validates seeds a store with exactly its sensors
//!
//! cargo fuzz run fuzz_config

#![no_main]

use catpoint::app::ports::StateStore;
use catpoint::{InMemoryStore, SystemConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = SystemConfig::from_json(text) else {
        return;
    };

    let store = InMemoryStore::from_config(&config).expect("validated config must seed a store");
    assert_eq!(store.sensors().len(), config.sensors.len());
    assert_eq!(store.arming_status(), config.initial_arming);
});
