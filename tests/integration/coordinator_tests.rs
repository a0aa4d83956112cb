//! Integration tests for the coordinator → store → listener pipeline.
//!
//! Every test drives the public entry points and then inspects the full
//! recorded history of store writes and listener callbacks.

use std::sync::Arc;

use catpoint::app::listeners::SharedListener;
use catpoint::{AlarmCoordinator, AlarmStatus, ArmingStatus, SensorType};

use super::mocks::{RecordingListener, RecordingStore, ScriptedDetector, StoreCall, frame, sensor};

type App = AlarmCoordinator<RecordingStore, ScriptedDetector>;

fn make_app(detector: ScriptedDetector) -> (App, Arc<RecordingListener>) {
    let app = AlarmCoordinator::new(RecordingStore::new(), detector);
    let listener = Arc::new(RecordingListener::new());
    app.add_listener(listener.clone());
    (app, listener)
}

// ── Arming ────────────────────────────────────────────────────

#[test]
fn disarm_clears_alarm_from_every_state() {
    for start in AlarmStatus::ALL {
        let (app, listener) = make_app(ScriptedDetector::always(false));
        app.store().seed(
            ArmingStatus::ArmedAway,
            start,
            &[sensor("Front Door", SensorType::Door, true)],
        );

        app.set_arming_mode(ArmingStatus::Disarmed);

        assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm, "from {start:?}");
        assert_eq!(listener.alarms(), vec![AlarmStatus::NoAlarm]);
        assert_eq!(
            app.store().calls(),
            vec![
                StoreCall::SetAlarm(AlarmStatus::NoAlarm),
                StoreCall::SetArming(ArmingStatus::Disarmed),
            ],
            "disarm must not touch sensors and must persist the mode last"
        );
    }
}

#[test]
fn arming_from_disarmed_persists_only_changed_sensors() {
    let (app, _listener) = make_app(ScriptedDetector::always(false));
    app.store().seed(
        ArmingStatus::Disarmed,
        AlarmStatus::NoAlarm,
        &[
            sensor("Front Door", SensorType::Door, true),
            sensor("Living Window", SensorType::Window, false),
        ],
    );

    app.set_arming_mode(ArmingStatus::ArmedAway);

    assert_eq!(app.store().updates(), vec![("Front Door".to_owned(), false)]);
    assert!(app.sensors().iter().all(|s| !s.is_active()));
    assert_eq!(
        app.store().calls().last(),
        Some(&StoreCall::SetArming(ArmingStatus::ArmedAway))
    );
}

#[test]
fn rearming_persists_every_sensor() {
    let (app, _listener) = make_app(ScriptedDetector::always(false));
    app.store().seed(
        ArmingStatus::ArmedHome,
        AlarmStatus::NoAlarm,
        &[
            sensor("Front Door", SensorType::Door, false),
            sensor("Living Window", SensorType::Window, false),
        ],
    );

    app.set_arming_mode(ArmingStatus::ArmedAway);

    assert_eq!(
        app.store().updates(),
        vec![
            ("Front Door".to_owned(), false),
            ("Living Window".to_owned(), false),
        ]
    );
}

#[test]
fn arming_home_with_cat_in_view_alarms_immediately() {
    let (app, listener) = make_app(ScriptedDetector::always(true));
    app.store().seed(
        ArmingStatus::Disarmed,
        AlarmStatus::NoAlarm,
        &[sensor("Front Door", SensorType::Door, false)],
    );
    app.evaluate_image(Some(&frame()));
    app.store().clear_calls();

    app.set_arming_mode(ArmingStatus::ArmedHome);

    assert_eq!(app.alarm_status(), AlarmStatus::Alarm);
    assert_eq!(listener.alarms(), vec![AlarmStatus::Alarm]);
    assert_eq!(
        app.store().calls(),
        vec![
            StoreCall::SetAlarm(AlarmStatus::Alarm),
            StoreCall::SetArming(ArmingStatus::ArmedHome),
        ]
    );
}

#[test]
fn arming_away_ignores_cat_flag() {
    let (app, listener) = make_app(ScriptedDetector::always(true));
    app.evaluate_image(Some(&frame()));

    app.set_arming_mode(ArmingStatus::ArmedAway);

    assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm);
    assert!(listener.alarms().is_empty());
}

#[test]
fn cat_flag_follows_latest_frame() {
    let (app, _listener) = make_app(ScriptedDetector::scripted(&[true, false], false));
    app.evaluate_image(Some(&frame()));
    assert!(app.cat_detected());
    app.evaluate_image(Some(&frame()));
    assert!(!app.cat_detected());

    app.set_arming_mode(ArmingStatus::ArmedHome);

    assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm);
}

// ── Sensors ───────────────────────────────────────────────────

#[test]
fn first_activation_while_armed_goes_pending() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    let mut front = sensor("front-door", SensorType::Door, false);
    app.store()
        .seed(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, &[front.clone()]);

    app.set_sensor_active(&mut front, true);

    assert!(front.is_active());
    assert!(app.store().sensor("front-door").unwrap().is_active());
    assert_eq!(app.alarm_status(), AlarmStatus::PendingAlarm);
    assert_eq!(listener.alarms(), vec![AlarmStatus::PendingAlarm]);
}

#[test]
fn stale_handle_after_arming_goes_pending() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    let mut front = sensor("front-door", SensorType::Door, false);
    app.add_sensor(front.clone());

    app.set_sensor_active(&mut front, true);
    app.set_arming_mode(ArmingStatus::ArmedAway);
    assert!(front.is_active(), "handle is not refreshed by arming");
    assert!(!app.store().sensor("front-door").unwrap().is_active());

    app.set_sensor_active(&mut front, true);

    assert_eq!(app.alarm_status(), AlarmStatus::PendingAlarm);
    assert_eq!(listener.alarms(), vec![AlarmStatus::PendingAlarm]);
    assert!(app.store().sensor("front-door").unwrap().is_active());
}

#[test]
fn unknown_sensor_falls_back_to_handle_state() {
    let (app, _listener) = make_app(ScriptedDetector::always(false));
    app.store()
        .seed(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, &[]);
    let mut porch = sensor("porch", SensorType::Motion, true);

    app.set_sensor_active(&mut porch, true);

    assert_eq!(app.alarm_status(), AlarmStatus::Alarm);
    assert!(app.store().sensor("porch").unwrap().is_active());
}

#[test]
fn reactivating_active_sensor_while_pending_alarms() {
    let (app, _listener) = make_app(ScriptedDetector::always(false));
    let mut back = sensor("Back Door", SensorType::Door, true);
    app.store().seed(
        ArmingStatus::ArmedHome,
        AlarmStatus::PendingAlarm,
        &[sensor("Front Door", SensorType::Door, true), back.clone()],
    );

    app.set_sensor_active(&mut back, true);

    assert_eq!(app.alarm_status(), AlarmStatus::Alarm);
}

#[test]
fn any_activation_while_pending_alarms() {
    for arming in [ArmingStatus::ArmedHome, ArmingStatus::ArmedAway] {
        let (app, listener) = make_app(ScriptedDetector::always(false));
        let mut hall = sensor("Hallway", SensorType::Motion, false);
        app.store()
            .seed(arming, AlarmStatus::PendingAlarm, &[hall.clone()]);

        app.set_sensor_active(&mut hall, true);

        assert_eq!(app.alarm_status(), AlarmStatus::Alarm, "{arming:?}");
        assert_eq!(listener.alarms(), vec![AlarmStatus::Alarm]);
    }
}

#[test]
fn reactivation_while_armed_and_clear_alarms() {
    let (app, _listener) = make_app(ScriptedDetector::always(false));
    let mut hall = sensor("Hallway", SensorType::Motion, true);
    app.store()
        .seed(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, &[hall.clone()]);

    app.set_sensor_active(&mut hall, true);

    assert_eq!(app.alarm_status(), AlarmStatus::Alarm);
}

#[test]
fn sensors_are_inert_while_disarmed() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    let mut front = sensor("Front Door", SensorType::Door, false);
    app.store()
        .seed(ArmingStatus::Disarmed, AlarmStatus::NoAlarm, &[front.clone()]);

    app.set_sensor_active(&mut front, true);
    app.set_sensor_active(&mut front, true);

    assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm);
    assert!(listener.alarms().is_empty());
    assert_eq!(app.store().updates().len(), 2);
}

#[test]
fn latched_alarm_makes_sensor_reports_a_pure_noop() {
    for (was, now) in [(false, true), (true, true), (true, false), (false, false)] {
        let (app, listener) = make_app(ScriptedDetector::always(false));
        let mut garage = sensor("Garage", SensorType::Motion, was);
        app.store()
            .seed(ArmingStatus::ArmedAway, AlarmStatus::Alarm, &[garage.clone()]);

        app.set_sensor_active(&mut garage, now);

        assert_eq!(garage.is_active(), was, "caller's sensor must be untouched");
        assert_eq!(app.store().sensor("Garage").unwrap().is_active(), was);
        assert_eq!(app.alarm_status(), AlarmStatus::Alarm);
        assert!(app.store().calls().is_empty(), "no persistence while latched");
        assert!(listener.alarms().is_empty());
    }
}

#[test]
fn last_sensor_going_idle_clears_pending() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    let mut front = sensor("Front Door", SensorType::Door, true);
    app.store().seed(
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
        &[front.clone(), sensor("Back Door", SensorType::Door, false)],
    );

    app.set_sensor_active(&mut front, false);

    assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm);
    assert_eq!(listener.alarms(), vec![AlarmStatus::NoAlarm]);
}

#[test]
fn one_of_several_going_idle_keeps_pending() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    let mut front = sensor("Front Door", SensorType::Door, true);
    app.store().seed(
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
        &[front.clone(), sensor("Hallway", SensorType::Motion, true)],
    );

    app.set_sensor_active(&mut front, false);

    assert_eq!(app.alarm_status(), AlarmStatus::PendingAlarm);
    assert!(listener.alarms().is_empty());
    assert!(app.store().alarm_writes().is_empty());
}

#[test]
fn idle_report_from_idle_sensor_only_touches_store() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    let mut front = sensor("Front Door", SensorType::Door, false);
    app.store()
        .seed(ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm, &[front.clone()]);

    app.set_sensor_active(&mut front, false);

    assert_eq!(app.alarm_status(), AlarmStatus::PendingAlarm);
    assert!(listener.alarms().is_empty());
    assert_eq!(
        app.store().calls(),
        vec![StoreCall::Update {
            name: "Front Door".into(),
            active: false
        }]
    );
}

#[test]
fn reconcile_is_idempotent() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    app.store().seed(
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
        &[sensor("Front Door", SensorType::Door, false)],
    );

    app.reconcile_if_all_inactive();
    app.reconcile_if_all_inactive();

    assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm);
    assert_eq!(listener.alarms(), vec![AlarmStatus::NoAlarm, AlarmStatus::NoAlarm]);
}

#[test]
fn reconcile_leaves_status_while_a_sensor_is_active() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    app.store().seed(
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
        &[sensor("Front Door", SensorType::Door, true)],
    );

    app.reconcile_if_all_inactive();

    assert_eq!(app.alarm_status(), AlarmStatus::PendingAlarm);
    assert!(listener.alarms().is_empty());
}

// ── Camera ────────────────────────────────────────────────────

#[test]
fn cat_while_armed_home_alarms() {
    for start in [AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm] {
        let (app, listener) = make_app(ScriptedDetector::always(true));
        app.store().seed(ArmingStatus::ArmedHome, start, &[]);

        app.evaluate_image(Some(&frame()));

        assert_eq!(app.alarm_status(), AlarmStatus::Alarm);
        assert_eq!(listener.alarms(), vec![AlarmStatus::Alarm]);
        assert_eq!(listener.cats(), vec![true]);
    }
}

#[test]
fn no_cat_with_idle_sensors_clears_alarm() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    app.store().seed(
        ArmingStatus::ArmedHome,
        AlarmStatus::PendingAlarm,
        &[sensor("Front Door", SensorType::Door, false)],
    );

    app.evaluate_image(Some(&frame()));

    assert_eq!(app.alarm_status(), AlarmStatus::NoAlarm);
    assert_eq!(listener.alarms(), vec![AlarmStatus::NoAlarm]);
    assert_eq!(listener.cats(), vec![false]);
}

#[test]
fn no_cat_never_clears_latched_alarm() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    app.store().seed(ArmingStatus::ArmedHome, AlarmStatus::Alarm, &[]);

    app.evaluate_image(Some(&frame()));

    assert_eq!(app.alarm_status(), AlarmStatus::Alarm);
    assert!(listener.alarms().is_empty());
    assert_eq!(listener.cats(), vec![false]);
}

#[test]
fn no_cat_with_active_sensor_leaves_status() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    app.store().seed(
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
        &[sensor("Hallway", SensorType::Motion, true)],
    );

    app.evaluate_image(Some(&frame()));

    assert_eq!(app.alarm_status(), AlarmStatus::PendingAlarm);
    assert!(listener.alarms().is_empty());
}

#[test]
fn every_frame_notifies_every_listener_once() {
    let (app, first) = make_app(ScriptedDetector::scripted(&[true, true, false], false));
    let second = Arc::new(RecordingListener::new());
    app.add_listener(second.clone());

    for _ in 0..3 {
        app.evaluate_image(Some(&frame()));
    }

    assert_eq!(first.cats(), vec![true, true, false]);
    assert_eq!(second.cats(), vec![true, true, false]);
}

#[test]
fn absent_frame_has_no_side_effects() {
    let (app, listener) = make_app(ScriptedDetector::always(true));
    app.store()
        .seed(ArmingStatus::ArmedHome, AlarmStatus::NoAlarm, &[]);

    app.evaluate_image(None);

    assert_eq!(app.detector().call_count(), 0);
    assert!(!app.cat_detected());
    assert!(listener.cats().is_empty());
    assert!(app.store().calls().is_empty());
}

#[test]
fn detector_always_asked_at_fifty_percent() {
    let (app, _listener) = make_app(ScriptedDetector::always(false));
    app.evaluate_image(Some(&frame()));
    app.evaluate_image(Some(&frame()));
    assert_eq!(*app.detector().thresholds.lock().unwrap(), vec![50.0, 50.0]);
}

// ── Registration ──────────────────────────────────────────────

#[test]
fn duplicate_listener_notified_once() {
    let (app, listener) = make_app(ScriptedDetector::always(false));
    app.add_listener(listener.clone());
    assert_eq!(app.listener_count(), 1);

    app.set_arming_mode(ArmingStatus::Disarmed);

    assert_eq!(listener.alarms().len(), 1);
}

#[test]
fn removed_listener_receives_nothing() {
    let (app, listener) = make_app(ScriptedDetector::always(true));
    let handle: SharedListener = listener.clone();
    app.remove_listener(&handle);
    app.remove_listener(&handle);

    app.set_arming_mode(ArmingStatus::ArmedHome);
    app.evaluate_image(Some(&frame()));
    app.set_arming_mode(ArmingStatus::Disarmed);

    assert!(listener.alarms().is_empty());
    assert!(listener.cats().is_empty());
}

#[test]
fn sensor_registration_delegates_to_store() {
    let (app, _listener) = make_app(ScriptedDetector::always(false));
    let window = sensor("Living Window", SensorType::Window, false);

    app.add_sensor(window.clone());
    assert_eq!(app.sensors().len(), 1);
    app.remove_sensor(&window);
    assert!(app.sensors().is_empty());

    assert_eq!(
        app.store().calls(),
        vec![
            StoreCall::Add("Living Window".into()),
            StoreCall::Remove("Living Window".into()),
        ]
    );
}
