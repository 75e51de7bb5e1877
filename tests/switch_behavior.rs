// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end behavior of the switch entity through its public API.

use std::sync::Arc;

use parking_lot::Mutex;
use switch_entity::persistence::{JsonFileStore, MemoryStore, PreferenceStore};
use switch_entity::switch::from_fn;
use switch_entity::types::RestoreMode;
use switch_entity::{EntityInfo, StatePublisher, Switch, SwitchConfig, SwitchDriver};

/// Driver that records commands and leaves reporting to the test.
#[derive(Default)]
struct LatchedDriver {
    commands: Mutex<Vec<bool>>,
    pending: Mutex<Option<StatePublisher>>,
}

impl LatchedDriver {
    fn commands(&self) -> Vec<bool> {
        self.commands.lock().clone()
    }

    /// Reports the last commanded state, as hardware would once settled.
    fn settle(&self) {
        let last = self.commands.lock().last().copied();
        if let (Some(state), Some(publisher)) = (last, self.pending.lock().as_ref()) {
            publisher.publish_state(state);
        }
    }
}

impl SwitchDriver for LatchedDriver {
    fn write_state(&self, state: bool, publisher: &StatePublisher) {
        self.commands.lock().push(state);
        *self.pending.lock() = Some(publisher.clone());
    }
}

fn record_observer<D>(switch: &Switch<D>) -> Arc<Mutex<Vec<bool>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    switch.add_observer(move |state| seen_clone.lock().push(state));
    seen
}

// ============================================================================
// Restore
// ============================================================================

mod restore {
    use super::*;

    #[test]
    fn default_on_without_saved_state_then_report_off() {
        let store = Arc::new(MemoryStore::new());
        let switch = Switch::builder("Hall Light")
            .with_restore_mode(RestoreMode::RestoreDefaultOn)
            .with_store(Arc::clone(&store))
            .build(LatchedDriver::default())
            .unwrap();
        let seen = record_observer(&switch);

        assert!(switch.restore_initial_state());
        assert!(switch.state());

        switch.publish_state(false);

        assert!(!switch.state());
        assert_eq!(store.get(switch.key()), Some(false));
        assert_eq!(*seen.lock(), vec![false]);
    }

    #[test]
    fn inverted_default_off_negates_saved_on() {
        let key = EntityInfo::new("Hall Light").unwrap().key();
        let store = MemoryStore::new().with_value(key, true);
        let switch = Switch::builder("Hall Light")
            .with_restore_mode(RestoreMode::RestoreInvertedDefaultOff)
            .with_store(store)
            .build(LatchedDriver::default())
            .unwrap();

        assert!(!switch.restore_initial_state());
    }

    #[test]
    fn always_on_ignores_storage_entirely() {
        let key = EntityInfo::new("Siren").unwrap().key();
        let store = Arc::new(MemoryStore::new().with_value(key, false));
        let switch = Switch::builder("Siren")
            .with_restore_mode(RestoreMode::AlwaysOn)
            .with_store(Arc::clone(&store))
            .build(LatchedDriver::default())
            .unwrap();

        assert!(switch.restore_initial_state());
        switch.publish_state(false);
        switch.publish_state(true);

        assert_eq!(store.load_count(), 0);
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.get(key), Some(false));
    }

    #[test]
    fn state_survives_reboot_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        {
            let switch = Switch::builder("Water Heater")
                .with_store(JsonFileStore::new(&path))
                .build(from_fn(|state, publisher| publisher.publish_state(state)))
                .unwrap();
            assert!(!switch.setup());
            switch.turn_on();
            assert!(switch.state());
        }

        let rebooted = Switch::builder("Water Heater")
            .with_store(JsonFileStore::new(&path))
            .build(from_fn(|state, publisher| publisher.publish_state(state)))
            .unwrap();
        assert!(rebooted.setup());
        assert!(rebooted.state());
    }

    #[test]
    fn torn_file_is_repaired_by_next_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{\n  \"5c8b").unwrap();

        {
            let switch = Switch::builder("Water Heater")
                .with_store(JsonFileStore::new(&path))
                .build(from_fn(|state, publisher| publisher.publish_state(state)))
                .unwrap();
            assert!(!switch.setup());
            switch.turn_on();
            switch.turn_off();
            switch.turn_on();
            assert!(switch.state());
        }

        let rebooted = Switch::builder("Water Heater")
            .with_store(JsonFileStore::new(&path))
            .build(from_fn(|state, publisher| publisher.publish_state(state)))
            .unwrap();
        assert!(rebooted.restore_initial_state());
    }

    #[test]
    fn renamed_switch_does_not_see_old_state() {
        let store = Arc::new(MemoryStore::new());
        let old = Switch::builder("Old Name")
            .with_store(Arc::clone(&store))
            .build(from_fn(|state, publisher| publisher.publish_state(state)))
            .unwrap();
        old.turn_on();

        let renamed = Switch::builder("New Name")
            .with_store(Arc::clone(&store))
            .build(LatchedDriver::default())
            .unwrap();
        assert!(!renamed.restore_initial_state());
    }
}

// ============================================================================
// Commands and reports
// ============================================================================

mod commands {
    use super::*;

    #[test]
    fn state_changes_only_when_hardware_reports() {
        let switch = Switch::builder("Gate")
            .build(LatchedDriver::default())
            .unwrap();
        let seen = record_observer(&switch);

        switch.turn_on();
        assert!(!switch.state());
        assert!(seen.lock().is_empty());

        switch.driver().settle();
        assert!(switch.state());
        assert_eq!(*seen.lock(), vec![true]);
    }

    #[test]
    fn toggle_then_report_flips_state() {
        for inverted in [false, true] {
            let switch = Switch::builder("Gate")
                .with_inverted(inverted)
                .build(LatchedDriver::default())
                .unwrap();

            for _ in 0..3 {
                let before = switch.state();
                switch.toggle();
                switch.driver().settle();
                assert_eq!(switch.state(), !before, "inverted = {inverted}");
            }
        }
    }

    #[test]
    fn inverted_hardware_reports_map_to_logical_state() {
        let switch = Switch::builder("Active Low Relay")
            .with_inverted(true)
            .build(LatchedDriver::default())
            .unwrap();

        switch.turn_on();
        assert_eq!(switch.driver().commands(), vec![false]);

        switch.driver().settle();
        assert!(switch.state());
    }

    #[test]
    fn duplicate_publish_is_silent() {
        let store = Arc::new(MemoryStore::new());
        let switch = Switch::builder("Gate")
            .with_store(Arc::clone(&store))
            .build(LatchedDriver::default())
            .unwrap();
        let seen = record_observer(&switch);

        switch.publish_state(true);
        switch.publish_state(true);

        assert_eq!(*seen.lock(), vec![true]);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn persistent_modes_save_every_accepted_report() {
        for mode in RestoreMode::ALL {
            let store = Arc::new(MemoryStore::new());
            let switch = Switch::builder("Gate")
                .with_restore_mode(mode)
                .with_store(Arc::clone(&store))
                .build(LatchedDriver::default())
                .unwrap();

            for report in [true, true, false, true, false, false] {
                switch.publish_state(report);
            }

            let expected = if mode.is_persistent() { 4 } else { 0 };
            assert_eq!(store.save_count(), expected, "{mode}");
        }
    }
}

// ============================================================================
// Observers
// ============================================================================

mod observers {
    use super::*;

    #[test]
    fn observers_run_in_registration_order() {
        let switch = Switch::builder("Lamp")
            .build(LatchedDriver::default())
            .unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["A", "B", "C"] {
            let order = Arc::clone(&order);
            switch.add_observer(move |state| order.lock().push((name, state)));
        }

        switch.publish_state(true);
        switch.publish_state(false);

        assert_eq!(
            *order.lock(),
            vec![
                ("A", true),
                ("B", true),
                ("C", true),
                ("A", false),
                ("B", false),
                ("C", false),
            ]
        );
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let switch = Switch::builder("Lamp")
            .build(LatchedDriver::default())
            .unwrap();
        let seen = record_observer(&switch);
        let other = Arc::new(Mutex::new(0));
        let other_clone = Arc::clone(&other);
        let id = switch.add_observer(move |_| *other_clone.lock() += 1);

        assert!(switch.unsubscribe(id));
        switch.publish_state(true);

        assert_eq!(*seen.lock(), vec![true]);
        assert_eq!(*other.lock(), 0);
        assert_eq!(switch.observer_count(), 1);
    }

    #[test]
    fn panicking_observer_leaves_switch_consistent() {
        let store = Arc::new(MemoryStore::new());
        let switch = Switch::builder("Lamp")
            .with_store(Arc::clone(&store))
            .build(LatchedDriver::default())
            .unwrap();
        switch.add_observer(|state| assert!(!state, "observer rejects on"));
        let seen = record_observer(&switch);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            switch.publish_state(true);
        }));
        assert!(result.is_err());

        // State and storage were committed before fan-out; later observers
        // were skipped for that report only.
        assert!(switch.state());
        assert_eq!(store.get(switch.key()), Some(true));
        assert!(seen.lock().is_empty());

        switch.publish_state(false);
        assert!(!switch.state());
        assert_eq!(*seen.lock(), vec![false]);
    }

    #[test]
    fn observer_may_read_switch_state() {
        let switch = Arc::new(
            Switch::builder("Lamp")
                .build(LatchedDriver::default())
                .unwrap(),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let weak = Arc::downgrade(&switch);
        switch.add_observer(move |state| {
            if let Some(switch) = weak.upgrade() {
                seen_clone.lock().push((state, switch.state()));
            }
        });

        switch.publish_state(true);
        assert_eq!(*seen.lock(), vec![(true, true)]);
    }
}

// ============================================================================
// Cross-task reporting
// ============================================================================

mod async_reports {
    use super::*;

    #[tokio::test]
    async fn driver_reports_from_spawned_task() {
        let store = Arc::new(MemoryStore::new());
        let switch = Switch::builder("Motorized Valve")
            .with_store(Arc::clone(&store))
            .build(LatchedDriver::default())
            .unwrap();
        let seen = record_observer(&switch);

        switch.turn_on();
        let publisher = switch
            .driver()
            .pending
            .lock()
            .clone()
            .expect("driver kept a publisher");

        tokio::spawn(async move {
            tokio::task::yield_now().await;
            publisher.publish_state(true);
        })
        .await
        .unwrap();

        assert!(switch.state());
        assert_eq!(*seen.lock(), vec![true]);
        assert_eq!(store.get(switch.key()), Some(true));
    }

    #[tokio::test]
    async fn publisher_outlives_switch() {
        let store = Arc::new(MemoryStore::new());
        let switch = Switch::builder("Motorized Valve")
            .with_store(Arc::clone(&store))
            .build(LatchedDriver::default())
            .unwrap();
        let publisher = switch.publisher();
        let key = switch.key();
        drop(switch);

        tokio::spawn(async move { publisher.publish_state(true) })
            .await
            .unwrap();

        assert_eq!(store.get(key), Some(true));
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod config {
    use super::*;

    #[test]
    fn builds_switches_from_config_document() {
        let configs = SwitchConfig::list_from_json(
            r#"[
                {"name": "Relay 1", "restore_mode": "ALWAYS_ON"},
                {"name": "Relay 2", "inverted": true, "device_class": "outlet"}
            ]"#,
        )
        .unwrap();

        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
        let switches: Vec<_> = configs
            .iter()
            .map(|config| {
                config
                    .builder()
                    .with_store(Arc::clone(&store))
                    .build(from_fn(|state, publisher| publisher.publish_state(state)))
                    .unwrap()
            })
            .collect();

        assert!(switches[0].setup());
        assert!(!switches[1].setup());
        assert!(switches[1].is_inverted());
        assert_eq!(switches[1].device_class(), "outlet");
        assert_ne!(switches[0].key(), switches[1].key());
    }
}
