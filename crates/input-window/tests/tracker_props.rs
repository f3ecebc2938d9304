//! Property tests for held-key tracking.
//!
//! Whatever raw input sequence the platform delivers (repeats, stray
//! releases, interleaved keys), the emitted edges must be well formed.

use std::collections::HashMap;

use input_window::prelude::*;
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Key> {
    // A small key set so sequences revisit keys often.
    prop::sample::select(vec![Key::A, Key::Space, Key::LShift, Key::Escape, Key::F5])
}

fn state_strategy() -> impl Strategy<Value = KeyState> {
    prop_oneof![Just(KeyState::Pressed), Just(KeyState::Released)]
}

fn run(inputs: &[(Key, KeyState)]) -> (KeyTracker, Vec<KeyEvent>) {
    let mut tracker = KeyTracker::new();
    let events = inputs
        .iter()
        .filter_map(|(key, state)| tracker.observe(key.code(), *key, *state))
        .collect();
    (tracker, events)
}

proptest! {
    #[test]
    fn edges_alternate_per_key(
        inputs in prop::collection::vec((key_strategy(), state_strategy()), 0..200)
    ) {
        let (_, events) = run(&inputs);
        let mut last: HashMap<Key, bool> = HashMap::new();
        for event in events {
            let expected_pressed = !last.get(&event.key).copied().unwrap_or(false);
            prop_assert_eq!(event.pressed, expected_pressed, "key {}", event.key);
            last.insert(event.key, event.pressed);
        }
    }

    #[test]
    fn held_set_matches_last_edge(
        inputs in prop::collection::vec((key_strategy(), state_strategy()), 0..200)
    ) {
        let (tracker, events) = run(&inputs);
        let mut last: HashMap<Key, bool> = HashMap::new();
        for event in &events {
            last.insert(event.key, event.pressed);
        }
        for key in Key::ALL {
            let held_by_events = last.get(key).copied().unwrap_or(false);
            prop_assert_eq!(tracker.is_held(*key), held_by_events);
        }
    }

    #[test]
    fn held_matches_last_raw_state(
        inputs in prop::collection::vec((key_strategy(), state_strategy()), 0..200)
    ) {
        let (tracker, _) = run(&inputs);
        let mut raw: HashMap<Key, KeyState> = HashMap::new();
        for (key, state) in &inputs {
            raw.insert(*key, *state);
        }
        for (key, state) in raw {
            prop_assert_eq!(tracker.is_held(key), state.is_pressed());
        }
    }
}

#[test]
fn key_event_serializes_with_key_name() {
    let event = KeyEvent {
        scancode: 57,
        key: Key::Space,
        pressed: true,
    };
    let json = serde_json::to_value(event).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"scancode": 57, "key": "Space", "pressed": true})
    );
    let back: KeyEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn typing_a_word_with_repeats() {
    // "hi" with the h held long enough to auto-repeat twice.
    let inputs = [
        (Key::H, KeyState::Pressed),
        (Key::H, KeyState::Pressed),
        (Key::H, KeyState::Pressed),
        (Key::I, KeyState::Pressed),
        (Key::H, KeyState::Released),
        (Key::I, KeyState::Released),
    ];
    let (tracker, events) = run(&inputs);
    let summary: Vec<(Key, bool)> = events.iter().map(|e| (e.key, e.pressed)).collect();
    assert_eq!(
        summary,
        vec![
            (Key::H, true),
            (Key::I, true),
            (Key::H, false),
            (Key::I, false),
        ]
    );
    assert_eq!(tracker.held_count(), 0);
}
