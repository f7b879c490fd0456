use color_realm_rendering::FrameInput;
use color_realm_rendering_macroquad::{KeyObservations, KeyboardShortcuts};

fn replay(frames: &[KeyObservations]) -> Vec<KeyboardShortcuts> {
    frames
        .iter()
        .copied()
        .map(KeyboardShortcuts::from_observations)
        .collect()
}

#[test]
fn idle_frame_produces_no_input() {
    let shortcuts = KeyboardShortcuts::from_observations(KeyObservations::default());

    assert!(!shortcuts.quit_requested);
    assert_eq!(shortcuts.input, FrameInput::default());
}

#[test]
fn escape_and_q_both_request_quit() {
    let escape = KeyboardShortcuts::from_observations(KeyObservations {
        any_pressed: true,
        escape_pressed: true,
        ..KeyObservations::default()
    });
    let q = KeyboardShortcuts::from_observations(KeyObservations {
        any_pressed: true,
        q_pressed: true,
        ..KeyObservations::default()
    });

    assert!(escape.quit_requested);
    assert!(q.quit_requested);
}

#[test]
fn gameplay_keys_map_onto_frame_input() {
    let shortcuts = KeyboardShortcuts::from_observations(KeyObservations {
        any_pressed: true,
        left_pressed: true,
        space_pressed: true,
        d_pressed: true,
        ..KeyObservations::default()
    });

    assert_eq!(
        shortcuts.input,
        FrameInput {
            any_key: true,
            jump: true,
            left_pressed: true,
            next_color: true,
            ..FrameInput::default()
        }
    );
    assert!(!shortcuts.quit_requested);
}

#[test]
fn hold_and_release_sequence_is_deterministic() {
    let frames = [
        KeyObservations {
            any_pressed: true,
            right_pressed: true,
            ..KeyObservations::default()
        },
        KeyObservations::default(),
        KeyObservations {
            right_released: true,
            ..KeyObservations::default()
        },
        KeyObservations {
            any_pressed: true,
            a_pressed: true,
            r_pressed: true,
            ..KeyObservations::default()
        },
    ];

    let first = replay(&frames);
    let second = replay(&frames);

    assert_eq!(first, second);
    assert!(first[0].input.right_pressed);
    assert_eq!(first[1].input, FrameInput::default());
    assert!(first[2].input.right_released && !first[2].input.any_key);
    assert!(first[3].input.previous_color && first[3].input.restart);
}
