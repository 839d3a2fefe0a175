#![allow(clippy::float_cmp)]

use super::*;
use uuid::Uuid;

// --- Gesture ---

#[test]
fn default_gesture_is_idle() {
    assert_eq!(Gesture::default(), Gesture::Idle);
}

#[test]
fn gesture_variants_are_mutually_exclusive_by_construction() {
    // One enum value is one mode; the compiler enforces exclusivity.
    let g = Gesture::Panning { last_screen: Point::new(1.0, 2.0) };
    assert!(matches!(g, Gesture::Panning { .. }));
    assert!(!matches!(g, Gesture::Idle));
}

#[test]
fn dragging_carries_grab_offset() {
    let id = Uuid::new_v4();
    let g = Gesture::DraggingNode {
        id,
        grab_offset_world: Point::new(12.0, 34.0),
    };
    match g {
        Gesture::DraggingNode { id: got, grab_offset_world } => {
            assert_eq!(got, id);
            assert_eq!(grab_offset_world, Point::new(12.0, 34.0));
        }
        _ => panic!("wrong variant"),
    }
}

#[test]
fn resizing_carries_start_rect() {
    let g = Gesture::ResizingNode {
        id: Uuid::new_v4(),
        corner: Corner::Se,
        start_screen: Point::new(0.0, 0.0),
        orig_x: 10.0,
        orig_y: 20.0,
        orig_w: 300.0,
        orig_h: 200.0,
    };
    match g {
        Gesture::ResizingNode { corner, orig_w, orig_h, .. } => {
            assert_eq!(corner, Corner::Se);
            assert_eq!(orig_w, 300.0);
            assert_eq!(orig_h, 200.0);
        }
        _ => panic!("wrong variant"),
    }
}

// --- UiState ---

#[test]
fn ui_state_default_has_no_selection_or_preview() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(ui.preview.is_none());
}

// --- Key ---

#[test]
fn key_equality_by_name() {
    assert_eq!(Key("Delete".to_owned()), Key("Delete".to_owned()));
    assert_ne!(Key("Delete".to_owned()), Key("Escape".to_owned()));
}
