use std::collections::HashMap;

use crate::coords::Vec2;
use crate::event::{Event, EventDispatcher, EventSink, KeyDownEvent, KeyUpEvent, MouseMoveEvent};

use super::KeyCode;

/// Keyboard and mouse state built from routed events.
///
/// Call [`new_frame`](Self::new_frame) once per frame before feeding that
/// frame's events. It snapshots the key map (for edge queries) and resets the
/// accumulated mouse motion.
#[derive(Debug, Default)]
pub struct InputController {
    keys: HashMap<KeyCode, bool>,
    previous_keys: HashMap<KeyCode, bool>,
    mouse_pos: Vec2,
    frame_motion: Vec2,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_frame(&mut self) {
        self.frame_motion = Vec2::zero();
        self.previous_keys.clone_from(&self.keys);
    }

    /// Applies a keyboard or mouse event and marks it handled.
    ///
    /// Other event types are left untouched.
    pub fn process_event(&mut self, event: &mut Event) {
        let mut d = EventDispatcher::new(event);

        d.dispatch::<KeyDownEvent, _>(|e| {
            self.keys.insert(e.key, true);
            true
        });
        d.dispatch::<KeyUpEvent, _>(|e| {
            self.keys.insert(e.key, false);
            true
        });
        d.dispatch::<MouseMoveEvent, _>(|e| {
            self.frame_motion += e.motion;
            self.mouse_pos = e.position;
            true
        });
    }

    /// Whether `key` is currently held. Keys never seen are not pressed.
    #[inline]
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        lookup(&self.keys, key)
    }

    /// Pressed now, released at the start of the frame.
    #[inline]
    pub fn key_just_pressed(&self, key: KeyCode) -> bool {
        lookup(&self.keys, key) && !lookup(&self.previous_keys, key)
    }

    /// Released now, pressed at the start of the frame.
    #[inline]
    pub fn key_just_released(&self, key: KeyCode) -> bool {
        !lookup(&self.keys, key) && lookup(&self.previous_keys, key)
    }

    #[inline]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Mouse motion accumulated since the last `new_frame`.
    #[inline]
    pub fn mouse_frame_motion(&self) -> Vec2 {
        self.frame_motion
    }
}

impl EventSink for InputController {
    fn process_event(&mut self, event: &mut Event) {
        InputController::process_event(self, event);
    }
}

#[inline]
fn lookup(map: &HashMap<KeyCode, bool>, key: KeyCode) -> bool {
    map.get(&key).copied().unwrap_or(false)
}
