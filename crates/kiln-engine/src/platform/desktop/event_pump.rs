use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use crate::coords::Vec2;
use crate::event::{
    Event, EventPayload, KeyDownEvent, KeyUpEvent, MouseMoveEvent, QuitEvent, UnknownEvent,
};

use super::keymap::map_key;

/// Latest window size reported by the event loop, consumed by the window.
pub(super) type PendingResize = Rc<Cell<Option<PhysicalSize<u32>>>>;

/// Collects winit window events as engine events between pumps.
#[derive(Debug, Default)]
pub(super) struct EventPump {
    pending: VecDeque<Event>,
    cursor: Option<Vec2>,
    resize: PendingResize,
}

impl EventPump {
    pub(super) fn resize_handle(&self) -> PendingResize {
        Rc::clone(&self.resize)
    }

    pub(super) fn pop(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(super) fn push(&mut self, payload: impl Into<EventPayload>) {
        self.pending.push_back(Event::new(payload));
    }

    fn translate(&mut self, event: WindowEvent) -> EventPayload {
        match event {
            WindowEvent::CloseRequested => QuitEvent.into(),

            WindowEvent::KeyboardInput { event, .. } => {
                key_payload(event.physical_key, event.state, event.repeat)
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                let motion = self.cursor.map_or(Vec2::zero(), |last| position - last);
                self.cursor = Some(position);
                MouseMoveEvent { position, motion }.into()
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                UnknownEvent.into()
            }

            WindowEvent::Resized(size) => {
                self.resize.set(Some(size));
                UnknownEvent.into()
            }

            _ => UnknownEvent.into(),
        }
    }
}

fn key_payload(physical: PhysicalKey, state: ElementState, repeat: bool) -> EventPayload {
    let key = map_key(physical);
    match state {
        ElementState::Pressed => KeyDownEvent { key, repeat }.into(),
        ElementState::Released => KeyUpEvent { key }.into(),
    }
}

impl ApplicationHandler for EventPump {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let payload = self.translate(event);
        self.pending.push_back(Event::new(payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::input::KeyCode;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;
    use winit::keyboard::KeyCode as WinitKey;

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: unsafe { DeviceId::dummy() },
            position: PhysicalPosition::new(x, y),
        }
    }

    #[test]
    fn close_request_becomes_quit() {
        let mut pump = EventPump::default();
        assert_eq!(pump.translate(WindowEvent::CloseRequested).event_type(), EventType::Quit);
    }

    #[test]
    fn cursor_motion_is_relative_to_the_last_position() {
        let mut pump = EventPump::default();

        let first = pump.translate(cursor_moved(10.0, 20.0));
        assert_eq!(
            first,
            EventPayload::MouseMove(MouseMoveEvent {
                position: Vec2::new(10.0, 20.0),
                motion: Vec2::zero(),
            })
        );

        let second = pump.translate(cursor_moved(13.0, 16.0));
        assert_eq!(
            second,
            EventPayload::MouseMove(MouseMoveEvent {
                position: Vec2::new(13.0, 16.0),
                motion: Vec2::new(3.0, -4.0),
            })
        );
    }

    #[test]
    fn resize_is_recorded_for_the_window() {
        let mut pump = EventPump::default();
        let handle = pump.resize_handle();
        let payload = pump.translate(WindowEvent::Resized(PhysicalSize::new(800, 600)));

        assert_eq!(payload.event_type(), EventType::Unknown);
        assert_eq!(handle.take(), Some(PhysicalSize::new(800, 600)));
    }

    #[test]
    fn key_state_selects_event_type() {
        let key = PhysicalKey::Code(WinitKey::Escape);
        assert_eq!(
            key_payload(key, ElementState::Pressed, true),
            EventPayload::KeyDown(KeyDownEvent { key: KeyCode::Escape, repeat: true })
        );
        assert_eq!(
            key_payload(key, ElementState::Released, false),
            EventPayload::KeyUp(KeyUpEvent { key: KeyCode::Escape })
        );
    }

    #[test]
    fn queue_is_fifo() {
        let mut pump = EventPump::default();
        pump.push(QuitEvent);
        pump.push(UnknownEvent);
        assert_eq!(pump.pop().map(|e| e.event_type()), Some(EventType::Quit));
        assert_eq!(pump.pop().map(|e| e.event_type()), Some(EventType::Unknown));
        assert!(pump.is_empty());
    }
}
