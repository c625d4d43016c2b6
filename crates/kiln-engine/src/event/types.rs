use std::fmt;

use crate::coords::Vec2;
use crate::input::KeyCode;

/// Coarse event grouping used for routing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventCategory {
    Unknown,
    App,
    Keyboard,
    Mouse,
}

impl EventCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventCategory::Unknown => "UNKNOWN",
            EventCategory::App => "APP",
            EventCategory::Keyboard => "KEYBOARD",
            EventCategory::Mouse => "MOUSE",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete event kind. Each type belongs to exactly one category.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventType {
    Unknown,
    Quit,
    KeyDown,
    KeyUp,
    MouseMove,
}

impl EventType {
    pub const fn category(self) -> EventCategory {
        match self {
            EventType::Unknown => EventCategory::Unknown,
            EventType::Quit => EventCategory::App,
            EventType::KeyDown | EventType::KeyUp => EventCategory::Keyboard,
            EventType::MouseMove => EventCategory::Mouse,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::Unknown => "UNKNOWN",
            EventType::Quit => "QUIT",
            EventType::KeyDown => "KEY_DOWN",
            EventType::KeyUp => "KEY_UP",
            EventType::MouseMove => "MOUSE_MOVE",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform event with no engine representation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UnknownEvent;

/// The user or the platform asked the application to stop.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct QuitEvent;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyDownEvent {
    pub key: KeyCode,
    /// Generated by key auto-repeat rather than a physical press.
    pub repeat: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyUpEvent {
    pub key: KeyCode,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseMoveEvent {
    /// Cursor position in window pixels.
    pub position: Vec2,
    /// Movement since the previous move event.
    pub motion: Vec2,
}

/// The payload of an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Unknown(UnknownEvent),
    Quit(QuitEvent),
    KeyDown(KeyDownEvent),
    KeyUp(KeyUpEvent),
    MouseMove(MouseMoveEvent),
}

impl EventPayload {
    pub const fn event_type(&self) -> EventType {
        match self {
            EventPayload::Unknown(_) => EventType::Unknown,
            EventPayload::Quit(_) => EventType::Quit,
            EventPayload::KeyDown(_) => EventType::KeyDown,
            EventPayload::KeyUp(_) => EventType::KeyUp,
            EventPayload::MouseMove(_) => EventType::MouseMove,
        }
    }
}

/// A single occurrence of an event, consumed at most once.
///
/// Events are created by the platform poll, routed through one dispatch chain
/// by `&mut` and dropped afterwards. `handled` only ever goes from `false` to
/// `true`.
#[derive(Debug)]
pub struct Event {
    payload: EventPayload,
    handled: bool,
}

impl Event {
    pub fn new(payload: impl Into<EventPayload>) -> Self {
        Self {
            payload: payload.into(),
            handled: false,
        }
    }

    #[inline]
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    #[inline]
    pub fn event_type(&self) -> EventType {
        self.payload.event_type()
    }

    #[inline]
    pub fn category(&self) -> EventCategory {
        self.event_type().category()
    }

    #[inline]
    pub fn handled(&self) -> bool {
        self.handled
    }

    #[inline]
    pub(super) fn mark_handled(&mut self) {
        self.handled = true;
    }
}

/// A concrete event struct that an [`EventDispatcher`](super::EventDispatcher)
/// can match on.
pub trait EventVariant: Sized {
    const STATIC_TYPE: EventType;

    fn from_payload(payload: &EventPayload) -> Option<&Self>;
}

macro_rules! event_variant {
    ($ty:ident, $variant:ident) => {
        impl EventVariant for $ty {
            const STATIC_TYPE: EventType = EventType::$variant;

            #[inline]
            fn from_payload(payload: &EventPayload) -> Option<&Self> {
                match payload {
                    EventPayload::$variant(e) => Some(e),
                    _ => None,
                }
            }
        }

        impl From<$ty> for EventPayload {
            #[inline]
            fn from(e: $ty) -> Self {
                EventPayload::$variant(e)
            }
        }
    };
}

event_variant!(UnknownEvent, Unknown);
event_variant!(QuitEvent, Quit);
event_variant!(KeyDownEvent, KeyDown);
event_variant!(KeyUpEvent, KeyUp);
event_variant!(MouseMoveEvent, MouseMove);
