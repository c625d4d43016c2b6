//! Engine events.
//!
//! Events are a closed sum type ([`EventPayload`]) wrapped in an [`Event`]
//! that carries the "handled" flag. Consumers route an event with an
//! [`EventDispatcher`]: each `dispatch::<T>` call fires only when the event is
//! a `T` and nobody has consumed it yet.
//!
//! ```ignore
//! let mut d = EventDispatcher::new(&mut event);
//! d.dispatch::<KeyDownEvent, _>(|e| on_key(e.key));
//! d.dispatch::<QuitEvent, _>(|_| { running = false; true });
//! ```

mod dispatcher;
mod trace;
mod types;

pub use dispatcher::{EventDispatcher, EventSink};
pub use trace::EventTrace;
pub use types::{
    Event, EventCategory, EventPayload, EventType, EventVariant, KeyDownEvent, KeyUpEvent,
    MouseMoveEvent, QuitEvent, UnknownEvent,
};
