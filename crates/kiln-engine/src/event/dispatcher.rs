use super::types::{Event, EventVariant};

/// Routes one event to typed handlers.
///
/// At most one `dispatch` call in a chain can consume the event; once a
/// handler returns `true` later calls are skipped.
pub struct EventDispatcher<'e> {
    event: &'e mut Event,
}

impl<'e> EventDispatcher<'e> {
    #[inline]
    pub fn new(event: &'e mut Event) -> Self {
        Self { event }
    }

    /// Invokes `handler` if the event is a `T` and has not been handled.
    ///
    /// Returns whether the handler ran. A handler returning `true` marks the
    /// event handled.
    pub fn dispatch<T, F>(&mut self, handler: F) -> bool
    where
        T: EventVariant,
        F: FnOnce(&T) -> bool,
    {
        if self.event.handled() || self.event.event_type() != T::STATIC_TYPE {
            return false;
        }

        let Some(payload) = T::from_payload(self.event.payload()) else {
            return false;
        };

        if handler(payload) {
            self.event.mark_handled();
        }
        true
    }

    #[inline]
    pub fn event(&self) -> &Event {
        self.event
    }
}

/// Something that consumes events delivered by a platform.
pub trait EventSink {
    fn process_event(&mut self, event: &mut Event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyDownEvent, KeyUpEvent, QuitEvent};
    use crate::input::KeyCode;

    fn key_down(key: KeyCode) -> Event {
        Event::new(KeyDownEvent { key, repeat: false })
    }

    // ── type matching ─────────────────────────────────────────────────────

    #[test]
    fn mismatched_type_is_skipped() {
        let mut event = Event::new(QuitEvent);
        let mut called = false;
        let mut d = EventDispatcher::new(&mut event);

        let dispatched = d.dispatch::<KeyDownEvent, _>(|_| {
            called = true;
            true
        });

        assert!(!dispatched);
        assert!(!called);
        assert!(!event.handled());
    }

    #[test]
    fn handler_receives_payload() {
        let mut event = key_down(KeyCode::Q);
        let mut seen = None;
        EventDispatcher::new(&mut event).dispatch::<KeyDownEvent, _>(|e| {
            seen = Some(e.key);
            false
        });
        assert_eq!(seen, Some(KeyCode::Q));
    }

    // ── handled flag ──────────────────────────────────────────────────────

    #[test]
    fn true_handler_marks_handled_and_stops_the_chain() {
        let mut event = key_down(KeyCode::A);
        let mut second = false;
        let mut d = EventDispatcher::new(&mut event);

        assert!(d.dispatch::<KeyDownEvent, _>(|_| true));
        assert!(d.event().handled());

        let dispatched = d.dispatch::<KeyDownEvent, _>(|_| {
            second = true;
            true
        });
        assert!(!dispatched);
        assert!(!second);
    }

    #[test]
    fn false_handler_still_counts_as_dispatched() {
        let mut event = key_down(KeyCode::A);
        let mut d = EventDispatcher::new(&mut event);

        assert!(d.dispatch::<KeyDownEvent, _>(|_| false));
        assert!(!d.event().handled());
        // Unhandled, so a later matching handler still runs.
        assert!(d.dispatch::<KeyDownEvent, _>(|_| true));
        assert!(event.handled());
    }

    #[test]
    fn chain_fires_only_matching_branch() {
        let mut event = Event::new(KeyUpEvent { key: KeyCode::Space });
        let mut hits = Vec::new();
        let mut d = EventDispatcher::new(&mut event);

        d.dispatch::<KeyDownEvent, _>(|_| {
            hits.push("down");
            true
        });
        d.dispatch::<KeyUpEvent, _>(|_| {
            hits.push("up");
            true
        });
        d.dispatch::<QuitEvent, _>(|_| {
            hits.push("quit");
            true
        });

        assert_eq!(hits, ["up"]);
    }
}
