use super::types::EventType;

/// Coalescing trace log for processed events.
///
/// Consecutive events of the same type are reported as one `trace!` line with
/// a count instead of one line each.
#[derive(Debug, Default)]
pub struct EventTrace {
    current: Option<EventType>,
    count: u64,
}

impl EventTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event_type: EventType) {
        if self.current == Some(event_type) {
            self.count += 1;
            return;
        }
        self.flush();
        self.current = Some(event_type);
        self.count = 1;
    }

    /// Logs the pending run, if any.
    pub fn flush(&mut self) {
        let Some(event_type) = self.current.take() else {
            return;
        };
        log::trace!(
            "Processing {} events of class - {} | type - {}",
            self.count,
            event_type.category(),
            event_type,
        );
        self.count = 0;
    }

    /// The run not yet logged: its type and length.
    pub fn pending(&self) -> Option<(EventType, u64)> {
        self.current.map(|t| (t, self.count))
    }
}
