use foundation::Generation;

pub const STYLESHEET_APPLIED: &str = "stylesheet.applied";
pub const LEVEL_LOADED: &str = "level.loaded";
pub const LOAD_STALE: &str = "load.stale";
pub const LOAD_FAILED: &str = "load.failed";

/// Something the viewer did, tagged with the level generation it happened
/// under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub generation: Generation,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, generation: Generation, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            generation,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventLog, LOAD_STALE, STYLESHEET_APPLIED};
    use foundation::Generation;

    #[test]
    fn records_events_with_generation() {
        let mut log = EventLog::new();
        let g = Generation::ZERO.next().next();
        log.emit(g, STYLESHEET_APPLIED, "12 rules");
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].generation.get(), 2);
        assert_eq!(log.count(STYLESHEET_APPLIED), 1);
        assert_eq!(log.count(LOAD_STALE), 0);
    }

    #[test]
    fn drain_clears_events() {
        let mut log = EventLog::new();
        log.emit(Generation::ZERO, "k", "m");
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.events().is_empty());
    }
}
