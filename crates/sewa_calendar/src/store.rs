use crate::model::{CalendarEvent, EventId};

/// The events of the active scope, in the order the backend returned them.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    loaded: bool,
    failed: bool,
}

impl EventStore {
    /// Whether at least one listing has been applied since the last reset.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the last listing failed before anything was loaded.
    pub fn load_failed(&self) -> bool {
        self.failed && !self.loaded
    }

    /// Record a failed listing. Events that were already loaded stay.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// A new listing is on its way.
    pub fn clear_failure(&mut self) {
        self.failed = false;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarEvent> {
        self.events.iter()
    }

    pub fn get(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.get(id).is_some()
    }

    /// Replace everything with a fresh listing.
    pub fn replace_all(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
        self.loaded = true;
        self.failed = false;
    }

    /// Append an event, or replace it in place when the id is already known.
    pub fn add(&mut self, event: CalendarEvent) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    /// Replace the event with the same id, keeping its position. Returns
    /// false when no such event is stored.
    pub fn replace(&mut self, event: CalendarEvent) -> bool {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => {
                *existing = event;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EventId) -> Option<CalendarEvent> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(pos))
    }

    /// Forget everything, including whether anything was loaded.
    pub fn reset(&mut self) {
        self.events.clear();
        self.loaded = false;
        self.failed = false;
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a CalendarEvent;
    type IntoIter = std::slice::Iter<'a, CalendarEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
