use chrono::NaiveDate;

use crate::model::CalendarEvent;
use crate::store::EventStore;

/// Sidebar preview of the next few events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upcoming<'a> {
    /// the store has not received its first listing yet
    Loading,
    /// the first listing failed and nothing is loaded
    Failed,
    Ready(Vec<&'a CalendarEvent>),
}

impl<'a> Upcoming<'a> {
    /// Events on or after `today`, sorted by date, at most `limit` of them.
    /// Same-day events keep their store order.
    pub fn build(store: &'a EventStore, today: NaiveDate, limit: usize) -> Self {
        if store.load_failed() {
            return Upcoming::Failed;
        }
        if !store.is_loaded() {
            return Upcoming::Loading;
        }

        let mut events: Vec<&CalendarEvent> = store
            .iter()
            .filter(|event| event.event_date >= today)
            .collect();
        events.sort_by_key(|event| event.event_date);
        events.truncate(limit);

        Upcoming::Ready(events)
    }

    pub fn events(&self) -> &[&'a CalendarEvent] {
        match self {
            Upcoming::Loading | Upcoming::Failed => &[],
            Upcoming::Ready(events) => events,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Upcoming::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventDraft, EventId, EventType, Visibility};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: u32, event_date: NaiveDate) -> CalendarEvent {
        CalendarEvent::new(
            EventId(id),
            EventDraft {
                title: format!("event {id}"),
                description: None,
                event_date,
                event_type: EventType::General,
                scope_id: None,
                visibility: Visibility::Public,
            },
        )
    }

    fn ids(upcoming: &Upcoming) -> Vec<u32> {
        upcoming.events().iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn unloaded_store_is_distinct_from_empty() {
        let store = EventStore::default();
        assert!(Upcoming::build(&store, date(2026, 3, 1), 4).is_loading());

        let mut store = EventStore::default();
        store.mark_failed();
        let failed = Upcoming::build(&store, date(2026, 3, 1), 4);
        assert_eq!(failed, Upcoming::Failed);
        assert!(!failed.is_loading());

        let mut store = EventStore::default();
        store.replace_all(vec![event(1, date(2026, 2, 1))]);
        assert_eq!(
            Upcoming::build(&store, date(2026, 3, 1), 4),
            Upcoming::Ready(vec![])
        );
    }

    #[test]
    fn future_only_sorted_and_truncated() {
        let mut store = EventStore::default();
        store.replace_all(vec![
            event(1, date(2026, 4, 2)),
            event(2, date(2026, 2, 27)),
            event(3, date(2026, 3, 1)),
            event(4, date(2026, 3, 20)),
            event(5, date(2026, 3, 1)),
            event(6, date(2026, 5, 1)),
            event(7, date(2026, 6, 1)),
        ]);

        let upcoming = Upcoming::build(&store, date(2026, 3, 1), 4);
        // today counts as upcoming, ties stay in arrival order
        assert_eq!(ids(&upcoming), vec![3, 5, 4, 1]);

        let dates: Vec<NaiveDate> = upcoming.events().iter().map(|e| e.event_date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn limit_zero_is_empty_but_ready() {
        let mut store = EventStore::default();
        store.replace_all(vec![event(1, date(2026, 4, 2))]);
        assert_eq!(
            Upcoming::build(&store, date(2026, 3, 1), 0),
            Upcoming::Ready(vec![])
        );
    }
}
