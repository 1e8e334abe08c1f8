use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::CalendarEvent;

/// Events bucketed by calendar date. Rebuilt from the store whenever it is
/// needed; buckets keep the store's arrival order.
#[derive(Debug, Default)]
pub struct EventIndex<'a> {
    by_date: HashMap<NaiveDate, Vec<&'a CalendarEvent>>,
}

impl<'a> EventIndex<'a> {
    pub fn build<I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a CalendarEvent>,
    {
        let mut by_date: HashMap<NaiveDate, Vec<&'a CalendarEvent>> = HashMap::new();
        for event in events {
            by_date.entry(event.event_date).or_default().push(event);
        }

        Self { by_date }
    }

    pub fn on(&self, date: NaiveDate) -> &[&'a CalendarEvent] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}
