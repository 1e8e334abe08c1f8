use sewa::{ApiClient, ApiPromise};

use crate::model::{CalendarEvent, Chapter, EventDraft, EventId, Scope};

/// Everything the calendar needs from the portal backend. Calls never block;
/// results arrive through the returned promises.
pub trait CalendarBackend {
    fn list_events(&self, scope: Scope) -> ApiPromise<Vec<CalendarEvent>>;

    fn create_event(&self, draft: &EventDraft) -> ApiPromise<CalendarEvent>;

    fn update_event(&self, id: EventId, draft: &EventDraft) -> ApiPromise<CalendarEvent>;

    fn delete_event(&self, id: EventId) -> ApiPromise<()>;

    fn list_scopes(&self) -> ApiPromise<Vec<Chapter>>;
}

/// The REST backend.
pub struct HttpCalendarBackend {
    client: ApiClient,
}

impl HttpCalendarBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn events_path(scope: Scope) -> String {
        match scope {
            Scope::All => "/calendar/events".to_owned(),
            Scope::Chapter(id) => format!("/calendar/chapter/{id}"),
        }
    }

    pub fn event_path(id: EventId) -> String {
        format!("/calendar/{}", id.0)
    }
}

impl CalendarBackend for HttpCalendarBackend {
    fn list_events(&self, scope: Scope) -> ApiPromise<Vec<CalendarEvent>> {
        self.client.get(&Self::events_path(scope))
    }

    fn create_event(&self, draft: &EventDraft) -> ApiPromise<CalendarEvent> {
        self.client.post("/calendar", draft)
    }

    fn update_event(&self, id: EventId, draft: &EventDraft) -> ApiPromise<CalendarEvent> {
        self.client.put(&Self::event_path(id), draft)
    }

    fn delete_event(&self, id: EventId) -> ApiPromise<()> {
        self.client.delete(&Self::event_path(id))
    }

    fn list_scopes(&self) -> ApiPromise<Vec<Chapter>> {
        self.client.get_list("/chapters?page=0&size=1000")
    }
}
