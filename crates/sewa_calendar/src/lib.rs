mod app;
mod backend;
mod editor;
mod error;
mod forms;
mod grid;
mod index;
mod model;
mod scope;
mod store;
mod timeline;
mod ui;

pub use app::{CalendarAction, CalendarApp, CalendarConfig, CalendarState, DEFAULT_UPCOMING_LIMIT};
pub use backend::{CalendarBackend, HttpCalendarBackend};
pub use editor::{EditorMode, EventEditController, SubmitOutcome};
pub use error::{CalendarError, DraftErrors, Notice, Notices, MAX_NOTICES};
pub use forms::{DraftChange, EventForm};
pub use grid::{build_grid, days_in_month, weekday_label, DayCell, GridDay, MonthView, YearMonth};
pub use index::EventIndex;
pub use model::{
    parse_calendar_date, CalendarEvent, Chapter, ChapterKind, EventDraft, EventId, EventType,
    Scope, ScopeId, Visibility,
};
pub use scope::ScopeFilter;
pub use store::EventStore;
pub use timeline::Upcoming;
