use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use sewa::ApiPromise;

use crate::backend::CalendarBackend;
use crate::editor::{EditorMode, EventEditController, SubmitOutcome};
use crate::error::{CalendarError, Notice, Notices};
use crate::forms::DraftChange;
use crate::grid::{MonthView, YearMonth};
use crate::index::EventIndex;
use crate::model::{CalendarEvent, EventId, Scope};
use crate::scope::ScopeFilter;
use crate::store::EventStore;
use crate::timeline::Upcoming;

pub use sewa::DEFAULT_UPCOMING_LIMIT;

/// Everything the user can do to the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarAction {
    PrevMonth,
    NextMonth,
    ShowMonth(YearMonth),
    GoToToday,
    SelectDay(NaiveDate),
    ClearSelection,
    SelectScope(Scope),
    Refresh,
    NewEvent,
    NewEventOn(NaiveDate),
    EditEvent(EventId),
    EditDraft(DraftChange),
    Submit,
    Cancel,
    RequestDelete(EventId),
    ConfirmDelete,
    CancelDelete,
    DismissNotice(usize),
    /// the calendar became visible
    Enter,
    /// the user navigated away from the calendar
    Leave,
}

/// UI state of a calendar session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    pub month: YearMonth,
    pub selected: Option<NaiveDate>,
    pub scope: Scope,
    pub editor: EditorMode,
    /// event waiting for the user to confirm its deletion
    pub confirm_delete: Option<EventId>,
}

impl CalendarState {
    pub fn new(today: NaiveDate, scope: Scope) -> Self {
        Self {
            month: YearMonth::from_date(today),
            selected: None,
            scope,
            editor: EditorMode::Closed,
            confirm_delete: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarConfig {
    pub scope: Scope,
    pub upcoming_limit: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            scope: Scope::All,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

struct PendingDelete {
    id: EventId,
    promise: ApiPromise<()>,
}

pub struct CalendarApp {
    backend: Box<dyn CalendarBackend>,
    state: CalendarState,
    store: EventStore,
    scope: ScopeFilter,
    editor: EventEditController,
    deletes: Vec<PendingDelete>,
    notices: Notices,
    upcoming_limit: usize,
    today: NaiveDate,
    active: bool,
}

impl CalendarApp {
    pub fn new(backend: Box<dyn CalendarBackend>, config: CalendarConfig, today: NaiveDate) -> Self {
        Self {
            backend,
            state: CalendarState::new(today, config.scope),
            store: EventStore::default(),
            scope: ScopeFilter::new(config.scope),
            editor: EventEditController::default(),
            deletes: Vec::new(),
            notices: Notices::default(),
            upcoming_limit: config.upcoming_limit,
            today,
            active: false,
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn scope_filter(&self) -> &ScopeFilter {
        &self.scope
    }

    pub fn editor(&self) -> &EventEditController {
        &self.editor
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move the reference date used for "today" highlighting and the
    /// upcoming list.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_loading(&self) -> bool {
        self.scope.is_fetching()
    }

    /// Whether any backend call is still unresolved.
    pub fn has_pending(&self) -> bool {
        self.scope.has_pending() || self.editor.has_pending() || !self.deletes.is_empty()
    }

    pub fn is_deleting(&self, id: EventId) -> bool {
        self.deletes.iter().any(|pending| pending.id == id)
    }

    pub fn index(&self) -> EventIndex<'_> {
        EventIndex::build(&self.store)
    }

    pub fn month_view<'a>(&self, index: &'a EventIndex<'a>) -> MonthView<'a> {
        MonthView::new(self.state.month, index)
    }

    pub fn upcoming(&self) -> Upcoming<'_> {
        Upcoming::build(&self.store, self.today, self.upcoming_limit)
    }

    /// Events on the selected day, read from the same index as the grid.
    pub fn agenda<'a>(&self, index: &'a EventIndex<'a>) -> &'a [&'a CalendarEvent] {
        match self.state.selected {
            Some(date) => index.on(date),
            None => &[],
        }
    }

    pub fn dispatch(&mut self, action: CalendarAction) {
        debug!("calendar action {:?}", action);

        match action {
            CalendarAction::PrevMonth => self.state.month = self.state.month.prev(),
            CalendarAction::NextMonth => self.state.month = self.state.month.next(),
            CalendarAction::ShowMonth(month) => self.state.month = month,
            CalendarAction::GoToToday => {
                self.state.month = YearMonth::from_date(self.today);
                self.state.selected = Some(self.today);
            }
            CalendarAction::SelectDay(date) => {
                self.state.selected = Some(date);
                if !self.state.month.contains(date) {
                    self.state.month = YearMonth::from_date(date);
                }
            }
            CalendarAction::ClearSelection => self.state.selected = None,
            CalendarAction::SelectScope(scope) => {
                if self.scope.select(scope, self.backend.as_ref()) {
                    self.store.reset();
                    self.state.confirm_delete = None;
                }
            }
            CalendarAction::Refresh => self.refresh(),
            CalendarAction::NewEvent => self.editor.open_new(self.today),
            CalendarAction::NewEventOn(date) => self.editor.open_new(date),
            CalendarAction::EditEvent(id) => match self.store.get(id).cloned() {
                Some(event) => self.editor.open_edit(&event),
                None => self.report(CalendarError::NotFound(id)),
            },
            CalendarAction::EditDraft(change) => self.editor.edit(change),
            CalendarAction::Submit => {
                if let Err(err) = self.editor.submit(self.backend.as_ref()) {
                    // invalid fields are marked on the form
                    debug!("submit rejected: {err}");
                }
            }
            CalendarAction::Cancel => self.editor.cancel(),
            CalendarAction::RequestDelete(id) => {
                if self.store.contains(id) {
                    self.state.confirm_delete = Some(id);
                } else {
                    self.report(CalendarError::NotFound(id));
                }
            }
            CalendarAction::ConfirmDelete => {
                if let Some(id) = self.state.confirm_delete.take() {
                    self.delete(id);
                }
            }
            CalendarAction::CancelDelete => self.state.confirm_delete = None,
            CalendarAction::DismissNotice(index) => {
                self.notices.dismiss(index);
            }
            CalendarAction::Enter => {
                if !self.active {
                    info!("entering calendar");
                    self.active = true;
                    self.scope.load_chapters(self.backend.as_ref());
                    self.refresh();
                }
            }
            CalendarAction::Leave => {
                if self.active {
                    info!("leaving calendar");
                    self.active = false;
                    self.scope.leave();
                }
            }
        }

        self.sync_state();
    }

    /// Apply every backend response that has arrived. Call once per frame.
    pub fn poll(&mut self) {
        for result in self.scope.poll() {
            match result {
                Ok(events) => {
                    info!("loaded {} events for {:?}", events.len(), self.scope.scope());
                    self.store.replace_all(events);
                }
                Err(err) => {
                    error!("failed to load events: {err}");
                    if !self.scope.is_fetching() {
                        self.store.mark_failed();
                    }
                    self.notices
                        .push(Notice::new(format!("Could not load events: {err}")));
                }
            }
        }

        if let Some(Err(err)) = self.scope.poll_chapters() {
            warn!("failed to load chapters: {err}");
            self.notices
                .push(Notice::new(format!("Could not load chapters: {err}")));
        }

        for outcome in self.editor.poll() {
            match outcome {
                SubmitOutcome::Created(event) => {
                    info!("created event {} '{}'", event.id, event.title);
                    if self.scope.scope().includes(&event) {
                        self.store.add(event);
                    }
                }
                SubmitOutcome::Updated(event) => {
                    info!("updated event {} '{}'", event.id, event.title);
                    let id = event.id;
                    if !self.scope.scope().includes(&event) {
                        debug!("updated event {id} left {:?}, dropping it", self.scope.scope());
                        self.store.remove(id);
                    } else if !self.store.replace(event) {
                        debug!("updated event {id} is not in the store, ignoring");
                    }
                }
                SubmitOutcome::Failed(err) => self.report(err),
            }
        }

        let mut i = 0;
        while i < self.deletes.len() {
            if self.deletes[i].promise.ready().is_none() {
                i += 1;
                continue;
            }

            let pending = self.deletes.remove(i);
            match pending.promise.block_and_take() {
                Ok(()) => {
                    info!("deleted event {}", pending.id);
                    self.store.remove(pending.id);
                }
                Err(err) => self.report(CalendarError::for_event(pending.id, err)),
            }
        }

        self.sync_state();
    }

    fn delete(&mut self, id: EventId) {
        if self.is_deleting(id) {
            debug!("delete of {id} already in flight");
            return;
        }

        info!("deleting event {id}");
        self.deletes.push(PendingDelete {
            id,
            promise: self.backend.delete_event(id),
        });
    }

    /// Surface a failure. Missing events also schedule a refresh so the
    /// stale entry goes away.
    fn report(&mut self, err: CalendarError) {
        warn!("calendar: {err}");
        self.notices.push(Notice::from(&err));

        if err.is_not_found() && self.active {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.store.clear_failure();
        self.scope.refresh(self.backend.as_ref());
    }

    fn sync_state(&mut self) {
        self.state.scope = self.scope.scope();
        self.state.editor = self.editor.mode();
    }
}
