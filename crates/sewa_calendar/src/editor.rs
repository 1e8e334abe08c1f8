use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sewa::ApiPromise;

use crate::backend::CalendarBackend;
use crate::error::{CalendarError, DraftErrors};
use crate::forms::{DraftChange, EventForm};
use crate::model::{CalendarEvent, EventId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorMode {
    #[default]
    Closed,
    Creating,
    Editing(EventId),
}

impl EditorMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorMode::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitTarget {
    Create,
    Update(EventId),
}

struct PendingSubmit {
    target: SubmitTarget,
    promise: ApiPromise<CalendarEvent>,
}

/// What a resolved submit means for the store.
#[derive(Debug)]
pub enum SubmitOutcome {
    Created(CalendarEvent),
    Updated(CalendarEvent),
    Failed(CalendarError),
}

/// Drives the add/edit modal. Every mutation round-trips through the
/// backend; the store is only touched once a submit resolves.
#[derive(Default)]
pub struct EventEditController {
    mode: EditorMode,
    form: EventForm,
    errors: DraftErrors,
    submit: Option<PendingSubmit>,
    /// submits whose form was cancelled while they were in flight
    detached: Vec<PendingSubmit>,
}

impl EventEditController {
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn errors(&self) -> &DraftErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.mode.is_open() && self.submit.is_none()
    }

    /// Whether any submit, including detached ones, is still unresolved.
    pub fn has_pending(&self) -> bool {
        self.submit.is_some() || !self.detached.is_empty()
    }

    pub fn open_new(&mut self, date: NaiveDate) {
        self.detach();
        self.mode = EditorMode::Creating;
        self.form = EventForm::with_date(date);
        self.errors = DraftErrors::default();
    }

    pub fn open_edit(&mut self, event: &CalendarEvent) {
        self.detach();
        self.mode = EditorMode::Editing(event.id);
        self.form = EventForm::from_event(event);
        self.errors = DraftErrors::default();
    }

    pub fn edit(&mut self, change: DraftChange) {
        if self.mode.is_open() {
            self.form.apply(change);
        }
    }

    pub fn cancel(&mut self) {
        self.detach();
        self.close();
    }

    /// Validate the working draft and dispatch it. Validation failures mark
    /// the fields and never reach the backend.
    pub fn submit(&mut self, backend: &dyn CalendarBackend) -> Result<(), CalendarError> {
        let target = match self.mode {
            EditorMode::Closed => return Ok(()),
            EditorMode::Creating => SubmitTarget::Create,
            EditorMode::Editing(id) => SubmitTarget::Update(id),
        };

        if self.submit.is_some() {
            debug!("submit already in flight, ignoring");
            return Ok(());
        }

        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(CalendarError::Validation(errors));
            }
        };
        self.errors = DraftErrors::default();

        let promise = match target {
            SubmitTarget::Create => backend.create_event(&draft),
            SubmitTarget::Update(id) => backend.update_event(id, &draft),
        };
        info!("submitting {:?} '{}'", target, draft.title);
        self.submit = Some(PendingSubmit { target, promise });

        Ok(())
    }

    /// Collect resolved submits. A successful submit of the open form closes
    /// it; a failed one leaves the form and draft as they were.
    pub fn poll(&mut self) -> Vec<SubmitOutcome> {
        let mut outcomes = Vec::new();

        let mut i = 0;
        while i < self.detached.len() {
            if self.detached[i].promise.ready().is_none() {
                i += 1;
                continue;
            }
            let pending = self.detached.remove(i);
            outcomes.push(resolve(pending));
        }

        if self
            .submit
            .as_ref()
            .is_some_and(|pending| pending.promise.ready().is_some())
        {
            if let Some(pending) = self.submit.take() {
                let outcome = resolve(pending);
                if !matches!(outcome, SubmitOutcome::Failed(_)) {
                    self.close();
                }
                outcomes.push(outcome);
            }
        }

        outcomes
    }

    fn detach(&mut self) {
        if let Some(pending) = self.submit.take() {
            self.detached.push(pending);
        }
    }

    fn close(&mut self) {
        self.mode = EditorMode::Closed;
        self.form = EventForm::default();
        self.errors = DraftErrors::default();
    }
}

fn resolve(pending: PendingSubmit) -> SubmitOutcome {
    match (pending.target, pending.promise.block_and_take()) {
        (SubmitTarget::Create, Ok(event)) => SubmitOutcome::Created(event),
        (SubmitTarget::Update(_), Ok(event)) => SubmitOutcome::Updated(event),
        (SubmitTarget::Create, Err(err)) => SubmitOutcome::Failed(CalendarError::Request(err)),
        (SubmitTarget::Update(id), Err(err)) => {
            SubmitOutcome::Failed(CalendarError::for_event(id, err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, EventDraft, EventType, Scope};
    use poll_promise::Promise;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Records calls and hands out promises that resolve immediately.
    #[derive(Default)]
    struct Recorder {
        creates: RefCell<Vec<EventDraft>>,
        updates: RefCell<Vec<(EventId, EventDraft)>>,
        fail_with: Option<u16>,
    }

    impl CalendarBackend for Recorder {
        fn list_events(&self, _scope: Scope) -> ApiPromise<Vec<CalendarEvent>> {
            Promise::from_ready(Ok(vec![]))
        }

        fn create_event(&self, draft: &EventDraft) -> ApiPromise<CalendarEvent> {
            self.creates.borrow_mut().push(draft.clone());
            match self.fail_with {
                Some(status) => Promise::from_ready(Err(sewa::Error::http(status, "nope"))),
                None => Promise::from_ready(Ok(CalendarEvent::new(EventId(100), draft.clone()))),
            }
        }

        fn update_event(&self, id: EventId, draft: &EventDraft) -> ApiPromise<CalendarEvent> {
            self.updates.borrow_mut().push((id, draft.clone()));
            match self.fail_with {
                Some(status) => {
                    Promise::from_ready(Err(sewa::Error::http(status, "Event not found")))
                }
                None => Promise::from_ready(Ok(CalendarEvent::new(id, draft.clone()))),
            }
        }

        fn delete_event(&self, _id: EventId) -> ApiPromise<()> {
            Promise::from_ready(Ok(()))
        }

        fn list_scopes(&self) -> ApiPromise<Vec<Chapter>> {
            Promise::from_ready(Ok(vec![]))
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn empty_title_never_reaches_the_backend() {
        let backend = Recorder::default();
        let mut editor = EventEditController::default();
        editor.open_new(day());

        let result = editor.submit(&backend);

        assert!(matches!(result, Err(CalendarError::Validation(_))));
        assert!(editor.errors().title.is_some());
        assert_eq!(editor.mode(), EditorMode::Creating);
        assert!(backend.creates.borrow().is_empty());
        assert!(!editor.is_submitting());
    }

    #[test]
    fn successful_create_closes_the_form() {
        let backend = Recorder::default();
        let mut editor = EventEditController::default();
        editor.open_new(day());
        editor.edit(DraftChange::Title("AGM".to_owned()));
        editor.edit(DraftChange::EventType(EventType::Agm));

        editor.submit(&backend).unwrap();
        assert!(!editor.can_submit());

        let outcomes = editor.poll();
        assert_eq!(outcomes.len(), 1);
        let SubmitOutcome::Created(event) = &outcomes[0] else {
            panic!("expected a created event, got {:?}", outcomes[0]);
        };
        assert_eq!(event.title, "AGM");
        assert_eq!(editor.mode(), EditorMode::Closed);
    }

    #[test]
    fn failed_update_keeps_the_draft() {
        let backend = Recorder {
            fail_with: Some(400),
            ..Default::default()
        };
        let existing = CalendarEvent::new(
            EventId(7),
            EventDraft {
                title: "Old".to_owned(),
                description: None,
                event_date: day(),
                event_type: EventType::Meeting,
                scope_id: None,
                visibility: Default::default(),
            },
        );

        let mut editor = EventEditController::default();
        editor.open_edit(&existing);
        editor.edit(DraftChange::Title("New".to_owned()));
        editor.submit(&backend).unwrap();

        let outcomes = editor.poll();
        assert!(matches!(
            outcomes.as_slice(),
            [SubmitOutcome::Failed(CalendarError::NotFound(EventId(7)))]
        ));
        assert_eq!(editor.mode(), EditorMode::Editing(EventId(7)));
        assert_eq!(editor.form().title, "New");
        assert!(editor.can_submit());
        assert_eq!(backend.updates.borrow()[0].0, EventId(7));
    }

    #[test]
    fn second_submit_is_ignored_while_pending() {
        let backend = Recorder::default();
        let mut editor = EventEditController::default();
        editor.open_new(day());
        editor.edit(DraftChange::Title("Picnic".to_owned()));

        editor.submit(&backend).unwrap();
        editor.submit(&backend).unwrap();

        assert_eq!(backend.creates.borrow().len(), 1);
    }

    #[test]
    fn cancelled_submit_still_resolves() {
        let backend = Recorder::default();
        let mut editor = EventEditController::default();
        editor.open_new(day());
        editor.edit(DraftChange::Title("Picnic".to_owned()));
        editor.submit(&backend).unwrap();

        editor.cancel();
        assert_eq!(editor.mode(), EditorMode::Closed);
        assert!(editor.has_pending());

        let outcomes = editor.poll();
        assert!(matches!(outcomes.as_slice(), [SubmitOutcome::Created(_)]));
        assert!(!editor.has_pending());
    }
}
