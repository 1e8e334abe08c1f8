//! Working draft of the add/edit event form.

use chrono::NaiveDate;

use crate::error::DraftErrors;
use crate::model::{parse_calendar_date, CalendarEvent, EventDraft, EventType, ScopeId, Visibility};

/// Raw, possibly invalid form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// Date in "YYYY-MM-DD" format.
    pub date: String,
    pub event_type: EventType,
    pub scope_id: Option<ScopeId>,
    pub visibility: Visibility,
}

/// A single edit to the working draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    Title(String),
    Description(String),
    Date(String),
    EventType(EventType),
    Scope(Option<ScopeId>),
    Visibility(Visibility),
}

impl EventForm {
    /// Create a new form with a pre-filled date.
    pub fn with_date(date: NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            date: event.event_date.format("%Y-%m-%d").to_string(),
            event_type: event.event_type,
            scope_id: event.scope_id,
            visibility: event.visibility,
        }
    }

    pub fn apply(&mut self, change: DraftChange) {
        match change {
            DraftChange::Title(title) => self.title = title,
            DraftChange::Description(description) => self.description = description,
            DraftChange::Date(date) => self.date = date,
            DraftChange::EventType(event_type) => self.event_type = event_type,
            DraftChange::Scope(scope_id) => self.scope_id = scope_id,
            DraftChange::Visibility(visibility) => self.visibility = visibility,
        }
    }

    pub fn validate(&self) -> Result<EventDraft, DraftErrors> {
        let mut errors = DraftErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("title is required".to_owned());
        }

        let date = if self.date.trim().is_empty() {
            errors.date = Some("date is required".to_owned());
            None
        } else {
            let parsed = parse_calendar_date(&self.date);
            if parsed.is_none() {
                errors.date = Some("date must be YYYY-MM-DD".to_owned());
            }
            parsed
        };

        match date {
            Some(event_date) if errors.is_empty() => {
                let description = self.description.trim();
                Ok(EventDraft {
                    title: title.to_owned(),
                    description: (!description.is_empty()).then(|| description.to_owned()),
                    event_date,
                    event_type: self.event_type,
                    scope_id: self.scope_id,
                    visibility: self.visibility,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_form_defaults() {
        let form = EventForm::with_date(date(2026, 3, 15));
        assert_eq!(form.date, "2026-03-15");
        assert_eq!(form.event_type, EventType::General);
        assert_eq!(form.scope_id, None);
        assert_eq!(form.visibility, Visibility::Public);
    }

    #[test]
    fn validate_trims_and_builds_a_draft() {
        let mut form = EventForm::with_date(date(2026, 3, 15));
        form.apply(DraftChange::Title("  AGM ".to_owned()));
        form.apply(DraftChange::Description("   ".to_owned()));
        form.apply(DraftChange::EventType(EventType::Agm));

        assert_eq!(
            form.validate(),
            Ok(EventDraft {
                title: "AGM".to_owned(),
                description: None,
                event_date: date(2026, 3, 15),
                event_type: EventType::Agm,
                scope_id: None,
                visibility: Visibility::Public,
            })
        );
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let form = EventForm::default();
        let errors = form.validate().unwrap_err();
        assert!(errors.title.is_some());
        assert_eq!(errors.date.as_deref(), Some("date is required"));
        assert!(form.validate().is_err());
    }

    #[test]
    fn malformed_date_is_invalid() {
        let mut form = EventForm::with_date(date(2026, 3, 15));
        form.apply(DraftChange::Title("Picnic".to_owned()));
        form.apply(DraftChange::Date("2026-02-30".to_owned()));

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.title, None);
        assert_eq!(errors.date.as_deref(), Some("date must be YYYY-MM-DD"));
    }

    #[test]
    fn round_trips_an_existing_event() {
        let mut form = EventForm::with_date(date(2026, 5, 1));
        form.apply(DraftChange::Title("Workshop".to_owned()));
        form.apply(DraftChange::Scope(Some(ScopeId(3))));
        form.apply(DraftChange::Visibility(Visibility::MembersOnly));
        let event = CalendarEvent::new(crate::model::EventId(1), form.validate().unwrap());

        assert_eq!(EventForm::from_event(&event), form);
    }
}
