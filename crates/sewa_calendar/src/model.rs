//! Calendar data model as exchanged with the portal backend.
//!
//! Event dates are plain calendar dates. Whatever the wire carries, only the
//! literal `YYYY-MM-DD` part is ever looked at, so no timezone can move an
//! event to a neighbouring day.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Server assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a chapter, the organizational unit an event can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(pub u32);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum EventType {
    Meeting,
    SocialEvent,
    Workshop,
    Agm,
    Festival,
    /// Fallback for missing or unknown types.
    #[default]
    General,
}

impl EventType {
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "MEETING" => EventType::Meeting,
            "SOCIAL_EVENT" => EventType::SocialEvent,
            "WORKSHOP" => EventType::Workshop,
            "AGM" => EventType::Agm,
            "FESTIVAL" => EventType::Festival,
            _ => EventType::General,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            EventType::Meeting => "MEETING",
            EventType::SocialEvent => "SOCIAL_EVENT",
            EventType::Workshop => "WORKSHOP",
            EventType::Agm => "AGM",
            EventType::Festival => "FESTIVAL",
            EventType::General => "GENERAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::Meeting => "Meeting",
            EventType::SocialEvent => "Social event",
            EventType::Workshop => "Workshop",
            EventType::Agm => "AGM",
            EventType::Festival => "Festival",
            EventType::General => "General",
        }
    }
}

impl From<Option<String>> for EventType {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(EventType::from_wire)
            .unwrap_or_default()
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_wire().to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Public,
    MembersOnly,
}

impl Visibility {
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::MembersOnly => "Members only",
        }
    }
}

/// A single whole-day association event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "EventWire")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_type: EventType,
    /// `None` means the event is global.
    pub scope_id: Option<ScopeId>,
    pub visibility: Visibility,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CalendarEvent {
    pub fn new(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            event_date: draft.event_date,
            event_type: draft.event_type,
            scope_id: draft.scope_id,
            visibility: draft.visibility,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChapterRef {
    id: ScopeId,
}

/// Events come either in the flattened response shape (`chapterId`) or as
/// the raw entity with a nested `chapter` object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventWire {
    id: EventId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(with = "calendar_date")]
    event_date: NaiveDate,
    #[serde(default)]
    event_type: EventType,
    #[serde(default)]
    chapter_id: Option<ScopeId>,
    #[serde(default)]
    chapter: Option<ChapterRef>,
    #[serde(default)]
    visibility: Option<Visibility>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl From<EventWire> for CalendarEvent {
    fn from(wire: EventWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description.filter(|d| !d.trim().is_empty()),
            event_date: wire.event_date,
            event_type: wire.event_type,
            scope_id: wire.chapter_id.or(wire.chapter.map(|c| c.id)),
            visibility: wire.visibility.unwrap_or_default(),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// Everything about an event except its identity; the payload of create and
/// update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "calendar_date")]
    pub event_date: NaiveDate,
    pub event_type: EventType,
    #[serde(rename = "chapterId")]
    pub scope_id: Option<ScopeId>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChapterKind {
    National,
    State,
    #[default]
    #[serde(other)]
    Local,
}

/// A chapter as listed by the backend; only used to populate the scope
/// selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ScopeId,
    #[serde(rename = "chapterName")]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "chapterType")]
    pub kind: ChapterKind,
}

/// Which events the calendar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    All,
    Chapter(ScopeId),
}

impl Scope {
    pub fn scope_id(&self) -> Option<ScopeId> {
        match self {
            Scope::All => None,
            Scope::Chapter(id) => Some(*id),
        }
    }

    /// Whether a listing for this scope would include the event.
    pub fn includes(&self, event: &CalendarEvent) -> bool {
        match self {
            Scope::All => true,
            Scope::Chapter(id) => event.scope_id == Some(*id),
        }
    }
}

impl From<Option<ScopeId>> for Scope {
    fn from(value: Option<ScopeId>) -> Self {
        value.map(Scope::Chapter).unwrap_or_default()
    }
}

/// Parse the calendar date at the start of `value`.
///
/// Accepts `2026-03-15` as well as timestamps such as `2026-03-15T00:00:00Z`
/// or `2026-03-15 18:30:00+05:30`; the time and offset are ignored.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10)?;
    match value.as_bytes().get(10) {
        None | Some(b'T') | Some(b't') | Some(b' ') => {}
        Some(_) => return None,
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub(crate) mod calendar_date {
    use chrono::{Datelike, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Parts(i32, u32, u32),
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match Wire::deserialize(deserializer)? {
            Wire::Text(text) => super::parse_calendar_date(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid calendar date '{text}'"))),
            Wire::Parts(year, month, day) => NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| {
                    de::Error::custom(format!("invalid calendar date [{year},{month},{day}]"))
                }),
        }
    }
}
