use std::collections::VecDeque;
use std::fmt;

use crate::model::EventId;

pub const MAX_NOTICES: usize = 8;

/// Field level problems with a working draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftErrors {
    pub title: Option<String>,
    pub date: Option<String>,
}

impl DraftErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none()
    }
}

impl fmt::Display for DraftErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.title.as_deref(), self.date.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CalendarError {
    #[error("invalid event: {0}")]
    Validation(DraftErrors),

    #[error("request failed: {0}")]
    Request(#[from] sewa::Error),

    #[error("event {0} no longer exists")]
    NotFound(EventId),
}

impl CalendarError {
    /// Classify a failed request that addressed `id`.
    pub fn for_event(id: EventId, err: sewa::Error) -> Self {
        if err.is_not_found() {
            CalendarError::NotFound(id)
        } else {
            CalendarError::Request(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CalendarError::NotFound(_))
    }
}

/// A non-fatal message for the user about something that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&CalendarError> for Notice {
    fn from(err: &CalendarError) -> Self {
        Notice::new(err.to_string())
    }
}

/// Bounded queue of notices; the oldest is dropped once full.
#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        if self.queue.len() == MAX_NOTICES {
            self.queue.pop_front();
        }
        self.queue.push_back(notice);
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        self.queue.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
