use tracing::{debug, info};

use sewa::ApiPromise;

use crate::backend::CalendarBackend;
use crate::model::{CalendarEvent, Chapter, Scope};

struct Fetch {
    scope: Scope,
    promise: ApiPromise<Vec<CalendarEvent>>,
}

/// The selected scope, the listings in flight for it, and the chapters the
/// user can pick from.
#[derive(Default)]
pub struct ScopeFilter {
    scope: Scope,
    fetches: Vec<Fetch>,
    chapters: Vec<Chapter>,
    chapters_loaded: bool,
    chapters_fetch: Option<ApiPromise<Vec<Chapter>>>,
}

impl ScopeFilter {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Default::default()
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Switch scope and start fetching it. Returns false when `scope` was
    /// already selected.
    pub fn select(&mut self, scope: Scope, backend: &dyn CalendarBackend) -> bool {
        if scope == self.scope {
            return false;
        }

        info!("calendar scope {:?} -> {:?}", self.scope, scope);
        self.scope = scope;
        self.refresh(backend);
        true
    }

    pub fn refresh(&mut self, backend: &dyn CalendarBackend) {
        debug!("fetching events for {:?}", self.scope);
        self.fetches.push(Fetch {
            scope: self.scope,
            promise: backend.list_events(self.scope),
        });
    }

    pub fn is_fetching(&self) -> bool {
        !self.fetches.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.is_fetching() || self.chapters_fetch.is_some()
    }

    /// Drop every listing in flight; their results will never be applied.
    pub fn leave(&mut self) {
        if !self.fetches.is_empty() {
            debug!("dropping {} in-flight event fetches", self.fetches.len());
        }
        self.fetches.clear();
        self.chapters_fetch = None;
    }

    /// Resolved listings for the current scope, in resolution order. Results
    /// for a scope that is no longer selected are discarded.
    pub fn poll(&mut self) -> Vec<sewa::Result<Vec<CalendarEvent>>> {
        let mut results = Vec::new();

        let mut i = 0;
        while i < self.fetches.len() {
            if self.fetches[i].promise.ready().is_none() {
                i += 1;
                continue;
            }

            let fetch = self.fetches.remove(i);
            if fetch.scope != self.scope {
                debug!("discarding stale listing for {:?}", fetch.scope);
                continue;
            }
            results.push(fetch.promise.block_and_take());
        }

        results
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, scope: Scope) -> Option<&Chapter> {
        let id = scope.scope_id()?;
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    pub fn label(&self, scope: Scope) -> String {
        match scope {
            Scope::All => "All events".to_owned(),
            Scope::Chapter(id) => self
                .chapter(scope)
                .map(|chapter| chapter.name.clone())
                .unwrap_or_else(|| format!("Chapter {id}")),
        }
    }

    /// Fetch the chapter list once per session.
    pub fn load_chapters(&mut self, backend: &dyn CalendarBackend) {
        if self.chapters_loaded || self.chapters_fetch.is_some() {
            return;
        }
        self.chapters_fetch = Some(backend.list_scopes());
    }

    pub fn poll_chapters(&mut self) -> Option<sewa::Result<()>> {
        if self.chapters_fetch.as_ref()?.ready().is_none() {
            return None;
        }

        let result = self.chapters_fetch.take()?.block_and_take();
        self.chapters_loaded = true;
        Some(result.map(|chapters| {
            info!("loaded {} chapters", chapters.len());
            self.chapters = chapters;
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventDraft, EventId, ScopeId};
    use poll_promise::{Promise, Sender};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Hands out unresolved promises and keeps their senders.
    #[derive(Default)]
    struct Manual {
        listings: RefCell<Vec<(Scope, Sender<sewa::Result<Vec<CalendarEvent>>>)>>,
        chapter_calls: RefCell<usize>,
    }

    impl CalendarBackend for Manual {
        fn list_events(&self, scope: Scope) -> ApiPromise<Vec<CalendarEvent>> {
            let (sender, promise) = Promise::new();
            self.listings.borrow_mut().push((scope, sender));
            promise
        }

        fn create_event(&self, _draft: &EventDraft) -> ApiPromise<CalendarEvent> {
            Promise::from_ready(Err(sewa::Error::Generic("unused".to_owned())))
        }

        fn update_event(&self, _id: EventId, _draft: &EventDraft) -> ApiPromise<CalendarEvent> {
            Promise::from_ready(Err(sewa::Error::Generic("unused".to_owned())))
        }

        fn delete_event(&self, _id: EventId) -> ApiPromise<()> {
            Promise::from_ready(Ok(()))
        }

        fn list_scopes(&self) -> ApiPromise<Vec<Chapter>> {
            *self.chapter_calls.borrow_mut() += 1;
            Promise::from_ready(Ok(vec![Chapter {
                id: ScopeId(3),
                name: "Pokhara".to_owned(),
                location: None,
                kind: Default::default(),
            }]))
        }
    }

    impl Manual {
        fn resolve(&self, index: usize, result: sewa::Result<Vec<CalendarEvent>>) -> Scope {
            let (scope, sender) = self.listings.borrow_mut().remove(index);
            sender.send(result);
            scope
        }
    }

    #[test]
    fn selecting_the_same_scope_is_a_noop() {
        let backend = Manual::default();
        let mut filter = ScopeFilter::default();
        assert!(!filter.select(Scope::All, &backend));
        assert!(!filter.is_fetching());
    }

    #[test]
    fn stale_scope_results_are_discarded() {
        let backend = Manual::default();
        let mut filter = ScopeFilter::default();
        filter.refresh(&backend);
        assert!(filter.select(Scope::Chapter(ScopeId(3)), &backend));

        // the "all" listing resolves after the switch
        assert_eq!(backend.resolve(0, Ok(vec![])), Scope::All);
        assert!(filter.poll().is_empty());
        assert!(filter.is_fetching());

        backend.resolve(0, Ok(vec![]));
        assert_eq!(filter.poll().len(), 1);
        assert!(!filter.is_fetching());
    }

    #[test]
    fn leave_drops_in_flight_fetches() {
        let backend = Manual::default();
        let mut filter = ScopeFilter::default();
        filter.refresh(&backend);
        filter.leave();

        backend.resolve(0, Ok(vec![]));
        assert!(filter.poll().is_empty());
    }

    #[test]
    fn chapters_load_once() {
        let backend = Manual::default();
        let mut filter = ScopeFilter::default();

        filter.load_chapters(&backend);
        filter.load_chapters(&backend);
        assert!(matches!(filter.poll_chapters(), Some(Ok(()))));
        filter.load_chapters(&backend);

        assert_eq!(*backend.chapter_calls.borrow(), 1);
        assert_eq!(filter.label(Scope::Chapter(ScopeId(3))), "Pokhara");
        assert_eq!(filter.label(Scope::Chapter(ScopeId(4))), "Chapter 4");
        assert_eq!(filter.label(Scope::All), "All events");
        assert!(filter.poll_chapters().is_none());
    }
}
