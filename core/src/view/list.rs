//! The tutorials list and the published list.
//!
//! # Design
//! Row actions are tracked per id in [`BusyFlags`], so a delete on one row
//! and a toggle on another can be in flight together. A completion whose
//! ticket no longer matches the view is still received and parsed, so a
//! failure reaches the log and the sink, but it leaves the rows alone.

use crate::client::TutorialClient;
use crate::error::{ApiError, Operation};
use crate::http::{HttpResponse, TransportError};
use crate::notify::Notice;
use crate::types::Tutorial;

use super::busy::{BusyFlags, BusyKind};
use super::route::Route;
use super::ticket::{Action, Lifecycle, Outcome, Pending, Ticket};

/// Which collection a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// Every tutorial, optionally filtered by title.
    All,
    /// Only published tutorials. No search.
    Published,
}

/// State behind the tutorials list and the published list.
#[derive(Debug)]
pub struct ListView {
    client: TutorialClient,
    source: ListSource,
    filter: Option<String>,
    tutorials: Vec<Tutorial>,
    loading: bool,
    busy: BusyFlags,
    deleting_all: bool,
    life: Lifecycle,
    latest_fetch: u64,
}

impl ListView {
    pub fn new(client: TutorialClient, source: ListSource) -> Self {
        Self {
            client,
            source,
            filter: None,
            tutorials: Vec::new(),
            loading: false,
            busy: BusyFlags::default(),
            deleting_all: false,
            life: Lifecycle::default(),
            latest_fetch: 0,
        }
    }

    /// The list view for `route`, with its filter restored. `None` for
    /// routes that are not lists.
    pub fn for_route(client: TutorialClient, route: &Route) -> Option<Self> {
        match route {
            Route::List { title } => {
                let mut view = Self::new(client, ListSource::All);
                view.filter = title.clone().filter(|t| !t.is_empty());
                Some(view)
            }
            Route::Published => Some(Self::new(client, ListSource::Published)),
            _ => None,
        }
    }

    pub fn source(&self) -> ListSource {
        self.source
    }

    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn busy(&self) -> &BusyFlags {
        &self.busy
    }

    pub fn is_deleting_all(&self) -> bool {
        self.deleting_all
    }

    /// Where this view lives, including its current filter.
    pub fn route(&self) -> Route {
        match self.source {
            ListSource::All => Route::search(self.filter.as_deref().unwrap_or("")),
            ListSource::Published => Route::Published,
        }
    }

    /// Start showing the view. Clears anything left from a previous mount
    /// and issues the initial fetch.
    pub fn mount(&mut self) -> Pending {
        self.life.mount();
        self.busy.clear();
        self.deleting_all = false;
        self.tutorials.clear();
        self.fetch()
    }

    pub fn unmount(&mut self) {
        self.life.unmount();
        self.loading = false;
    }

    /// Replace the title filter and re-fetch. Any fetch still in flight for
    /// the old filter will be discarded. `None` for the published list or an
    /// unmounted view.
    pub fn set_filter(&mut self, title: &str) -> Option<Pending> {
        if self.source != ListSource::All || !self.life.is_mounted() {
            return None;
        }
        self.filter = (!title.is_empty()).then(|| title.to_string());
        Some(self.fetch())
    }

    /// Re-fetch with the current filter.
    pub fn refresh(&mut self) -> Option<Pending> {
        self.life.is_mounted().then(|| self.fetch())
    }

    fn fetch(&mut self) -> Pending {
        self.loading = true;
        let request = match self.source {
            ListSource::All => self.client.build_list_tutorials(self.filter.as_deref()),
            ListSource::Published => self.client.build_list_published(),
        };
        let pending = self.life.issue(Action::Fetch, request);
        self.latest_fetch = pending.ticket.seq();
        pending
    }

    pub fn complete_fetch(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome, ApiError> {
        let current = self.life.accepts(&ticket) && ticket.seq() == self.latest_fetch;

        let operation = match self.source {
            ListSource::All => Operation::ListTutorials,
            ListSource::Published => Operation::ListPublished,
        };
        let parsed = self.client.receive(operation, result).and_then(|response| {
            match self.source {
                ListSource::All => self.client.parse_list_tutorials(response),
                ListSource::Published => self.client.parse_list_published(response),
            }
        });

        if !current {
            return Ok(Outcome::Stale);
        }
        self.loading = false;
        match parsed {
            Ok(tutorials) => {
                self.tutorials = tutorials;
                Ok(Outcome::Applied(()))
            }
            Err(err) => {
                self.tutorials.clear();
                Err(err)
            }
        }
    }

    /// `None` if the row is unknown or already being deleted.
    pub fn begin_delete(&mut self, id: i64) -> Option<Pending> {
        if !self.life.is_mounted() || !self.has_row(id) || !self.busy.begin(id, BusyKind::Deleting) {
            return None;
        }
        let request = self.client.build_delete_tutorial(id);
        Some(self.life.issue(Action::Delete(id), request))
    }

    pub fn complete_delete(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome, ApiError> {
        let Action::Delete(id) = ticket.action() else {
            return Ok(Outcome::Stale);
        };
        let current = self.life.accepts(&ticket);
        let deleted = self
            .client
            .receive(Operation::DeleteTutorial, result)
            .and_then(|response| self.client.parse_delete_tutorial(response));
        if !current {
            return Ok(Outcome::Stale);
        }
        self.busy.end(id, BusyKind::Deleting);
        deleted?;

        self.tutorials.retain(|t| t.id != id);
        tracing::info!(id, "tutorial deleted");
        self.client.notify(Notice::info(
            "Tutorial deleted",
            "The tutorial has been deleted successfully.",
        ));
        Ok(Outcome::Applied(()))
    }

    /// `None` if the row is unknown or already toggling.
    pub fn begin_toggle(&mut self, id: i64) -> Result<Option<Pending>, ApiError> {
        if !self.life.is_mounted() {
            return Ok(None);
        }
        let Some(tutorial) = self.tutorials.iter().find(|t| t.id == id) else {
            return Ok(None);
        };
        let request = self.client.build_toggle_published(tutorial)?;
        if !self.busy.begin(id, BusyKind::Toggling) {
            return Ok(None);
        }
        Ok(Some(self.life.issue(Action::Toggle(id), request)))
    }

    /// Replaces the row with the server's copy. On the published list a row
    /// that is no longer published is dropped.
    pub fn complete_toggle(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome<Tutorial>, ApiError> {
        let Action::Toggle(id) = ticket.action() else {
            return Ok(Outcome::Stale);
        };
        let current = self.life.accepts(&ticket);
        let updated = self
            .client
            .receive(Operation::UpdateTutorial, result)
            .and_then(|response| self.client.parse_update_tutorial(response));
        if !current {
            return Ok(Outcome::Stale);
        }
        self.busy.end(id, BusyKind::Toggling);
        let updated = updated?;

        if self.source == ListSource::Published && !updated.published {
            self.tutorials.retain(|t| t.id != updated.id);
        } else if let Some(row) = self.tutorials.iter_mut().find(|t| t.id == updated.id) {
            *row = updated.clone();
        }
        self.client.notify(published_notice(&updated));
        Ok(Outcome::Applied(updated))
    }

    /// `None` while a bulk delete is running or when there is nothing to
    /// delete.
    pub fn begin_delete_all(&mut self) -> Option<Pending> {
        if !self.life.is_mounted() || self.deleting_all || self.tutorials.is_empty() {
            return None;
        }
        self.deleting_all = true;
        let request = self.client.build_delete_all_tutorials();
        Some(self.life.issue(Action::DeleteAll, request))
    }

    pub fn complete_delete_all(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome, ApiError> {
        if ticket.action() != Action::DeleteAll {
            return Ok(Outcome::Stale);
        }
        let current = self.life.accepts(&ticket);
        let deleted = self
            .client
            .receive(Operation::DeleteAllTutorials, result)
            .and_then(|response| self.client.parse_delete_all_tutorials(response));
        if !current {
            return Ok(Outcome::Stale);
        }
        self.deleting_all = false;
        deleted?;

        tracing::info!(count = self.tutorials.len(), "all tutorials deleted");
        self.tutorials.clear();
        self.client.notify(Notice::info(
            "All tutorials deleted",
            "All tutorials have been deleted successfully.",
        ));
        Ok(Outcome::Applied(()))
    }

    fn has_row(&self, id: i64) -> bool {
        self.tutorials.iter().any(|t| t.id == id)
    }
}

pub(crate) fn published_notice(tutorial: &Tutorial) -> Notice {
    if tutorial.published {
        Notice::info(
            "Tutorial published",
            "The tutorial is now visible in the published section.",
        )
    } else {
        Notice::info(
            "Tutorial unpublished",
            "The tutorial has been removed from the published section.",
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notify::MemorySink;

    fn view(source: ListSource) -> (ListView, MemorySink) {
        let sink = MemorySink::new();
        let client = TutorialClient::with_sink("http://test/api", Arc::new(sink.clone()));
        (ListView::new(client, source), sink)
    }

    fn rows(json: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(200, json))
    }

    const TWO_ROWS: &str = r#"[
        {"id":1,"title":"Intro","description":"Basics","published":false},
        {"id":2,"title":"Advanced","description":"More","published":true}
    ]"#;

    #[test]
    fn mount_loads_rows() {
        let (mut view, _) = view(ListSource::All);
        let pending = view.mount();
        assert!(view.is_loading());
        assert_eq!(pending.request.path, "http://test/api/tutorials/");

        let outcome = view.complete_fetch(pending.ticket, rows(TWO_ROWS)).unwrap();
        assert_eq!(outcome, Outcome::Applied(()));
        assert!(!view.is_loading());
        assert_eq!(view.tutorials().len(), 2);
    }

    #[test]
    fn failed_fetch_leaves_list_empty() {
        let (mut view, sink) = view(ListSource::All);
        let first = view.mount();
        view.complete_fetch(first.ticket, rows(TWO_ROWS)).unwrap();

        let again = view.refresh().unwrap();
        let err = view
            .complete_fetch(again.ticket, Ok(HttpResponse::new(500, "")))
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(view.tutorials().is_empty());
        assert!(!view.is_loading());
        assert_eq!(sink.errors().len(), 1);
    }

    #[test]
    fn newer_filter_supersedes_older_fetch() {
        let (mut view, _) = view(ListSource::All);
        let first = view.mount();
        let second = view.set_filter("Int").unwrap();
        assert_eq!(second.request.path, "http://test/api/tutorials/?title=Int");
        assert_eq!(view.route(), Route::search("Int"));

        let outcome = view
            .complete_fetch(
                second.ticket,
                rows(r#"[{"id":1,"title":"Intro","description":"Basics","published":false}]"#),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Applied(()));

        let late = view.complete_fetch(first.ticket, rows(TWO_ROWS)).unwrap();
        assert!(late.is_stale());
        assert_eq!(view.tutorials().len(), 1);
    }

    #[test]
    fn published_list_has_no_search() {
        let (mut view, _) = view(ListSource::Published);
        let pending = view.mount();
        assert_eq!(pending.request.path, "http://test/api/tutorials/published/");
        assert!(view.set_filter("x").is_none());
    }

    #[test]
    fn delete_all_requires_rows() {
        let (mut view, _) = view(ListSource::All);
        let pending = view.mount();
        view.complete_fetch(pending.ticket, rows("[]")).unwrap();
        assert!(view.begin_delete_all().is_none());
    }

    fn loaded(source: ListSource) -> (ListView, MemorySink) {
        let (mut view, sink) = view(source);
        let pending = view.mount();
        view.complete_fetch(pending.ticket, rows(TWO_ROWS)).unwrap();
        (view, sink)
    }

    #[test]
    fn late_failure_after_unmount_is_still_reported() {
        let (mut view, sink) = loaded(ListSource::All);
        let pending = view.begin_delete(1).unwrap();
        view.unmount();

        let outcome = view
            .complete_delete(pending.ticket, Ok(HttpResponse::new(500, "boom")))
            .unwrap();
        assert!(outcome.is_stale());
        assert_eq!(sink.errors().len(), 1);
        assert_eq!(view.tutorials().len(), 2);
    }

    #[test]
    fn late_fetch_failure_is_reported_but_not_applied() {
        let (mut view, sink) = view(ListSource::All);
        let first = view.mount();
        let second = view.refresh().unwrap();
        view.complete_fetch(second.ticket, rows(TWO_ROWS)).unwrap();

        let late = view
            .complete_fetch(first.ticket, Err(TransportError::new("connection reset")))
            .unwrap();
        assert!(late.is_stale());
        assert_eq!(view.tutorials().len(), 2);
        assert_eq!(sink.errors().len(), 1);
    }

    #[test]
    fn failed_row_delete_keeps_row_and_clears_busy() {
        let (mut view, sink) = loaded(ListSource::All);
        let pending = view.begin_delete(1).unwrap();
        assert!(view.busy().is_busy(1, BusyKind::Deleting));

        let err = view
            .complete_delete(pending.ticket, Ok(HttpResponse::new(500, "")))
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!view.busy().is_busy(1, BusyKind::Deleting));
        assert!(view.tutorials().iter().any(|t| t.id == 1));
        assert_eq!(sink.errors().len(), 1);
        assert!(view.begin_delete(1).is_some());
    }

    #[test]
    fn failed_delete_all_clears_flag_and_keeps_rows() {
        let (mut view, sink) = loaded(ListSource::All);
        let pending = view.begin_delete_all().unwrap();
        assert!(view.is_deleting_all());

        let err = view
            .complete_delete_all(pending.ticket, Ok(HttpResponse::new(500, "")))
            .unwrap_err();
        assert_eq!(err.operation(), Operation::DeleteAllTutorials);
        assert!(!view.is_deleting_all());
        assert_eq!(view.tutorials().len(), 2);
        assert_eq!(sink.errors().len(), 1);
        assert!(view.begin_delete_all().is_some());
    }

    #[test]
    fn ticket_from_another_list_is_ignored() {
        let (mut view, _) = loaded(ListSource::All);
        let (mut other, _) = loaded(ListSource::All);
        let foreign = other.begin_delete(1).unwrap();
        view.begin_delete(1).unwrap();

        let outcome = view
            .complete_delete(foreign.ticket, Ok(HttpResponse::new(204, "")))
            .unwrap();
        assert!(outcome.is_stale());
        assert!(view.busy().is_busy(1, BusyKind::Deleting));
        assert_eq!(view.tutorials().len(), 2);
    }

    #[test]
    fn route_restores_filter() {
        let sink = MemorySink::new();
        let client = TutorialClient::with_sink("http://test/api", Arc::new(sink));
        let mut view = ListView::for_route(client, &"/?title=Int".parse().unwrap()).unwrap();
        assert_eq!(view.filter(), Some("Int"));
        let pending = view.mount();
        assert_eq!(pending.request.path, "http://test/api/tutorials/?title=Int");
    }
}
