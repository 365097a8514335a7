//! View-state containers driven against the live mock server.
//!
//! The test plays the host: it takes each `Pending` request, executes it
//! with ureq, and feeds the result back in whatever order it likes.

mod common;

use std::sync::Arc;

use common::{spawn_server, UreqTransport};
use tutorial_core::view::{
    BusyKind, DetailState, DetailView, FormView, ListSource, ListView, Outcome, Route,
    SubmitError,
};
use tutorial_core::{
    Field, HttpResponse, MemorySink, Transport, TutorialApi, TutorialClient, TutorialDraft,
};

struct Host {
    client: TutorialClient,
    transport: UreqTransport,
    sink: MemorySink,
}

impl Host {
    fn new() -> Self {
        let sink = MemorySink::new();
        let client = TutorialClient::with_sink(&spawn_server(), Arc::new(sink.clone()));
        Self {
            client,
            transport: UreqTransport::new(),
            sink,
        }
    }

    fn seed(&self, drafts: &[TutorialDraft]) -> Vec<i64> {
        let api = TutorialApi::new(self.client.clone(), &self.transport);
        drafts
            .iter()
            .map(|d| api.create_tutorial(d).unwrap().id)
            .collect()
    }

    fn api(&self) -> TutorialApi<&UreqTransport> {
        TutorialApi::new(self.client.clone(), &self.transport)
    }
}

fn loaded_list(host: &Host, source: ListSource) -> ListView {
    let mut view = ListView::new(host.client.clone(), source);
    let pending = view.mount();
    let result = host.transport.execute(pending.request);
    view.complete_fetch(pending.ticket, result).unwrap();
    view
}

#[test]
fn create_form_then_list_shows_it() {
    let host = Host::new();

    let mut form = FormView::create(host.client.clone());
    form.set_title("Intro");
    form.set_description("Basics");
    let pending = form.submit().unwrap();
    assert!(form.is_submitting());
    let result = host.transport.execute(pending.request);
    let route = form.complete_submit(pending.ticket, result).unwrap();
    assert_eq!(route, Outcome::Applied(Route::list()));

    let list = loaded_list(&host, ListSource::All);
    assert_eq!(list.tutorials().len(), 1);
    assert_eq!(list.tutorials()[0].title, "Intro");
    assert!(!list.tutorials()[0].published);
    assert_eq!(host.sink.notices()[0].title, "Tutorial created");
}

#[test]
fn invalid_form_never_reaches_server() {
    let host = Host::new();
    let mut form = FormView::create(host.client.clone());
    form.set_title("x".repeat(71));
    form.set_description("Basics");

    assert!(matches!(form.submit(), Err(SubmitError::Invalid(_))));
    assert!(form.field_error(Field::Title).is_some());
    assert!(host.api().list_tutorials(None).unwrap().is_empty());
}

#[test]
fn search_filters_rows() {
    let host = Host::new();
    host.seed(&[
        TutorialDraft::new("Intro", "Basics"),
        TutorialDraft::new("Advanced", "More"),
    ]);

    let mut list = loaded_list(&host, ListSource::All);
    assert_eq!(list.tutorials().len(), 2);

    let pending = list.set_filter("Int").unwrap();
    let result = host.transport.execute(pending.request);
    list.complete_fetch(pending.ticket, result).unwrap();
    assert_eq!(list.tutorials().len(), 1);
    assert_eq!(list.tutorials()[0].title, "Intro");
    assert_eq!(list.route().to_path(), "/?title=Int");
}

#[test]
fn concurrent_row_toggles_apply_independently() {
    let host = Host::new();
    let ids = host.seed(&[
        TutorialDraft::new("A", "a"),
        TutorialDraft::new("B", "b").published(true),
    ]);
    let mut list = loaded_list(&host, ListSource::All);

    let first = list.begin_toggle(ids[0]).unwrap().unwrap();
    let second = list.begin_toggle(ids[1]).unwrap().unwrap();
    assert!(list.begin_toggle(ids[0]).unwrap().is_none());
    assert!(list.busy().is_busy(ids[0], BusyKind::Toggling));
    assert!(list.busy().is_busy(ids[1], BusyKind::Toggling));

    let first_result = host.transport.execute(first.request);
    let second_result = host.transport.execute(second.request);

    // Complete out of order.
    list.complete_toggle(second.ticket, second_result).unwrap();
    assert!(list.busy().is_busy(ids[0], BusyKind::Toggling));
    list.complete_toggle(first.ticket, first_result).unwrap();
    assert!(list.busy().is_empty());

    let published: Vec<bool> = list.tutorials().iter().map(|t| t.published).collect();
    assert_eq!(published, vec![true, false]);
}

#[test]
fn published_view_drops_unpublished_row() {
    let host = Host::new();
    let ids = host.seed(&[
        TutorialDraft::new("Live", "x").published(true),
        TutorialDraft::new("Draft", "y"),
    ]);
    let mut list = loaded_list(&host, ListSource::Published);
    assert_eq!(list.tutorials().len(), 1);

    let pending = list.begin_toggle(ids[0]).unwrap().unwrap();
    let result = host.transport.execute(pending.request);
    let updated = list.complete_toggle(pending.ticket, result).unwrap();
    assert!(!updated.applied().unwrap().published);
    assert!(list.tutorials().is_empty());
    assert!(host.api().list_published().unwrap().is_empty());
}

#[test]
fn row_delete_and_bulk_delete() {
    let host = Host::new();
    let ids = host.seed(&[
        TutorialDraft::new("A", "a"),
        TutorialDraft::new("B", "b"),
        TutorialDraft::new("C", "c"),
    ]);
    let mut list = loaded_list(&host, ListSource::All);

    let pending = list.begin_delete(ids[1]).unwrap();
    assert!(list.begin_delete(ids[1]).is_none());
    let result = host.transport.execute(pending.request);
    list.complete_delete(pending.ticket, result).unwrap();
    assert_eq!(list.tutorials().len(), 2);

    let pending = list.begin_delete_all().unwrap();
    assert!(list.is_deleting_all());
    assert!(list.begin_delete_all().is_none());
    let result = host.transport.execute(pending.request);
    list.complete_delete_all(pending.ticket, result).unwrap();
    assert!(!list.is_deleting_all());
    assert!(list.tutorials().is_empty());
    assert!(host.api().list_tutorials(None).unwrap().is_empty());
}

#[test]
fn detail_renders_not_found_for_missing_id() {
    let host = Host::new();
    let mut detail = DetailView::new(host.client.clone(), 9999);
    let pending = detail.mount();
    let result = host.transport.execute(pending.request);

    let err = detail.complete_load(pending.ticket, result).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(detail.state(), &DetailState::NotFound);
    assert_eq!(host.sink.errors().len(), 1);
}

#[test]
fn detail_toggle_then_edit_then_delete() {
    let host = Host::new();
    let ids = host.seed(&[TutorialDraft::new("Intro", "Basics")]);
    let id = ids[0];

    let mut detail = DetailView::new(host.client.clone(), id);
    let pending = detail.mount();
    let result = host.transport.execute(pending.request);
    detail.complete_load(pending.ticket, result).unwrap();

    let pending = detail.begin_toggle().unwrap().unwrap();
    let result = host.transport.execute(pending.request);
    detail.complete_toggle(pending.ticket, result).unwrap();
    assert!(detail.tutorial().unwrap().published);
    assert_eq!(detail.edit_route(), Route::Edit(id));

    let mut form = FormView::edit(host.client.clone(), detail.tutorial().unwrap());
    assert!(form.draft().published);
    form.set_title("Intro, revised");
    let pending = form.submit().unwrap();
    let result = host.transport.execute(pending.request);
    form.complete_submit(pending.ticket, result).unwrap();
    assert_eq!(host.api().get_tutorial(id).unwrap().title, "Intro, revised");

    let pending = detail.begin_delete().unwrap();
    let result = host.transport.execute(pending.request);
    let route = detail.complete_delete(pending.ticket, result).unwrap();
    assert_eq!(route, Outcome::Applied(Route::list()));
    assert!(host.api().get_tutorial(id).is_err());
}

#[test]
fn fetch_finishing_after_unmount_is_discarded() {
    let host = Host::new();
    host.seed(&[TutorialDraft::new("Intro", "Basics")]);

    let mut list = ListView::new(host.client.clone(), ListSource::All);
    let pending = list.mount();
    let result = host.transport.execute(pending.request);
    list.unmount();

    let outcome = list.complete_fetch(pending.ticket, result).unwrap();
    assert!(outcome.is_stale());
    assert!(list.tutorials().is_empty());
}

#[test]
fn failed_toggle_clears_busy_flag() {
    let host = Host::new();
    let ids = host.seed(&[TutorialDraft::new("Intro", "Basics")]);
    let mut list = loaded_list(&host, ListSource::All);

    let pending = list.begin_toggle(ids[0]).unwrap().unwrap();
    let err = list
        .complete_toggle(pending.ticket, Ok(HttpResponse::new(503, "")))
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(list.busy().is_empty());
    assert!(!list.tutorials()[0].published);
}
