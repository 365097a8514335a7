//! The single-tutorial screen: load by id, then delete or toggle.

use crate::client::TutorialClient;
use crate::error::{ApiError, Operation};
use crate::http::{HttpResponse, TransportError};
use crate::notify::Notice;
use crate::types::Tutorial;

use super::list::published_notice;
use super::route::Route;
use super::ticket::{Action, Lifecycle, Outcome, Pending, Ticket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(Tutorial),
    /// Deleted, or never existed.
    NotFound,
    /// The request itself failed; see the message.
    Failed(String),
}

/// State behind the single-tutorial screen.
#[derive(Debug)]
pub struct DetailView {
    client: TutorialClient,
    id: i64,
    state: DetailState,
    deleting: bool,
    toggling: bool,
    life: Lifecycle,
}

impl DetailView {
    pub fn new(client: TutorialClient, id: i64) -> Self {
        Self {
            client,
            id,
            state: DetailState::Loading,
            deleting: false,
            toggling: false,
            life: Lifecycle::default(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn tutorial(&self) -> Option<&Tutorial> {
        match &self.state {
            DetailState::Loaded(tutorial) => Some(tutorial),
            _ => None,
        }
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn is_toggling(&self) -> bool {
        self.toggling
    }

    pub fn edit_route(&self) -> Route {
        Route::Edit(self.id)
    }

    pub fn mount(&mut self) -> Pending {
        self.life.mount();
        self.state = DetailState::Loading;
        self.deleting = false;
        self.toggling = false;
        let request = self.client.build_get_tutorial(self.id);
        self.life.issue(Action::Fetch, request)
    }

    pub fn unmount(&mut self) {
        self.life.unmount();
    }

    pub fn complete_load(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome, ApiError> {
        if ticket.action() != Action::Fetch {
            return Ok(Outcome::Stale);
        }
        let current = self.life.accepts(&ticket);
        let loaded = self
            .client
            .receive(Operation::GetTutorial, result)
            .and_then(|response| self.client.parse_get_tutorial(self.id, response));
        if !current {
            return Ok(Outcome::Stale);
        }

        match loaded {
            Ok(tutorial) => {
                self.state = DetailState::Loaded(tutorial);
                Ok(Outcome::Applied(()))
            }
            Err(err) => {
                self.state = if err.is_not_found() {
                    DetailState::NotFound
                } else {
                    DetailState::Failed(err.to_string())
                };
                Err(err)
            }
        }
    }

    /// `None` until the tutorial is loaded, or while a delete is running.
    pub fn begin_delete(&mut self) -> Option<Pending> {
        if !self.life.is_mounted() || self.tutorial().is_none() || self.deleting {
            return None;
        }
        self.deleting = true;
        let request = self.client.build_delete_tutorial(self.id);
        Some(self.life.issue(Action::Delete(self.id), request))
    }

    /// On success the view should be left for the returned route.
    pub fn complete_delete(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome<Route>, ApiError> {
        if ticket.action() != Action::Delete(self.id) {
            return Ok(Outcome::Stale);
        }
        let current = self.life.accepts(&ticket);
        let deleted = self
            .client
            .receive(Operation::DeleteTutorial, result)
            .and_then(|response| self.client.parse_delete_tutorial(response));
        if !current {
            return Ok(Outcome::Stale);
        }
        self.deleting = false;
        deleted?;

        tracing::info!(id = self.id, "tutorial deleted");
        self.client.notify(Notice::info(
            "Tutorial deleted",
            "The tutorial has been deleted successfully.",
        ));
        Ok(Outcome::Applied(Route::list()))
    }

    /// `None` until the tutorial is loaded, or while a toggle is running.
    pub fn begin_toggle(&mut self) -> Result<Option<Pending>, ApiError> {
        if !self.life.is_mounted() || self.toggling {
            return Ok(None);
        }
        let Some(tutorial) = self.tutorial() else {
            return Ok(None);
        };
        let request = self.client.build_toggle_published(tutorial)?;
        self.toggling = true;
        Ok(Some(self.life.issue(Action::Toggle(self.id), request)))
    }

    pub fn complete_toggle(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome<Tutorial>, ApiError> {
        if ticket.action() != Action::Toggle(self.id) {
            return Ok(Outcome::Stale);
        }
        let current = self.life.accepts(&ticket);
        let updated = self
            .client
            .receive(Operation::UpdateTutorial, result)
            .and_then(|response| self.client.parse_update_tutorial(response));
        if !current {
            return Ok(Outcome::Stale);
        }
        self.toggling = false;
        let updated = updated?;

        self.state = DetailState::Loaded(updated.clone());
        self.client.notify(published_notice(&updated));
        Ok(Outcome::Applied(updated))
    }
}
