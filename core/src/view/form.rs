//! The create and edit screens.
//!
//! # Design
//! A form is mounted when built. Validation runs before anything is
//! issued, so an invalid draft never produces a request. Only one submit is
//! in flight at a time; unmounting drops it, and a remounted form can
//! submit again.

use crate::client::TutorialClient;
use crate::error::{ApiError, Operation};
use crate::http::{HttpResponse, TransportError};
use crate::notify::Notice;
use crate::types::{Tutorial, TutorialDraft};
use crate::validate::{validate, Field, ValidationErrors};

use super::route::Route;
use super::ticket::{Action, Lifecycle, Outcome, Pending, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Nothing was sent; the field messages are on the form.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("a submission is already in flight")]
    InFlight,

    #[error("the form is not mounted")]
    Unmounted,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// State behind the create and edit screens.
#[derive(Debug)]
pub struct FormView {
    client: TutorialClient,
    mode: FormMode,
    draft: TutorialDraft,
    errors: Option<ValidationErrors>,
    submitting: bool,
    life: Lifecycle,
}

impl FormView {
    /// Empty form; `published` starts false.
    pub fn create(client: TutorialClient) -> Self {
        Self::with_draft(client, FormMode::Create, TutorialDraft::default())
    }

    /// Form seeded from `tutorial`.
    pub fn edit(client: TutorialClient, tutorial: &Tutorial) -> Self {
        Self::with_draft(client, FormMode::Edit(tutorial.id), tutorial.to_draft())
    }

    fn with_draft(client: TutorialClient, mode: FormMode, draft: TutorialDraft) -> Self {
        Self {
            client,
            mode,
            draft,
            errors: None,
            submitting: false,
            life: Lifecycle::mounted(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &TutorialDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.errors.as_ref().and_then(|e| e.for_field(field))
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.revalidate();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.revalidate();
    }

    pub fn set_published(&mut self, published: bool) {
        self.draft.published = published;
    }

    /// Show the form again after an unmount. The draft is kept.
    pub fn mount(&mut self) {
        self.life.mount();
        self.submitting = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.life.is_mounted()
    }

    pub fn unmount(&mut self) {
        self.life.unmount();
        self.submitting = false;
    }

    /// Once a submit has shown errors, keep them in step with the fields.
    fn revalidate(&mut self) {
        if self.errors.is_some() {
            self.errors = validate(&self.draft).err();
        }
    }

    /// Validate and, if the draft is clean, issue the create or update.
    pub fn submit(&mut self) -> Result<Pending, SubmitError> {
        if !self.life.is_mounted() {
            return Err(SubmitError::Unmounted);
        }
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        if let Err(errors) = validate(&self.draft) {
            self.errors = Some(errors.clone());
            return Err(SubmitError::Invalid(errors));
        }
        self.errors = None;

        let request = match self.mode {
            FormMode::Create => self.client.build_create_tutorial(&self.draft)?,
            FormMode::Edit(id) => self.client.build_update_tutorial(id, &self.draft)?,
        };
        self.submitting = true;
        Ok(self.life.issue(Action::Submit, request))
    }

    /// On success the form should be left for the returned route. On
    /// failure the draft is kept for correction.
    pub fn complete_submit(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome<Route>, ApiError> {
        if ticket.action() != Action::Submit {
            return Ok(Outcome::Stale);
        }
        let current = self.life.accepts(&ticket);
        let saved = match self.mode {
            FormMode::Create => self
                .client
                .receive(Operation::CreateTutorial, result)
                .and_then(|response| self.client.parse_create_tutorial(response)),
            FormMode::Edit(_) => self
                .client
                .receive(Operation::UpdateTutorial, result)
                .and_then(|response| self.client.parse_update_tutorial(response)),
        };
        if !current {
            return Ok(Outcome::Stale);
        }
        self.submitting = false;
        let saved = saved?;

        let notice = match self.mode {
            FormMode::Create => Notice::info(
                "Tutorial created",
                "Your tutorial has been created successfully.",
            ),
            FormMode::Edit(_) => Notice::info(
                "Tutorial updated",
                "Your tutorial has been updated successfully.",
            ),
        };
        tracing::debug!(id = saved.id, "tutorial saved");
        self.client.notify(notice);
        Ok(Outcome::Applied(Route::list()))
    }
}
