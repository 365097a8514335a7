//! One call per operation over a [`Transport`].
//!
//! Each method is exactly one build, one round-trip and one parse. Nothing
//! is retried.

use crate::client::TutorialClient;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Tutorial, TutorialDraft};

#[derive(Debug, Clone)]
pub struct TutorialApi<T> {
    client: TutorialClient,
    transport: T,
}

impl<T: Transport> TutorialApi<T> {
    pub fn new(client: TutorialClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TutorialClient {
        &self.client
    }

    /// All tutorials, or those whose title matches `title` when it is
    /// non-empty. Matching is decided by the backend.
    pub fn list_tutorials(&self, title: Option<&str>) -> Result<Vec<Tutorial>, ApiError> {
        let response = self.send(
            Operation::ListTutorials,
            self.client.build_list_tutorials(title),
        )?;
        self.client.parse_list_tutorials(response)
    }

    pub fn list_published(&self) -> Result<Vec<Tutorial>, ApiError> {
        let response = self.send(Operation::ListPublished, self.client.build_list_published())?;
        self.client.parse_list_published(response)
    }

    pub fn get_tutorial(&self, id: i64) -> Result<Tutorial, ApiError> {
        let response = self.send(Operation::GetTutorial, self.client.build_get_tutorial(id))?;
        self.client.parse_get_tutorial(id, response)
    }

    pub fn create_tutorial(&self, draft: &TutorialDraft) -> Result<Tutorial, ApiError> {
        let request = self.client.build_create_tutorial(draft)?;
        let response = self.send(Operation::CreateTutorial, request)?;
        self.client.parse_create_tutorial(response)
    }

    pub fn update_tutorial(&self, id: i64, draft: &TutorialDraft) -> Result<Tutorial, ApiError> {
        let request = self.client.build_update_tutorial(id, draft)?;
        let response = self.send(Operation::UpdateTutorial, request)?;
        self.client.parse_update_tutorial(response)
    }

    pub fn delete_tutorial(&self, id: i64) -> Result<(), ApiError> {
        let response = self.send(
            Operation::DeleteTutorial,
            self.client.build_delete_tutorial(id),
        )?;
        self.client.parse_delete_tutorial(response)
    }

    pub fn delete_all_tutorials(&self) -> Result<(), ApiError> {
        let response = self.send(
            Operation::DeleteAllTutorials,
            self.client.build_delete_all_tutorials(),
        )?;
        self.client.parse_delete_all_tutorials(response)
    }

    /// `update_tutorial` with `published` flipped. Last write wins on the
    /// whole record.
    pub fn toggle_published(&self, tutorial: &Tutorial) -> Result<Tutorial, ApiError> {
        self.update_tutorial(tutorial.id, &tutorial.toggled_draft())
    }

    fn send(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.client
            .receive(operation, self.transport.execute(request))
    }
}
