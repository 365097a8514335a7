//! Error types for the tutorials API client.
//!
//! # Design
//! Every non-2xx response and every transport failure becomes
//! `RequestFailed`, tagged with the operation that was attempted. Fetching a
//! single tutorial is the exception: any failed status there becomes
//! `NotFound`, which detail views render as "deleted or never existed".

use std::fmt;

/// The API operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListTutorials,
    ListPublished,
    GetTutorial,
    CreateTutorial,
    UpdateTutorial,
    DeleteTutorial,
    DeleteAllTutorials,
}

impl Operation {
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::ListTutorials => "list tutorials",
            Operation::ListPublished => "list published tutorials",
            Operation::GetTutorial => "fetch tutorial",
            Operation::CreateTutorial => "create tutorial",
            Operation::UpdateTutorial => "update tutorial",
            Operation::DeleteTutorial => "delete tutorial",
            Operation::DeleteAllTutorials => "delete all tutorials",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors returned by `TutorialClient` parse methods and `TutorialApi`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx status, or no response at all (`status` is `None`).
    #[error("Failed to {operation}: {}", describe(.status, .message))]
    RequestFailed {
        operation: Operation,
        status: Option<u16>,
        message: String,
    },

    /// The tutorial could not be fetched. It may have been deleted or does
    /// not exist.
    #[error("Tutorial {id} not found (HTTP {status})")]
    NotFound { id: i64, status: u16 },

    /// A 2xx response whose body is not the expected JSON.
    #[error("Failed to {operation}: invalid response body: {message}")]
    Decode {
        operation: Operation,
        message: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("Failed to {operation}: could not encode request: {message}")]
    Encode {
        operation: Operation,
        message: String,
    },
}

fn describe(status: &Option<u16>, message: &str) -> String {
    match (status, message.is_empty()) {
        (Some(status), true) => format!("HTTP {status}"),
        (Some(status), false) => format!("HTTP {status}: {message}"),
        (None, _) => message.to_string(),
    }
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::RequestFailed { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Encode { operation, .. } => *operation,
            ApiError::NotFound { .. } => Operation::GetTutorial,
        }
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => *status,
            ApiError::NotFound { status, .. } => Some(*status),
            ApiError::Decode { .. } | ApiError::Encode { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
