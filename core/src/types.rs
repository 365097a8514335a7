//! Domain DTOs for the tutorials API.
//!
//! # Design
//! Field names are the wire identifiers used by the backend (`id`, `title`,
//! `description`, `published`). These types are defined independently from
//! the mock-server crate; integration tests catch any schema drift between
//! the two.

use serde::{Deserialize, Serialize};

/// A tutorial as stored by the backend. `id` is server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tutorial {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub published: bool,
}

impl Tutorial {
    /// The full-replacement payload describing this tutorial's current fields.
    pub fn to_draft(&self) -> TutorialDraft {
        TutorialDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            published: self.published,
        }
    }

    /// Same as [`Tutorial::to_draft`] with `published` flipped.
    pub fn toggled_draft(&self) -> TutorialDraft {
        TutorialDraft {
            published: !self.published,
            ..self.to_draft()
        }
    }
}

/// Create and update payload. Updates always send every field; there is no
/// partial patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorialDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

impl TutorialDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            published: false,
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }
}

impl From<&Tutorial> for TutorialDraft {
    fn from(tutorial: &Tutorial) -> Self {
        tutorial.to_draft()
    }
}
