//! In-memory tutorials backend.
//!
//! Serves the same HTTP contract as the production API (paths under
//! `/api/tutorials/`, integer ids, full-replacement `PUT`, case-insensitive
//! title search) so clients can be exercised end-to-end without a database.

pub mod config;

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const TITLE_MAX_LEN: usize = 70;
pub const DESCRIPTION_MAX_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub published: bool,
}

#[derive(Debug, Deserialize)]
pub struct TutorialInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

impl TutorialInput {
    /// Field errors keyed by field name, empty when valid.
    pub fn errors(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut errors = BTreeMap::new();
        for (field, value, max) in [
            ("title", &self.title, TITLE_MAX_LEN),
            ("description", &self.description, DESCRIPTION_MAX_LEN),
        ] {
            if value.trim().is_empty() {
                errors.insert(field, vec!["This field may not be blank.".to_string()]);
            } else if value.chars().count() > max {
                errors.insert(
                    field,
                    vec![format!("Ensure this field has no more than {max} characters.")],
                );
            }
        }
        errors
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub title: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    tutorials: BTreeMap<i64, Tutorial>,
}

impl Store {
    pub fn insert(&mut self, input: TutorialInput) -> Tutorial {
        self.next_id += 1;
        let tutorial = Tutorial {
            id: self.next_id,
            title: input.title,
            description: input.description,
            published: input.published,
        };
        self.tutorials.insert(tutorial.id, tutorial.clone());
        tutorial
    }

    pub fn len(&self) -> usize {
        self.tutorials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tutorials.is_empty()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route(
            "/api/tutorials/",
            get(list_tutorials).post(create_tutorial).delete(delete_all_tutorials),
        )
        .route(
            "/api/tutorials",
            get(list_tutorials).post(create_tutorial).delete(delete_all_tutorials),
        )
        .route("/api/tutorials/published/", get(list_published))
        .route(
            "/api/tutorials/{id}/",
            get(get_tutorial).put(update_tutorial).delete(delete_tutorial),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "The tutorial does not exist" })),
    )
        .into_response()
}

fn invalid(input: &TutorialInput) -> Option<Response> {
    let errors = input.errors();
    if errors.is_empty() {
        return None;
    }
    tracing::debug!(?errors, "rejected tutorial payload");
    Some((StatusCode::BAD_REQUEST, Json(errors)).into_response())
}

async fn list_tutorials(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Tutorial>> {
    let store = db.read().await;
    let needle = query
        .title
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase());
    let tutorials = store
        .tutorials
        .values()
        .filter(|t| match &needle {
            Some(needle) => t.title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    Json(tutorials)
}

async fn list_published(State(db): State<Db>) -> Json<Vec<Tutorial>> {
    let store = db.read().await;
    Json(
        store
            .tutorials
            .values()
            .filter(|t| t.published)
            .cloned()
            .collect(),
    )
}

async fn create_tutorial(State(db): State<Db>, Json(input): Json<TutorialInput>) -> Response {
    if let Some(rejection) = invalid(&input) {
        return rejection;
    }
    let tutorial = db.write().await.insert(input);
    tracing::info!(id = tutorial.id, "tutorial created");
    (StatusCode::CREATED, Json(tutorial)).into_response()
}

async fn get_tutorial(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.tutorials.get(&id) {
        Some(tutorial) => Json(tutorial.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_tutorial(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TutorialInput>,
) -> Response {
    let mut store = db.write().await;
    let Some(tutorial) = store.tutorials.get_mut(&id) else {
        return not_found();
    };
    if let Some(rejection) = invalid(&input) {
        return rejection;
    }
    tutorial.title = input.title;
    tutorial.description = input.description;
    tutorial.published = input.published;
    Json(tutorial.clone()).into_response()
}

async fn delete_tutorial(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut store = db.write().await;
    match store.tutorials.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

async fn delete_all_tutorials(State(db): State<Db>) -> StatusCode {
    let mut store = db.write().await;
    let count = store.tutorials.len();
    store.tutorials.clear();
    tracing::info!(count, "tutorials deleted");
    StatusCode::NO_CONTENT
}
