//! Navigation targets and their paths.
//!
//! # Design
//! Paths mirror the web frontend: `/`, `/published`, `/tutorial/{id}`,
//! `/edit/{id}` and `/create`. Parsing accepts a trailing slash.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

/// A navigable screen and its parameters.
///
/// The list route carries the title filter in its query string so a search
/// survives a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List { title: Option<String> },
    Published,
    Detail(i64),
    Edit(i64),
    Create,
}

impl Route {
    pub fn list() -> Self {
        Route::List { title: None }
    }

    pub fn search(title: &str) -> Self {
        Route::List {
            title: (!title.is_empty()).then(|| title.to_string()),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::List { title: Some(title) } => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("title", title)
                    .finish();
                format!("/?{query}")
            }
            Route::List { title: None } => "/".to_string(),
            Route::Published => "/published".to_string(),
            Route::Detail(id) => format!("/tutorial/{id}"),
            Route::Edit(id) => format!("/edit/{id}"),
            Route::Create => "/create".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRoute(s.to_string());
        let (path, query) = s.split_once('?').unwrap_or((s, ""));
        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();

        match segments.as_slice() {
            [] => {
                let title = form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == "title")
                    .map(|(_, value)| value.into_owned());
                Ok(Route::search(title.as_deref().unwrap_or("")))
            }
            ["published"] => Ok(Route::Published),
            ["create"] => Ok(Route::Create),
            ["tutorial", id] => id.parse().map(Route::Detail).map_err(|_| unknown()),
            ["edit", id] => id.parse().map(Route::Edit).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}
