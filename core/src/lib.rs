//! Client core for the tutorials service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the list, detail
//! and form view-state that every frontend needs. Presentation layers only
//! render what the views hold.
//!
//! # Design
//! - `TutorialClient` is stateless: it holds the base URL and the injected
//!   notification sink.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//!   `TutorialApi` pairs them over a `Transport` for hosts that want one call
//!   per operation.
//! - Views issue tickets for their requests and discard responses that
//!   arrive after unmount.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod types;
pub mod validate;
pub mod view;

pub use api::TutorialApi;
pub use client::TutorialClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use notify::{MemorySink, Notice, NoticeLevel, NotificationSink, TracingSink};
pub use types::{Tutorial, TutorialDraft};
pub use validate::{validate, Field, FieldError, ValidationErrors};
