//! View-state containers for the list, detail and form screens.
//!
//! # Design
//! Views follow the same host-does-IO split as `TutorialClient`. An action
//! (`mount`, `begin_*`, `submit`) updates local flags and hands back a
//! [`Pending`] request; the host executes it and returns the result to the
//! matching `complete_*` method along with the [`Ticket`]. Several requests
//! may be in flight at once. A result whose ticket the view no longer
//! accepts comes back as [`Outcome::Stale`] and leaves the view untouched,
//! though its error is still reported.
//!
//! Views never share state; each one fetches for itself.

mod busy;
mod detail;
mod form;
mod list;
mod route;
mod ticket;

pub use busy::{BusyFlags, BusyKind};
pub use detail::{DetailState, DetailView};
pub use form::{FormMode, FormView, SubmitError};
pub use list::{ListSource, ListView};
pub use route::{Route, UnknownRoute};
pub use ticket::{Action, Outcome, Pending, Ticket};
