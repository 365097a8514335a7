//! Tickets tie an asynchronous response back to the view that asked for it.
//!
//! # Design
//! Every view owns a `Lifecycle` with a process-unique view number. A
//! ticket records that number, the mount generation and a sequence. A
//! ticket is accepted only by the view that issued it, only while that view
//! is still mounted under the same generation. Anything else is stale.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::http::HttpRequest;

static NEXT_VIEW: AtomicU64 = AtomicU64::new(1);

/// What a pending request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Delete(i64),
    Toggle(i64),
    DeleteAll,
    Submit,
}

/// Identifies one issued request. Must be handed back to the view that
/// issued it.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    action: Action,
    view: u64,
    generation: u64,
    seq: u64,
}

impl Ticket {
    pub fn action(&self) -> Action {
        self.action
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}

/// A request for the host to execute, and the ticket to complete it with.
#[derive(Debug)]
pub struct Pending {
    pub request: HttpRequest,
    pub ticket: Ticket,
}

/// Result of completing a ticket that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Applied(T),
    /// The view was unmounted or the request superseded; nothing changed.
    Stale,
}

impl<T> Outcome<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Outcome::Stale)
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Stale => None,
        }
    }
}

/// Mount state and ticket bookkeeping shared by every view.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    view: u64,
    mounted: bool,
    generation: u64,
    next_seq: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            view: NEXT_VIEW.fetch_add(1, Ordering::Relaxed),
            mounted: false,
            generation: 0,
            next_seq: 0,
        }
    }
}

impl Lifecycle {
    pub(crate) fn mounted() -> Self {
        Self {
            mounted: true,
            ..Self::default()
        }
    }

    pub(crate) fn mount(&mut self) {
        self.mounted = true;
    }

    /// Everything issued before this point becomes stale.
    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub(crate) fn issue(&mut self, action: Action, request: HttpRequest) -> Pending {
        self.next_seq += 1;
        Pending {
            request,
            ticket: Ticket {
                action,
                view: self.view,
                generation: self.generation,
                seq: self.next_seq,
            },
        }
    }

    pub(crate) fn accepts(&self, ticket: &Ticket) -> bool {
        if ticket.view != self.view {
            tracing::debug!(action = ?ticket.action, "discarding response issued by another view");
            return false;
        }
        if !self.mounted || ticket.generation != self.generation {
            tracing::debug!(action = ?ticket.action, "discarding stale response");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "/".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn unmount_invalidates_earlier_tickets() {
        let mut life = Lifecycle::mounted();
        let old = life.issue(Action::Fetch, request());
        life.unmount();
        life.mount();
        let new = life.issue(Action::Fetch, request());

        assert!(!life.accepts(&old.ticket));
        assert!(life.accepts(&new.ticket));
        assert!(new.ticket.seq() > old.ticket.seq());
    }

    #[test]
    fn unmounted_view_accepts_nothing() {
        let mut life = Lifecycle::mounted();
        let pending = life.issue(Action::DeleteAll, request());
        life.unmount();
        assert!(!life.accepts(&pending.ticket));
        assert!(!life.is_mounted());
    }

    #[test]
    fn ticket_from_another_view_is_rejected() {
        let mut first = Lifecycle::mounted();
        let mut second = Lifecycle::mounted();
        let foreign = second.issue(Action::Submit, request());
        let own = first.issue(Action::Submit, request());

        assert_eq!(foreign.ticket.seq(), own.ticket.seq());
        assert!(!first.accepts(&foreign.ticket));
        assert!(first.accepts(&own.ticket));
        assert!(second.accepts(&foreign.ticket));
    }
}
