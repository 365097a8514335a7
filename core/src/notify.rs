//! User-facing notifications.
//!
//! The client and the view-state containers report through an injected
//! [`NotificationSink`] rather than a global toast. Hosts render notices
//! however they like; headless hosts and tests use [`MemorySink`].

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Emits notices as tracing events. The default sink.
///
/// Error notices go out at debug level; the client has already logged the
/// underlying failure at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => {
                tracing::info!(title = %notice.title, "{}", notice.description)
            }
            NoticeLevel::Error => {
                tracing::debug!(title = %notice.title, "{}", notice.description)
            }
        }
    }
}

/// Keeps every notice in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(notices) => notices.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .collect()
    }

    pub fn clear(&self) {
        match self.notices.lock() {
            Ok(mut notices) => notices.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
