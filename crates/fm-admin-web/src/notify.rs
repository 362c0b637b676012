//! Transient notifications shown on the next rendered page

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Upper bound on queued notifications; the oldest are dropped first
const MAX_PENDING: usize = 20;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

impl Level {
    /// CSS modifier for the toast
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
        }
    }
}

/// One toast message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: Level,
    /// Short headline
    pub title: String,
    /// Optional detail line
    pub description: Option<String>,
}

/// Shared queue of pending notifications, drained by the renderer
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl Notifications {
    /// Empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification
    pub fn push(&self, notification: Notification) {
        let mut queue = self.queue.lock();
        if queue.len() == MAX_PENDING {
            queue.pop_front();
        }
        queue.push_back(notification);
    }

    /// Queue a success message
    pub fn success(&self, title: impl Into<String>, description: Option<String>) {
        self.push(Notification {
            level: Level::Success,
            title: title.into(),
            description,
        });
    }

    /// Queue an error message
    pub fn error(&self, title: impl Into<String>, description: Option<String>) {
        self.push(Notification {
            level: Level::Error,
            title: title.into(),
            description,
        });
    }

    /// Take everything queued so far, oldest first
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    /// Copy of the queue without consuming it
    #[cfg(test)]
    pub(crate) fn pending(&self) -> Vec<Notification> {
        self.queue.lock().iter().cloned().collect()
    }
}
