use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    /// Short tag used by the text renderer.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "ok",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

/// A user-visible, dismissible message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub kind: NoticeKind,
    pub message: String,
    pub dismissed: bool,
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            message: message.into(),
            dismissed: false,
            timestamp: Utc::now(),
        }
    }
}

/// Bounded, newest-first list of notices.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    capacity: usize,
    enabled: bool,
}

impl NoticeBoard {
    pub fn new(capacity: usize) -> Self {
        Self {
            notices: Vec::new(),
            capacity: capacity.max(1),
            enabled: true,
        }
    }

    /// A board that drops every notice. Callers still log the underlying event.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(1)
        }
    }

    /// Add a notice and return its id, or `None` when the board is disabled.
    pub fn push(&mut self, notice: Notice) -> Option<String> {
        if !self.enabled {
            debug!(message = %notice.message, "notice suppressed");
            return None;
        }
        let id = notice.id.clone();
        self.notices.insert(0, notice);
        self.notices.truncate(self.capacity);
        Some(id)
    }

    /// Dismiss one notice. Returns `false` for unknown or already dismissed ids.
    pub fn dismiss(&mut self, id: &str) -> bool {
        match self.notices.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.dismissed => {
                n.dismissed = true;
                true
            }
            _ => false,
        }
    }

    /// Dismiss every notice. Returns how many were still on screen.
    pub fn dismiss_all(&mut self) -> usize {
        let mut dismissed = 0;
        for n in self.notices.iter_mut().filter(|n| !n.dismissed) {
            n.dismissed = true;
            dismissed += 1;
        }
        dismissed
    }

    /// Notices still on screen, newest first.
    pub fn active(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| !n.dismissed)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(20)
    }
}
