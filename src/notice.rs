//! Transient status messages shown after a signup attempt.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// CSS class applied to the notice element.
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NoticeToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub token: NoticeToken,
}

/// Tracks which notice is on screen so an expiry timer can only hide the
/// notice it was started for.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    issued: Cell<u64>,
    current: Cell<Option<NoticeToken>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new notice, superseding whatever is showing.
    pub fn post(&self, kind: NoticeKind, text: impl Into<String>) -> Notice {
        let token = NoticeToken(self.issued.get() + 1);
        self.issued.set(token.0);
        self.current.set(Some(token));
        Notice {
            kind,
            text: text.into(),
            token,
        }
    }

    /// Clear the notice if `token` is still current. Returns whether the
    /// caller should hide it.
    pub fn expire(&self, token: NoticeToken) -> bool {
        if self.current.get() == Some(token) {
            self.current.set(None);
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<NoticeToken> {
        self.current.get()
    }
}
