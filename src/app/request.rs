//! No-WASM application implementation
//!
//! Tokio-backed timer and a terminal surface that prints the board the way
//! the page would show it.

use std::cell::RefCell;
use std::io::Write;
use std::time::Duration;

use crate::interface::{ActivitySurface, Timer};
use crate::notice::{Notice, NoticeKind};
use crate::render::CatalogView;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Writes the board as plain text to any `Write` sink, stdout by default.
pub struct TerminalSurface<W: Write = std::io::Stdout> {
    out: RefCell<W>,
}

impl TerminalSurface {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::warn!("Failed to write to terminal: {e}");
        }
    }
}

impl<W: Write> ActivitySurface for TerminalSurface<W> {
    fn render_catalog(&self, view: &CatalogView) {
        let mut text = String::new();
        for card in &view.cards {
            text.push_str(&format!("== {} ==\n", card.activity));
            if !card.description.is_empty() {
                text.push_str(&format!("{}\n", card.description));
            }
            text.push_str(&format!("Schedule: {}\n", card.schedule));
            text.push_str(&format!("Availability: {} spots left\n", card.spots_left));
            if card.participants.is_empty() {
                text.push_str("No participants yet\n");
            } else {
                text.push_str("Participants:\n");
                for p in &card.participants {
                    text.push_str(&format!("  [{}] {} <{}>\n", p.initials, p.display, p.identity));
                }
            }
            text.push('\n');
        }
        self.emit(&text);
    }

    fn render_load_failure(&self, message: &str) {
        self.emit(&format!("{message}\n"));
    }

    fn show_notice(&self, notice: &Notice) {
        let label = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        self.emit(&format!("[{label}] {}\n", notice.text));
    }

    fn hide_notice(&self) {}

    fn reset_form(&self) {}
}
