use std::io::Write;
use std::sync::Mutex;

use tracing::warn;

use super::{GameCard, LOAD_FAILED_MESSAGE, NO_GAMES_MESSAGE, Renderer};

/// Plain-text renderer for an interactive terminal.
pub struct TerminalRenderer<W: Write + Send> {
    out: Mutex<W>,
    detailed: bool,
}

impl<W: Write + Send> TerminalRenderer<W> {
    /// `detailed` prints the status-dependent summary of each game instead of a one-line card.
    pub fn new(out: W, detailed: bool) -> Self {
        Self { out: Mutex::new(out), detailed }
    }

    fn write_block(&self, text: &str) {
        let Ok(mut out) = self.out.lock() else {
            warn!("Terminal output lock poisoned; dropping output");
            return;
        };
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn show_date(&self, label: &str) {
        self.write_block(&format!("=== {} ===", label));
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            self.write_block("Loading...");
        }
    }

    fn render_games(&self, cards: &[GameCard]) {
        let text = if self.detailed {
            cards.iter().map(|c| c.summary.trim_end()).collect::<Vec<_>>().join("\n---\n")
        } else {
            cards
                .iter()
                .map(|c| format!("{}  [{}]  {}  {}", c.matchup(), c.status, c.start_time, c.channel))
                .collect::<Vec<_>>()
                .join("\n")
        };
        self.write_block(&text);
    }

    fn render_empty(&self) {
        self.write_block(NO_GAMES_MESSAGE);
    }

    fn render_error(&self) {
        self.write_block(LOAD_FAILED_MESSAGE);
    }
}
