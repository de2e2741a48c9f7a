use std::sync::{Mutex, MutexGuard};

use askama::Template;
use tracing::error;

use super::{GameCard, LOAD_FAILED_MESSAGE, NO_GAMES_MESSAGE, Renderer};

/// State of the host page: the date label, whether the loader is visible, and the
/// inner HTML of the games container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    pub date_label: String,
    pub loading: bool,
    pub games_html: String,
}

/// Which part of the page an update touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageChange {
    Date,
    Loading,
    Games,
}

type PageListener = Box<dyn Fn(&PageState, PageChange) + Send + Sync>;

#[derive(Template)]
#[template(path = "games/game_cards.html")]
struct GameCardsTemplate<'a> {
    cards: &'a [GameCard],
}

#[derive(Template)]
#[template(path = "games/message.html")]
struct MessageTemplate<'a> {
    message: &'a str,
}

/// Renders game cards as the HTML fragments the viewer page expects.
#[derive(Default)]
pub struct HtmlRenderer {
    page: Mutex<PageState>,
    listener: Option<PageListener>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `listener` with the new page state after every update.
    pub fn with_listener(listener: impl Fn(&PageState, PageChange) + Send + Sync + 'static) -> Self {
        Self { page: Mutex::default(), listener: Some(Box::new(listener)) }
    }

    /// Copy of the current page state.
    pub fn snapshot(&self) -> PageState {
        self.page().clone()
    }

    fn page(&self) -> MutexGuard<'_, PageState> {
        // A panic while holding the lock leaves plain strings behind; keep using them.
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update(&self, change: PageChange, apply: impl FnOnce(&mut PageState)) {
        let snapshot = {
            let mut page = self.page();
            apply(&mut page);
            page.clone()
        };
        if let Some(listener) = &self.listener {
            listener(&snapshot, change);
        }
    }

    fn set_games_html(&self, template: &impl Template) {
        match template.render() {
            Ok(html) => self.update(PageChange::Games, |page| page.games_html = html),
            Err(e) => error!(error = %e, "Failed to render games template"),
        }
    }

    fn set_message(&self, message: &str) {
        self.set_games_html(&MessageTemplate { message });
    }
}

impl Renderer for HtmlRenderer {
    fn show_date(&self, label: &str) {
        self.update(PageChange::Date, |page| page.date_label = label.to_string());
    }

    fn set_loading(&self, loading: bool) {
        self.update(PageChange::Loading, |page| page.loading = loading);
    }

    fn render_games(&self, cards: &[GameCard]) {
        self.set_games_html(&GameCardsTemplate { cards });
    }

    fn render_empty(&self) {
        self.set_message(NO_GAMES_MESSAGE);
    }

    fn render_error(&self) {
        self.set_message(LOAD_FAILED_MESSAGE);
    }
}
