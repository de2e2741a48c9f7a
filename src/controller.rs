use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::info;

use crate::loader::{GameLoader, LoadOutcome};
use crate::navigator::{self, DateNavigator};
use crate::render::Renderer;
use crate::source::GameSource;

/// Ties date navigation to game loading and the date display.
pub struct Controller<S, R> {
    navigator: Mutex<DateNavigator>,
    loader: GameLoader<S, R>,
    renderer: Arc<R>,
}

impl<S, R> Controller<S, R>
where
    S: GameSource + 'static,
    R: Renderer,
{
    pub fn new(navigator: DateNavigator, source: Arc<S>, renderer: Arc<R>, timezone: chrono_tz::Tz) -> Self {
        let loader = GameLoader::new(source, Arc::clone(&renderer), timezone);
        Self { navigator: Mutex::new(navigator), loader, renderer }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.with_navigator(|nav| nav.current())
    }

    /// Show the current date and load its games.
    pub async fn start(&self) -> LoadOutcome {
        let (date, token) = self.with_navigator(|nav| {
            let date = nav.current();
            self.show(date);
            (date, self.loader.begin())
        });
        self.loader.load_reserved(date, token).await
    }

    /// Reload the games for the current date without moving.
    pub async fn refresh(&self) -> LoadOutcome {
        let (date, token) = self.with_navigator(|nav| (nav.current(), self.loader.begin()));
        self.loader.load_reserved(date, token).await
    }

    pub async fn next(&self) -> LoadOutcome {
        self.advance(1).await
    }

    pub async fn previous(&self) -> LoadOutcome {
        self.advance(-1).await
    }

    /// Move by `delta` days, update the date display, then load the new date's games.
    ///
    /// The date change, its display and the request token are taken together under the
    /// navigator lock, so overlapping navigations render in the order the dates changed.
    pub async fn advance(&self, delta: i64) -> LoadOutcome {
        let (date, token) = self.with_navigator(|nav| {
            let date = nav.advance_date(delta);
            self.show(date);
            (date, self.loader.begin())
        });
        info!(%date, delta, token, "Navigated");
        self.loader.load_reserved(date, token).await
    }

    fn show(&self, date: NaiveDate) {
        self.renderer.show_date(&navigator::format_date(date));
    }

    // Held only for synchronous work; never across an await.
    fn with_navigator<T>(&self, f: impl FnOnce(&mut DateNavigator) -> T) -> T {
        let mut nav = self.navigator.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut nav)
    }
}
