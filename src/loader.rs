use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, error, info, instrument};

use crate::error::FetchError;
use crate::filter;
use crate::model::{self, GameRecord};
use crate::navigator;
use crate::render::{self, Renderer};
use crate::source::GameSource;

/// How a load settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This many game cards were rendered.
    Rendered(usize),
    /// The empty-state message was rendered.
    Empty,
    /// The failure message was rendered.
    Failed,
    /// A newer load was issued before this one settled; nothing was rendered.
    Stale,
}

/// Fetches, filters and renders the games for a date.
pub struct GameLoader<S, R> {
    source: Arc<S>,
    renderer: Arc<R>,
    timezone: Tz,
    // Token of the most recently issued load. Held while issuing and while settling so a
    // load never renders after a newer one has started.
    latest: Mutex<u64>,
}

impl<S, R> GameLoader<S, R>
where
    S: GameSource + 'static,
    R: Renderer,
{
    /// `timezone` decides which calendar day a game belongs to.
    pub fn new(source: Arc<S>, renderer: Arc<R>, timezone: Tz) -> Self {
        Self { source, renderer, timezone, latest: Mutex::new(0) }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Load and render the games for `date`. Only the most recently issued load renders; the
    /// loading indicator is cleared whenever that load settles.
    pub async fn load_games_for_date(&self, date: NaiveDate) -> LoadOutcome {
        let token = self.begin();
        self.load_reserved(date, token).await
    }

    /// Issue a request token and show the loading indicator.
    ///
    /// Callers that change the date call this in the same critical section, so token order
    /// matches the order in which dates were chosen.
    pub fn begin(&self) -> u64 {
        let mut latest = self.lock_latest();
        *latest += 1;
        self.renderer.set_loading(true);
        *latest
    }

    /// Fetch and render `date` under a token obtained from [`GameLoader::begin`].
    #[instrument(level = "info", skip_all, fields(%date, token = token))]
    pub async fn load_reserved(&self, date: NaiveDate, token: u64) -> LoadOutcome {
        let result = self.fetch_games(date).await;
        let outcome = self.settle(token, result);
        info!(?outcome, "Games load settled");
        outcome
    }

    fn settle(&self, token: u64, result: Result<Vec<GameRecord>, FetchError>) -> LoadOutcome {
        let latest = self.lock_latest();
        if token != *latest {
            debug!(token, latest = *latest, "Discarding response for superseded request");
            return LoadOutcome::Stale;
        }

        let outcome = match result {
            Ok(games) if games.is_empty() => {
                self.renderer.render_empty();
                LoadOutcome::Empty
            }
            Ok(games) => {
                self.renderer.render_games(&render::cards(&games));
                LoadOutcome::Rendered(games.len())
            }
            Err(e) if e.is_missing_data() => {
                self.renderer.render_empty();
                LoadOutcome::Empty
            }
            Err(e) => {
                error!(error = %e, "Error fetching games");
                self.renderer.render_error();
                LoadOutcome::Failed
            }
        };
        self.renderer.set_loading(false);
        outcome
    }

    fn lock_latest(&self) -> MutexGuard<'_, u64> {
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn fetch_games(&self, date: NaiveDate) -> Result<Vec<GameRecord>, FetchError> {
        // The source blocks on network I/O; give the task its own handle to it.
        let source = Arc::clone(&self.source);
        let param = navigator::request_param(date, self.timezone);
        let body = tokio::task::spawn_blocking(move || source.fetch(&param)).await??;
        let games = model::parse_games(&body)?;
        Ok(filter::games_on_day(games, date, self.timezone))
    }
}
