pub mod html;
pub mod summary;
pub mod terminal;

use crate::model::GameRecord;
use crate::model::game::present;

pub use html::HtmlRenderer;
pub use terminal::TerminalRenderer;

pub const NO_GAMES_MESSAGE: &str = "No games data available.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load games. Please try again later.";

const TBD: &str = "TBD";
const NOT_AVAILABLE: &str = "N/A";

/// Presentation surface driven by the loader and controller.
///
/// Methods take `&self`; implementations serialize their own output so overlapping loads
/// can share one renderer.
pub trait Renderer: Send + Sync {
    fn show_date(&self, label: &str);
    fn set_loading(&self, loading: bool);
    fn render_games(&self, cards: &[GameCard]);
    fn render_empty(&self);
    fn render_error(&self);
}

/// Display fields for one game, with placeholders filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameCard {
    pub away_team: String,
    pub home_team: String,
    pub status: String,
    pub start_time: String,
    pub channel: String,
    pub summary: String,
}

impl GameCard {
    /// "Away vs Home"
    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.away_team, self.home_team)
    }
}

impl From<&GameRecord> for GameCard {
    fn from(game: &GameRecord) -> Self {
        let or = |field: &Option<String>, placeholder: &str| present(field).unwrap_or(placeholder).to_string();
        GameCard {
            away_team: or(&game.away_team, TBD),
            home_team: or(&game.home_team, TBD),
            status: or(&game.status, NOT_AVAILABLE),
            start_time: or(&game.start_time, TBD),
            channel: or(&game.channel, TBD),
            summary: summary::game_summary(game),
        }
    }
}

pub fn cards(games: &[GameRecord]) -> Vec<GameCard> {
    games.iter().map(GameCard::from).collect()
}
