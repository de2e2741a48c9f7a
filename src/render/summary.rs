use crate::model::GameRecord;
use crate::model::game::present;

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// Multi-line description of a game whose content depends on its status.
pub fn game_summary(game: &GameRecord) -> String {
    let status = present(&game.status).unwrap_or(UNKNOWN);
    let away = present(&game.away_team).unwrap_or(UNKNOWN);
    let home = present(&game.home_team).unwrap_or(UNKNOWN);
    let score = format!(
        "{}-{}",
        present(&game.away_team_score).unwrap_or(NOT_AVAILABLE),
        present(&game.home_team_score).unwrap_or(NOT_AVAILABLE)
    );
    let start = present(&game.date_time).unwrap_or(UNKNOWN);
    let channel = present(&game.channel).unwrap_or(UNKNOWN);

    match status {
        "Final" => format!(
            "Game Status: {status}\n{away} vs {home}\nFinal Score: {score}\nStart Time: {start}\nChannel: {channel}\nQuarter Scores: {}\n",
            quarter_scores(game)
        ),
        "InProgress" => format!(
            "Game Status: {status}\n{away} vs {home}\nCurrent Score: {score}\nLast Play: {}\nChannel: {channel}\n",
            present(&game.last_play).unwrap_or(NOT_AVAILABLE)
        ),
        "Scheduled" => format!("Game Status: {status}\n{away} vs {home}\nStart Time: {start}\nChannel: {channel}\n"),
        _ => format!("Game Status: {status}\n{away} vs {home}\nDetails are unavailable at the moment.\n"),
    }
}

/// Summaries of every game separated by `---`.
pub fn digest(games: &[GameRecord]) -> String {
    if games.is_empty() {
        return "No games available for today.".to_string();
    }
    games.iter().map(game_summary).collect::<Vec<_>>().join("\n---\n")
}

fn quarter_scores(game: &GameRecord) -> String {
    game.quarters
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|q| {
            format!(
                "Q{}: {}-{}",
                present(&q.number).unwrap_or("?"),
                present(&q.away_score).unwrap_or(NOT_AVAILABLE),
                present(&q.home_score).unwrap_or(NOT_AVAILABLE)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
