pub mod game;
pub mod response;

pub use game::{GameRecord, Quarter};
pub use response::parse_games;
