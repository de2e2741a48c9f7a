use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One scheduled game as returned by the games endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameRecord {
    #[serde(rename = "GameID", default, deserialize_with = "lenient_string")]
    pub game_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub away_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub home_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub away_team_score: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub home_team_score: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_play: Option<String>,
    #[serde(default)]
    pub quarters: Option<Vec<Quarter>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quarter {
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub away_score: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub home_score: Option<String>,
}

/// Returns the field value, treating an empty string the same as a missing one.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// Endpoint payloads are loosely typed: scores and ids arrive as numbers, names as strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
