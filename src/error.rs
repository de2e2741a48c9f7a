/// Everything that can go wrong between issuing a request and having a list of games.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Response has no data field")]
    MissingData,
    #[error("Fetch task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// Missing data is shown as the empty state rather than as a failure.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, FetchError::MissingData)
    }
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
