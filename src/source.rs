use std::time::Duration;

use tracing::{error, info, info_span, instrument, warn};

use crate::error::FetchError;

/// Default games endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://zwey7a77wa67i7juwg4ektcjny0fcsww.lambda-url.us-east-1.on.aws/";

/// Something that can return the raw games response for a date.
///
/// Implementations block; the loader runs them on a blocking task.
pub trait GameSource: Send + Sync {
    fn fetch(&self, date_param: &str) -> Result<String, FetchError>;
}

/// Games endpoint reached over HTTP: `GET <endpoint>?date=<param>`.
#[derive(Clone)]
pub struct HttpGameSource {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpGameSource {
    /// Create a client for `endpoint`. `timeout` bounds the whole request; `None` waits indefinitely.
    ///
    /// Error statuses are not failures on their own: their body is returned and judged like
    /// any other response.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .into();
        Self { endpoint: endpoint.into(), agent }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpGameSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGameSource").field("endpoint", &self.endpoint).finish()
    }
}

impl GameSource for HttpGameSource {
    #[instrument(level = "info", skip(self), fields(endpoint = %self.endpoint))]
    fn fetch(&self, date_param: &str) -> Result<String, FetchError> {
        let response_result = {
            let _span = info_span!("games_fetch", date = %date_param).entered();
            self.agent.get(&self.endpoint).query("date", date_param).call()
        };
        match response_result {
            Ok(response) => {
                let status = response.status().as_u16();
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => {
                        if (200..300).contains(&status) {
                            info!(status, bytes = body.len(), "Fetched games response");
                        } else {
                            warn!(status, bytes = body.len(), "Games endpoint returned an error status");
                        }
                        Ok(body)
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read games response body");
                        Err(e.into())
                    }
                }
            }
            Err(e) => {
                error!(error = %e, url = %self.endpoint, "Games request failed");
                Err(e.into())
            }
        }
    }
}
