//! Client for the upstream Football-AI prediction service.
//!
//! The backend has no route to this service, so the client tier fetches the
//! day's safe picks directly and forwards them to the backend for storage.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::clients::PredictionSource;
use crate::error::ReviewError;
use crate::models::ExternalPicks;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct FootballAiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for FootballAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootballAiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FootballAiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PredictionSource for FootballAiClient {
    async fn fetch_safe_picks(&self) -> Result<ExternalPicks, ReviewError> {
        let url = format!("{}/safe-picks/today", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReviewError::decode(format!(
                "football-ai returned {status}"
            )));
        }
        let picks: ExternalPicks = response.json().await?;
        info!(count = picks.picks.len(), "fetched safe picks");
        Ok(picks)
    }

    fn source_name(&self) -> &str {
        "football-ai"
    }
}
