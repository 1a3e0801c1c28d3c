//! HTTP client for the staking backend's admin endpoints.
//!
//! All transport-shape ambiguity is absorbed here: the NestJS response
//! envelope (`{ "data": ... }`) and the historical review-queue shapes
//! (`{pending, published}`, `{events}`, bare array) are normalized into the
//! canonical model before anything reaches the session core.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::auth::SessionHandle;
use crate::clients::RemoteStore;
use crate::error::ReviewError;
use crate::models::{
    DailyEvent, EventStatus, ExternalPicks, GeneratedPicks, ReviewQueue, SaveReviewRequest,
    SyncedUser,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, session: SessionHandle) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, ReviewError> {
        let response = self.bearer(self.client.get(self.url(path))).send().await?;
        self.read_body(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ReviewError> {
        let response = self
            .bearer(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        self.read_body(response).await
    }

    /// Status handling shared by every endpoint: a 401 clears the session
    /// handle and forces re-authentication; other rejections surface the
    /// backend's `message`/`error` field.
    async fn read_body(&self, response: reqwest::Response) -> Result<Value, ReviewError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            return Err(ReviewError::Unauthorized);
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("API error: {status}"));
            return Err(ReviewError::Persist(message));
        }
        Ok(unwrap_envelope(body))
    }

    /// `POST /auth/sync`: exchange a wallet-provider token for a backend
    /// user record. Called by the auth flow before the token is stored.
    pub async fn sync_user(&self, token: &str) -> Result<SyncedUser, ReviewError> {
        let response = self
            .client
            .post(self.url("/auth/sync"))
            .bearer_auth(token)
            .send()
            .await?;
        let body = self.read_body(response).await?;
        let user = body.get("user").cloned().unwrap_or(body);
        serde_json::from_value(user)
            .map_err(|e| ReviewError::decode(format!("sync response: {e}")))
    }
}

#[async_trait]
impl RemoteStore for BackendClient {
    async fn fetch_review_queue(&self) -> Result<ReviewQueue, ReviewError> {
        let body = self.get_json("/admin/review-event").await?;
        let queue = normalize_review_queue(body)?;
        debug!(
            pending = queue.pending.len(),
            published = queue.published.len(),
            "fetched review queue"
        );
        Ok(queue)
    }

    async fn save_draft(&self, request: &SaveReviewRequest) -> Result<(), ReviewError> {
        self.post_json("/admin/review-event", request).await?;
        Ok(())
    }

    async fn set_event_result(
        &self,
        event_id: &str,
        status: EventStatus,
        details: Option<&str>,
    ) -> Result<(), ReviewError> {
        let path = format!("/admin/daily-event/{event_id}/result");
        let body = serde_json::json!({ "status": status, "result": details });
        self.post_json(&path, &body).await?;
        Ok(())
    }

    async fn generate_daily_picks(
        &self,
        picks: &ExternalPicks,
    ) -> Result<GeneratedPicks, ReviewError> {
        let body = serde_json::json!({ "footballAiData": picks });
        let response = self.post_json("/ai/generate-daily-picks", &body).await?;
        serde_json::from_value(response)
            .map_err(|e| ReviewError::decode(format!("generate-daily-picks response: {e}")))
    }
}

/// Unwrap the interceptor envelope: `{ "data": ... }` becomes its payload,
/// anything else passes through unchanged.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Coerce the review-queue payload into one canonical shape.
///
/// The backend has shipped three shapes over time: `{pending, published}`,
/// `{events}` (pending only), and a bare array. Callers past this function
/// only ever see `ReviewQueue`.
fn normalize_review_queue(value: Value) -> Result<ReviewQueue, ReviewError> {
    let parse_events = |v: Value| -> Result<Vec<DailyEvent>, ReviewError> {
        serde_json::from_value(v).map_err(|e| ReviewError::decode(format!("review queue: {e}")))
    };

    match value {
        Value::Array(events) => Ok(ReviewQueue {
            pending: parse_events(Value::Array(events))?,
            published: Vec::new(),
        }),
        Value::Object(mut map) => {
            let pending = match (map.remove("pending"), map.remove("events")) {
                (Some(v @ Value::Array(_)), _) => parse_events(v)?,
                (_, Some(v @ Value::Array(_))) => parse_events(v)?,
                _ => Vec::new(),
            };
            let published = match map.remove("published") {
                Some(v @ Value::Array(_)) => parse_events(v)?,
                _ => Vec::new(),
            };
            Ok(ReviewQueue { pending, published })
        }
        other => Err(ReviewError::decode(format!(
            "review queue: expected object or array, got {other}"
        ))),
    }
}
