//! Boutique admin API client
//!
//! One request pipeline for every call: read the current access token and
//! decorate the request, send it, classify failures, and on a first 401 run
//! the refresh protocol before replaying the request with the new token.

pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod orders;
pub mod refresh;
pub mod vouchers;

use std::sync::Arc;
use std::time::Duration;

use boutique_core::{
    InvalidationReason, MemorySessionStore, RefreshRole, SessionEvent, SessionManager,
};
use reqwest::header::{self, HeaderValue};
use reqwest::{ClientBuilder, Method, Request, StatusCode};
use tokio::sync::broadcast;
use tracing::debug;

use crate::types::ApiResponse;
use error::ClientError;

/// Request-scoped marker header. Its presence suppresses session teardown
/// (and the resulting invalidation event) on 401/403 for that call; the
/// error itself still propagates.
pub const NO_REDIRECT_HEADER: &str = "x-no-redirect";

/// Header carrying the refresh token on the refresh call. The refresh
/// credential is never presented as a bearer token.
pub(crate) const REFRESH_TOKEN_HEADER: &str = "RefreshToken";

const DEFAULT_USER_AGENT: &str = "boutique-admin/0.1.0";
const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Boutique admin API client
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    refresh_timeout: Duration,
}

impl AdminClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> AdminClientBuilder {
        AdminClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session manager backing this client
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    /// Create a request builder relative to the base URL. Authentication is
    /// attached later, on the send path.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, url)
    }

    /// Execute a request through the full pipeline.
    ///
    /// The current access token (when present) is attached as a bearer
    /// header unless the caller already set one. A first 401 enters the
    /// refresh protocol and, on success, the request is replayed once with
    /// the new token injected directly; a 401 on the replay is terminal. A
    /// 403 tears the session down unless the request carries
    /// [`NO_REDIRECT_HEADER`]. Every other failure propagates unchanged.
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let mut request = request.build()?;
        let suppress_teardown = request.headers().contains_key(NO_REDIRECT_HEADER);

        if !request.headers().contains_key(header::AUTHORIZATION) {
            if let Some(token) = self.session.access_token().await {
                request
                    .headers_mut()
                    .insert(header::AUTHORIZATION, bearer_value(&token)?);
            }
        }

        // Streaming bodies cannot be replayed; such requests skip the
        // refresh protocol and surface the auth failure as-is.
        let replay = request.try_clone();

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response.text().await.unwrap_or_else(|_| status.to_string());

        match status {
            StatusCode::UNAUTHORIZED => {
                let Some(mut request) = replay else {
                    return Err(ClientError::from_status(status, message));
                };
                debug!(path = %request.url().path(), "401 received, entering refresh protocol");
                let token = self.fresh_access_token(suppress_teardown).await?;
                // Inject the new token directly rather than re-reading the
                // store, avoiding a read-after-write race.
                request
                    .headers_mut()
                    .insert(header::AUTHORIZATION, bearer_value(&token)?);
                self.replay(request, suppress_teardown).await
            }
            StatusCode::FORBIDDEN => {
                if !suppress_teardown {
                    self.session.invalidate(InvalidationReason::Forbidden).await;
                }
                Err(ClientError::from_status(status, message))
            }
            _ => Err(ClientError::from_status(status, message)),
        }
    }

    /// Execute a request whose payload is irrelevant beyond the envelope
    /// acknowledging it (deletes, locks, cancels).
    pub(crate) async fn execute_ack(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), ClientError> {
        let _ack: ApiResponse<serde_json::Value> = self.execute(request).await?;
        Ok(())
    }

    /// Reissue a request already carrying a fresh token. A second 401 is
    /// terminal: no further refresh is attempted for this logical request.
    async fn replay<T: serde::de::DeserializeOwned>(
        &self,
        request: Request,
        suppress_teardown: bool,
    ) -> Result<T, ClientError> {
        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        if status == StatusCode::FORBIDDEN && !suppress_teardown {
            self.session.invalidate(InvalidationReason::Forbidden).await;
        }
        Err(ClientError::from_status(status, message))
    }

    /// Obtain a fresh access token: lead the refresh call, or queue behind
    /// the one already in flight and share its outcome.
    async fn fresh_access_token(&self, suppress_teardown: bool) -> Result<String, ClientError> {
        match self.session.begin_refresh() {
            RefreshRole::Follower(outcome) => {
                let outcome = outcome.await.map_err(|_| {
                    ClientError::UnexpectedResponse("refresh leader dropped".to_owned())
                })?;
                Ok(outcome?)
            }
            RefreshRole::Leader => {
                let outcome = self.run_refresh().await;
                // Settle the cycle (draining the queue) before any session
                // teardown so every waiter observes the same outcome.
                self.session.complete_refresh(&outcome);
                if outcome.is_err() && !suppress_teardown {
                    self.session
                        .invalidate(InvalidationReason::Unauthorized)
                        .await;
                }
                Ok(outcome?)
            }
        }
    }
}

fn bearer_value(token: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ClientError::Configuration("access token is not a valid header value".into()))
}

/// Builder for AdminClient
#[derive(Default)]
pub struct AdminClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    refresh_timeout: Option<Duration>,
    user_agent: Option<String>,
    session: Option<Arc<SessionManager>>,
}

impl AdminClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bound the refresh call separately; a timed-out refresh is treated as
    /// a failed one
    pub fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Inject a session manager (shared with the UI shell). Defaults to a
    /// fresh in-memory session.
    pub fn session(mut self, session: Arc<SessionManager>) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AdminClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url: {e}")))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent(DEFAULT_USER_AGENT);
        }

        let session = self
            .session
            .unwrap_or_else(|| Arc::new(SessionManager::new(Arc::new(MemorySessionStore::new()))));

        Ok(AdminClient {
            http: client_builder.build()?,
            base_url,
            session,
            refresh_timeout: self.refresh_timeout.unwrap_or(DEFAULT_REFRESH_TIMEOUT),
        })
    }
}
