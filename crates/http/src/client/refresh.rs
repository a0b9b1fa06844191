//! The refresh call
//!
//! Exchanges the stored refresh token for a new pair. The call goes through
//! the bare HTTP client rather than [`AdminClient::execute`], so it can
//! never re-enter the refresh protocol, and it always carries the
//! teardown-suppressing marker.

use boutique_core::{RefreshError, RefreshOutcome};
use tokio::time::timeout;
use tracing::debug;

use super::{AdminClient, NO_REDIRECT_HEADER, REFRESH_TOKEN_HEADER};
use crate::types::TokenEnvelope;

impl AdminClient {
    /// Perform the single refresh call for this cycle. Persists the new
    /// pair before returning, so the queue drains against updated storage.
    pub(crate) async fn run_refresh(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.session.refresh_token().await else {
            return Err(RefreshError::MissingRefreshToken);
        };

        let request = self
            .http
            .post(format!("{}/auth/refresh", self.base_url))
            .header(REFRESH_TOKEN_HEADER, refresh_token)
            .header(NO_REDIRECT_HEADER, "1")
            .json(&serde_json::json!({}));

        let response = match timeout(self.refresh_timeout, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(RefreshError::Transport(err.to_string())),
            Err(_) => return Err(RefreshError::Timeout),
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(RefreshError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: TokenEnvelope = response
            .json()
            .await
            .map_err(|err| RefreshError::Transport(err.to_string()))?;
        let tokens = envelope
            .into_token_set()
            .ok_or(RefreshError::MalformedResponse)?;

        self.session.store_tokens(&tokens).await;
        debug!("access token refreshed and persisted");
        Ok(tokens.access_token)
    }
}
