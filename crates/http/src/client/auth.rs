//! Authentication API client methods

use boutique_core::{InvalidationReason, UserProfile};
use reqwest::Method;

use super::{AdminClient, NO_REDIRECT_HEADER};
use crate::client::error::ClientError;
use crate::types::{LoginRequest, TokenEnvelope};

impl AdminClient {
    /// Authenticate with username/password and persist the session.
    ///
    /// The login call carries the teardown-suppressing marker: a bad
    /// password must surface as an error to the form, not clear whatever
    /// session state exists. On success the token pair is stored, the
    /// profile is fetched and stored under the `user` key, and the profile
    /// is returned.
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<UserProfile, ClientError> {
        let request = self
            .request(Method::POST, "/auth/login")
            .header(NO_REDIRECT_HEADER, "1")
            .json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            });

        let envelope: TokenEnvelope = self.execute(request).await?;
        let tokens = envelope.into_token_set().ok_or_else(|| {
            ClientError::AuthenticationFailed("login response carried no access token".into())
        })?;
        self.session.store_tokens(&tokens).await;

        let profile = self.profile().await?;
        self.session.store_session(&tokens, Some(&profile)).await;
        Ok(profile)
    }

    /// Fetch the authenticated staff profile. Tolerates payloads with or
    /// without the `result` envelope.
    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        let value: serde_json::Value =
            self.execute(self.request(Method::GET, "/user/getUser")).await?;
        let payload = match value.get("result") {
            Some(result) if !result.is_null() => result.clone(),
            _ => value,
        };
        Ok(serde_json::from_value(payload)?)
    }

    /// Drop the session locally and notify subscribers. No backend call is
    /// made; the tokens simply stop existing.
    pub async fn logout(&self) {
        self.session.invalidate(InvalidationReason::LoggedOut).await;
    }
}
