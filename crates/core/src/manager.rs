//! Session manager
//!
//! Owns the persisted token pair, the refresh state machine, and the event
//! channel. Injected into the HTTP client; there are no module-level
//! globals. The refresh flag and the queue of stalled requests live behind
//! one mutex, so the check of the in-flight flag and the queue append are a
//! single critical section even on a multi-threaded runtime. The lock is
//! never held across an await.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};

use crate::error::RefreshError;
use crate::events::{InvalidationReason, SessionEvent};
use crate::session::{SessionStore, keys};
use crate::types::{TokenSet, UserProfile};

/// Outcome delivered to every request queued behind an in-flight refresh:
/// the new access token, or the error that ended the cycle.
pub type RefreshOutcome = Result<String, RefreshError>;

/// Refresh pipeline state.
///
/// `Refreshing` holds the continuations of requests that hit a 401 while a
/// refresh call was already in flight. They are resolved in insertion order
/// when the refresh settles, and the queue is always empty outside a cycle.
enum RefreshState {
    Idle,
    Refreshing { waiters: Vec<oneshot::Sender<RefreshOutcome>> },
}

/// Role assigned to a request entering the refresh protocol.
pub enum RefreshRole {
    /// First unretried 401 while idle: this request performs the refresh
    /// call and must settle the cycle via
    /// [`SessionManager::complete_refresh`].
    Leader,
    /// A refresh is already in flight: await its outcome.
    Follower(oneshot::Receiver<RefreshOutcome>),
}

/// Session manager with a well-defined lifecycle: constructed at process
/// start, cleared on logout or unrecoverable auth failure.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    state: Mutex<RefreshState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            store,
            state: Mutex::new(RefreshState::Idle),
            events,
        }
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current access token, if any. Falls back to the legacy alias key so
    /// sessions written by older builds keep working.
    pub async fn access_token(&self) -> Option<String> {
        match self.store.get(keys::ACCESS_TOKEN).await {
            Some(token) => Some(token),
            None => self.store.get(keys::ACCESS_TOKEN_ALIAS).await,
        }
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.store.get(keys::REFRESH_TOKEN).await
    }

    /// Persist a new token pair, overwriting the previous one. The alias
    /// key is kept in sync; a refresh token is only written when present.
    pub async fn store_tokens(&self, tokens: &TokenSet) {
        self.store.set(keys::ACCESS_TOKEN, &tokens.access_token).await;
        self.store
            .set(keys::ACCESS_TOKEN_ALIAS, &tokens.access_token)
            .await;
        if let Some(refresh) = &tokens.refresh_token {
            self.store.set(keys::REFRESH_TOKEN, refresh).await;
        }
    }

    /// Persist a freshly authenticated session: token pair plus profile.
    pub async fn store_session(&self, tokens: &TokenSet, profile: Option<&UserProfile>) {
        self.store_tokens(tokens).await;
        if let Some(profile) = profile {
            match serde_json::to_string(profile) {
                Ok(json) => self.store.set(keys::USER, &json).await,
                Err(err) => warn!(%err, "failed to serialize profile for session store"),
            }
        }
    }

    /// The persisted profile, if one was stored at login.
    pub async fn profile(&self) -> Option<UserProfile> {
        let raw = self.store.get(keys::USER).await?;
        serde_json::from_str(&raw).ok()
    }

    /// Clear every session key and notify subscribers.
    pub async fn invalidate(&self, reason: InvalidationReason) {
        self.store.clear().await;
        warn!(?reason, "session invalidated");
        let _ = self.events.send(SessionEvent::Invalidated { reason });
    }

    /// Whether a refresh call is currently in flight.
    pub fn is_refreshing(&self) -> bool {
        matches!(
            *self.state.lock().expect("refresh state lock poisoned"),
            RefreshState::Refreshing { .. }
        )
    }

    /// Enter the refresh protocol.
    ///
    /// Exactly one caller per cycle becomes the leader; every other caller
    /// gets a receiver that settles when the leader's refresh does.
    pub fn begin_refresh(&self) -> RefreshRole {
        let mut state = self.state.lock().expect("refresh state lock poisoned");
        match &mut *state {
            RefreshState::Idle => {
                *state = RefreshState::Refreshing { waiters: Vec::new() };
                debug!("token refresh started");
                RefreshRole::Leader
            }
            RefreshState::Refreshing { waiters } => {
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                debug!(queued = waiters.len(), "request queued behind in-flight refresh");
                RefreshRole::Follower(rx)
            }
        }
    }

    /// Settle the in-flight refresh.
    ///
    /// Resolves or rejects every queued waiter in insertion order and
    /// returns the machine to idle in the same critical section that takes
    /// the queue, so no waiter can be appended to a settled cycle. Called
    /// exactly once per cycle, by the leader, whatever the outcome.
    pub fn complete_refresh(&self, outcome: &RefreshOutcome) {
        let waiters = {
            let mut state = self.state.lock().expect("refresh state lock poisoned");
            match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::Refreshing { waiters } => waiters,
                RefreshState::Idle => Vec::new(),
            }
        };
        match outcome {
            Ok(_) => info!(drained = waiters.len(), "token refresh succeeded"),
            Err(err) => warn!(drained = waiters.len(), %err, "token refresh failed"),
        }
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
        if outcome.is_ok() {
            let _ = self.events.send(SessionEvent::Refreshed);
        }
    }
}
