//! Session lifecycle events
//!
//! The transport layer never navigates anywhere. When the session becomes
//! unusable it broadcasts [`SessionEvent::Invalidated`] and the embedding
//! shell decides what "return to login" means.

/// Why the session was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// Authentication could not be recovered: a 401 with no usable refresh
    /// token, or the refresh call itself failed.
    Unauthorized,
    /// The backend denied access outright (403).
    Forbidden,
    /// Explicit logout by the operator.
    LoggedOut,
}

/// Events emitted by the session manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A refresh produced a new access token; persisted state reflects it.
    Refreshed,
    /// The session was cleared; subscribers should drop authenticated UI.
    Invalidated { reason: InvalidationReason },
}
