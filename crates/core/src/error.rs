//! Refresh failure classification

use thiserror::Error;

/// Why a token refresh did not produce a new access token.
///
/// Cloneable so a single outcome can be fanned out to every request queued
/// behind the in-flight refresh. All variants take the same failure path
/// (drain queue, tear down session unless suppressed); they stay distinct
/// so logs can tell a malformed success body from a transport failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshError {
    /// No refresh token was present in the session store.
    #[error("no refresh token in session")]
    MissingRefreshToken,

    /// The refresh endpoint answered with a non-success status.
    #[error("refresh rejected ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The refresh endpoint answered 2xx but the body carried no access
    /// token under any known shape.
    #[error("refresh response carried no access token")]
    MalformedResponse,

    /// The refresh call failed at the transport level.
    #[error("refresh transport error: {0}")]
    Transport(String),

    /// The refresh call exceeded its deadline. Treated identically to a
    /// failed refresh so queued requests never stall indefinitely.
    #[error("refresh timed out")]
    Timeout,
}
