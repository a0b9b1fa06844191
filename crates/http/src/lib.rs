//! Boutique admin HTTP client
//!
//! A typed client for the Boutique e-commerce admin API. Every request goes
//! through one pipeline: the current bearer token is attached from the
//! session store, auth failures are classified, and a first 401 triggers an
//! exactly-once token refresh that concurrent requests queue behind before
//! being replayed with the new credential.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{AdminClient, AdminClientBuilder, NO_REDIRECT_HEADER};
