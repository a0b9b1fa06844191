//! Boutique session state and shared types
//!
//! This crate owns the durable half of the admin client: the persisted
//! token pair, the refresh state machine, and the session lifecycle events
//! that replace forced navigation in the embedding shell.

pub mod error;
pub mod events;
pub mod manager;
pub mod session;
pub mod types;

pub use error::RefreshError;
pub use events::{InvalidationReason, SessionEvent};
pub use manager::{RefreshOutcome, RefreshRole, SessionManager};
pub use session::{MemorySessionStore, SessionStore};
pub use types::{TokenSet, UserProfile};
