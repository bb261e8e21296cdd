//! Authenticated-session lifecycle for VidyaSethu clients.
//!
//! Owns the token pair and the authenticated identity, refreshes the access
//! token transparently when the backend reports it expired, and gates
//! navigation to protected views. Role dashboards consume this crate's
//! public surface and never touch tokens or retries themselves.
//!
//! Typical startup:
//!
//! ```no_run
//! # async fn start() -> Result<(), Box<dyn std::error::Error>> {
//! use vidya_session::SessionConfig;
//!
//! let client = SessionConfig::from_env().build()?;
//! client.store().restore().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod resources;
pub mod store;
pub mod tokens;

pub use client::{SessionClient, UnauthorizedHook};
pub use config::SessionConfig;
pub use error::SessionError;
pub use guard::{Route, RouteDecision};
pub use store::{SessionState, SessionStore};
pub use tokens::{FileTokenStore, MemoryTokenStore, TokenStore};
