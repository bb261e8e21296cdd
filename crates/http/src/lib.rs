//! HTTP layer for the VidyaSethu backend API.
//!
//! This crate holds the wire types shared with the backend and a thin
//! `reqwest`-based client. It knows nothing about sessions: callers pass an
//! access token explicitly where one is required. Token persistence, refresh
//! and retry live in `vidya-session`.

pub mod client;
pub mod error;
pub mod types;

pub use client::{LoginChannel, VidyaClient, VidyaClientBuilder};
pub use error::ClientError;
