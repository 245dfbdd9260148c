//! Authenticated-session pipeline for the EarlyJobs assessment platform.
//!
//! The crate covers the four layers every API call passes through:
//!
//! - [`session::SessionStore`] holds the bearer token and its on-disk mirror.
//! - [`transport::Transport`] is the single HTTP client all calls go through.
//! - The refresh protocol in [`transport`] retries a failed call at most once
//!   after a silent token refresh.
//! - [`auth::guards`] gates protected route trees on an identity check.
//!
//! The core is headless: forced logouts and denied guards surface navigation
//! intents as data, and the hosting shell (here, the CLI) acts on them.

pub mod auth;
pub mod cli;
pub mod error;
pub mod session;
pub mod transport;

pub use error::AuthError;
pub use session::SessionStore;
pub use transport::Transport;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
