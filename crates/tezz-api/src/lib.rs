//! REST client and session storage for the TEZZ backend
//!
//! The client is an explicit per-session object: it owns the base URL and
//! the bearer token and is passed to whatever needs the network, instead
//! of a process-wide default attached to every request.

pub mod client;
pub mod config;
pub mod session;
pub mod source;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use session::{SessionStore, StoredSession};
pub use source::ModuleSource;
