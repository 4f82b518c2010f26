//! Error types for tezz
//!
//! This module defines the error types used throughout the tezz crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! The pure engines in this crate only ever produce [`TezzError::InvalidDate`]
//! (calendar overflow while navigating). Network and HTTP variants are
//! produced by `tezz-api`.
//!
//! # Example
//!
//! ```
//! use tezz_core::error::{TezzError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to TezzError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for tezz operations
#[derive(Error, Debug)]
pub enum TezzError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date or date arithmetic out of range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Backend rejected the bearer token or the caller's role
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// No stored session, the user has to log in first
    #[error("Not logged in. Run `tezz login` first")]
    NotLoggedIn,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in tezz
///
/// # Example
///
/// ```
/// use tezz_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, TezzError>;
