//! Persisted login session
//!
//! The token pair returned by login is kept in a small JSON file so later
//! invocations can replay it. The default location is
//! `<config dir>/tezz/session.json`; `TEZZ_SESSION_FILE` overrides it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tezz_core::account::TokenPair;
use tezz_core::error::{Result, TezzError};
use tokio::fs;
use tracing::{debug, warn};

/// Environment variable overriding the session file location
pub const SESSION_FILE_ENV: &str = "TEZZ_SESSION_FILE";

/// What gets written to disk after a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub username: String,
    /// API root the tokens were issued by
    pub base_url: String,
    pub tokens: TokenPair,
    pub saved_at: DateTime<Utc>,
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `TEZZ_SESSION_FILE` or in the user's config directory
    pub fn default_location() -> Result<Self> {
        if let Ok(path) = std::env::var(SESSION_FILE_ENV)
            && !path.is_empty()
        {
            return Ok(Self::new(path));
        }

        let dir = dirs::config_dir().ok_or_else(|| {
            TezzError::Config(format!(
                "cannot determine a config directory, set {SESSION_FILE_ENV}"
            ))
        })?;
        Ok(Self::new(dir.join("tezz").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, `None` when nobody is logged in
    ///
    /// A corrupt file is treated as logged out rather than as an error.
    pub async fn load(&self) -> Result<Option<StoredSession>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable session file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    pub async fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content).await?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored session; returns whether one existed
    pub async fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
