//! HTTP client for the TEZZ REST backend
//!
//! # Examples
//!
//! ```no_run
//! use tezz_api::{ApiClient, ApiConfig};
//!
//! # async fn example() -> tezz_core::Result<()> {
//! let config = ApiConfig::from_cli(None, None)?;
//! let tokens = ApiClient::new(&config)?.login("aibek", "secret").await?;
//!
//! let client = ApiClient::new(&config)?.with_token(tokens.access);
//! let modules = client.modules().await?;
//! println!("{} modules", modules.len());
//! # Ok(())
//! # }
//! ```

use crate::config::ApiConfig;
use futures::future::try_join_all;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tezz_core::account::{
    LessonPage, MarkRecord, Participants, Profile, ProfileUpdate, StudentMark, TokenPair,
};
use tezz_core::error::{Result, TezzError};
use tezz_core::types::{Lesson, LessonId, Module, ModuleId};
use tracing::{debug, info, warn};

/// Highest mark the backend accepts
pub const MAX_SCORE: u8 = 100;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ScoreUpdate {
    score: u8,
}

/// Per-session API client
///
/// Holds the base URL and the bearer token; every request made through it
/// carries `Authorization: Bearer <token>` once a token is set.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create an unauthenticated client
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tezz/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: None,
        })
    }

    /// Attach a bearer token to all subsequent requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchange credentials for a token pair
    ///
    /// The token view is mounted under a second `api/` segment, so the
    /// request goes to `<base>/api/token/`.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let request = self
            .request(Method::POST, "api/token/")?
            .json(&Credentials { username, password });
        let tokens: TokenPair = send_json(request).await?;
        info!("Logged in as {}", username);
        Ok(tokens)
    }

    /// Modules visible to the current user, lessons included
    pub async fn modules(&self) -> Result<Vec<Module>> {
        send_json(self.request(Method::GET, "modules/")?).await
    }

    pub async fn module(&self, id: ModuleId) -> Result<Module> {
        send_json(self.request(Method::GET, &format!("modules/{id}/"))?).await
    }

    pub async fn lesson(&self, id: LessonId) -> Result<Lesson> {
        send_json(self.request(Method::GET, &format!("lessons/{id}/"))?).await
    }

    pub async fn profile(&self) -> Result<Profile> {
        send_json(self.request(Method::GET, "profile/")?).await
    }

    /// PATCH the profile; returns the profile as stored by the backend
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        if update.is_empty() {
            return Err(TezzError::InvalidArgument(
                "nothing to update, pass at least one field".to_string(),
            ));
        }
        send_json(self.request(Method::PATCH, "profile/")?.json(update)).await
    }

    /// Class roster of a lesson with marks (teachers only)
    pub async fn lesson_students(&self, id: LessonId) -> Result<Vec<StudentMark>> {
        send_json(self.request(Method::GET, &format!("lessons/{id}/students/"))?).await
    }

    /// Mark records of a lesson
    pub async fn lesson_marks(&self, id: LessonId) -> Result<Vec<MarkRecord>> {
        send_json(self.request(Method::GET, &format!("marks/{id}/"))?).await
    }

    /// Set the score of one mark record (teachers only)
    pub async fn update_mark_score(&self, mark_id: u64, score: u8) -> Result<()> {
        let score = validate_score(score)?;
        let request = self
            .request(Method::PATCH, &format!("marks/{mark_id}/update/"))?
            .json(&ScoreUpdate { score });
        send_unit(request).await
    }

    /// Attach an answer file to the student's own mark record
    pub async fn upload_answer(&self, mark_id: u64, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("answer", part);
        let request = self
            .request(Method::PATCH, &format!("marks/{mark_id}/update/"))?
            .multipart(form);
        send_unit(request).await?;
        info!("Uploaded {} for mark {}", file_name, mark_id);
        Ok(())
    }

    /// Everything the lesson screen shows
    ///
    /// Lesson and profile are fetched concurrently and both must succeed.
    /// Teachers then get the class roster; students get their marks, where
    /// a failed fetch degrades to an empty list.
    pub async fn lesson_page(&self, id: LessonId) -> Result<LessonPage> {
        let (lesson, viewer) = futures::try_join!(self.lesson(id), self.profile())?;

        let participants = if viewer.is_teacher() {
            Participants::Roster(self.lesson_students(id).await?)
        } else {
            match self.lesson_marks(id).await {
                Ok(marks) => Participants::Marks(marks),
                Err(e) => {
                    warn!("Could not load marks for lesson {}: {}", id, e);
                    Participants::Marks(Vec::new())
                }
            }
        };

        Ok(LessonPage {
            lesson,
            viewer,
            participants,
        })
    }

    /// Save several scores concurrently
    ///
    /// All scores are validated before anything is sent. The first failed
    /// request fails the whole batch.
    pub async fn save_scores(&self, scores: &[(u64, u8)]) -> Result<usize> {
        for (_, score) in scores {
            validate_score(*score)?;
        }

        try_join_all(
            scores
                .iter()
                .map(|(mark_id, score)| self.update_mark_score(*mark_id, *score)),
        )
        .await?;

        info!("Saved {} scores", scores.len());
        Ok(scores.len())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| TezzError::Config(format!("invalid endpoint '{path}': {e}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);

        let request = self.http.request(method, url);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }
}

/// Reject scores above [`MAX_SCORE`]
pub fn validate_score(score: u8) -> Result<u8> {
    if score > MAX_SCORE {
        return Err(TezzError::InvalidArgument(format!(
            "score {score} is out of range 0-{MAX_SCORE}"
        )));
    }
    Ok(score)
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = check_status(request.send().await?).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn send_unit(request: RequestBuilder) -> Result<()> {
    check_status(request.send().await?).await?;
    Ok(())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    debug!("Request failed with {}: {}", status, message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(TezzError::Unauthorized(message)),
        _ => Err(TezzError::Http {
            status: status.as_u16(),
            message,
        }),
    }
}

/// Pull a human readable message out of an error body
///
/// The backend answers with `{"detail": ..}` or `{"error": ..}`; HTML error
/// pages are replaced by the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                return text.clone();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
