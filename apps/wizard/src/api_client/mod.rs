/// API client: the profile service's REST endpoints behind two traits.
///
/// `ResumeIngest` covers the resume parser and file storage, `ProfileStore`
/// the profile CRUD endpoints. `ApiClient` implements both over one
/// `reqwest::Client`; the controller and dashboard only see the traits.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{ProfileSummary, ResumeFile};
use crate::profile::SubmissionPayload;
use crate::session::SessionProvider;

pub mod routes;

// Server-side resume parsing can take a while.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response is missing '{0}'")]
    MissingField(&'static str),
}

impl ApiError {
    /// The `message` the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
pub trait ResumeIngest: Send + Sync {
    /// Sends the resume to the parser and returns its raw `parsedData` object.
    async fn parse_resume(&self, file: &ResumeFile) -> Result<Value, ApiError>;

    /// Stores the resume and returns the URL it can be fetched from.
    async fn upload_resume(&self, file: &ResumeFile) -> Result<String, ApiError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the server's confirmation message, when it sends one.
    async fn create_profile(&self, payload: &SubmissionPayload) -> Result<Option<String>, ApiError>;

    async fn update_profile(
        &self,
        profile_id: &str,
        payload: &SubmissionPayload,
    ) -> Result<Option<String>, ApiError>;

    async fn fetch_profile(&self, profile_id: &str) -> Result<Value, ApiError>;

    async fn list_profiles(&self, user_id: &str) -> Result<Vec<ProfileSummary>, ApiError>;

    async fn delete_profile(&self, profile_id: &str) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.into(),
            session,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, routes::join(&self.base_url, path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes the JSON body. An empty body decodes as `null`.
    async fn send(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only a JSON `message` is meant for users; anything else stays in the log.
            let message = serde_json::from_str::<MessageBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default();
            warn!("API returned {status}: {body}");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn resume_form(file: &ResumeFile) -> Result<multipart::Form, ApiError> {
        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.content_type())?;
        Ok(multipart::Form::new().part(routes::RESUME_FIELD, part))
    }
}

fn confirmation(body: Value) -> Option<String> {
    serde_json::from_value::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
}

#[async_trait]
impl ResumeIngest for ApiClient {
    async fn parse_resume(&self, file: &ResumeFile) -> Result<Value, ApiError> {
        let builder = self
            .request(reqwest::Method::POST, routes::PARSE_RESUME)
            .multipart(Self::resume_form(file)?);
        let mut body = self.send(builder).await?;

        let parsed = body
            .get_mut("parsedData")
            .map(Value::take)
            .filter(|v| !v.is_null())
            .ok_or(ApiError::MissingField("parsedData"))?;
        info!("Parsed resume {}", file.name());
        Ok(parsed)
    }

    async fn upload_resume(&self, file: &ResumeFile) -> Result<String, ApiError> {
        let builder = self
            .request(reqwest::Method::POST, routes::UPLOAD_RESUME)
            .multipart(Self::resume_form(file)?);
        let body = self.send(builder).await?;

        let url = body
            .get("resumeUrl")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ApiError::MissingField("resumeUrl"))?
            .to_string();
        info!("Uploaded resume {} -> {url}", file.name());
        Ok(url)
    }
}

#[async_trait]
impl ProfileStore for ApiClient {
    async fn create_profile(&self, payload: &SubmissionPayload) -> Result<Option<String>, ApiError> {
        let builder = self
            .request(reqwest::Method::POST, routes::CREATE_PROFILE)
            .json(payload);
        let body = self.send(builder).await?;
        info!("Profile created");
        Ok(confirmation(body))
    }

    async fn update_profile(
        &self,
        profile_id: &str,
        payload: &SubmissionPayload,
    ) -> Result<Option<String>, ApiError> {
        let builder = self
            .request(reqwest::Method::PUT, &routes::update_profile(profile_id))
            .json(payload);
        let body = self.send(builder).await?;
        info!("Profile {profile_id} updated");
        Ok(confirmation(body))
    }

    async fn fetch_profile(&self, profile_id: &str) -> Result<Value, ApiError> {
        let body = self
            .send(self.request(reqwest::Method::GET, &routes::get_profile(profile_id)))
            .await?;
        if !body.is_object() {
            return Err(ApiError::MissingField("profile"));
        }
        debug!("Fetched profile {profile_id}");
        Ok(body)
    }

    async fn list_profiles(&self, user_id: &str) -> Result<Vec<ProfileSummary>, ApiError> {
        let body = self
            .send(self.request(reqwest::Method::GET, &routes::list_profiles(user_id)))
            .await?;
        let profiles: Vec<ProfileSummary> = serde_json::from_value(body)?;
        info!("Listed {} profiles for user {user_id}", profiles.len());
        Ok(profiles)
    }

    async fn delete_profile(&self, profile_id: &str) -> Result<(), ApiError> {
        self.send(self.request(reqwest::Method::DELETE, &routes::delete_profile(profile_id)))
            .await?;
        info!("Profile {profile_id} deleted");
        Ok(())
    }
}
