//! Where the bearer token and signed-in user come from.
//!
//! Sign-in happens elsewhere; this crate only reads what it left behind.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::WizardError;
use crate::models::stored::pick_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredUser")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// The sign-in flow has stored the user with `id`, `_id` or both.
#[derive(Deserialize)]
struct StoredUser {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

impl TryFrom<StoredUser> for SessionUser {
    type Error = String;

    fn try_from(user: StoredUser) -> Result<Self, Self::Error> {
        let id = pick_id(user.object_id, user.id).ok_or("session user has no 'id' or '_id'")?;
        Ok(Self {
            id,
            name: user.name,
            email: user.email,
        })
    }
}

pub trait SessionProvider: Send + Sync {
    fn token(&self) -> Option<String>;
    fn current_user(&self) -> Option<SessionUser>;
}

#[derive(Debug, Default, Deserialize)]
struct SessionData {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<SessionUser>,
}

/// Session persisted as `{"token": "...", "user": {...}}` by the sign-in flow.
#[derive(Debug, Clone, Default)]
pub struct FileSession {
    token: Option<String>,
    user: Option<SessionUser>,
}

impl FileSession {
    /// A missing file means nobody is signed in. A file that exists but does
    /// not parse is an error.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, WizardError> {
        let path = path.as_ref();
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No session file at {}, continuing signed out", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let data: SessionData = serde_json::from_str(&raw)?;
        debug!(
            "Session loaded: token={}, user={:?}",
            data.token.is_some(),
            data.user.as_ref().map(|u| u.id.as_str())
        );
        Ok(Self {
            token: data.token.filter(|t| !t.is_empty()),
            user: data.user,
        })
    }
}

impl SessionProvider for FileSession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn current_user(&self) -> Option<SessionUser> {
        self.user.clone()
    }
}

/// In-memory session, for tests and for callers that already hold a token.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn current_user(&self) -> Option<SessionUser> {
        self.user.clone()
    }
}
