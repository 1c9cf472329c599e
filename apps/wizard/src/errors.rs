use std::fmt;

use thiserror::Error;

use crate::api_client::ApiError;

/// Remote operations whose failures are reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateProfile,
    UpdateProfile,
    DeleteProfile,
    LoadProfile,
    ListProfiles,
}

impl Operation {
    /// Text shown when the server gives no message of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::CreateProfile => "Failed to create profile.",
            Operation::UpdateProfile => "Failed to update profile.",
            Operation::DeleteProfile => "Could not delete profile.",
            Operation::LoadProfile => "Failed to load profile data.",
            Operation::ListProfiles => "Could not load your profiles.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateProfile => "create profile",
            Operation::UpdateProfile => "update profile",
            Operation::DeleteProfile => "delete profile",
            Operation::LoadProfile => "load profile",
            Operation::ListProfiles => "list profiles",
        };
        f.write_str(name)
    }
}

pub const PARSE_FALLBACK: &str = "Failed to parse resume.";
pub const UPLOAD_FAILED: &str = "Resume upload failed. Please try again.";
pub const UNSUPPORTED_FILE: &str = "Please select a valid PDF or DOCX file.";
pub const NO_RESUME_SELECTED: &str = "Please select a resume file first.";

/// Everything the wizard, dashboard and session layers can report.
///
/// No variant is fatal: after any of them the caller still holds a usable
/// controller with its previous state.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Unsupported file type '{content_type}' for {name}")]
    UnsupportedFileType { name: String, content_type: String },

    #[error("No resume file selected")]
    NoResumeSelected,

    #[error("Resume parse failed: {0}")]
    Parse(#[source] ApiError),

    #[error("Resume upload failed: {0}")]
    Upload(#[source] ApiError),

    #[error("Failed to {operation}: {source}")]
    Persist {
        operation: Operation,
        #[source]
        source: ApiError,
    },

    #[error("Failed to {operation}: {source}")]
    Fetch {
        operation: Operation,
        #[source]
        source: ApiError,
    },

    #[error("No signed-in user")]
    NotSignedIn,

    #[error("Invalid field edit: {0}")]
    Field(String),

    #[error("Step {index} out of range (0..{len})")]
    StepOutOfRange { index: usize, len: usize },

    #[error("Profile data error: {0}")]
    Data(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WizardError {
    /// The notification text for this failure: the server's own message when
    /// it sent one, otherwise a fixed fallback.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::UnsupportedFileType { .. } => UNSUPPORTED_FILE.to_string(),
            WizardError::NoResumeSelected => NO_RESUME_SELECTED.to_string(),
            WizardError::Parse(e) => e.server_message().unwrap_or(PARSE_FALLBACK).to_string(),
            // upload failures never surface the server text
            WizardError::Upload(_) => UPLOAD_FAILED.to_string(),
            WizardError::Persist { operation, source } | WizardError::Fetch { operation, source } => {
                source
                    .server_message()
                    .unwrap_or(operation.fallback_message())
                    .to_string()
            }
            WizardError::NotSignedIn => "Please sign in to continue.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(message: &str) -> ApiError {
        ApiError::Api {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_parse_prefers_server_message() {
        let err = WizardError::Parse(api("Resume too large"));
        assert_eq!(err.user_message(), "Resume too large");
    }

    #[test]
    fn test_parse_falls_back_without_message() {
        assert_eq!(WizardError::Parse(api("")).user_message(), PARSE_FALLBACK);
        let missing = WizardError::Parse(ApiError::MissingField("parsedData"));
        assert_eq!(missing.user_message(), PARSE_FALLBACK);
    }

    #[test]
    fn test_upload_always_generic() {
        let err = WizardError::Upload(api("S3 bucket unavailable"));
        assert_eq!(err.user_message(), UPLOAD_FAILED);
    }

    #[test]
    fn test_persist_fallbacks_per_operation() {
        let create = WizardError::Persist {
            operation: Operation::CreateProfile,
            source: api(""),
        };
        assert_eq!(create.user_message(), "Failed to create profile.");

        let update = WizardError::Persist {
            operation: Operation::UpdateProfile,
            source: api("Profile name taken"),
        };
        assert_eq!(update.user_message(), "Profile name taken");

        let load = WizardError::Fetch {
            operation: Operation::LoadProfile,
            source: api(""),
        };
        assert_eq!(load.user_message(), "Failed to load profile data.");
    }

    #[test]
    fn test_display_includes_operation() {
        let err = WizardError::Persist {
            operation: Operation::DeleteProfile,
            source: api("gone"),
        };
        assert!(err.to_string().starts_with("Failed to delete profile"));
    }
}
