pub mod api_client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod profile;
pub mod session;
pub mod wizard;

pub use api_client::{ApiClient, ApiError, ProfileStore, ResumeIngest};
pub use dashboard::ProfileList;
pub use errors::WizardError;
pub use models::{ProfileRecord, ResumeFile, Section};
pub use session::{FileSession, SessionProvider, SessionUser, StaticSession};
pub use wizard::{WizardController, WizardMode};
