use std::sync::Arc;

use tracing::{info, warn};

use crate::api_client::ProfileStore;
use crate::errors::{Operation, WizardError};
use crate::models::ProfileSummary;
use crate::session::SessionProvider;

/// The signed-in user's saved profiles.
pub struct ProfileList {
    profiles: Vec<ProfileSummary>,
    store: Arc<dyn ProfileStore>,
    session: Arc<dyn SessionProvider>,
}

impl ProfileList {
    pub fn new(store: Arc<dyn ProfileStore>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            profiles: Vec::new(),
            store,
            session,
        }
    }

    pub fn profiles(&self) -> &[ProfileSummary] {
        &self.profiles
    }

    /// Replaces the list with the server's. On failure the old list stays.
    pub async fn load(&mut self) -> Result<&[ProfileSummary], WizardError> {
        let user = self.session.current_user().ok_or(WizardError::NotSignedIn)?;
        let profiles = self
            .store
            .list_profiles(&user.id)
            .await
            .map_err(|source| WizardError::Fetch {
                operation: Operation::ListProfiles,
                source,
            })?;
        self.profiles = profiles;
        Ok(&self.profiles)
    }

    /// Removes the profile locally first, then on the server. If the server
    /// refuses, the list goes back to exactly what it was.
    pub async fn delete(&mut self, profile_id: &str) -> Result<(), WizardError> {
        let snapshot = self.profiles.clone();
        self.profiles.retain(|p| p.id != profile_id);

        match self.store.delete_profile(profile_id).await {
            Ok(()) => {
                info!("Profile {profile_id} removed from dashboard");
                Ok(())
            }
            Err(source) => {
                warn!("Delete of {profile_id} failed, restoring list: {source}");
                self.profiles = snapshot;
                Err(WizardError::Persist {
                    operation: Operation::DeleteProfile,
                    source,
                })
            }
        }
    }
}
