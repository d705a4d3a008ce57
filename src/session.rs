//! CLI-side holder for the current user profile.

use crate::client::ApiClient;
use crate::engine::CostError;
use crate::error::AppError;
use crate::models::UserProfile;

/// The profile the CLI is working with, passed explicitly to each command.
///
/// Starts empty, is filled by creating a profile or loading the stored one,
/// and is overwritten on re-creation.
#[derive(Debug, Default, Clone)]
pub struct Session {
    profile: Option<UserProfile>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// The profile, or `ProfileNotFound` when none has been set
    pub fn require_profile(&self) -> Result<&UserProfile, CostError> {
        self.profile.as_ref().ok_or(CostError::ProfileNotFound)
    }

    pub fn replace(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    /// Load the stored profile unless one is already held.
    ///
    /// A missing profile on the service leaves the session empty.
    pub async fn load(&mut self, client: &ApiClient) -> Result<Option<&UserProfile>, AppError> {
        if self.profile.is_none() {
            match client.get_profile().await {
                Ok(profile) => self.profile = Some(profile),
                Err(AppError::ProfileNotFound) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(self.profile.as_ref())
    }

    /// Save on the service and keep what it stored
    pub async fn create(&mut self, client: &ApiClient, profile: &UserProfile) -> Result<&UserProfile, AppError> {
        profile.validate()?;
        let saved = client.save_profile(profile).await?;
        Ok(self.profile.insert(saved))
    }
}
