use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::profile::{
    CreateProfileCommand, CreateProfileResult, DeleteProfileCommand, DeleteProfileResult,
    GetActiveProfileResult, GetProfileCommand, GetProfileResult, ListProfilesCommand,
    ListProfilesResult, SetActiveProfileCommand, SetActiveProfileResult, UpdateProfileCommand,
    UpdateProfileResult,
};
use crate::domain::models::household::HouseholdError;
use crate::domain::models::profile::{Profile, ProfileError};
use crate::storage::csv::{
    CsvConnection, GlobalConfigRepository, GlobalConfigStorage, HouseholdRepository,
    ProfileRepository,
};
use crate::storage::traits::{HouseholdStorage, ProfileStorage};

/// Service for managing parent and child profiles and the active-profile
/// selection that drives whose stats are read and written.
#[derive(Clone)]
pub struct ProfileService {
    profile_repository: ProfileRepository,
    household_repository: HouseholdRepository,
    global_config_repository: GlobalConfigRepository,
}

impl ProfileService {
    /// Create a new ProfileService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            profile_repository: ProfileRepository::new((*csv_conn).clone()),
            household_repository: HouseholdRepository::new((*csv_conn).clone()),
            global_config_repository: GlobalConfigRepository::new((*csv_conn).clone()),
        }
    }

    /// Create a new profile in a household
    pub fn create_profile(&self, command: CreateProfileCommand) -> Result<CreateProfileResult> {
        info!(
            "Creating profile: name={}, role={:?}, household={}",
            command.name, command.role, command.household_id
        );

        validate_name(&command.name)?;
        validate_pin(command.pin.as_deref())?;

        // The household must exist before anyone can join it
        if self
            .household_repository
            .get_household(&command.household_id)?
            .is_none()
        {
            return Err(HouseholdError::NotFound(command.household_id).into());
        }

        let now = Utc::now();
        let profile = Profile::new(
            Profile::generate_id(now.timestamp_micros() as u64),
            command.household_id,
            command.name.trim().to_string(),
            command.role,
            command.pin,
            now,
        );

        self.profile_repository.store_profile(&profile)?;

        info!("Created profile: {} with ID: {}", profile.name, profile.id);

        Ok(CreateProfileResult { profile })
    }

    /// Get a profile by ID
    pub fn get_profile(&self, command: GetProfileCommand) -> Result<GetProfileResult> {
        debug!("Getting profile: {}", command.profile_id);

        let profile = self.profile_repository.get_profile(&command.profile_id)?;
        if profile.is_none() {
            warn!("Profile not found: {}", command.profile_id);
        }

        Ok(GetProfileResult { profile })
    }

    /// List all profiles in a household
    pub fn list_profiles(&self, command: ListProfilesCommand) -> Result<ListProfilesResult> {
        let profiles = self.profile_repository.list_profiles(&command.household_id)?;
        debug!(
            "Found {} profiles in {}",
            profiles.len(),
            command.household_id
        );
        Ok(ListProfilesResult { profiles })
    }

    /// Update a profile's name or PIN
    pub fn update_profile(&self, command: UpdateProfileCommand) -> Result<UpdateProfileResult> {
        info!("Updating profile: {}", command.profile_id);

        let mut profile = self
            .profile_repository
            .get_profile(&command.profile_id)?
            .ok_or_else(|| ProfileError::NotFound(command.profile_id.clone()))?;

        if let Some(name) = command.name {
            validate_name(&name)?;
            profile.name = name.trim().to_string();
        }
        if let Some(pin) = command.pin {
            validate_pin(Some(&pin))?;
            profile.pin = Some(pin);
        }
        profile.updated_at = Utc::now();

        self.profile_repository.update_profile(&profile)?;

        Ok(UpdateProfileResult { profile })
    }

    /// Delete a profile (parent-only, same household). Clears the
    /// active-profile selection if it pointed at the deleted profile.
    pub fn delete_profile(&self, command: DeleteProfileCommand) -> Result<DeleteProfileResult> {
        info!("Deleting profile: {}", command.profile_id);

        let profile = self
            .profile_repository
            .get_profile(&command.profile_id)?
            .ok_or_else(|| ProfileError::NotFound(command.profile_id.clone()))?;

        let actor = self
            .profile_repository
            .get_profile(&command.actor_profile_id)?
            .ok_or_else(|| ProfileError::NotFound(command.actor_profile_id.clone()))?;
        if !actor.is_parent() || actor.household_id != profile.household_id {
            return Err(ProfileError::ParentRoleRequired.into());
        }

        self.profile_repository.delete_profile(&command.profile_id)?;

        let config = self.global_config_repository.get_global_config()?;
        if config.active_profile_id.as_deref() == Some(command.profile_id.as_str()) {
            self.global_config_repository.set_active_profile_id(None)?;
        }

        info!("Deleted profile: {} ({})", profile.name, profile.id);

        Ok(DeleteProfileResult {
            success_message: format!("Profile '{}' deleted", profile.name),
        })
    }

    /// Switch the active profile. PIN-protected profiles require the
    /// matching PIN.
    pub fn set_active_profile(
        &self,
        command: SetActiveProfileCommand,
    ) -> Result<SetActiveProfileResult> {
        info!("Setting active profile: {}", command.profile_id);

        let profile = self
            .profile_repository
            .get_profile(&command.profile_id)?
            .ok_or_else(|| ProfileError::NotFound(command.profile_id.clone()))?;

        if let Some(ref expected) = profile.pin {
            match command.pin {
                None => return Err(ProfileError::PinRequired.into()),
                Some(ref supplied) if supplied != expected => {
                    warn!("Wrong PIN for profile {}", profile.id);
                    return Err(ProfileError::WrongPin.into());
                }
                Some(_) => {}
            }
        }

        self.global_config_repository
            .set_active_profile_id(Some(profile.id.clone()))?;

        info!("Active profile is now {} ({})", profile.name, profile.id);

        Ok(SetActiveProfileResult {
            success_message: format!("Switched to {}", profile.name),
            profile,
        })
    }

    /// Get the currently active profile
    pub fn get_active_profile(&self) -> Result<GetActiveProfileResult> {
        let config = self.global_config_repository.get_global_config()?;

        let profile = if let Some(profile_id) = config.active_profile_id {
            match self.profile_repository.get_profile(&profile_id)? {
                Some(profile) => Some(profile),
                None => {
                    warn!("Active profile ID set but profile not found: {}", profile_id);
                    None
                }
            }
        } else {
            debug!("No active profile set");
            None
        };

        Ok(GetActiveProfileResult { profile })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ProfileError::EmptyName.into());
    }
    if name.len() > 100 {
        return Err(ProfileError::NameTooLong.into());
    }
    Ok(())
}

fn validate_pin(pin: Option<&str>) -> Result<()> {
    if let Some(pin) = pin {
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(ProfileError::InvalidPinFormat.into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::household::CreateHouseholdCommand;
    use crate::domain::household_service::HouseholdService;
    use shared::ProfileRole;
    use tempfile::TempDir;

    fn setup() -> (ProfileService, HouseholdService, String, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let conn = Arc::new(CsvConnection::new(temp_dir.path()).expect("Failed to init test DB"));
        let profile_service = ProfileService::new(conn.clone());
        let household_service = HouseholdService::new(conn, profile_service.clone());

        let household = household_service
            .create_household(CreateHouseholdCommand {
                name: "The Parkers".to_string(),
            })
            .expect("Failed to create household")
            .household;

        (profile_service, household_service, household.id, temp_dir)
    }

    fn create_child(service: &ProfileService, household_id: &str, name: &str) -> Profile {
        service
            .create_profile(CreateProfileCommand {
                household_id: household_id.to_string(),
                name: name.to_string(),
                role: ProfileRole::Child,
                pin: None,
            })
            .expect("Failed to create profile")
            .profile
    }

    #[test]
    fn test_create_profile() {
        let (service, _hs, household_id, _temp_dir) = setup();
        let profile = create_child(&service, &household_id, "Maya");

        assert_eq!(profile.name, "Maya");
        assert_eq!(profile.role, ProfileRole::Child);
        assert_eq!(profile.points, 0);
    }

    #[test]
    fn test_create_profile_unknown_household() {
        let (service, _hs, _household_id, _temp_dir) = setup();
        let result = service.create_profile(CreateProfileCommand {
            household_id: "household::ghost".to_string(),
            name: "Maya".to_string(),
            role: ProfileRole::Child,
            pin: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_create_profile_rejects_bad_pin() {
        let (service, _hs, household_id, _temp_dir) = setup();
        let result = service.create_profile(CreateProfileCommand {
            household_id,
            name: "Maya".to_string(),
            role: ProfileRole::Child,
            pin: Some("12".to_string()),
        });
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProfileError>(),
            Some(&ProfileError::InvalidPinFormat)
        );
    }

    #[test]
    fn test_set_active_profile() {
        let (service, _hs, household_id, _temp_dir) = setup();
        let profile = create_child(&service, &household_id, "Maya");

        service
            .set_active_profile(SetActiveProfileCommand {
                profile_id: profile.id.clone(),
                pin: None,
            })
            .expect("Failed to set active profile");

        let active = service.get_active_profile().unwrap().profile.unwrap();
        assert_eq!(active.id, profile.id);
    }

    #[test]
    fn test_set_active_profile_requires_pin() {
        let (service, _hs, household_id, _temp_dir) = setup();
        let profile = service
            .create_profile(CreateProfileCommand {
                household_id,
                name: "Dad".to_string(),
                role: ProfileRole::Parent,
                pin: Some("4321".to_string()),
            })
            .unwrap()
            .profile;

        let missing = service.set_active_profile(SetActiveProfileCommand {
            profile_id: profile.id.clone(),
            pin: None,
        });
        assert_eq!(
            missing.unwrap_err().downcast_ref::<ProfileError>(),
            Some(&ProfileError::PinRequired)
        );

        let wrong = service.set_active_profile(SetActiveProfileCommand {
            profile_id: profile.id.clone(),
            pin: Some("0000".to_string()),
        });
        assert_eq!(
            wrong.unwrap_err().downcast_ref::<ProfileError>(),
            Some(&ProfileError::WrongPin)
        );

        let right = service.set_active_profile(SetActiveProfileCommand {
            profile_id: profile.id,
            pin: Some("4321".to_string()),
        });
        assert!(right.is_ok());
    }

    #[test]
    fn test_delete_profile_clears_active_selection() {
        let (service, _hs, household_id, _temp_dir) = setup();
        let parent = service
            .create_profile(CreateProfileCommand {
                household_id: household_id.clone(),
                name: "Dad".to_string(),
                role: ProfileRole::Parent,
                pin: None,
            })
            .unwrap()
            .profile;
        let profile = create_child(&service, &household_id, "Maya");

        service
            .set_active_profile(SetActiveProfileCommand {
                profile_id: profile.id.clone(),
                pin: None,
            })
            .unwrap();

        // A child cannot delete profiles
        let denied = service.delete_profile(DeleteProfileCommand {
            profile_id: parent.id.clone(),
            actor_profile_id: profile.id.clone(),
        });
        assert_eq!(
            denied.unwrap_err().downcast_ref::<ProfileError>(),
            Some(&ProfileError::ParentRoleRequired)
        );

        service
            .delete_profile(DeleteProfileCommand {
                profile_id: profile.id.clone(),
                actor_profile_id: parent.id,
            })
            .unwrap();

        assert!(service
            .get_profile(GetProfileCommand {
                profile_id: profile.id,
            })
            .unwrap()
            .profile
            .is_none());
        assert!(service.get_active_profile().unwrap().profile.is_none());
    }

    #[test]
    fn test_no_active_profile_initially() {
        let (service, _hs, _household_id, _temp_dir) = setup();
        assert!(service.get_active_profile().unwrap().profile.is_none());
    }
}
