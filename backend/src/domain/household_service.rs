use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use crate::domain::commands::household::{
    CreateHouseholdCommand, CreateHouseholdResult, GetHouseholdCommand, GetHouseholdResult,
    JoinHouseholdCommand, JoinHouseholdResult, UpdateHouseholdSettingsCommand,
    UpdateHouseholdSettingsResult,
};
use crate::domain::commands::profile::CreateProfileCommand;
use crate::domain::models::household::{Household, HouseholdError, HouseholdSettings};
use crate::domain::profile_service::ProfileService;
use crate::storage::csv::{CsvConnection, HouseholdRepository};
use crate::storage::traits::HouseholdStorage;

/// Service for managing households: creation, settings, and joining via
/// the shared join code.
#[derive(Clone)]
pub struct HouseholdService {
    household_repository: HouseholdRepository,
    profile_service: ProfileService,
}

impl HouseholdService {
    /// Create a new HouseholdService
    pub fn new(csv_conn: Arc<CsvConnection>, profile_service: ProfileService) -> Self {
        Self {
            household_repository: HouseholdRepository::new((*csv_conn).clone()),
            profile_service,
        }
    }

    /// Create a new household with default settings and a fresh join code
    pub fn create_household(
        &self,
        command: CreateHouseholdCommand,
    ) -> Result<CreateHouseholdResult> {
        info!("Creating household: {}", command.name);

        if command.name.trim().is_empty() {
            return Err(HouseholdError::EmptyName.into());
        }
        if command.name.len() > 100 {
            return Err(HouseholdError::NameTooLong.into());
        }

        let now = Utc::now();
        let household = Household {
            id: Household::generate_id(now.timestamp_micros() as u64),
            name: command.name.trim().to_string(),
            join_code: Household::generate_join_code(),
            settings: HouseholdSettings::default(),
            created_at: now,
            updated_at: now,
        };

        self.household_repository.store_household(&household)?;

        info!(
            "Created household {} with join code {}",
            household.id, household.join_code
        );

        Ok(CreateHouseholdResult {
            success_message: format!("Household '{}' created", household.name),
            household,
        })
    }

    /// Get a household by ID
    pub fn get_household(&self, command: GetHouseholdCommand) -> Result<GetHouseholdResult> {
        debug!("Getting household: {}", command.household_id);
        let household = self
            .household_repository
            .get_household(&command.household_id)?;
        Ok(GetHouseholdResult { household })
    }

    /// Join a household via its join code, creating a profile for the
    /// joining family member
    pub fn join_household(&self, command: JoinHouseholdCommand) -> Result<JoinHouseholdResult> {
        info!(
            "Joining household with code {}: profile={}",
            command.join_code, command.profile_name
        );

        let household = self
            .household_repository
            .get_household_by_join_code(&command.join_code)?
            .ok_or_else(|| HouseholdError::InvalidJoinCode(command.join_code.clone()))?;

        let created = self.profile_service.create_profile(CreateProfileCommand {
            household_id: household.id.clone(),
            name: command.profile_name,
            role: command.role,
            pin: command.pin,
        })?;

        info!(
            "Profile {} joined household {}",
            created.profile.id, household.id
        );

        Ok(JoinHouseholdResult {
            success_message: format!("Welcome to {}", household.name),
            household,
            profile: created.profile,
        })
    }

    /// Update a household's settings
    pub fn update_settings(
        &self,
        command: UpdateHouseholdSettingsCommand,
    ) -> Result<UpdateHouseholdSettingsResult> {
        info!("Updating settings for household: {}", command.household_id);

        let mut household = self
            .household_repository
            .get_household(&command.household_id)?
            .ok_or_else(|| HouseholdError::NotFound(command.household_id.clone()))?;

        if let Some(points) = command.default_task_points {
            if points <= 0 {
                return Err(anyhow::anyhow!("Default task points must be positive"));
            }
            household.settings.default_task_points = points;
        }
        if let Some(require_photo_proof) = command.require_photo_proof {
            household.settings.require_photo_proof = require_photo_proof;
        }
        household.updated_at = Utc::now();

        self.household_repository.update_household(&household)?;

        Ok(UpdateHouseholdSettingsResult {
            success_message: "Settings updated".to_string(),
            household,
        })
    }
}
