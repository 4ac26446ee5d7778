use shared::ProfileRole;

use crate::domain::models::household::Household;
use crate::domain::models::profile::Profile;

#[derive(Debug, Clone)]
pub struct CreateHouseholdCommand {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateHouseholdResult {
    pub household: Household,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct GetHouseholdCommand {
    pub household_id: String,
}

#[derive(Debug, Clone)]
pub struct GetHouseholdResult {
    pub household: Option<Household>,
}

#[derive(Debug, Clone)]
pub struct JoinHouseholdCommand {
    pub join_code: String,
    pub profile_name: String,
    pub role: ProfileRole,
    pub pin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JoinHouseholdResult {
    pub household: Household,
    pub profile: Profile,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct UpdateHouseholdSettingsCommand {
    pub household_id: String,
    pub default_task_points: Option<i64>,
    pub require_photo_proof: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UpdateHouseholdSettingsResult {
    pub household: Household,
    pub success_message: String,
}
