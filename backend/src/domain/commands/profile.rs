use shared::ProfileRole;

use crate::domain::models::profile::Profile;

#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub household_id: String,
    pub name: String,
    pub role: ProfileRole,
    pub pin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateProfileResult {
    pub profile: Profile,
}

#[derive(Debug, Clone)]
pub struct GetProfileCommand {
    pub profile_id: String,
}

#[derive(Debug, Clone)]
pub struct GetProfileResult {
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone)]
pub struct ListProfilesCommand {
    pub household_id: String,
}

#[derive(Debug, Clone)]
pub struct ListProfilesResult {
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub profile_id: String,
    pub name: Option<String>,
    pub pin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileResult {
    pub profile: Profile,
}

#[derive(Debug, Clone)]
pub struct DeleteProfileCommand {
    pub profile_id: String,
    pub actor_profile_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteProfileResult {
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct SetActiveProfileCommand {
    pub profile_id: String,
    pub pin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SetActiveProfileResult {
    pub profile: Profile,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct GetActiveProfileResult {
    pub profile: Option<Profile>,
}
