use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::ProfileRole;

/// Domain model for a parent or child profile within a household.
/// The profile's own record is the single source of truth for its
/// point balance and stats; nothing is denormalized elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub household_id: String,
    pub name: String,
    pub role: ProfileRole,
    /// Optional PIN gating profile switching
    pub pin: Option<String>,
    /// Spendable point balance. Never goes negative through a claim.
    pub points: i64,
    /// Points ever earned, unaffected by spending
    pub lifetime_points: i64,
    pub completed_tasks: u32,
    /// Completions before 08:00 UTC
    pub morning_completions: u32,
    /// Completions at or after 20:00 UTC
    pub night_completions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_active_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Generate a unique ID for a profile
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("profile::{}", timestamp_millis)
    }

    pub fn is_parent(&self) -> bool {
        self.role == ProfileRole::Parent
    }

    /// Fresh profile with zeroed stats
    pub fn new(
        id: String,
        household_id: String,
        name: String,
        role: ProfileRole,
        pin: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Profile {
            id,
            household_id,
            name,
            role,
            pin,
            points: 0,
            lifetime_points: 0,
            completed_tasks: 0,
            morning_completions: 0,
            night_completions: 0,
            current_streak: 0,
            longest_streak: 0,
            last_active_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),
    #[error("Profile name cannot be empty")]
    EmptyName,
    #[error("Profile name cannot exceed 100 characters")]
    NameTooLong,
    #[error("PIN must be exactly 4 digits")]
    InvalidPinFormat,
    #[error("This profile is PIN protected")]
    PinRequired,
    #[error("Incorrect PIN")]
    WrongPin,
    #[error("Only a parent in the same household may do this")]
    ParentRoleRequired,
}
