use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settings every household carries. Defaults apply at creation and can
/// be changed by a parent afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSettings {
    /// Point value used when a task is created without one
    pub default_task_points: i64,
    /// Whether moving a task into review expects photo proof
    pub require_photo_proof: bool,
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        Self {
            default_task_points: 10,
            require_photo_proof: false,
        }
    }
}

/// Domain model for a household: a family group sharing tasks, rewards
/// and a leaderboard. Created once by a parent, joined by others via the
/// join code, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub id: String,
    pub name: String,
    pub join_code: String,
    pub settings: HouseholdSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Household {
    /// Generate a unique ID for a household
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("household::{}", timestamp_millis)
    }

    /// Generate a short alphanumeric join code. Uppercased so codes read
    /// well when shared out loud.
    pub fn generate_join_code() -> String {
        uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(6)
            .collect::<String>()
            .to_uppercase()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HouseholdError {
    #[error("Household not found: {0}")]
    NotFound(String),
    #[error("No household matches join code '{0}'")]
    InvalidJoinCode(String),
    #[error("Household name cannot be empty")]
    EmptyName,
    #[error("Household name cannot exceed 100 characters")]
    NameTooLong,
}
