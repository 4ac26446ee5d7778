//! # Storage Traits
//!
//! Storage abstraction traits that allow different storage backends to be
//! used interchangeably in the domain layer.

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::models::badge::EarnedBadge;
use crate::domain::models::household::Household;
use crate::domain::models::profile::Profile;
use crate::domain::models::reward::{ClaimRecord, Reward};
use crate::domain::models::task::Task;

/// Trait defining the interface for household storage operations
pub trait HouseholdStorage: Send + Sync {
    /// Store a new household
    fn store_household(&self, household: &Household) -> Result<()>;

    /// Retrieve a specific household by ID
    fn get_household(&self, household_id: &str) -> Result<Option<Household>>;

    /// Find a household by its join code
    fn get_household_by_join_code(&self, join_code: &str) -> Result<Option<Household>>;

    /// Update an existing household
    fn update_household(&self, household: &Household) -> Result<()>;

    /// List all households
    fn list_households(&self) -> Result<Vec<Household>>;
}

/// Trait defining the interface for profile storage operations
pub trait ProfileStorage: Send + Sync {
    /// Store a new profile
    fn store_profile(&self, profile: &Profile) -> Result<()>;

    /// Retrieve a profile by ID, searching across households
    fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>>;

    /// List all profiles in a household ordered by name
    fn list_profiles(&self, household_id: &str) -> Result<Vec<Profile>>;

    /// Update an existing profile
    fn update_profile(&self, profile: &Profile) -> Result<()>;

    /// Delete a profile by ID
    /// Returns true if the profile was found and deleted, false otherwise
    fn delete_profile(&self, profile_id: &str) -> Result<bool>;
}

/// Trait defining the interface for task storage operations
pub trait TaskStorage: Send + Sync {
    /// Store a new task
    fn store_task(&self, task: &Task) -> Result<()>;

    /// Retrieve a task by ID, searching across households
    fn get_task(&self, task_id: &str) -> Result<Option<Task>>;

    /// List all tasks in a household ordered by creation time descending
    fn list_tasks(&self, household_id: &str) -> Result<Vec<Task>>;

    /// Update an existing task
    fn update_task(&self, task: &Task) -> Result<()>;

    /// Delete a task by ID
    /// Returns true if the task was found and deleted, false otherwise
    fn delete_task(&self, task_id: &str) -> Result<bool>;
}

/// Trait defining the interface for reward and claim storage operations
///
/// Claim records are a sub-entity of rewards but are stored in their own
/// file so reward rows stay fixed-width and claim history is append-heavy.
pub trait RewardStorage: Send + Sync {
    /// Store a new reward
    fn store_reward(&self, reward: &Reward) -> Result<()>;

    /// Retrieve a reward by ID, searching across households
    fn get_reward(&self, reward_id: &str) -> Result<Option<Reward>>;

    /// List all rewards in a household ordered by creation time descending
    fn list_rewards(&self, household_id: &str) -> Result<Vec<Reward>>;

    /// Update an existing reward
    fn update_reward(&self, reward: &Reward) -> Result<()>;

    /// Append a new claim record
    fn store_claim(&self, claim: &ClaimRecord) -> Result<()>;

    /// Retrieve a claim by ID, searching across households
    fn get_claim(&self, claim_id: &str) -> Result<Option<ClaimRecord>>;

    /// List all claims against a reward ordered by claim time descending
    fn list_claims_for_reward(&self, reward_id: &str) -> Result<Vec<ClaimRecord>>;

    /// Update an existing claim record
    fn update_claim(&self, claim: &ClaimRecord) -> Result<()>;
}

/// Trait defining the interface for earned-badge storage operations
pub trait BadgeStorage: Send + Sync {
    /// Record an earned badge. Idempotent: recording the same
    /// (profile, badge) pair again is a no-op.
    fn upsert_earned_badge(&self, household_id: &str, badge: &EarnedBadge) -> Result<()>;

    /// List all badges a profile has earned, most recent first
    fn list_earned_badges(&self, household_id: &str, profile_id: &str)
        -> Result<Vec<EarnedBadge>>;

    /// Whether a profile has already earned a specific badge
    fn has_earned_badge(
        &self,
        household_id: &str,
        profile_id: &str,
        badge_id: &str,
    ) -> Result<bool>;
}

/// Trait defining the interface for streak-history storage operations
pub trait StreakStorage: Send + Sync {
    /// Record an active day for a profile. Appending the same day twice
    /// is a no-op.
    fn append_active_day(&self, household_id: &str, profile_id: &str, day: NaiveDate)
        -> Result<()>;

    /// Whether a profile already has an entry for the given day
    fn has_active_day(&self, household_id: &str, profile_id: &str, day: NaiveDate)
        -> Result<bool>;

    /// List a profile's active days in chronological order
    fn list_active_days(&self, household_id: &str, profile_id: &str) -> Result<Vec<NaiveDate>>;
}
