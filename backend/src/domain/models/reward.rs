use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{ClaimStatus, RewardCategory};

/// Domain model for a reward in the household shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub household_id: String,
    pub title: String,
    pub description: String,
    pub cost: i64,
    pub category: RewardCategory,
    /// Stock limit; None means unlimited
    pub stock: Option<u32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reward {
    /// Generate a unique ID for a reward
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("reward::{}", timestamp_millis)
    }

    /// Stock left after the given claims. Pending and approved claims
    /// consume stock; rejection releases it. None when unlimited.
    pub fn remaining_stock(&self, claims: &[ClaimRecord]) -> Option<u32> {
        self.stock.map(|limit| {
            let consumed = claims
                .iter()
                .filter(|c| c.reward_id == self.id && c.status != ClaimStatus::Rejected)
                .count() as u32;
            limit.saturating_sub(consumed)
        })
    }
}

/// One claim attempt against a reward. Records are retained forever so
/// claim history stays visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: String,
    pub reward_id: String,
    pub household_id: String,
    pub claimant_id: String,
    pub status: ClaimStatus,
    pub claimed_at: DateTime<Utc>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub rejection_reason: Option<String>,
    /// Re-claim cooldown set on rejection
    pub cooldown_until: Option<DateTime<Utc>>,
}

impl ClaimRecord {
    /// Claim ids are uuid-based: several claims can land in the same
    /// millisecond on a busy board.
    pub fn generate_id() -> String {
        format!("claim::{}", uuid::Uuid::new_v4().simple())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RewardError {
    #[error("Reward not found: {0}")]
    NotFound(String),
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),
    #[error("Reward is not active")]
    Inactive,
    #[error("Reward is out of stock")]
    OutOfStock,
    #[error("Not enough points: {shortfall} more needed")]
    InsufficientPoints { shortfall: i64 },
    #[error("A claim for this reward is already pending")]
    ClaimAlreadyPending,
    #[error("Reward cannot be claimed again until {until}")]
    CooldownActive { until: DateTime<Utc> },
    #[error("Claim is not pending")]
    ClaimNotPending,
    #[error("Only a parent can review claims")]
    ParentRoleRequired,
    #[error("Reward title cannot be empty")]
    EmptyTitle,
    #[error("Reward cost must be positive")]
    NonPositiveCost,
}
