use shared::RewardCategory;

use crate::domain::models::reward::{ClaimRecord, Reward};

#[derive(Debug, Clone)]
pub struct CreateRewardCommand {
    pub household_id: String,
    pub actor_profile_id: String,
    pub title: String,
    pub description: Option<String>,
    pub cost: i64,
    pub category: Option<RewardCategory>,
    pub stock: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CreateRewardResult {
    pub reward: Reward,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct GetRewardCommand {
    pub reward_id: String,
}

#[derive(Debug, Clone)]
pub struct GetRewardResult {
    pub reward: Option<Reward>,
    pub remaining_stock: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ListRewardsCommand {
    pub household_id: String,
    pub include_inactive: bool,
}

/// A reward with its derived remaining stock.
#[derive(Debug, Clone)]
pub struct RewardWithStock {
    pub reward: Reward,
    pub remaining_stock: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ListRewardsResult {
    pub rewards: Vec<RewardWithStock>,
}

#[derive(Debug, Clone)]
pub struct UpdateRewardCommand {
    pub reward_id: String,
    pub actor_profile_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cost: Option<i64>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UpdateRewardResult {
    pub reward: Reward,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct ClaimRewardCommand {
    pub reward_id: String,
    pub claimant_id: String,
}

#[derive(Debug, Clone)]
pub struct ClaimRewardResult {
    pub claim: ClaimRecord,
    pub new_balance: i64,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct ApproveClaimCommand {
    pub claim_id: String,
    pub reviewer_id: String,
}

#[derive(Debug, Clone)]
pub struct RejectClaimCommand {
    pub claim_id: String,
    pub reviewer_id: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReviewClaimResult {
    pub claim: ClaimRecord,
    /// Claimant balance after a rejection refund; unchanged on approval
    pub claimant_balance: i64,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct ListClaimsCommand {
    pub reward_id: String,
}

#[derive(Debug, Clone)]
pub struct ListClaimsResult {
    pub claims: Vec<ClaimRecord>,
}
