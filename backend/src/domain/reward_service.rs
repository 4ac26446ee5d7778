//! Reward shop and claim settlement.
//!
//! Claiming deducts points up front and parks the claim as pending until
//! a parent approves or rejects it. Rejection refunds the full cost and
//! starts a 24-hour re-claim cooldown. Claim records are never deleted,
//! so the shop history stays visible.

use anyhow::Result;
use chrono::{Duration, Utc};
use log::{debug, info, warn};
use shared::{ClaimStatus, RewardCategory};
use std::sync::Arc;

use crate::domain::commands::reward::{
    ApproveClaimCommand, ClaimRewardCommand, ClaimRewardResult, CreateRewardCommand,
    CreateRewardResult, GetRewardCommand, GetRewardResult, ListClaimsCommand, ListClaimsResult,
    ListRewardsCommand, ListRewardsResult, RejectClaimCommand, ReviewClaimResult,
    RewardWithStock, UpdateRewardCommand, UpdateRewardResult,
};
use crate::domain::models::profile::{Profile, ProfileError};
use crate::domain::models::reward::{ClaimRecord, Reward, RewardError};
use crate::storage::csv::{CsvConnection, ProfileRepository, RewardRepository};
use crate::storage::traits::{ProfileStorage, RewardStorage};

/// How long a rejected claim blocks re-claiming the same reward.
const RECLAIM_COOLDOWN_HOURS: i64 = 24;

/// Service for managing rewards and the claim/approve/reject workflow
#[derive(Clone)]
pub struct RewardService {
    reward_repository: RewardRepository,
    profile_repository: ProfileRepository,
}

impl RewardService {
    /// Create a new RewardService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            reward_repository: RewardRepository::new((*csv_conn).clone()),
            profile_repository: ProfileRepository::new((*csv_conn).clone()),
        }
    }

    /// Create a new reward (parent-only)
    pub fn create_reward(&self, command: CreateRewardCommand) -> Result<CreateRewardResult> {
        info!("Creating reward: {:?}", command.title);

        self.require_parent(&command.actor_profile_id)?;

        if command.title.trim().is_empty() {
            return Err(RewardError::EmptyTitle.into());
        }
        if command.cost <= 0 {
            return Err(RewardError::NonPositiveCost.into());
        }

        let now = Utc::now();
        let reward = Reward {
            id: Reward::generate_id(now.timestamp_micros() as u64),
            household_id: command.household_id,
            title: command.title.trim().to_string(),
            description: command.description.unwrap_or_default(),
            cost: command.cost,
            category: command.category.unwrap_or(RewardCategory::Privilege),
            stock: command.stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.reward_repository.store_reward(&reward)?;

        info!("Created reward: {} with ID: {}", reward.title, reward.id);

        Ok(CreateRewardResult {
            success_message: format!("Reward '{}' created", reward.title),
            reward,
        })
    }

    /// Get a reward with its derived remaining stock
    pub fn get_reward(&self, command: GetRewardCommand) -> Result<GetRewardResult> {
        let reward = self.reward_repository.get_reward(&command.reward_id)?;
        let remaining_stock = match &reward {
            Some(reward) => {
                let claims = self.reward_repository.list_claims_for_reward(&reward.id)?;
                reward.remaining_stock(&claims)
            }
            None => None,
        };
        Ok(GetRewardResult {
            reward,
            remaining_stock,
        })
    }

    /// List a household's rewards with their remaining stock. Paused
    /// rewards are hidden unless asked for.
    pub fn list_rewards(&self, command: ListRewardsCommand) -> Result<ListRewardsResult> {
        let mut rewards = self.reward_repository.list_rewards(&command.household_id)?;
        if !command.include_inactive {
            rewards.retain(|r| r.is_active);
        }

        let mut with_stock = Vec::with_capacity(rewards.len());
        for reward in rewards {
            let claims = self.reward_repository.list_claims_for_reward(&reward.id)?;
            let remaining_stock = reward.remaining_stock(&claims);
            with_stock.push(RewardWithStock {
                reward,
                remaining_stock,
            });
        }

        Ok(ListRewardsResult { rewards: with_stock })
    }

    /// Update a reward (parent-only). Pausing via is_active keeps the
    /// reward and its claim history on file.
    pub fn update_reward(&self, command: UpdateRewardCommand) -> Result<UpdateRewardResult> {
        info!("Updating reward: {}", command.reward_id);

        self.require_parent(&command.actor_profile_id)?;

        let mut reward = self
            .reward_repository
            .get_reward(&command.reward_id)?
            .ok_or_else(|| RewardError::NotFound(command.reward_id.clone()))?;

        if let Some(title) = command.title {
            if title.trim().is_empty() {
                return Err(RewardError::EmptyTitle.into());
            }
            reward.title = title.trim().to_string();
        }
        if let Some(description) = command.description {
            reward.description = description;
        }
        if let Some(cost) = command.cost {
            if cost <= 0 {
                return Err(RewardError::NonPositiveCost.into());
            }
            reward.cost = cost;
        }
        if let Some(stock) = command.stock {
            reward.stock = Some(stock);
        }
        if let Some(is_active) = command.is_active {
            reward.is_active = is_active;
        }
        reward.updated_at = Utc::now();

        self.reward_repository.update_reward(&reward)?;

        Ok(UpdateRewardResult {
            success_message: "Reward updated".to_string(),
            reward,
        })
    }

    /// Claim a reward for a claimant.
    ///
    /// Preconditions in order: the reward exists and is active, stock is
    /// left (checked before the balance so an out-of-stock result never
    /// depends on points), no claim by this claimant is already pending,
    /// no rejection cooldown is running, and the balance covers the
    /// cost. Success appends a pending claim and deducts the cost from
    /// the claimant's profile, the single source of truth for balances.
    pub fn claim_reward(&self, command: ClaimRewardCommand) -> Result<ClaimRewardResult> {
        info!(
            "Claim on {} by {}",
            command.reward_id, command.claimant_id
        );

        let reward = self
            .reward_repository
            .get_reward(&command.reward_id)?
            .ok_or_else(|| RewardError::NotFound(command.reward_id.clone()))?;

        if !reward.is_active {
            return Err(RewardError::Inactive.into());
        }

        let claims = self.reward_repository.list_claims_for_reward(&reward.id)?;

        if let Some(0) = reward.remaining_stock(&claims) {
            return Err(RewardError::OutOfStock.into());
        }

        let own_claims: Vec<&ClaimRecord> = claims
            .iter()
            .filter(|c| c.claimant_id == command.claimant_id)
            .collect();

        if own_claims.iter().any(|c| c.status == ClaimStatus::Pending) {
            return Err(RewardError::ClaimAlreadyPending.into());
        }

        let now = Utc::now();
        if let Some(until) = own_claims
            .iter()
            .filter(|c| c.status == ClaimStatus::Rejected)
            .filter_map(|c| c.cooldown_until)
            .max()
        {
            if until > now {
                return Err(RewardError::CooldownActive { until }.into());
            }
        }

        let mut claimant = self
            .profile_repository
            .get_profile(&command.claimant_id)?
            .ok_or_else(|| ProfileError::NotFound(command.claimant_id.clone()))?;

        if claimant.points < reward.cost {
            let shortfall = reward.cost - claimant.points;
            debug!(
                "{} is {} points short of {}",
                claimant.id, shortfall, reward.id
            );
            return Err(RewardError::InsufficientPoints { shortfall }.into());
        }

        let claim = ClaimRecord {
            id: ClaimRecord::generate_id(),
            reward_id: reward.id.clone(),
            household_id: reward.household_id.clone(),
            claimant_id: claimant.id.clone(),
            status: ClaimStatus::Pending,
            claimed_at: now,
            redeemed_at: None,
            reviewed_by: None,
            rejection_reason: None,
            cooldown_until: None,
        };
        self.reward_repository.store_claim(&claim)?;

        claimant.points -= reward.cost;
        claimant.updated_at = now;
        self.profile_repository.update_profile(&claimant)?;

        info!(
            "Claim {} pending; {} now has {} points",
            claim.id, claimant.id, claimant.points
        );

        Ok(ClaimRewardResult {
            success_message: format!("'{}' claimed, waiting for approval", reward.title),
            claim,
            new_balance: claimant.points,
        })
    }

    /// Approve a pending claim (parent-only). Stock and balance are not
    /// re-validated here; the claim already consumed both.
    pub fn approve_claim(&self, command: ApproveClaimCommand) -> Result<ReviewClaimResult> {
        info!("Approving claim: {}", command.claim_id);

        self.require_parent(&command.reviewer_id)?;

        let mut claim = self
            .reward_repository
            .get_claim(&command.claim_id)?
            .ok_or_else(|| RewardError::ClaimNotFound(command.claim_id.clone()))?;

        if claim.status != ClaimStatus::Pending {
            return Err(RewardError::ClaimNotPending.into());
        }

        let now = Utc::now();
        claim.status = ClaimStatus::Approved;
        claim.redeemed_at = Some(now);
        claim.reviewed_by = Some(command.reviewer_id);
        self.reward_repository.update_claim(&claim)?;

        let claimant_balance = self
            .profile_repository
            .get_profile(&claim.claimant_id)?
            .map(|p| p.points)
            .unwrap_or(0);

        info!("Claim {} approved", claim.id);

        Ok(ReviewClaimResult {
            success_message: "Claim approved".to_string(),
            claim,
            claimant_balance,
        })
    }

    /// Reject a pending claim (parent-only): refund the full cost, stamp
    /// the reviewer and reason, and start the re-claim cooldown. The
    /// record is kept so claim history stays visible.
    pub fn reject_claim(&self, command: RejectClaimCommand) -> Result<ReviewClaimResult> {
        info!("Rejecting claim: {}", command.claim_id);

        self.require_parent(&command.reviewer_id)?;

        let mut claim = self
            .reward_repository
            .get_claim(&command.claim_id)?
            .ok_or_else(|| RewardError::ClaimNotFound(command.claim_id.clone()))?;

        if claim.status != ClaimStatus::Pending {
            return Err(RewardError::ClaimNotPending.into());
        }

        let reward = self
            .reward_repository
            .get_reward(&claim.reward_id)?
            .ok_or_else(|| RewardError::NotFound(claim.reward_id.clone()))?;

        let now = Utc::now();
        claim.status = ClaimStatus::Rejected;
        claim.reviewed_by = Some(command.reviewer_id);
        claim.rejection_reason = command.reason;
        claim.cooldown_until = Some(now + Duration::hours(RECLAIM_COOLDOWN_HOURS));
        self.reward_repository.update_claim(&claim)?;

        let claimant_balance = match self.profile_repository.get_profile(&claim.claimant_id)? {
            Some(mut claimant) => {
                claimant.points += reward.cost;
                claimant.updated_at = now;
                self.profile_repository.update_profile(&claimant)?;
                info!(
                    "Refunded {} points to {} for claim {}",
                    reward.cost, claimant.id, claim.id
                );
                claimant.points
            }
            None => {
                warn!(
                    "Claimant {} of claim {} no longer exists; nothing to refund",
                    claim.claimant_id, claim.id
                );
                0
            }
        };

        Ok(ReviewClaimResult {
            success_message: "Claim rejected".to_string(),
            claim,
            claimant_balance,
        })
    }

    /// A reward's claim history, most recent first
    pub fn list_claims(&self, command: ListClaimsCommand) -> Result<ListClaimsResult> {
        let claims = self
            .reward_repository
            .list_claims_for_reward(&command.reward_id)?;
        Ok(ListClaimsResult { claims })
    }

    fn require_parent(&self, profile_id: &str) -> Result<Profile> {
        let profile = self
            .profile_repository
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;
        if !profile.is_parent() {
            return Err(RewardError::ParentRoleRequired.into());
        }
        Ok(profile)
    }
}
