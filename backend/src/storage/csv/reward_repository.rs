//! # Reward Repository
//!
//! Per-household `rewards.csv` plus `claims.csv`. Claim records are a
//! sub-entity of rewards but live in their own file: reward rows stay
//! fixed-width while claim history grows append-heavy and is never
//! deleted.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::{ClaimStatus, RewardCategory};
use std::fs::File;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::reward::{ClaimRecord, Reward};
use crate::storage::traits::RewardStorage;

/// CSV record structure for rewards
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RewardRecord {
    id: String,
    household_id: String,
    title: String,
    description: String,
    cost: i64,
    category: String,
    stock: Option<u32>,
    is_active: bool,
    created_at: String,
    updated_at: String,
}

impl From<&Reward> for RewardRecord {
    fn from(reward: &Reward) -> Self {
        RewardRecord {
            id: reward.id.clone(),
            household_id: reward.household_id.clone(),
            title: reward.title.clone(),
            description: reward.description.clone(),
            cost: reward.cost,
            category: reward.category.as_str().to_string(),
            stock: reward.stock,
            is_active: reward.is_active,
            created_at: reward.created_at.to_rfc3339(),
            updated_at: reward.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<RewardRecord> for Reward {
    type Error = anyhow::Error;

    fn try_from(record: RewardRecord) -> Result<Self> {
        let category = RewardCategory::from_str(&record.category)
            .map_err(|e| anyhow::anyhow!("Failed to parse reward category: {}", e))?;

        Ok(Reward {
            id: record.id,
            household_id: record.household_id,
            title: record.title,
            description: record.description,
            cost: record.cost,
            category,
            stock: record.stock,
            is_active: record.is_active,
            created_at: parse_timestamp(&record.created_at)?,
            updated_at: parse_timestamp(&record.updated_at)?,
        })
    }
}

/// CSV record structure for claim records
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClaimRow {
    id: String,
    reward_id: String,
    household_id: String,
    claimant_id: String,
    status: String,
    claimed_at: String,
    redeemed_at: Option<String>,
    reviewed_by: Option<String>,
    rejection_reason: Option<String>,
    cooldown_until: Option<String>,
}

impl From<&ClaimRecord> for ClaimRow {
    fn from(claim: &ClaimRecord) -> Self {
        ClaimRow {
            id: claim.id.clone(),
            reward_id: claim.reward_id.clone(),
            household_id: claim.household_id.clone(),
            claimant_id: claim.claimant_id.clone(),
            status: claim.status.as_str().to_string(),
            claimed_at: claim.claimed_at.to_rfc3339(),
            redeemed_at: claim.redeemed_at.map(|t| t.to_rfc3339()),
            reviewed_by: claim.reviewed_by.clone(),
            rejection_reason: claim.rejection_reason.clone(),
            cooldown_until: claim.cooldown_until.map(|t| t.to_rfc3339()),
        }
    }
}

impl TryFrom<ClaimRow> for ClaimRecord {
    type Error = anyhow::Error;

    fn try_from(row: ClaimRow) -> Result<Self> {
        let status = ClaimStatus::from_str(&row.status)
            .map_err(|e| anyhow::anyhow!("Failed to parse claim status: {}", e))?;

        Ok(ClaimRecord {
            id: row.id,
            reward_id: row.reward_id,
            household_id: row.household_id,
            claimant_id: row.claimant_id,
            status,
            claimed_at: parse_timestamp(&row.claimed_at)?,
            redeemed_at: row
                .redeemed_at
                .filter(|s| !s.is_empty())
                .map(|s| parse_timestamp(&s))
                .transpose()?,
            reviewed_by: row.reviewed_by.filter(|s| !s.is_empty()),
            rejection_reason: row.rejection_reason.filter(|s| !s.is_empty()),
            cooldown_until: row
                .cooldown_until
                .filter(|s| !s.is_empty())
                .map(|s| parse_timestamp(&s))
                .transpose()?,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid timestamp: {}", s))?
        .with_timezone(&Utc))
}

/// CSV-based reward and claim repository using per-household files
#[derive(Debug, Clone)]
pub struct RewardRepository {
    connection: CsvConnection,
}

impl RewardRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn rewards_file(&self, household_id: &str) -> PathBuf {
        self.connection
            .household_directory(household_id)
            .join("rewards.csv")
    }

    fn claims_file(&self, household_id: &str) -> PathBuf {
        self.connection
            .household_directory(household_id)
            .join("claims.csv")
    }

    fn read_rewards_at(&self, path: &std::path::Path) -> Result<Vec<Reward>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut rewards = Vec::new();
        for result in rdr.deserialize() {
            let record: RewardRecord = result?;
            match Reward::try_from(record) {
                Ok(reward) => rewards.push(reward),
                Err(e) => warn!("Skipping unreadable reward record: {}", e),
            }
        }
        Ok(rewards)
    }

    fn write_rewards(&self, household_id: &str, rewards: &[Reward]) -> Result<()> {
        self.connection.ensure_household_directory(household_id)?;
        let path = self.rewards_file(household_id);
        let temp_path = path.with_extension("tmp");
        {
            let mut wtr = csv::Writer::from_path(&temp_path)?;
            for reward in rewards {
                wtr.serialize(RewardRecord::from(reward))?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&temp_path, &path)?;
        debug!("Wrote {} rewards for {}", rewards.len(), household_id);
        Ok(())
    }

    fn read_claims_at(&self, path: &std::path::Path) -> Result<Vec<ClaimRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut claims = Vec::new();
        for result in rdr.deserialize() {
            let row: ClaimRow = result?;
            match ClaimRecord::try_from(row) {
                Ok(claim) => claims.push(claim),
                Err(e) => warn!("Skipping unreadable claim record: {}", e),
            }
        }
        Ok(claims)
    }

    fn write_claims(&self, household_id: &str, claims: &[ClaimRecord]) -> Result<()> {
        self.connection.ensure_household_directory(household_id)?;
        let path = self.claims_file(household_id);
        let temp_path = path.with_extension("tmp");
        {
            let mut wtr = csv::Writer::from_path(&temp_path)?;
            for claim in claims {
                wtr.serialize(ClaimRow::from(claim))?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl RewardStorage for RewardRepository {
    fn store_reward(&self, reward: &Reward) -> Result<()> {
        let mut rewards = self.read_rewards_at(&self.rewards_file(&reward.household_id))?;
        if rewards.iter().any(|r| r.id == reward.id) {
            return Err(anyhow::anyhow!("Reward already exists: {}", reward.id));
        }
        rewards.push(reward.clone());
        self.write_rewards(&reward.household_id, &rewards)
    }

    fn get_reward(&self, reward_id: &str) -> Result<Option<Reward>> {
        for dir in self.connection.list_household_directories()? {
            let rewards = self.read_rewards_at(&dir.join("rewards.csv"))?;
            if let Some(reward) = rewards.into_iter().find(|r| r.id == reward_id) {
                return Ok(Some(reward));
            }
        }
        Ok(None)
    }

    fn list_rewards(&self, household_id: &str) -> Result<Vec<Reward>> {
        let mut rewards = self.read_rewards_at(&self.rewards_file(household_id))?;
        rewards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rewards)
    }

    fn update_reward(&self, reward: &Reward) -> Result<()> {
        let mut rewards = self.read_rewards_at(&self.rewards_file(&reward.household_id))?;
        let slot = rewards
            .iter_mut()
            .find(|r| r.id == reward.id)
            .ok_or_else(|| anyhow::anyhow!("Cannot update reward {}: not stored", reward.id))?;
        *slot = reward.clone();
        self.write_rewards(&reward.household_id, &rewards)
    }

    fn store_claim(&self, claim: &ClaimRecord) -> Result<()> {
        let mut claims = self.read_claims_at(&self.claims_file(&claim.household_id))?;
        claims.push(claim.clone());
        self.write_claims(&claim.household_id, &claims)
    }

    fn get_claim(&self, claim_id: &str) -> Result<Option<ClaimRecord>> {
        for dir in self.connection.list_household_directories()? {
            let claims = self.read_claims_at(&dir.join("claims.csv"))?;
            if let Some(claim) = claims.into_iter().find(|c| c.id == claim_id) {
                return Ok(Some(claim));
            }
        }
        Ok(None)
    }

    fn list_claims_for_reward(&self, reward_id: &str) -> Result<Vec<ClaimRecord>> {
        let household_id = match self.get_reward(reward_id)? {
            Some(reward) => reward.household_id,
            None => return Ok(Vec::new()),
        };
        let mut claims = self.read_claims_at(&self.claims_file(&household_id))?;
        claims.retain(|c| c.reward_id == reward_id);
        claims.sort_by(|a, b| b.claimed_at.cmp(&a.claimed_at));
        Ok(claims)
    }

    fn update_claim(&self, claim: &ClaimRecord) -> Result<()> {
        let mut claims = self.read_claims_at(&self.claims_file(&claim.household_id))?;
        let slot = claims
            .iter_mut()
            .find(|c| c.id == claim.id)
            .ok_or_else(|| anyhow::anyhow!("Cannot update claim {}: not stored", claim.id))?;
        *slot = claim.clone();
        self.write_claims(&claim.household_id, &claims)
    }
}
