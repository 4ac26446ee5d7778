//! # Badge Repository
//!
//! Per-household `earned_badges.csv`. Badge definitions are code (the
//! static catalog); only earned records are data. Upserts are idempotent
//! so re-evaluating a profile after a restart never duplicates awards.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::badge::EarnedBadge;
use crate::storage::traits::BadgeStorage;

/// CSV record structure for earned badges
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EarnedBadgeRecord {
    badge_id: String,
    profile_id: String,
    earned_at: String,
}

impl From<&EarnedBadge> for EarnedBadgeRecord {
    fn from(badge: &EarnedBadge) -> Self {
        EarnedBadgeRecord {
            badge_id: badge.badge_id.clone(),
            profile_id: badge.profile_id.clone(),
            earned_at: badge.earned_at.to_rfc3339(),
        }
    }
}

impl TryFrom<EarnedBadgeRecord> for EarnedBadge {
    type Error = anyhow::Error;

    fn try_from(record: EarnedBadgeRecord) -> Result<Self> {
        let earned_at = DateTime::parse_from_rfc3339(&record.earned_at)
            .with_context(|| format!("Invalid timestamp: {}", record.earned_at))?
            .with_timezone(&Utc);
        Ok(EarnedBadge {
            badge_id: record.badge_id,
            profile_id: record.profile_id,
            earned_at,
        })
    }
}

/// CSV-based earned-badge repository using per-household files
#[derive(Debug, Clone)]
pub struct BadgeRepository {
    connection: CsvConnection,
}

impl BadgeRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn badges_file(&self, household_id: &str) -> PathBuf {
        self.connection
            .household_directory(household_id)
            .join("earned_badges.csv")
    }

    fn read_badges(&self, household_id: &str) -> Result<Vec<EarnedBadge>> {
        let path = self.badges_file(household_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut badges = Vec::new();
        for result in rdr.deserialize() {
            let record: EarnedBadgeRecord = result?;
            match EarnedBadge::try_from(record) {
                Ok(badge) => badges.push(badge),
                Err(e) => warn!("Skipping unreadable earned-badge record: {}", e),
            }
        }
        Ok(badges)
    }

    fn write_badges(&self, household_id: &str, badges: &[EarnedBadge]) -> Result<()> {
        self.connection.ensure_household_directory(household_id)?;
        let path = self.badges_file(household_id);
        let temp_path = path.with_extension("tmp");
        {
            let mut wtr = csv::Writer::from_path(&temp_path)?;
            for badge in badges {
                wtr.serialize(EarnedBadgeRecord::from(badge))?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl BadgeStorage for BadgeRepository {
    fn upsert_earned_badge(&self, household_id: &str, badge: &EarnedBadge) -> Result<()> {
        let mut badges = self.read_badges(household_id)?;
        if badges
            .iter()
            .any(|b| b.profile_id == badge.profile_id && b.badge_id == badge.badge_id)
        {
            debug!(
                "Badge {} already recorded for {}",
                badge.badge_id, badge.profile_id
            );
            return Ok(());
        }
        badges.push(badge.clone());
        self.write_badges(household_id, &badges)
    }

    fn list_earned_badges(
        &self,
        household_id: &str,
        profile_id: &str,
    ) -> Result<Vec<EarnedBadge>> {
        let mut badges = self.read_badges(household_id)?;
        badges.retain(|b| b.profile_id == profile_id);
        badges.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
        Ok(badges)
    }

    fn has_earned_badge(
        &self,
        household_id: &str,
        profile_id: &str,
        badge_id: &str,
    ) -> Result<bool> {
        Ok(self
            .read_badges(household_id)?
            .iter()
            .any(|b| b.profile_id == profile_id && b.badge_id == badge_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::test_connection;

    fn earned(badge_id: &str, profile_id: &str) -> EarnedBadge {
        EarnedBadge {
            badge_id: badge_id.to_string(),
            profile_id: profile_id.to_string(),
            earned_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_and_list() {
        let (conn, _temp_dir) = test_connection();
        let repo = BadgeRepository::new(conn);

        repo.upsert_earned_badge("household::1", &earned("first-steps", "profile::1"))
            .unwrap();
        repo.upsert_earned_badge("household::1", &earned("task-master", "profile::1"))
            .unwrap();
        repo.upsert_earned_badge("household::1", &earned("first-steps", "profile::2"))
            .unwrap();

        let badges = repo.list_earned_badges("household::1", "profile::1").unwrap();
        assert_eq!(badges.len(), 2);
        assert!(repo
            .has_earned_badge("household::1", "profile::1", "task-master")
            .unwrap());
        assert!(!repo
            .has_earned_badge("household::1", "profile::2", "task-master")
            .unwrap());
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let (conn, _temp_dir) = test_connection();
        let repo = BadgeRepository::new(conn);

        let badge = earned("first-steps", "profile::1");
        repo.upsert_earned_badge("household::1", &badge).unwrap();
        repo.upsert_earned_badge("household::1", &badge).unwrap();

        assert_eq!(
            repo.list_earned_badges("household::1", "profile::1")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_badges_survive_reopen() {
        let (conn, temp_dir) = test_connection();
        let repo = BadgeRepository::new(conn);
        repo.upsert_earned_badge("household::1", &earned("first-steps", "profile::1"))
            .unwrap();

        // New connection over the same directory simulates a restart
        let conn2 = CsvConnection::new(temp_dir.path()).unwrap();
        let repo2 = BadgeRepository::new(conn2);
        assert!(repo2
            .has_earned_badge("household::1", "profile::1", "first-steps")
            .unwrap());
    }
}
