//! Badge evaluation and awarding.
//!
//! Evaluation is a pure function of a profile's stats snapshot against
//! the static catalog; awarding is an explicit idempotent write to the
//! earned-badges store, so awards survive restarts and re-evaluation
//! never duplicates them.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::models::badge::{BadgeDefinition, BadgeStats, EarnedBadge, BADGE_CATALOG};
use crate::domain::models::profile::{Profile, ProfileError};
use crate::storage::csv::{BadgeRepository, CsvConnection, ProfileRepository};
use crate::storage::traits::{BadgeStorage, ProfileStorage};

/// Service evaluating the badge catalog against profile stats and
/// persisting new awards.
#[derive(Clone)]
pub struct BadgeService {
    badge_repository: BadgeRepository,
    profile_repository: ProfileRepository,
}

impl BadgeService {
    /// Create a new BadgeService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            badge_repository: BadgeRepository::new((*csv_conn).clone()),
            profile_repository: ProfileRepository::new((*csv_conn).clone()),
        }
    }

    /// Evaluate every not-yet-earned badge against the profile's current
    /// stats and persist any new awards. Returns the newly earned badges
    /// for celebratory UI feedback.
    pub fn check_and_award(&self, profile: &Profile) -> Result<Vec<EarnedBadge>> {
        let stats = stats_snapshot(profile);
        let earned: HashSet<String> = self
            .badge_repository
            .list_earned_badges(&profile.household_id, &profile.id)?
            .into_iter()
            .map(|b| b.badge_id)
            .collect();

        let newly_qualified = evaluate(&stats, &earned);
        let mut awarded = Vec::new();
        let now = Utc::now();

        for definition in newly_qualified {
            let badge = EarnedBadge {
                badge_id: definition.id.to_string(),
                profile_id: profile.id.clone(),
                earned_at: now,
            };
            self.badge_repository
                .upsert_earned_badge(&profile.household_id, &badge)?;
            info!("{} earned badge '{}'", profile.id, definition.name);
            awarded.push(badge);
        }

        if awarded.is_empty() {
            debug!("No new badges for {}", profile.id);
        }
        Ok(awarded)
    }

    /// Re-evaluate a profile by id
    pub fn check_and_award_by_id(&self, profile_id: &str) -> Result<Vec<EarnedBadge>> {
        let profile = self
            .profile_repository
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;
        self.check_and_award(&profile)
    }

    /// List the badges a profile has earned, most recent first
    pub fn list_earned_badges(&self, profile_id: &str) -> Result<Vec<EarnedBadge>> {
        let profile = self
            .profile_repository
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;
        self.badge_repository
            .list_earned_badges(&profile.household_id, profile_id)
    }
}

fn stats_snapshot(profile: &Profile) -> BadgeStats {
    BadgeStats {
        completed_tasks: profile.completed_tasks,
        current_streak: profile.current_streak,
        lifetime_points: profile.lifetime_points,
        morning_completions: profile.morning_completions,
        night_completions: profile.night_completions,
    }
}

/// Pure evaluation: catalog entries the stats qualify for that are not
/// already earned.
fn evaluate(stats: &BadgeStats, already_earned: &HashSet<String>) -> Vec<&'static BadgeDefinition> {
    BADGE_CATALOG
        .iter()
        .filter(|definition| !already_earned.contains(definition.id))
        .filter(|definition| definition.qualifies(stats))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::household::CreateHouseholdCommand;
    use crate::domain::commands::profile::CreateProfileCommand;
    use crate::domain::household_service::HouseholdService;
    use crate::domain::profile_service::ProfileService;
    use shared::ProfileRole;
    use tempfile::TempDir;

    fn stats(completed: u32, streak: u32, lifetime: i64) -> BadgeStats {
        BadgeStats {
            completed_tasks: completed,
            current_streak: streak,
            lifetime_points: lifetime,
            morning_completions: 0,
            night_completions: 0,
        }
    }

    #[test]
    fn test_evaluate_threshold_exactness() {
        let none = evaluate(&stats(9, 0, 0), &HashSet::new());
        assert!(!none.iter().any(|b| b.id == "task-master"));

        let at_ten = evaluate(&stats(10, 0, 0), &HashSet::new());
        assert!(at_ten.iter().any(|b| b.id == "task-master"));
        assert!(!at_ten.iter().any(|b| b.id == "super-achiever"));

        let at_fifty = evaluate(&stats(50, 0, 0), &HashSet::new());
        assert!(at_fifty.iter().any(|b| b.id == "super-achiever"));
    }

    #[test]
    fn test_evaluate_skips_already_earned() {
        let mut earned = HashSet::new();
        earned.insert("task-master".to_string());
        let result = evaluate(&stats(10, 0, 0), &earned);
        assert!(!result.iter().any(|b| b.id == "task-master"));
    }

    fn setup() -> (BadgeService, ProfileRepository, Profile, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let conn = Arc::new(CsvConnection::new(temp_dir.path()).expect("Failed to init test DB"));
        let profile_service = ProfileService::new(conn.clone());
        let household_service = HouseholdService::new(conn.clone(), profile_service.clone());

        let household = household_service
            .create_household(CreateHouseholdCommand {
                name: "The Parkers".to_string(),
            })
            .unwrap()
            .household;
        let profile = profile_service
            .create_profile(CreateProfileCommand {
                household_id: household.id,
                name: "Maya".to_string(),
                role: ProfileRole::Child,
                pin: None,
            })
            .unwrap()
            .profile;

        (
            BadgeService::new(conn.clone()),
            ProfileRepository::new((*conn).clone()),
            profile,
            temp_dir,
        )
    }

    #[test]
    fn test_check_and_award_persists_new_badges() {
        let (service, repo, mut profile, _temp_dir) = setup();

        profile.completed_tasks = 10;
        profile.lifetime_points = 120;
        repo.update_profile(&profile).unwrap();

        let awarded = service.check_and_award(&profile).unwrap();
        let ids: Vec<&str> = awarded.iter().map(|b| b.badge_id.as_str()).collect();
        assert!(ids.contains(&"first-steps"));
        assert!(ids.contains(&"task-master"));
        assert!(ids.contains(&"point-collector"));
        assert!(!ids.contains(&"super-achiever"));

        let listed = service.list_earned_badges(&profile.id).unwrap();
        assert_eq!(listed.len(), awarded.len());
    }

    #[test]
    fn test_check_and_award_is_idempotent() {
        let (service, repo, mut profile, _temp_dir) = setup();

        profile.completed_tasks = 1;
        repo.update_profile(&profile).unwrap();

        let first = service.check_and_award(&profile).unwrap();
        assert_eq!(first.len(), 1);

        let second = service.check_and_award(&profile).unwrap();
        assert!(second.is_empty());
        assert_eq!(service.list_earned_badges(&profile.id).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_profile_fails() {
        let (service, _repo, _profile, _temp_dir) = setup();
        assert!(service.check_and_award_by_id("profile::ghost").is_err());
    }
}
