//! Family leaderboard. A derived view over household profiles; nothing
//! is stored.

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::domain::models::profile::Profile;
use crate::storage::csv::{CsvConnection, ProfileRepository};
use crate::storage::traits::ProfileStorage;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub profile_id: String,
    pub name: String,
    pub points: i64,
    pub current_streak: u32,
    pub completed_tasks: u32,
}

/// Service ranking household members by points.
#[derive(Clone)]
pub struct LeaderboardService {
    profile_repository: ProfileRepository,
}

impl LeaderboardService {
    /// Create a new LeaderboardService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            profile_repository: ProfileRepository::new((*csv_conn).clone()),
        }
    }

    /// Rank a household's profiles by points descending, name as the
    /// tie-break so the ordering is stable.
    pub fn get_leaderboard(&self, household_id: &str) -> Result<Vec<LeaderboardEntry>> {
        let mut profiles = self.profile_repository.list_profiles(household_id)?;
        profiles.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));

        debug!(
            "Leaderboard for {} over {} profiles",
            household_id,
            profiles.len()
        );

        Ok(profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| to_entry(profile, index as u32 + 1))
            .collect())
    }
}

fn to_entry(profile: &Profile, rank: u32) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        profile_id: profile.id.clone(),
        name: profile.name.clone(),
        points: profile.points,
        current_streak: profile.current_streak,
        completed_tasks: profile.completed_tasks,
    }
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

    fn setup() -> (LeaderboardService, ProfileRepository, ProfileService, String, TempDir) {
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

        (
            LeaderboardService::new(conn.clone()),
            ProfileRepository::new((*conn).clone()),
            profile_service,
            household.id,
            temp_dir,
        )
    }

    fn add_member(
        service: &ProfileService,
        repo: &ProfileRepository,
        household_id: &str,
        name: &str,
        points: i64,
    ) -> String {
        let mut profile = service
            .create_profile(CreateProfileCommand {
                household_id: household_id.to_string(),
                name: name.to_string(),
                role: ProfileRole::Child,
                pin: None,
            })
            .unwrap()
            .profile;
        profile.points = points;
        repo.update_profile(&profile).unwrap();
        profile.id
    }

    #[test]
    fn test_leaderboard_orders_by_points() {
        let (service, repo, profile_service, household_id, _temp_dir) = setup();

        add_member(&profile_service, &repo, &household_id, "Maya", 120);
        add_member(&profile_service, &repo, &household_id, "Ben", 300);
        add_member(&profile_service, &repo, &household_id, "Zoe", 40);

        let entries = service.get_leaderboard(&household_id).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Maya", "Zoe"]);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[2].rank, 3);
    }

    #[test]
    fn test_leaderboard_tie_breaks_by_name() {
        let (service, repo, profile_service, household_id, _temp_dir) = setup();

        add_member(&profile_service, &repo, &household_id, "Zoe", 100);
        add_member(&profile_service, &repo, &household_id, "Ben", 100);

        let entries = service.get_leaderboard(&household_id).unwrap();
        assert_eq!(entries[0].name, "Ben");
        assert_eq!(entries[1].name, "Zoe");
    }

    #[test]
    fn test_leaderboard_empty_household() {
        let (service, _repo, _ps, household_id, _temp_dir) = setup();
        assert!(service.get_leaderboard(&household_id).unwrap().is_empty());
    }
}
