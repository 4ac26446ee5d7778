//! # Chore Quest Backend
//!
//! Domain services and file-based storage for a gamified household chore
//! tracker: parents create and assign tasks, children earn points,
//! streaks and badges, and redeem points in a parent-moderated rewards
//! shop. The REST layer in [`rest`] is the system boundary; every role
//! check runs in the domain services, never only in a client.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod rest;
pub mod storage;

pub use storage::csv::CsvConnection;

use domain::{
    BadgeService, HouseholdService, LeaderboardService, ProfileService, RewardService,
    StreakService, TaskService,
};

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub household_service: HouseholdService,
    pub profile_service: ProfileService,
    pub task_service: TaskService,
    pub reward_service: RewardService,
    pub streak_service: StreakService,
    pub badge_service: BadgeService,
    pub leaderboard_service: LeaderboardService,
}

impl Backend {
    /// Create a new backend instance with all services over the given
    /// data directory
    pub fn new(data_directory: impl AsRef<Path>) -> Result<Self> {
        let csv_conn = Arc::new(CsvConnection::new(data_directory)?);

        let profile_service = ProfileService::new(csv_conn.clone());
        let household_service = HouseholdService::new(csv_conn.clone(), profile_service.clone());
        let streak_service = StreakService::new(csv_conn.clone());
        let badge_service = BadgeService::new(csv_conn.clone());
        let task_service = TaskService::new(
            csv_conn.clone(),
            streak_service.clone(),
            badge_service.clone(),
        );
        let reward_service = RewardService::new(csv_conn.clone());
        let leaderboard_service = LeaderboardService::new(csv_conn.clone());

        Ok(Backend {
            household_service,
            profile_service,
            task_service,
            reward_service,
            streak_service,
            badge_service,
            leaderboard_service,
        })
    }
}
