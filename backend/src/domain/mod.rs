//! Domain layer: services, commands and models for Chore Quest.

pub mod badge_service;
pub mod commands;
pub mod household_service;
pub mod leaderboard_service;
pub mod models;
pub mod profile_service;
pub mod reward_service;
pub mod streak_service;
pub mod task_service;

pub use badge_service::BadgeService;
pub use household_service::HouseholdService;
pub use leaderboard_service::LeaderboardService;
pub use profile_service::ProfileService;
pub use reward_service::RewardService;
pub use streak_service::StreakService;
pub use task_service::TaskService;
