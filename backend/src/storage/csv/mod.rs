//! # CSV Storage Module
//!
//! File-based storage for Chore Quest. Each household owns a directory of
//! CSV files plus a `household.yaml` document; a single
//! `global_config.yaml` at the root tracks the active profile.
//!
//! The domain layer only sees the traits in `storage::traits`, so this
//! module is swappable for a database-backed implementation.

pub mod badge_repository;
pub mod connection;
pub mod global_config_repository;
pub mod household_repository;
pub mod profile_repository;
pub mod reward_repository;
pub mod streak_repository;
pub mod task_repository;

#[cfg(test)]
pub mod test_utils;

pub use badge_repository::BadgeRepository;
pub use connection::CsvConnection;
pub use global_config_repository::{GlobalConfig, GlobalConfigRepository, GlobalConfigStorage};
pub use household_repository::HouseholdRepository;
pub use profile_repository::ProfileRepository;
pub use reward_repository::RewardRepository;
pub use streak_repository::StreakRepository;
pub use task_repository::TaskRepository;
