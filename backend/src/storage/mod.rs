pub mod csv;
pub mod traits;

pub use traits::{
    BadgeStorage, HouseholdStorage, ProfileStorage, RewardStorage, StreakStorage, TaskStorage,
};
