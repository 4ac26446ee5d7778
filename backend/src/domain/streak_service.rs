//! Streak tracking.
//!
//! A streak is the count of consecutive calendar days with at least one
//! completed task. All day truncation uses UTC so every household member
//! sees the same day boundary regardless of device timezone.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::models::profile::ProfileError;
use crate::storage::csv::{CsvConnection, ProfileRepository, StreakRepository};
use crate::storage::traits::{ProfileStorage, StreakStorage};

/// Outcome of a streak update.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakUpdate {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// False when the profile already had an entry for today
    pub changed: bool,
}

/// Service deriving consecutive-day activity counts from per-profile
/// history.
#[derive(Clone)]
pub struct StreakService {
    profile_repository: ProfileRepository,
    streak_repository: StreakRepository,
}

impl StreakService {
    /// Create a new StreakService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            profile_repository: ProfileRepository::new((*csv_conn).clone()),
            streak_repository: StreakRepository::new((*csv_conn).clone()),
        }
    }

    /// Update a profile's streak for today (UTC)
    pub fn update_streak(&self, profile_id: &str) -> Result<StreakUpdate> {
        self.update_streak_on(profile_id, Utc::now().date_naive())
    }

    /// Update a profile's streak as of a specific day. Idempotent: a
    /// second call on the same day is a no-op.
    pub fn update_streak_on(&self, profile_id: &str, today: NaiveDate) -> Result<StreakUpdate> {
        let mut profile = self
            .profile_repository
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;

        if self
            .streak_repository
            .has_active_day(&profile.household_id, profile_id, today)?
        {
            debug!("Streak already counted today for {}", profile_id);
            return Ok(StreakUpdate {
                current_streak: profile.current_streak,
                longest_streak: profile.longest_streak,
                changed: false,
            });
        }

        let (current, longest) = next_streak(
            profile.current_streak,
            profile.longest_streak,
            profile.last_active_date,
            today,
        );

        self.streak_repository
            .append_active_day(&profile.household_id, profile_id, today)?;

        profile.current_streak = current;
        profile.longest_streak = longest;
        profile.last_active_date = Some(today);
        profile.updated_at = Utc::now();
        self.profile_repository.update_profile(&profile)?;

        info!(
            "Streak for {} is now {} (longest {})",
            profile_id, current, longest
        );

        Ok(StreakUpdate {
            current_streak: current,
            longest_streak: longest,
            changed: true,
        })
    }

    /// A profile's active days in chronological order
    pub fn history(&self, profile_id: &str) -> Result<Vec<NaiveDate>> {
        let profile = self
            .profile_repository
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;
        self.streak_repository
            .list_active_days(&profile.household_id, profile_id)
    }
}

/// Pure streak step: given the stored counters and the day being
/// recorded, produce the new (current, longest) pair.
///
/// - One day since the last activity, or no prior activity at all,
///   extends the streak.
/// - A gap of more than one day breaks it back to 1.
/// - Same-day calls never reach this function (history is checked first),
///   but a zero-day gap leaves the counters untouched as a safety net.
fn next_streak(
    current: u32,
    longest: u32,
    last_active: Option<NaiveDate>,
    today: NaiveDate,
) -> (u32, u32) {
    let new_current = match last_active {
        None => current + 1,
        Some(last) => {
            let days_since = (today - last).num_days();
            if days_since == 0 {
                return (current, longest);
            } else if days_since == 1 {
                current + 1
            } else {
                1
            }
        }
    };
    (new_current, longest.max(new_current))
}
