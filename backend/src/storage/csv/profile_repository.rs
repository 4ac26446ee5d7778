//! # Profile Repository
//!
//! Per-household `profiles.csv` holding parent and child profiles with
//! their gamification stats. The profile row is the single source of
//! truth for its point balance.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::ProfileRole;
use std::fs::File;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::profile::Profile;
use crate::storage::traits::ProfileStorage;

/// CSV record structure for profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileRecord {
    id: String,
    household_id: String,
    name: String,
    role: String,
    pin: Option<String>,
    points: i64,
    lifetime_points: i64,
    completed_tasks: u32,
    morning_completions: u32,
    night_completions: u32,
    current_streak: u32,
    longest_streak: u32,
    last_active_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        ProfileRecord {
            id: profile.id.clone(),
            household_id: profile.household_id.clone(),
            name: profile.name.clone(),
            role: profile.role.as_str().to_string(),
            pin: profile.pin.clone(),
            points: profile.points,
            lifetime_points: profile.lifetime_points,
            completed_tasks: profile.completed_tasks,
            morning_completions: profile.morning_completions,
            night_completions: profile.night_completions,
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            last_active_date: profile.last_active_date.map(|d| d.to_string()),
            created_at: profile.created_at.to_rfc3339(),
            updated_at: profile.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = anyhow::Error;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let role = ProfileRole::from_str(&record.role)
            .map_err(|e| anyhow::anyhow!("Failed to parse profile role: {}", e))?;
        let last_active_date = record
            .last_active_date
            .filter(|s| !s.is_empty())
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .with_context(|| format!("Invalid last active date: {}", s))
            })
            .transpose()?;

        Ok(Profile {
            id: record.id,
            household_id: record.household_id,
            name: record.name,
            role,
            pin: record.pin.filter(|s| !s.is_empty()),
            points: record.points,
            lifetime_points: record.lifetime_points,
            completed_tasks: record.completed_tasks,
            morning_completions: record.morning_completions,
            night_completions: record.night_completions,
            current_streak: record.current_streak,
            longest_streak: record.longest_streak,
            last_active_date,
            created_at: parse_timestamp(&record.created_at)?,
            updated_at: parse_timestamp(&record.updated_at)?,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid timestamp: {}", s))?
        .with_timezone(&Utc))
}

/// CSV-based profile repository using per-household files
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    connection: CsvConnection,
}

impl ProfileRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn profiles_file(&self, household_id: &str) -> PathBuf {
        self.connection
            .household_directory(household_id)
            .join("profiles.csv")
    }

    fn read_profiles(&self, household_id: &str) -> Result<Vec<Profile>> {
        self.read_profiles_at(&self.profiles_file(household_id))
    }

    fn read_profiles_at(&self, path: &std::path::Path) -> Result<Vec<Profile>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut profiles = Vec::new();
        for result in rdr.deserialize() {
            let record: ProfileRecord = result?;
            match Profile::try_from(record) {
                Ok(profile) => profiles.push(profile),
                Err(e) => warn!("Skipping unreadable profile record: {}", e),
            }
        }
        Ok(profiles)
    }

    fn write_profiles(&self, household_id: &str, profiles: &[Profile]) -> Result<()> {
        self.connection.ensure_household_directory(household_id)?;
        let path = self.profiles_file(household_id);
        let temp_path = path.with_extension("tmp");
        {
            let mut wtr = csv::Writer::from_path(&temp_path)?;
            for profile in profiles {
                wtr.serialize(ProfileRecord::from(profile))?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&temp_path, &path)?;
        debug!("Wrote {} profiles for {}", profiles.len(), household_id);
        Ok(())
    }
}

impl ProfileStorage for ProfileRepository {
    fn store_profile(&self, profile: &Profile) -> Result<()> {
        let mut profiles = self.read_profiles(&profile.household_id)?;
        if profiles.iter().any(|p| p.id == profile.id) {
            return Err(anyhow::anyhow!("Profile already exists: {}", profile.id));
        }
        profiles.push(profile.clone());
        self.write_profiles(&profile.household_id, &profiles)
    }

    fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>> {
        for dir in self.connection.list_household_directories()? {
            let profiles = self.read_profiles_at(&dir.join("profiles.csv"))?;
            if let Some(profile) = profiles.into_iter().find(|p| p.id == profile_id) {
                return Ok(Some(profile));
            }
        }
        Ok(None)
    }

    fn list_profiles(&self, household_id: &str) -> Result<Vec<Profile>> {
        let mut profiles = self.read_profiles(household_id)?;
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }

    fn update_profile(&self, profile: &Profile) -> Result<()> {
        let mut profiles = self.read_profiles(&profile.household_id)?;
        let slot = profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| anyhow::anyhow!("Cannot update profile {}: not stored", profile.id))?;
        *slot = profile.clone();
        self.write_profiles(&profile.household_id, &profiles)
    }

    fn delete_profile(&self, profile_id: &str) -> Result<bool> {
        let household_id = match self.get_profile(profile_id)? {
            Some(profile) => profile.household_id,
            None => return Ok(false),
        };
        let mut profiles = self.read_profiles(&household_id)?;
        let before = profiles.len();
        profiles.retain(|p| p.id != profile_id);
        if profiles.len() == before {
            return Ok(false);
        }
        self.write_profiles(&household_id, &profiles)?;
        Ok(true)
    }
}
