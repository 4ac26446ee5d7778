//! # Streak Repository
//!
//! Per-household `streak_history.csv`: one row per (profile, active day).
//! The history is what makes same-day streak updates idempotent.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::storage::traits::StreakStorage;

/// CSV record structure for streak history rows
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StreakRow {
    profile_id: String,
    date: String,
}

/// CSV-based streak-history repository using per-household files
#[derive(Debug, Clone)]
pub struct StreakRepository {
    connection: CsvConnection,
}

impl StreakRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn history_file(&self, household_id: &str) -> PathBuf {
        self.connection
            .household_directory(household_id)
            .join("streak_history.csv")
    }

    fn read_rows(&self, household_id: &str) -> Result<Vec<(String, NaiveDate)>> {
        let path = self.history_file(household_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            let row: StreakRow = result?;
            match NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
                .with_context(|| format!("Invalid streak date: {}", row.date))
            {
                Ok(date) => rows.push((row.profile_id, date)),
                Err(e) => warn!("Skipping unreadable streak row: {}", e),
            }
        }
        Ok(rows)
    }

    fn write_rows(&self, household_id: &str, rows: &[(String, NaiveDate)]) -> Result<()> {
        self.connection.ensure_household_directory(household_id)?;
        let path = self.history_file(household_id);
        let temp_path = path.with_extension("tmp");
        {
            let mut wtr = csv::Writer::from_path(&temp_path)?;
            for (profile_id, date) in rows {
                wtr.serialize(StreakRow {
                    profile_id: profile_id.clone(),
                    date: date.to_string(),
                })?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl StreakStorage for StreakRepository {
    fn append_active_day(
        &self,
        household_id: &str,
        profile_id: &str,
        day: NaiveDate,
    ) -> Result<()> {
        let mut rows = self.read_rows(household_id)?;
        if rows.iter().any(|(p, d)| p == profile_id && *d == day) {
            return Ok(());
        }
        rows.push((profile_id.to_string(), day));
        self.write_rows(household_id, &rows)
    }

    fn has_active_day(
        &self,
        household_id: &str,
        profile_id: &str,
        day: NaiveDate,
    ) -> Result<bool> {
        Ok(self
            .read_rows(household_id)?
            .iter()
            .any(|(p, d)| p == profile_id && *d == day))
    }

    fn list_active_days(&self, household_id: &str, profile_id: &str) -> Result<Vec<NaiveDate>> {
        let mut days: Vec<NaiveDate> = self
            .read_rows(household_id)?
            .into_iter()
            .filter(|(p, _)| p == profile_id)
            .map(|(_, d)| d)
            .collect();
        days.sort();
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::test_connection;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_append_and_query_days() {
        let (conn, _temp_dir) = test_connection();
        let repo = StreakRepository::new(conn);

        repo.append_active_day("household::1", "profile::1", day(2026, 8, 4))
            .unwrap();
        repo.append_active_day("household::1", "profile::1", day(2026, 8, 5))
            .unwrap();
        repo.append_active_day("household::1", "profile::2", day(2026, 8, 5))
            .unwrap();

        assert!(repo
            .has_active_day("household::1", "profile::1", day(2026, 8, 4))
            .unwrap());
        assert!(!repo
            .has_active_day("household::1", "profile::2", day(2026, 8, 4))
            .unwrap());

        let days = repo.list_active_days("household::1", "profile::1").unwrap();
        assert_eq!(days, vec![day(2026, 8, 4), day(2026, 8, 5)]);
    }

    #[test]
    fn test_append_same_day_twice_is_noop() {
        let (conn, _temp_dir) = test_connection();
        let repo = StreakRepository::new(conn);

        repo.append_active_day("household::1", "profile::1", day(2026, 8, 5))
            .unwrap();
        repo.append_active_day("household::1", "profile::1", day(2026, 8, 5))
            .unwrap();

        assert_eq!(
            repo.list_active_days("household::1", "profile::1")
                .unwrap()
                .len(),
            1
        );
    }
}
