//! # Household Repository
//!
//! Stores each household as a `household.yaml` document inside its own
//! directory. The YAML document carries the household metadata, join code
//! and settings; all other entities live in CSV files next to it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;

use super::connection::CsvConnection;
use crate::domain::models::household::{Household, HouseholdSettings};
use crate::storage::traits::HouseholdStorage;

/// YAML document structure for a household
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HouseholdDoc {
    id: String,
    name: String,
    join_code: String,
    default_task_points: i64,
    require_photo_proof: bool,
    created_at: String,
    updated_at: String,
}

impl From<&Household> for HouseholdDoc {
    fn from(household: &Household) -> Self {
        HouseholdDoc {
            id: household.id.clone(),
            name: household.name.clone(),
            join_code: household.join_code.clone(),
            default_task_points: household.settings.default_task_points,
            require_photo_proof: household.settings.require_photo_proof,
            created_at: household.created_at.to_rfc3339(),
            updated_at: household.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<HouseholdDoc> for Household {
    type Error = anyhow::Error;

    fn try_from(doc: HouseholdDoc) -> Result<Self> {
        Ok(Household {
            id: doc.id,
            name: doc.name,
            join_code: doc.join_code,
            settings: HouseholdSettings {
                default_task_points: doc.default_task_points,
                require_photo_proof: doc.require_photo_proof,
            },
            created_at: parse_timestamp(&doc.created_at)?,
            updated_at: parse_timestamp(&doc.updated_at)?,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid timestamp: {}", s))?
        .with_timezone(&Utc))
}

/// File-based household repository, one YAML document per household
#[derive(Debug, Clone)]
pub struct HouseholdRepository {
    connection: CsvConnection,
}

impl HouseholdRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn household_file(&self, household_id: &str) -> std::path::PathBuf {
        self.connection
            .household_directory(household_id)
            .join("household.yaml")
    }

    fn read_household_doc(&self, path: &std::path::Path) -> Result<Option<Household>> {
        if !path.exists() {
            return Ok(None);
        }
        let yaml = fs::read_to_string(path)?;
        let doc: HouseholdDoc = serde_yaml::from_str(&yaml)?;
        Ok(Some(Household::try_from(doc)?))
    }
}

impl HouseholdStorage for HouseholdRepository {
    fn store_household(&self, household: &Household) -> Result<()> {
        self.connection.ensure_household_directory(&household.id)?;
        let path = self.household_file(&household.id);
        let yaml = serde_yaml::to_string(&HouseholdDoc::from(household))?;
        self.connection.write_atomic(&path, yaml.as_bytes())?;
        debug!("Stored household {} at {:?}", household.id, path);
        Ok(())
    }

    fn get_household(&self, household_id: &str) -> Result<Option<Household>> {
        self.read_household_doc(&self.household_file(household_id))
    }

    fn get_household_by_join_code(&self, join_code: &str) -> Result<Option<Household>> {
        for household in self.list_households()? {
            if household.join_code.eq_ignore_ascii_case(join_code) {
                return Ok(Some(household));
            }
        }
        Ok(None)
    }

    fn update_household(&self, household: &Household) -> Result<()> {
        let path = self.household_file(&household.id);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Cannot update household {}: not stored",
                household.id
            ));
        }
        let yaml = serde_yaml::to_string(&HouseholdDoc::from(household))?;
        self.connection.write_atomic(&path, yaml.as_bytes())
    }

    fn list_households(&self) -> Result<Vec<Household>> {
        let mut households = Vec::new();
        for dir in self.connection.list_household_directories()? {
            let path = dir.join("household.yaml");
            match self.read_household_doc(&path) {
                Ok(Some(household)) => households.push(household),
                Ok(None) => {}
                Err(e) => {
                    warn!("Skipping unreadable household doc {:?}: {}", path, e);
                }
            }
        }
        Ok(households)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::test_connection;

    fn sample_household(id: &str, join_code: &str) -> Household {
        let now = Utc::now();
        Household {
            id: id.to_string(),
            name: "The Parkers".to_string(),
            join_code: join_code.to_string(),
            settings: HouseholdSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_store_and_get_household() {
        let (conn, _temp_dir) = test_connection();
        let repo = HouseholdRepository::new(conn);

        let household = sample_household("household::1", "AB12CD");
        repo.store_household(&household).unwrap();

        let loaded = repo.get_household("household::1").unwrap().unwrap();
        assert_eq!(loaded.name, "The Parkers");
        assert_eq!(loaded.join_code, "AB12CD");
        assert_eq!(loaded.settings.default_task_points, 10);
    }

    #[test]
    fn test_get_missing_household() {
        let (conn, _temp_dir) = test_connection();
        let repo = HouseholdRepository::new(conn);
        assert!(repo.get_household("household::nope").unwrap().is_none());
    }

    #[test]
    fn test_find_by_join_code_case_insensitive() {
        let (conn, _temp_dir) = test_connection();
        let repo = HouseholdRepository::new(conn);

        repo.store_household(&sample_household("household::1", "AB12CD"))
            .unwrap();

        let found = repo.get_household_by_join_code("ab12cd").unwrap().unwrap();
        assert_eq!(found.id, "household::1");
        assert!(repo.get_household_by_join_code("ZZZZZZ").unwrap().is_none());
    }

    #[test]
    fn test_update_household_settings() {
        let (conn, _temp_dir) = test_connection();
        let repo = HouseholdRepository::new(conn);

        let mut household = sample_household("household::1", "AB12CD");
        repo.store_household(&household).unwrap();

        household.settings.require_photo_proof = true;
        household.settings.default_task_points = 25;
        repo.update_household(&household).unwrap();

        let loaded = repo.get_household("household::1").unwrap().unwrap();
        assert!(loaded.settings.require_photo_proof);
        assert_eq!(loaded.settings.default_task_points, 25);
    }

    #[test]
    fn test_update_unknown_household_fails() {
        let (conn, _temp_dir) = test_connection();
        let repo = HouseholdRepository::new(conn);
        let household = sample_household("household::ghost", "AB12CD");
        assert!(repo.update_household(&household).is_err());
    }

    #[test]
    fn test_list_households() {
        let (conn, _temp_dir) = test_connection();
        let repo = HouseholdRepository::new(conn);

        repo.store_household(&sample_household("household::1", "AAAAAA"))
            .unwrap();
        repo.store_household(&sample_household("household::2", "BBBBBB"))
            .unwrap();

        assert_eq!(repo.list_households().unwrap().len(), 2);
    }
}
