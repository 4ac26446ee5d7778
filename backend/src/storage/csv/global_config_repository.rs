//! # Global Config Repository
//!
//! Single `global_config.yaml` at the root of the data directory. Tracks
//! the active profile driving the UI and a data format version for
//! future migrations.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::CsvConnection;

/// Global configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// ID of the currently active profile (None if no profile selected)
    pub active_profile_id: Option<String>,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            active_profile_id: None,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Storage trait for global configuration operations
pub trait GlobalConfigStorage: Send + Sync {
    /// Get the global configuration
    fn get_global_config(&self) -> Result<GlobalConfig>;

    /// Set the active profile id
    fn set_active_profile_id(&self, profile_id: Option<String>) -> Result<()>;
}

/// YAML-backed global config repository
#[derive(Debug, Clone)]
pub struct GlobalConfigRepository {
    connection: CsvConnection,
}

impl GlobalConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn config_path(&self) -> PathBuf {
        self.connection.base_directory().join("global_config.yaml")
    }

    fn load_or_create(&self) -> Result<GlobalConfig> {
        let path = self.config_path();
        if path.exists() {
            let yaml = fs::read_to_string(&path)?;
            let config: GlobalConfig = serde_yaml::from_str(&yaml)?;
            debug!("Loaded global config from {:?}", path);
            Ok(config)
        } else {
            let config = GlobalConfig::default();
            self.save(&config)?;
            info!("Created default global config at {:?}", path);
            Ok(config)
        }
    }

    fn save(&self, config: &GlobalConfig) -> Result<()> {
        let yaml = serde_yaml::to_string(config)?;
        self.connection
            .write_atomic(&self.config_path(), yaml.as_bytes())
    }
}

impl GlobalConfigStorage for GlobalConfigRepository {
    fn get_global_config(&self) -> Result<GlobalConfig> {
        self.load_or_create()
    }

    fn set_active_profile_id(&self, profile_id: Option<String>) -> Result<()> {
        let mut config = self.load_or_create()?;
        config.active_profile_id = profile_id.clone();
        config.updated_at = Utc::now().to_rfc3339();
        self.save(&config)?;

        match profile_id {
            Some(id) => info!("Set active profile to '{}'", id),
            None => info!("Cleared active profile"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::test_connection;

    #[test]
    fn test_get_creates_default() {
        let (conn, _temp_dir) = test_connection();
        let repo = GlobalConfigRepository::new(conn);

        let config = repo.get_global_config().unwrap();
        assert_eq!(config.active_profile_id, None);
        assert_eq!(config.data_format_version, "1.0");
        assert!(!config.created_at.is_empty());
    }

    #[test]
    fn test_set_and_clear_active_profile() {
        let (conn, _temp_dir) = test_connection();
        let repo = GlobalConfigRepository::new(conn);

        repo.set_active_profile_id(Some("profile::1".to_string()))
            .unwrap();
        assert_eq!(
            repo.get_global_config().unwrap().active_profile_id,
            Some("profile::1".to_string())
        );

        repo.set_active_profile_id(None).unwrap();
        assert_eq!(repo.get_global_config().unwrap().active_profile_id, None);
    }

    #[test]
    fn test_config_persists_across_instances() {
        let (conn, temp_dir) = test_connection();
        let repo = GlobalConfigRepository::new(conn);
        repo.set_active_profile_id(Some("profile::1".to_string()))
            .unwrap();

        let conn2 = CsvConnection::new(temp_dir.path()).unwrap();
        let repo2 = GlobalConfigRepository::new(conn2);
        assert_eq!(
            repo2.get_global_config().unwrap().active_profile_id,
            Some("profile::1".to_string())
        );
    }
}
