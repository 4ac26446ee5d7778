//! # Task Repository
//!
//! Per-household `tasks.csv`. The assignee list is stored as a single
//! `;`-joined field so the row stays flat.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::{Recurrence, TaskCategory, TaskStatus};
use std::fs::File;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::task::Task;
use crate::storage::traits::TaskStorage;

/// CSV record structure for tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskRecord {
    id: String,
    household_id: String,
    title: String,
    description: String,
    assignee_ids: String,
    due_date: Option<String>,
    points: i64,
    category: String,
    recurrence: String,
    status: String,
    photo_proof_url: Option<String>,
    created_at: String,
    updated_at: String,
    completed_at: Option<String>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        TaskRecord {
            id: task.id.clone(),
            household_id: task.household_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            assignee_ids: task.assignee_ids.join(";"),
            due_date: task.due_date.map(|d| d.to_string()),
            points: task.points,
            category: task.category.as_str().to_string(),
            recurrence: task.recurrence.as_str().to_string(),
            status: task.status.as_str().to_string(),
            photo_proof_url: task.photo_proof_url.clone(),
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
            completed_at: task.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = anyhow::Error;

    fn try_from(record: TaskRecord) -> Result<Self> {
        let status = TaskStatus::from_str(&record.status)
            .map_err(|e| anyhow::anyhow!("Failed to parse task status: {}", e))?;
        let category = TaskCategory::from_str(&record.category)
            .map_err(|e| anyhow::anyhow!("Failed to parse task category: {}", e))?;
        let recurrence = Recurrence::from_str(&record.recurrence)
            .map_err(|e| anyhow::anyhow!("Failed to parse recurrence: {}", e))?;

        let assignee_ids = record
            .assignee_ids
            .split(';')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        let due_date = record
            .due_date
            .filter(|s| !s.is_empty())
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .with_context(|| format!("Invalid due date: {}", s))
            })
            .transpose()?;

        Ok(Task {
            id: record.id,
            household_id: record.household_id,
            title: record.title,
            description: record.description,
            assignee_ids,
            due_date,
            points: record.points,
            category,
            recurrence,
            status,
            photo_proof_url: record.photo_proof_url.filter(|s| !s.is_empty()),
            created_at: parse_timestamp(&record.created_at)?,
            updated_at: parse_timestamp(&record.updated_at)?,
            completed_at: record
                .completed_at
                .filter(|s| !s.is_empty())
                .map(|s| parse_timestamp(&s))
                .transpose()?,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid timestamp: {}", s))?
        .with_timezone(&Utc))
}

/// CSV-based task repository using per-household files
#[derive(Debug, Clone)]
pub struct TaskRepository {
    connection: CsvConnection,
}

impl TaskRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn tasks_file(&self, household_id: &str) -> PathBuf {
        self.connection
            .household_directory(household_id)
            .join("tasks.csv")
    }

    fn read_tasks_at(&self, path: &std::path::Path) -> Result<Vec<Task>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut tasks = Vec::new();
        for result in rdr.deserialize() {
            let record: TaskRecord = result?;
            match Task::try_from(record) {
                Ok(task) => tasks.push(task),
                Err(e) => warn!("Skipping unreadable task record: {}", e),
            }
        }
        Ok(tasks)
    }

    fn write_tasks(&self, household_id: &str, tasks: &[Task]) -> Result<()> {
        self.connection.ensure_household_directory(household_id)?;
        let path = self.tasks_file(household_id);
        let temp_path = path.with_extension("tmp");
        {
            let mut wtr = csv::Writer::from_path(&temp_path)?;
            for task in tasks {
                wtr.serialize(TaskRecord::from(task))?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&temp_path, &path)?;
        debug!("Wrote {} tasks for {}", tasks.len(), household_id);
        Ok(())
    }
}

impl TaskStorage for TaskRepository {
    fn store_task(&self, task: &Task) -> Result<()> {
        let mut tasks = self.read_tasks_at(&self.tasks_file(&task.household_id))?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(anyhow::anyhow!("Task already exists: {}", task.id));
        }
        tasks.push(task.clone());
        self.write_tasks(&task.household_id, &tasks)
    }

    fn get_task(&self, task_id: &str) -> Result<Option<Task>> {
        for dir in self.connection.list_household_directories()? {
            let tasks = self.read_tasks_at(&dir.join("tasks.csv"))?;
            if let Some(task) = tasks.into_iter().find(|t| t.id == task_id) {
                return Ok(Some(task));
            }
        }
        Ok(None)
    }

    fn list_tasks(&self, household_id: &str) -> Result<Vec<Task>> {
        let mut tasks = self.read_tasks_at(&self.tasks_file(household_id))?;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    fn update_task(&self, task: &Task) -> Result<()> {
        let mut tasks = self.read_tasks_at(&self.tasks_file(&task.household_id))?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| anyhow::anyhow!("Cannot update task {}: not stored", task.id))?;
        *slot = task.clone();
        self.write_tasks(&task.household_id, &tasks)
    }

    fn delete_task(&self, task_id: &str) -> Result<bool> {
        let household_id = match self.get_task(task_id)? {
            Some(task) => task.household_id,
            None => return Ok(false),
        };
        let mut tasks = self.read_tasks_at(&self.tasks_file(&household_id))?;
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.write_tasks(&household_id, &tasks)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::test_connection;

    fn sample_task(id: &str) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            household_id: "household::1".to_string(),
            title: "Take out the trash".to_string(),
            description: "Bins go out Tuesday night".to_string(),
            assignee_ids: vec!["profile::1".to_string(), "profile::2".to_string()],
            due_date: NaiveDate::from_ymd_opt(2026, 8, 11),
            points: 15,
            category: TaskCategory::Cleaning,
            recurrence: Recurrence::Weekly,
            status: TaskStatus::Todo,
            photo_proof_url: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    #[test]
    fn test_store_and_get_task() {
        let (conn, _temp_dir) = test_connection();
        let repo = TaskRepository::new(conn);

        repo.store_task(&sample_task("task::1")).unwrap();

        let loaded = repo.get_task("task::1").unwrap().unwrap();
        assert_eq!(loaded.title, "Take out the trash");
        assert_eq!(loaded.assignee_ids.len(), 2);
        assert_eq!(loaded.status, TaskStatus::Todo);
        assert_eq!(loaded.recurrence, Recurrence::Weekly);
        assert_eq!(loaded.due_date, NaiveDate::from_ymd_opt(2026, 8, 11));
    }

    #[test]
    fn test_status_and_proof_round_trip() {
        let (conn, _temp_dir) = test_connection();
        let repo = TaskRepository::new(conn);

        let mut task = sample_task("task::1");
        repo.store_task(&task).unwrap();

        task.status = TaskStatus::Review;
        task.photo_proof_url = Some("https://photos.example/proof.jpg".to_string());
        repo.update_task(&task).unwrap();

        let loaded = repo.get_task("task::1").unwrap().unwrap();
        assert_eq!(loaded.status, TaskStatus::Review);
        assert_eq!(
            loaded.photo_proof_url.as_deref(),
            Some("https://photos.example/proof.jpg")
        );
    }

    #[test]
    fn test_empty_assignees_round_trip() {
        let (conn, _temp_dir) = test_connection();
        let repo = TaskRepository::new(conn);

        let mut task = sample_task("task::1");
        task.assignee_ids = Vec::new();
        repo.store_task(&task).unwrap();

        let loaded = repo.get_task("task::1").unwrap().unwrap();
        assert!(loaded.assignee_ids.is_empty());
    }

    #[test]
    fn test_list_tasks_most_recent_first() {
        let (conn, _temp_dir) = test_connection();
        let repo = TaskRepository::new(conn);

        let mut older = sample_task("task::1");
        older.created_at = Utc::now() - chrono::Duration::hours(2);
        let newer = sample_task("task::2");
        repo.store_task(&older).unwrap();
        repo.store_task(&newer).unwrap();

        let tasks = repo.list_tasks("household::1").unwrap();
        assert_eq!(tasks[0].id, "task::2");
        assert_eq!(tasks[1].id, "task::1");
    }

    #[test]
    fn test_delete_task() {
        let (conn, _temp_dir) = test_connection();
        let repo = TaskRepository::new(conn);

        repo.store_task(&sample_task("task::1")).unwrap();
        assert!(repo.delete_task("task::1").unwrap());
        assert!(!repo.delete_task("task::1").unwrap());
        assert!(repo.get_task("task::1").unwrap().is_none());
    }
}
