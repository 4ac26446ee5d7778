use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{Recurrence, TaskCategory, TaskStatus};

/// Domain model for a chore. Status only ever advances through the fixed
/// sequence todo → in-progress → review → done → archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub household_id: String,
    pub title: String,
    pub description: String,
    pub assignee_ids: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub points: i64,
    pub category: TaskCategory,
    pub recurrence: Recurrence,
    pub status: TaskStatus,
    pub photo_proof_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Generate a unique ID for a task
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("task::{}", timestamp_millis)
    }

    /// Due date of the next occurrence for a recurring task, relative to
    /// the given date. None for non-recurring tasks.
    pub fn next_due_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self.recurrence {
            Recurrence::None => None,
            Recurrence::Daily => from.succ_opt(),
            Recurrence::Weekly => from.checked_add_days(chrono::Days::new(7)),
            Recurrence::Monthly => from.checked_add_months(Months::new(1)),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(String),
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task title cannot exceed 256 characters")]
    TitleTooLong,
    #[error("Task point value must be positive")]
    NonPositivePoints,
    #[error("Only a parent can approve a task into done")]
    ParentRoleRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_recurrence(recurrence: Recurrence) -> Task {
        let now = Utc::now();
        Task {
            id: "task::1".to_string(),
            household_id: "household::1".to_string(),
            title: "Feed the cat".to_string(),
            description: String::new(),
            assignee_ids: vec!["profile::1".to_string()],
            due_date: NaiveDate::from_ymd_opt(2026, 1, 31),
            points: 10,
            category: TaskCategory::Pets,
            recurrence,
            status: TaskStatus::Todo,
            photo_proof_url: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    #[test]
    fn test_generate_task_id() {
        assert_eq!(Task::generate_id(1702516122000), "task::1702516122000");
    }

    #[test]
    fn test_next_due_date_none_for_one_off() {
        let task = task_with_recurrence(Recurrence::None);
        assert_eq!(task.next_due_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()), None);
    }

    #[test]
    fn test_next_due_date_daily() {
        let task = task_with_recurrence(Recurrence::Daily);
        assert_eq!(
            task.next_due_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
    }

    #[test]
    fn test_next_due_date_weekly() {
        let task = task_with_recurrence(Recurrence::Weekly);
        assert_eq!(
            task.next_due_date(NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()),
            NaiveDate::from_ymd_opt(2026, 2, 4)
        );
    }

    #[test]
    fn test_next_due_date_monthly_clamps_to_month_end() {
        let task = task_with_recurrence(Recurrence::Monthly);
        // Jan 31 + 1 month clamps to Feb 28 in a non-leap year
        assert_eq!(
            task.next_due_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
    }
}
