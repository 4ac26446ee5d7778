use chrono::NaiveDate;
use shared::{Recurrence, TaskCategory, TaskStatus};

use crate::domain::models::badge::EarnedBadge;
use crate::domain::models::task::Task;

#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub household_id: String,
    pub actor_profile_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignee_ids: Vec<String>,
    pub due_date: Option<NaiveDate>,
    /// Falls back to the household default when None
    pub points: Option<i64>,
    pub category: Option<TaskCategory>,
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, Clone)]
pub struct CreateTaskResult {
    pub task: Task,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct GetTaskCommand {
    pub task_id: String,
}

#[derive(Debug, Clone)]
pub struct GetTaskResult {
    pub task: Option<Task>,
}

#[derive(Debug, Clone)]
pub struct ListTasksCommand {
    pub household_id: String,
    pub assignee_id: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone)]
pub struct ListTasksResult {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct AdvanceTaskCommand {
    pub task_id: String,
    pub actor_profile_id: String,
    /// Photo proof attached when moving into review
    pub photo_proof_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AdvanceTaskResult {
    pub task: Task,
    /// Points granted to each assignee when the task reached done
    pub awarded_points: Option<i64>,
    /// Badges newly earned by assignees as a completion side effect
    pub new_badges: Vec<EarnedBadge>,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct UpdateTaskCommand {
    pub task_id: String,
    pub actor_profile_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee_ids: Option<Vec<String>>,
    pub due_date: Option<NaiveDate>,
    pub points: Option<i64>,
    pub category: Option<TaskCategory>,
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, Clone)]
pub struct UpdateTaskResult {
    pub task: Task,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct DeleteTaskCommand {
    pub task_id: String,
    pub actor_profile_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteTaskResult {
    pub success_message: String,
}
