//! Task lifecycle.
//!
//! Tasks advance through the fixed sequence
//! todo → in-progress → review → done → archived. Reaching done settles
//! the completion: the point award is authoritative, while streak and
//! badge updates are best-effort side effects that never roll it back.

use anyhow::Result;
use chrono::{DateTime, Timelike, Utc};
use log::{info, warn};
use shared::{Recurrence, TaskCategory, TaskStatus};
use std::sync::Arc;

use crate::domain::badge_service::BadgeService;
use crate::domain::commands::task::{
    AdvanceTaskCommand, AdvanceTaskResult, CreateTaskCommand, CreateTaskResult, DeleteTaskCommand,
    DeleteTaskResult, GetTaskCommand, GetTaskResult, ListTasksCommand, ListTasksResult,
    UpdateTaskCommand, UpdateTaskResult,
};
use crate::domain::models::badge::EarnedBadge;
use crate::domain::models::household::HouseholdError;
use crate::domain::models::profile::{Profile, ProfileError};
use crate::domain::models::task::{Task, TaskError};
use crate::domain::streak_service::StreakService;
use crate::storage::csv::{CsvConnection, HouseholdRepository, ProfileRepository, TaskRepository};
use crate::storage::traits::{HouseholdStorage, ProfileStorage, TaskStorage};

/// Service for managing tasks and their status transitions
#[derive(Clone)]
pub struct TaskService {
    task_repository: TaskRepository,
    profile_repository: ProfileRepository,
    household_repository: HouseholdRepository,
    streak_service: StreakService,
    badge_service: BadgeService,
}

impl TaskService {
    /// Create a new TaskService
    pub fn new(
        csv_conn: Arc<CsvConnection>,
        streak_service: StreakService,
        badge_service: BadgeService,
    ) -> Self {
        Self {
            task_repository: TaskRepository::new((*csv_conn).clone()),
            profile_repository: ProfileRepository::new((*csv_conn).clone()),
            household_repository: HouseholdRepository::new((*csv_conn).clone()),
            streak_service,
            badge_service,
        }
    }

    /// Create a new task (parent-only)
    pub fn create_task(&self, command: CreateTaskCommand) -> Result<CreateTaskResult> {
        info!("Creating task: {:?}", command.title);

        self.require_parent(&command.actor_profile_id)?;

        if command.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle.into());
        }
        if command.title.len() > 256 {
            return Err(TaskError::TitleTooLong.into());
        }

        let household = self
            .household_repository
            .get_household(&command.household_id)?
            .ok_or_else(|| HouseholdError::NotFound(command.household_id.clone()))?;

        let points = command
            .points
            .unwrap_or(household.settings.default_task_points);
        if points <= 0 {
            return Err(TaskError::NonPositivePoints.into());
        }

        // Every assignee must be a member of the household
        for assignee_id in &command.assignee_ids {
            let assignee = self
                .profile_repository
                .get_profile(assignee_id)?
                .ok_or_else(|| ProfileError::NotFound(assignee_id.clone()))?;
            if assignee.household_id != command.household_id {
                return Err(anyhow::anyhow!(
                    "Assignee {} is not in household {}",
                    assignee_id,
                    command.household_id
                ));
            }
        }

        let now = Utc::now();
        let task = Task {
            id: Task::generate_id(now.timestamp_micros() as u64),
            household_id: command.household_id,
            title: command.title.trim().to_string(),
            description: command.description.unwrap_or_default(),
            assignee_ids: command.assignee_ids,
            due_date: command.due_date,
            points,
            category: command.category.unwrap_or(TaskCategory::Other),
            recurrence: command.recurrence.unwrap_or(Recurrence::None),
            status: TaskStatus::Todo,
            photo_proof_url: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        self.task_repository.store_task(&task)?;

        info!("Created task: {} with ID: {}", task.title, task.id);

        Ok(CreateTaskResult {
            success_message: format!("Task '{}' created", task.title),
            task,
        })
    }

    /// Get a task by ID
    pub fn get_task(&self, command: GetTaskCommand) -> Result<GetTaskResult> {
        let task = self.task_repository.get_task(&command.task_id)?;
        Ok(GetTaskResult { task })
    }

    /// List a household's tasks, optionally filtered by assignee and status
    pub fn list_tasks(&self, command: ListTasksCommand) -> Result<ListTasksResult> {
        let mut tasks = self.task_repository.list_tasks(&command.household_id)?;

        if let Some(ref assignee_id) = command.assignee_id {
            tasks.retain(|t| t.assignee_ids.iter().any(|a| a == assignee_id));
        }
        if let Some(status) = command.status {
            tasks.retain(|t| t.status == status);
        }

        Ok(ListTasksResult { tasks })
    }

    /// Advance a task to the next status in the fixed sequence.
    ///
    /// Advancing an archived task is a no-op. The review → done step is
    /// parent-only. Reaching done awards points to every assignee and
    /// then runs streak and badge updates as best-effort side effects.
    pub fn advance_task(&self, command: AdvanceTaskCommand) -> Result<AdvanceTaskResult> {
        info!(
            "Advancing task {} (actor {})",
            command.task_id, command.actor_profile_id
        );

        let mut task = self
            .task_repository
            .get_task(&command.task_id)?
            .ok_or_else(|| TaskError::NotFound(command.task_id.clone()))?;

        let actor = self
            .profile_repository
            .get_profile(&command.actor_profile_id)?
            .ok_or_else(|| ProfileError::NotFound(command.actor_profile_id.clone()))?;

        if task.status.is_terminal() {
            info!("Task {} is archived; advance is a no-op", task.id);
            return Ok(AdvanceTaskResult {
                task,
                awarded_points: None,
                new_badges: Vec::new(),
                success_message: "Task is already archived".to_string(),
            });
        }

        let next = task.status.advance();

        if task.status == TaskStatus::Review && next == TaskStatus::Done && !actor.is_parent() {
            return Err(TaskError::ParentRoleRequired.into());
        }

        if next == TaskStatus::Review {
            if let Some(url) = command.photo_proof_url {
                task.photo_proof_url = Some(url);
            }
            let household = self
                .household_repository
                .get_household(&task.household_id)?
                .ok_or_else(|| HouseholdError::NotFound(task.household_id.clone()))?;
            // Proof stays advisory: the transition goes through either way
            if household.settings.require_photo_proof && task.photo_proof_url.is_none() {
                warn!(
                    "Task {} moved to review without the photo proof this household asks for",
                    task.id
                );
            }
        }

        task.status = next;
        task.updated_at = Utc::now();

        let mut awarded_points = None;
        let mut new_badges = Vec::new();

        if next == TaskStatus::Done {
            let completed_at = Utc::now();
            task.completed_at = Some(completed_at);
            self.task_repository.update_task(&task)?;

            new_badges = self.settle_completion(&task, completed_at)?;
            awarded_points = Some(task.points);

            // A recurring chore immediately comes back around
            if let Err(e) = self.spawn_next_occurrence(&task) {
                warn!("Failed to spawn next occurrence of {}: {}", task.id, e);
            }
        } else {
            self.task_repository.update_task(&task)?;
        }

        info!("Task {} is now {}", task.id, task.status);

        Ok(AdvanceTaskResult {
            success_message: format!("Task moved to {}", task.status),
            task,
            awarded_points,
            new_badges,
        })
    }

    /// Update a task's details (parent-only). Status is only ever
    /// changed through advance_task.
    pub fn update_task(&self, command: UpdateTaskCommand) -> Result<UpdateTaskResult> {
        info!("Updating task: {}", command.task_id);

        self.require_parent(&command.actor_profile_id)?;

        let mut task = self
            .task_repository
            .get_task(&command.task_id)?
            .ok_or_else(|| TaskError::NotFound(command.task_id.clone()))?;

        if let Some(title) = command.title {
            if title.trim().is_empty() {
                return Err(TaskError::EmptyTitle.into());
            }
            if title.len() > 256 {
                return Err(TaskError::TitleTooLong.into());
            }
            task.title = title.trim().to_string();
        }
        if let Some(description) = command.description {
            task.description = description;
        }
        if let Some(assignee_ids) = command.assignee_ids {
            for assignee_id in &assignee_ids {
                let assignee = self
                    .profile_repository
                    .get_profile(assignee_id)?
                    .ok_or_else(|| ProfileError::NotFound(assignee_id.clone()))?;
                if assignee.household_id != task.household_id {
                    return Err(anyhow::anyhow!(
                        "Assignee {} is not in household {}",
                        assignee_id,
                        task.household_id
                    ));
                }
            }
            task.assignee_ids = assignee_ids;
        }
        if let Some(due_date) = command.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(points) = command.points {
            if points <= 0 {
                return Err(TaskError::NonPositivePoints.into());
            }
            task.points = points;
        }
        if let Some(category) = command.category {
            task.category = category;
        }
        if let Some(recurrence) = command.recurrence {
            task.recurrence = recurrence;
        }
        task.updated_at = Utc::now();

        self.task_repository.update_task(&task)?;

        Ok(UpdateTaskResult {
            success_message: "Task updated".to_string(),
            task,
        })
    }

    /// Delete a task (parent-only)
    pub fn delete_task(&self, command: DeleteTaskCommand) -> Result<DeleteTaskResult> {
        info!("Deleting task: {}", command.task_id);

        self.require_parent(&command.actor_profile_id)?;

        if !self.task_repository.delete_task(&command.task_id)? {
            return Err(TaskError::NotFound(command.task_id).into());
        }

        Ok(DeleteTaskResult {
            success_message: "Task deleted".to_string(),
        })
    }

    /// Award points to every assignee (authoritative), then run streak
    /// and badge updates. Side-effect failures are logged and swallowed
    /// so they can never undo an already-granted award.
    fn settle_completion(
        &self,
        task: &Task,
        completed_at: DateTime<Utc>,
    ) -> Result<Vec<EarnedBadge>> {
        let mut new_badges = Vec::new();

        for assignee_id in &task.assignee_ids {
            let mut profile = match self.profile_repository.get_profile(assignee_id)? {
                Some(profile) => profile,
                None => {
                    warn!("Assignee {} of task {} no longer exists", assignee_id, task.id);
                    continue;
                }
            };

            profile.points += task.points;
            profile.lifetime_points += task.points;
            profile.completed_tasks += 1;
            let hour = completed_at.hour();
            if hour < 8 {
                profile.morning_completions += 1;
            }
            if hour >= 20 {
                profile.night_completions += 1;
            }
            profile.updated_at = Utc::now();
            self.profile_repository.update_profile(&profile)?;

            info!(
                "Awarded {} points to {} for task {}",
                task.points, assignee_id, task.id
            );

            if let Err(e) = self.streak_service.update_streak(assignee_id) {
                warn!("Streak update failed for {}: {}", assignee_id, e);
            }

            match self.refresh_and_award_badges(assignee_id) {
                Ok(mut badges) => new_badges.append(&mut badges),
                Err(e) => warn!("Badge evaluation failed for {}: {}", assignee_id, e),
            }
        }

        Ok(new_badges)
    }

    fn refresh_and_award_badges(&self, profile_id: &str) -> Result<Vec<EarnedBadge>> {
        // Reload so the evaluation sees the streak the update just wrote
        let profile = self
            .profile_repository
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;
        self.badge_service.check_and_award(&profile)
    }

    fn spawn_next_occurrence(&self, task: &Task) -> Result<()> {
        if task.recurrence == Recurrence::None {
            return Ok(());
        }

        let today = Utc::now().date_naive();
        let base = task.due_date.unwrap_or(today);
        let next_due = task.next_due_date(base.max(today));

        let now = Utc::now();
        let next = Task {
            id: Task::generate_id(now.timestamp_micros() as u64),
            household_id: task.household_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            assignee_ids: task.assignee_ids.clone(),
            due_date: next_due,
            points: task.points,
            category: task.category,
            recurrence: task.recurrence,
            status: TaskStatus::Todo,
            photo_proof_url: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        self.task_repository.store_task(&next)?;
        info!(
            "Recurring task {} spawned next occurrence {} due {:?}",
            task.id, next.id, next.due_date
        );
        Ok(())
    }

    fn require_parent(&self, profile_id: &str) -> Result<Profile> {
        let profile = self
            .profile_repository
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;
        if !profile.is_parent() {
            return Err(TaskError::ParentRoleRequired.into());
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::household::CreateHouseholdCommand;
    use crate::domain::commands::profile::CreateProfileCommand;
    use crate::domain::commands::household::UpdateHouseholdSettingsCommand;
    use crate::domain::household_service::HouseholdService;
    use crate::domain::profile_service::ProfileService;
    use chrono::NaiveDate;
    use shared::ProfileRole;
    use tempfile::TempDir;

    struct Fixture {
        task_service: TaskService,
        household_service: HouseholdService,
        profile_repository: ProfileRepository,
        household_id: String,
        parent_id: String,
        child_id: String,
        _temp_dir: TempDir,
    }

    fn setup() -> Fixture {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let conn = Arc::new(CsvConnection::new(temp_dir.path()).expect("Failed to init test DB"));
        let profile_service = ProfileService::new(conn.clone());
        let household_service = HouseholdService::new(conn.clone(), profile_service.clone());
        let streak_service = StreakService::new(conn.clone());
        let badge_service = BadgeService::new(conn.clone());
        let task_service = TaskService::new(conn.clone(), streak_service, badge_service);

        let household = household_service
            .create_household(CreateHouseholdCommand {
                name: "The Parkers".to_string(),
            })
            .unwrap()
            .household;
        let parent = profile_service
            .create_profile(CreateProfileCommand {
                household_id: household.id.clone(),
                name: "Dad".to_string(),
                role: ProfileRole::Parent,
                pin: None,
            })
            .unwrap()
            .profile;
        let child = profile_service
            .create_profile(CreateProfileCommand {
                household_id: household.id.clone(),
                name: "Maya".to_string(),
                role: ProfileRole::Child,
                pin: None,
            })
            .unwrap()
            .profile;

        Fixture {
            task_service,
            household_service,
            profile_repository: ProfileRepository::new((*conn).clone()),
            household_id: household.id,
            parent_id: parent.id,
            child_id: child.id,
            _temp_dir: temp_dir,
        }
    }

    fn create_task(fixture: &Fixture, points: Option<i64>, recurrence: Recurrence) -> Task {
        fixture
            .task_service
            .create_task(CreateTaskCommand {
                household_id: fixture.household_id.clone(),
                actor_profile_id: fixture.parent_id.clone(),
                title: "Clean your room".to_string(),
                description: None,
                assignee_ids: vec![fixture.child_id.clone()],
                due_date: None,
                points,
                category: Some(TaskCategory::Cleaning),
                recurrence: Some(recurrence),
            })
            .expect("Failed to create task")
            .task
    }

    fn advance(fixture: &Fixture, task_id: &str, actor_id: &str) -> Result<AdvanceTaskResult> {
        fixture.task_service.advance_task(AdvanceTaskCommand {
            task_id: task_id.to_string(),
            actor_profile_id: actor_id.to_string(),
            photo_proof_url: None,
        })
    }

    #[test]
    fn test_create_task_uses_household_default_points() {
        let fixture = setup();
        let task = create_task(&fixture, None, Recurrence::None);
        assert_eq!(task.points, 10);
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_create_task_requires_parent() {
        let fixture = setup();
        let result = fixture.task_service.create_task(CreateTaskCommand {
            household_id: fixture.household_id.clone(),
            actor_profile_id: fixture.child_id.clone(),
            title: "Sneaky task".to_string(),
            description: None,
            assignee_ids: vec![],
            due_date: None,
            points: None,
            category: None,
            recurrence: None,
        });
        assert_eq!(
            result.unwrap_err().downcast_ref::<TaskError>(),
            Some(&TaskError::ParentRoleRequired)
        );
    }

    #[test]
    fn test_create_task_rejects_foreign_assignee() {
        let fixture = setup();
        let result = fixture.task_service.create_task(CreateTaskCommand {
            household_id: fixture.household_id.clone(),
            actor_profile_id: fixture.parent_id.clone(),
            title: "Task".to_string(),
            description: None,
            assignee_ids: vec!["profile::ghost".to_string()],
            due_date: None,
            points: None,
            category: None,
            recurrence: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_advance_walks_forward_only() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);

        let r1 = advance(&fixture, &task.id, &fixture.child_id).unwrap();
        assert_eq!(r1.task.status, TaskStatus::InProgress);
        let r2 = advance(&fixture, &task.id, &fixture.child_id).unwrap();
        assert_eq!(r2.task.status, TaskStatus::Review);
        let r3 = advance(&fixture, &task.id, &fixture.parent_id).unwrap();
        assert_eq!(r3.task.status, TaskStatus::Done);
        let r4 = advance(&fixture, &task.id, &fixture.parent_id).unwrap();
        assert_eq!(r4.task.status, TaskStatus::Archived);
    }

    #[test]
    fn test_advance_archived_is_noop() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);
        for actor in [
            &fixture.child_id,
            &fixture.child_id,
            &fixture.parent_id,
            &fixture.parent_id,
        ] {
            advance(&fixture, &task.id, actor).unwrap();
        }

        let result = advance(&fixture, &task.id, &fixture.parent_id).unwrap();
        assert_eq!(result.task.status, TaskStatus::Archived);
        assert_eq!(result.awarded_points, None);
    }

    #[test]
    fn test_child_cannot_approve_into_done() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        advance(&fixture, &task.id, &fixture.child_id).unwrap();

        let result = advance(&fixture, &task.id, &fixture.child_id);
        assert_eq!(
            result.unwrap_err().downcast_ref::<TaskError>(),
            Some(&TaskError::ParentRoleRequired)
        );

        // The task is still in review and a parent can approve it
        let approved = advance(&fixture, &task.id, &fixture.parent_id).unwrap();
        assert_eq!(approved.task.status, TaskStatus::Done);
    }

    #[test]
    fn test_completion_awards_points_and_stats() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        let done = advance(&fixture, &task.id, &fixture.parent_id).unwrap();

        assert_eq!(done.awarded_points, Some(20));

        let child = fixture
            .profile_repository
            .get_profile(&fixture.child_id)
            .unwrap()
            .unwrap();
        assert_eq!(child.points, 20);
        assert_eq!(child.lifetime_points, 20);
        assert_eq!(child.completed_tasks, 1);
        assert_eq!(child.current_streak, 1);
        assert_eq!(child.longest_streak, 1);
    }

    #[test]
    fn test_completion_awards_first_badge() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        let done = advance(&fixture, &task.id, &fixture.parent_id).unwrap();

        assert!(done
            .new_badges
            .iter()
            .any(|b| b.badge_id == "first-steps" && b.profile_id == fixture.child_id));
    }

    #[test]
    fn test_review_without_required_proof_is_still_allowed() {
        let fixture = setup();
        fixture
            .household_service
            .update_settings(UpdateHouseholdSettingsCommand {
                household_id: fixture.household_id.clone(),
                default_task_points: None,
                require_photo_proof: Some(true),
            })
            .unwrap();

        let task = create_task(&fixture, Some(20), Recurrence::None);
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        let review = advance(&fixture, &task.id, &fixture.child_id).unwrap();
        assert_eq!(review.task.status, TaskStatus::Review);
        assert!(review.task.photo_proof_url.is_none());
    }

    #[test]
    fn test_advance_attaches_photo_proof() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);
        advance(&fixture, &task.id, &fixture.child_id).unwrap();

        let review = fixture
            .task_service
            .advance_task(AdvanceTaskCommand {
                task_id: task.id.clone(),
                actor_profile_id: fixture.child_id.clone(),
                photo_proof_url: Some("https://photos.example/room.jpg".to_string()),
            })
            .unwrap();
        assert_eq!(
            review.task.photo_proof_url.as_deref(),
            Some("https://photos.example/room.jpg")
        );
    }

    #[test]
    fn test_recurring_task_spawns_next_occurrence() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::Daily);
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        advance(&fixture, &task.id, &fixture.parent_id).unwrap();

        let tasks = fixture
            .task_service
            .list_tasks(ListTasksCommand {
                household_id: fixture.household_id.clone(),
                assignee_id: None,
                status: Some(TaskStatus::Todo),
            })
            .unwrap()
            .tasks;

        assert_eq!(tasks.len(), 1);
        let next = &tasks[0];
        assert_ne!(next.id, task.id);
        assert_eq!(next.title, task.title);
        assert_eq!(next.due_date, Utc::now().date_naive().succ_opt());
    }

    #[test]
    fn test_one_off_task_does_not_respawn() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        advance(&fixture, &task.id, &fixture.child_id).unwrap();
        advance(&fixture, &task.id, &fixture.parent_id).unwrap();

        let todos = fixture
            .task_service
            .list_tasks(ListTasksCommand {
                household_id: fixture.household_id.clone(),
                assignee_id: None,
                status: Some(TaskStatus::Todo),
            })
            .unwrap()
            .tasks;
        assert!(todos.is_empty());
    }

    #[test]
    fn test_list_tasks_filters_by_assignee() {
        let fixture = setup();
        create_task(&fixture, Some(20), Recurrence::None);

        let for_child = fixture
            .task_service
            .list_tasks(ListTasksCommand {
                household_id: fixture.household_id.clone(),
                assignee_id: Some(fixture.child_id.clone()),
                status: None,
            })
            .unwrap()
            .tasks;
        assert_eq!(for_child.len(), 1);

        let for_parent = fixture
            .task_service
            .list_tasks(ListTasksCommand {
                household_id: fixture.household_id.clone(),
                assignee_id: Some(fixture.parent_id.clone()),
                status: None,
            })
            .unwrap()
            .tasks;
        assert!(for_parent.is_empty());
    }

    #[test]
    fn test_update_task_requires_parent_and_applies_changes() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);

        let denied = fixture.task_service.update_task(UpdateTaskCommand {
            task_id: task.id.clone(),
            actor_profile_id: fixture.child_id.clone(),
            title: Some("Easier task".to_string()),
            description: None,
            assignee_ids: None,
            due_date: None,
            points: None,
            category: None,
            recurrence: None,
        });
        assert_eq!(
            denied.unwrap_err().downcast_ref::<TaskError>(),
            Some(&TaskError::ParentRoleRequired)
        );

        let updated = fixture
            .task_service
            .update_task(UpdateTaskCommand {
                task_id: task.id.clone(),
                actor_profile_id: fixture.parent_id.clone(),
                title: Some("Tidy the whole room".to_string()),
                description: None,
                assignee_ids: None,
                due_date: NaiveDate::from_ymd_opt(2026, 9, 1),
                points: Some(30),
                category: None,
                recurrence: Some(Recurrence::Weekly),
            })
            .unwrap();

        assert_eq!(updated.task.title, "Tidy the whole room");
        assert_eq!(updated.task.points, 30);
        assert_eq!(updated.task.due_date, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert_eq!(updated.task.recurrence, Recurrence::Weekly);
        // Status is untouched by updates
        assert_eq!(updated.task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_delete_task_requires_parent() {
        let fixture = setup();
        let task = create_task(&fixture, Some(20), Recurrence::None);

        let denied = fixture.task_service.delete_task(DeleteTaskCommand {
            task_id: task.id.clone(),
            actor_profile_id: fixture.child_id.clone(),
        });
        assert!(denied.is_err());

        fixture
            .task_service
            .delete_task(DeleteTaskCommand {
                task_id: task.id.clone(),
                actor_profile_id: fixture.parent_id.clone(),
            })
            .unwrap();
        assert!(fixture
            .task_service
            .get_task(GetTaskCommand { task_id: task.id })
            .unwrap()
            .task
            .is_none());
    }
}
