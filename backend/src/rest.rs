//! REST surface for Chore Quest.
//!
//! Thin axum handlers: convert the request DTO into a domain command,
//! call the service, and map the typed domain failures onto status
//! codes. Unexpected backend errors surface as a generic 500 message.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use shared::{
    ActiveProfileResponse, AdvanceTaskRequest, AdvanceTaskResponse, ApproveClaimRequest,
    ClaimDto, ClaimListResponse, ClaimRewardRequest, ClaimRewardResponse, ClaimReviewResponse,
    CreateHouseholdRequest, CreateProfileRequest, CreateRewardRequest, CreateTaskRequest,
    EarnedBadgeDto, EarnedBadgeListResponse, HouseholdDto, HouseholdResponse,
    HouseholdSettingsDto, JoinHouseholdRequest, JoinHouseholdResponse, LeaderboardEntry,
    LeaderboardResponse, ProfileDto, ProfileListResponse, ProfileResponse, RejectClaimRequest,
    RewardDto, RewardListResponse, RewardResponse, SetActiveProfileRequest, StreakResponse,
    TaskDto, TaskListResponse, TaskResponse, UpdateHouseholdSettingsRequest, UpdateProfileRequest,
    UpdateRewardRequest, UpdateTaskRequest,
};

use crate::domain::commands::household::{
    CreateHouseholdCommand, GetHouseholdCommand, JoinHouseholdCommand,
    UpdateHouseholdSettingsCommand,
};
use crate::domain::commands::profile::{
    CreateProfileCommand, DeleteProfileCommand, GetProfileCommand, ListProfilesCommand,
    SetActiveProfileCommand, UpdateProfileCommand,
};
use crate::domain::commands::reward::{
    ApproveClaimCommand, ClaimRewardCommand, CreateRewardCommand, GetRewardCommand,
    ListClaimsCommand, ListRewardsCommand, RejectClaimCommand, UpdateRewardCommand,
};
use crate::domain::commands::task::{
    AdvanceTaskCommand, CreateTaskCommand, DeleteTaskCommand, ListTasksCommand, UpdateTaskCommand,
};
use crate::domain::models::badge::{find_badge, EarnedBadge};
use crate::domain::models::household::{Household, HouseholdError};
use crate::domain::models::profile::{Profile, ProfileError};
use crate::domain::models::reward::{ClaimRecord, Reward, RewardError};
use crate::domain::models::task::{Task, TaskError};
use crate::Backend;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub household_service: crate::domain::HouseholdService,
    pub profile_service: crate::domain::ProfileService,
    pub task_service: crate::domain::TaskService,
    pub reward_service: crate::domain::RewardService,
    pub streak_service: crate::domain::StreakService,
    pub badge_service: crate::domain::BadgeService,
    pub leaderboard_service: crate::domain::LeaderboardService,
}

impl AppState {
    /// Create application state from a wired backend
    pub fn new(backend: &Backend) -> Self {
        Self {
            household_service: backend.household_service.clone(),
            profile_service: backend.profile_service.clone(),
            task_service: backend.task_service.clone(),
            reward_service: backend.reward_service.clone(),
            streak_service: backend.streak_service.clone(),
            badge_service: backend.badge_service.clone(),
            leaderboard_service: backend.leaderboard_service.clone(),
        }
    }
}

/// Map a domain error onto a status code. Typed business failures keep
/// their message; anything else is a generic 500.
fn error_response(e: anyhow::Error) -> Response {
    let status = if let Some(err) = e.downcast_ref::<TaskError>() {
        match err {
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::ParentRoleRequired => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        }
    } else if let Some(err) = e.downcast_ref::<RewardError>() {
        match err {
            RewardError::NotFound(_) | RewardError::ClaimNotFound(_) => StatusCode::NOT_FOUND,
            RewardError::ParentRoleRequired => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        }
    } else if let Some(err) = e.downcast_ref::<ProfileError>() {
        match err {
            ProfileError::NotFound(_) => StatusCode::NOT_FOUND,
            ProfileError::PinRequired
            | ProfileError::WrongPin
            | ProfileError::ParentRoleRequired => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        }
    } else if let Some(err) = e.downcast_ref::<HouseholdError>() {
        match err {
            HouseholdError::NotFound(_) | HouseholdError::InvalidJoinCode(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::BAD_REQUEST,
        }
    } else {
        tracing::error!("Unexpected backend error: {:?}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Operation failed").into_response();
    };

    (status, e.to_string()).into_response()
}

fn household_to_dto(household: &Household) -> HouseholdDto {
    HouseholdDto {
        id: household.id.clone(),
        name: household.name.clone(),
        join_code: household.join_code.clone(),
        settings: HouseholdSettingsDto {
            default_task_points: household.settings.default_task_points,
            require_photo_proof: household.settings.require_photo_proof,
        },
        created_at: household.created_at.to_rfc3339(),
        updated_at: household.updated_at.to_rfc3339(),
    }
}

fn profile_to_dto(profile: &Profile) -> ProfileDto {
    ProfileDto {
        id: profile.id.clone(),
        household_id: profile.household_id.clone(),
        name: profile.name.clone(),
        role: profile.role,
        has_pin: profile.pin.is_some(),
        points: profile.points,
        lifetime_points: profile.lifetime_points,
        completed_tasks: profile.completed_tasks,
        current_streak: profile.current_streak,
        longest_streak: profile.longest_streak,
        last_active_date: profile.last_active_date.map(|d| d.to_string()),
        created_at: profile.created_at.to_rfc3339(),
        updated_at: profile.updated_at.to_rfc3339(),
    }
}

fn task_to_dto(task: &Task) -> TaskDto {
    TaskDto {
        id: task.id.clone(),
        household_id: task.household_id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        assignee_ids: task.assignee_ids.clone(),
        due_date: task.due_date.map(|d| d.to_string()),
        points: task.points,
        category: task.category,
        recurrence: task.recurrence,
        status: task.status,
        photo_proof_url: task.photo_proof_url.clone(),
        created_at: task.created_at.to_rfc3339(),
        updated_at: task.updated_at.to_rfc3339(),
        completed_at: task.completed_at.map(|t| t.to_rfc3339()),
    }
}

fn reward_to_dto(reward: &Reward, remaining_stock: Option<u32>) -> RewardDto {
    RewardDto {
        id: reward.id.clone(),
        household_id: reward.household_id.clone(),
        title: reward.title.clone(),
        description: reward.description.clone(),
        cost: reward.cost,
        category: reward.category,
        stock: reward.stock,
        remaining_stock,
        is_active: reward.is_active,
        created_at: reward.created_at.to_rfc3339(),
        updated_at: reward.updated_at.to_rfc3339(),
    }
}

fn claim_to_dto(claim: &ClaimRecord) -> ClaimDto {
    ClaimDto {
        id: claim.id.clone(),
        reward_id: claim.reward_id.clone(),
        claimant_id: claim.claimant_id.clone(),
        status: claim.status,
        claimed_at: claim.claimed_at.to_rfc3339(),
        redeemed_at: claim.redeemed_at.map(|t| t.to_rfc3339()),
        reviewed_by: claim.reviewed_by.clone(),
        rejection_reason: claim.rejection_reason.clone(),
        cooldown_until: claim.cooldown_until.map(|t| t.to_rfc3339()),
    }
}

fn earned_badge_to_dto(badge: &EarnedBadge) -> EarnedBadgeDto {
    let definition = find_badge(&badge.badge_id);
    EarnedBadgeDto {
        badge_id: badge.badge_id.clone(),
        name: definition.map(|d| d.name.to_string()).unwrap_or_default(),
        tier: definition
            .map(|d| d.tier)
            .unwrap_or(shared::BadgeTier::Bronze),
        profile_id: badge.profile_id.clone(),
        earned_at: badge.earned_at.to_rfc3339(),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, Response> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}', expected YYYY-MM-DD", s),
        )
            .into_response()
    })
}

/// Axum handler for POST /api/households
pub async fn create_household(
    State(state): State<AppState>,
    Json(request): Json<CreateHouseholdRequest>,
) -> impl IntoResponse {
    info!("POST /api/households - name: {}", request.name);

    match state
        .household_service
        .create_household(CreateHouseholdCommand { name: request.name })
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(HouseholdResponse {
                household: household_to_dto(&result.household),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/households/:id
pub async fn get_household(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/households/{}", household_id);

    match state
        .household_service
        .get_household(GetHouseholdCommand { household_id })
    {
        Ok(result) => match result.household {
            Some(household) => (StatusCode::OK, Json(household_to_dto(&household))).into_response(),
            None => (StatusCode::NOT_FOUND, "Household not found").into_response(),
        },
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/households/join
pub async fn join_household(
    State(state): State<AppState>,
    Json(request): Json<JoinHouseholdRequest>,
) -> impl IntoResponse {
    info!("POST /api/households/join - code: {}", request.join_code);

    match state.household_service.join_household(JoinHouseholdCommand {
        join_code: request.join_code,
        profile_name: request.profile_name,
        role: request.role,
        pin: request.pin,
    }) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(JoinHouseholdResponse {
                household: household_to_dto(&result.household),
                profile: profile_to_dto(&result.profile),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for PUT /api/households/:id/settings
pub async fn update_household_settings(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
    Json(request): Json<UpdateHouseholdSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/households/{}/settings", household_id);

    match state
        .household_service
        .update_settings(UpdateHouseholdSettingsCommand {
            household_id,
            default_task_points: request.default_task_points,
            require_photo_proof: request.require_photo_proof,
        }) {
        Ok(result) => (
            StatusCode::OK,
            Json(HouseholdResponse {
                household: household_to_dto(&result.household),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> impl IntoResponse {
    info!("POST /api/profiles - name: {}", request.name);

    match state.profile_service.create_profile(CreateProfileCommand {
        household_id: request.household_id,
        name: request.name,
        role: request.role,
        pin: request.pin,
    }) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ProfileResponse {
                profile: profile_to_dto(&result.profile),
                success_message: format!("Profile '{}' created", result.profile.name),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/households/:id/profiles
pub async fn list_profiles(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/households/{}/profiles", household_id);

    match state
        .profile_service
        .list_profiles(ListProfilesCommand { household_id })
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ProfileListResponse {
                profiles: result.profiles.iter().map(profile_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for PUT /api/profiles/:id
pub async fn update_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profiles/{}", profile_id);

    match state.profile_service.update_profile(UpdateProfileCommand {
        profile_id,
        name: request.name,
        pin: request.pin,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(ProfileResponse {
                profile: profile_to_dto(&result.profile),
                success_message: "Profile updated".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/profiles/active
pub async fn get_active_profile(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/profiles/active");

    match state.profile_service.get_active_profile() {
        Ok(result) => (
            StatusCode::OK,
            Json(ActiveProfileResponse {
                active_profile: result.profile.as_ref().map(profile_to_dto),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/profiles/active
pub async fn set_active_profile(
    State(state): State<AppState>,
    Json(request): Json<SetActiveProfileRequest>,
) -> impl IntoResponse {
    info!("POST /api/profiles/active - profile: {}", request.profile_id);

    match state
        .profile_service
        .set_active_profile(SetActiveProfileCommand {
            profile_id: request.profile_id,
            pin: request.pin,
        }) {
        Ok(result) => (
            StatusCode::OK,
            Json(ProfileResponse {
                profile: profile_to_dto(&result.profile),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> impl IntoResponse {
    info!("POST /api/tasks - title: {}", request.title);

    let due_date = match request.due_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(response) => return response,
    };

    match state.task_service.create_task(CreateTaskCommand {
        household_id: request.household_id,
        actor_profile_id: request.actor_profile_id,
        title: request.title,
        description: request.description,
        assignee_ids: request.assignee_ids,
        due_date,
        points: request.points,
        category: request.category,
        recurrence: request.recurrence,
    }) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(TaskResponse {
                task: task_to_dto(&result.task),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Query parameters for the task list endpoint
#[derive(Deserialize, Debug)]
pub struct TaskListQuery {
    pub assignee_id: Option<String>,
    pub status: Option<shared::TaskStatus>,
}

/// Axum handler for GET /api/households/:id/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
    Query(query): Query<TaskListQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/households/{}/tasks - query: {:?}",
        household_id, query
    );

    match state.task_service.list_tasks(ListTasksCommand {
        household_id,
        assignee_id: query.assignee_id,
        status: query.status,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(TaskListResponse {
                tasks: result.tasks.iter().map(task_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/tasks/:id/advance
pub async fn advance_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<AdvanceTaskRequest>,
) -> impl IntoResponse {
    info!("POST /api/tasks/{}/advance", task_id);

    match state.task_service.advance_task(AdvanceTaskCommand {
        task_id,
        actor_profile_id: request.actor_profile_id,
        photo_proof_url: request.photo_proof_url,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(AdvanceTaskResponse {
                task: task_to_dto(&result.task),
                awarded_points: result.awarded_points,
                new_badges: result.new_badges.iter().map(earned_badge_to_dto).collect(),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> impl IntoResponse {
    info!("PUT /api/tasks/{}", task_id);

    let due_date = match request.due_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(response) => return response,
    };

    match state.task_service.update_task(UpdateTaskCommand {
        task_id,
        actor_profile_id: request.actor_profile_id,
        title: request.title,
        description: request.description,
        assignee_ids: request.assignee_ids,
        due_date,
        points: request.points,
        category: request.category,
        recurrence: request.recurrence,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(TaskResponse {
                task: task_to_dto(&result.task),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Query parameter naming the acting profile
#[derive(Deserialize, Debug)]
pub struct ActorQuery {
    pub actor_profile_id: String,
}

/// Axum handler for DELETE /api/profiles/:id
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> impl IntoResponse {
    info!("DELETE /api/profiles/{}", profile_id);

    match state.profile_service.delete_profile(DeleteProfileCommand {
        profile_id,
        actor_profile_id: query.actor_profile_id,
    }) {
        Ok(result) => (StatusCode::OK, Json(result.success_message)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> impl IntoResponse {
    info!("DELETE /api/tasks/{}", task_id);

    match state.task_service.delete_task(DeleteTaskCommand {
        task_id,
        actor_profile_id: query.actor_profile_id,
    }) {
        Ok(result) => (StatusCode::OK, Json(result.success_message)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/rewards
pub async fn create_reward(
    State(state): State<AppState>,
    Json(request): Json<CreateRewardRequest>,
) -> impl IntoResponse {
    info!("POST /api/rewards - title: {}", request.title);

    match state.reward_service.create_reward(CreateRewardCommand {
        household_id: request.household_id,
        actor_profile_id: request.actor_profile_id,
        title: request.title,
        description: request.description,
        cost: request.cost,
        category: request.category,
        stock: request.stock,
    }) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(RewardResponse {
                reward: reward_to_dto(&result.reward, result.reward.stock),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Query parameters for the reward list endpoint
#[derive(Deserialize, Debug)]
pub struct RewardListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Axum handler for GET /api/households/:id/rewards
pub async fn list_rewards(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
    Query(query): Query<RewardListQuery>,
) -> impl IntoResponse {
    info!("GET /api/households/{}/rewards", household_id);

    match state.reward_service.list_rewards(ListRewardsCommand {
        household_id,
        include_inactive: query.include_inactive,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(RewardListResponse {
                rewards: result
                    .rewards
                    .iter()
                    .map(|r| reward_to_dto(&r.reward, r.remaining_stock))
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for PUT /api/rewards/:id
pub async fn update_reward(
    State(state): State<AppState>,
    Path(reward_id): Path<String>,
    Json(request): Json<UpdateRewardRequest>,
) -> impl IntoResponse {
    info!("PUT /api/rewards/{}", reward_id);

    match state.reward_service.update_reward(UpdateRewardCommand {
        reward_id,
        actor_profile_id: request.actor_profile_id,
        title: request.title,
        description: request.description,
        cost: request.cost,
        stock: request.stock,
        is_active: request.is_active,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(RewardResponse {
                reward: reward_to_dto(&result.reward, result.reward.stock),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/rewards/:id
pub async fn get_reward(
    State(state): State<AppState>,
    Path(reward_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/rewards/{}", reward_id);

    match state
        .reward_service
        .get_reward(GetRewardCommand { reward_id })
    {
        Ok(result) => match result.reward {
            Some(reward) => (
                StatusCode::OK,
                Json(reward_to_dto(&reward, result.remaining_stock)),
            )
                .into_response(),
            None => (StatusCode::NOT_FOUND, "Reward not found").into_response(),
        },
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/rewards/:id/claim
pub async fn claim_reward(
    State(state): State<AppState>,
    Path(reward_id): Path<String>,
    Json(request): Json<ClaimRewardRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/rewards/{}/claim - claimant: {}",
        reward_id, request.claimant_profile_id
    );

    match state.reward_service.claim_reward(ClaimRewardCommand {
        reward_id,
        claimant_id: request.claimant_profile_id,
    }) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ClaimRewardResponse {
                claim: claim_to_dto(&result.claim),
                new_balance: result.new_balance,
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/rewards/:id/claims
pub async fn list_claims(
    State(state): State<AppState>,
    Path(reward_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/rewards/{}/claims", reward_id);

    match state
        .reward_service
        .list_claims(ListClaimsCommand { reward_id })
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ClaimListResponse {
                claims: result.claims.iter().map(claim_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/claims/:id/approve
pub async fn approve_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
    Json(request): Json<ApproveClaimRequest>,
) -> impl IntoResponse {
    info!("POST /api/claims/{}/approve", claim_id);

    match state.reward_service.approve_claim(ApproveClaimCommand {
        claim_id,
        reviewer_id: request.reviewer_profile_id,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(ClaimReviewResponse {
                claim: claim_to_dto(&result.claim),
                claimant_balance: result.claimant_balance,
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/claims/:id/reject
pub async fn reject_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
    Json(request): Json<RejectClaimRequest>,
) -> impl IntoResponse {
    info!("POST /api/claims/{}/reject", claim_id);

    match state.reward_service.reject_claim(RejectClaimCommand {
        claim_id,
        reviewer_id: request.reviewer_profile_id,
        reason: request.reason,
    }) {
        Ok(result) => (
            StatusCode::OK,
            Json(ClaimReviewResponse {
                claim: claim_to_dto(&result.claim),
                claimant_balance: result.claimant_balance,
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/profiles/:id/badges
pub async fn list_badges(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/profiles/{}/badges", profile_id);

    match state.badge_service.list_earned_badges(&profile_id) {
        Ok(badges) => (
            StatusCode::OK,
            Json(EarnedBadgeListResponse {
                badges: badges.iter().map(earned_badge_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/profiles/:id/streak
pub async fn get_streak(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/profiles/{}/streak", profile_id);

    match state
        .profile_service
        .get_profile(GetProfileCommand { profile_id })
    {
        Ok(result) => match result.profile {
            Some(profile) => (
                StatusCode::OK,
                Json(StreakResponse {
                    profile_id: profile.id,
                    current_streak: profile.current_streak,
                    longest_streak: profile.longest_streak,
                    last_active_date: profile.last_active_date.map(|d| d.to_string()),
                }),
            )
                .into_response(),
            None => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        },
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/households/:id/leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(household_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/households/{}/leaderboard", household_id);

    match state.leaderboard_service.get_leaderboard(&household_id) {
        Ok(entries) => (
            StatusCode::OK,
            Json(LeaderboardResponse {
                entries: entries
                    .into_iter()
                    .map(|e| LeaderboardEntry {
                        rank: e.rank,
                        profile_id: e.profile_id,
                        name: e.name,
                        points: e.points,
                        current_streak: e.current_streak,
                        completed_tasks: e.completed_tasks,
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
