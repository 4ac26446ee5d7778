use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a profile within a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Parent,
    Child,
}

impl ProfileRole {
    /// Convert to string for CSV storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Parent => "parent",
            ProfileRole::Child => "child",
        }
    }

    /// Parse from string for CSV loading
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "parent" => Ok(ProfileRole::Parent),
            "child" => Ok(ProfileRole::Child),
            _ => Err(format!("Invalid profile role: {}", s)),
        }
    }
}

/// Status of a task. Advances through a fixed forward sequence;
/// `Archived` is terminal and self-looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Archived,
}

impl TaskStatus {
    /// Next status in the fixed sequence. Archived stays archived.
    pub fn advance(&self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Review,
            TaskStatus::Review => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Archived,
            TaskStatus::Archived => TaskStatus::Archived,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Archived)
    }

    /// Convert to string for CSV storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
            TaskStatus::Archived => "archived",
        }
    }

    /// Parse from string for CSV loading
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            "archived" => Ok(TaskStatus::Archived),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }
}

/// Category of a task for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Cleaning,
    Homework,
    Pets,
    Outdoor,
    Kitchen,
    Other,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Cleaning => "cleaning",
            TaskCategory::Homework => "homework",
            TaskCategory::Pets => "pets",
            TaskCategory::Outdoor => "outdoor",
            TaskCategory::Kitchen => "kitchen",
            TaskCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "cleaning" => Ok(TaskCategory::Cleaning),
            "homework" => Ok(TaskCategory::Homework),
            "pets" => Ok(TaskCategory::Pets),
            "outdoor" => Ok(TaskCategory::Outdoor),
            "kitchen" => Ok(TaskCategory::Kitchen),
            "other" => Ok(TaskCategory::Other),
            _ => Err(format!("Invalid task category: {}", s)),
        }
    }
}

/// How a task repeats after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            _ => Err(format!("Invalid recurrence: {}", s)),
        }
    }
}

/// Category of a reward in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardCategory {
    Privilege,
    Treat,
    Activity,
    Item,
}

impl RewardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardCategory::Privilege => "privilege",
            RewardCategory::Treat => "treat",
            RewardCategory::Activity => "activity",
            RewardCategory::Item => "item",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "privilege" => Ok(RewardCategory::Privilege),
            "treat" => Ok(RewardCategory::Treat),
            "activity" => Ok(RewardCategory::Activity),
            "item" => Ok(RewardCategory::Item),
            _ => Err(format!("Invalid reward category: {}", s)),
        }
    }
}

/// Approval status of a reward claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            _ => Err(format!("Invalid claim status: {}", s)),
        }
    }
}

/// Tier of a badge in the achievement catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Bronze,
    Silver,
    Gold,
}

impl BadgeTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeTier::Bronze => "bronze",
            BadgeTier::Silver => "silver",
            BadgeTier::Gold => "gold",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "bronze" => Ok(BadgeTier::Bronze),
            "silver" => Ok(BadgeTier::Silver),
            "gold" => Ok(BadgeTier::Gold),
            _ => Err(format!("Invalid badge tier: {}", s)),
        }
    }
}

/// Household settings controlling task defaults and proof requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSettingsDto {
    pub default_task_points: i64,
    pub require_photo_proof: bool,
}

/// A household shared by parents and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdDto {
    pub id: String,
    pub name: String,
    /// Short alphanumeric code other family members use to join
    pub join_code: String,
    pub settings: HouseholdSettingsDto,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new household
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateHouseholdRequest {
    pub name: String,
}

/// Response after creating a household
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HouseholdResponse {
    pub household: HouseholdDto,
    pub success_message: String,
}

/// Request for joining a household via its join code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinHouseholdRequest {
    pub join_code: String,
    pub profile_name: String,
    pub role: ProfileRole,
    /// Optional PIN protecting the new profile
    pub pin: Option<String>,
}

/// Response after joining a household
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinHouseholdResponse {
    pub household: HouseholdDto,
    pub profile: ProfileDto,
    pub success_message: String,
}

/// Request for updating household settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateHouseholdSettingsRequest {
    pub default_task_points: Option<i64>,
    pub require_photo_proof: Option<bool>,
}

/// A parent or child profile with its gamification stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDto {
    pub id: String,
    pub household_id: String,
    pub name: String,
    pub role: ProfileRole,
    /// Whether switching to this profile requires a PIN
    pub has_pin: bool,
    pub points: i64,
    pub lifetime_points: i64,
    pub completed_tasks: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_active_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    pub created_at: String,               // RFC 3339 timestamp
    pub updated_at: String,               // RFC 3339 timestamp
}

/// Request for creating a new profile in a household
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProfileRequest {
    pub household_id: String,
    pub name: String,
    pub role: ProfileRole,
    pub pin: Option<String>,
}

/// Request for updating an existing profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub pin: Option<String>,
}

/// Response after creating or updating a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    pub profile: ProfileDto,
    pub success_message: String,
}

/// Response containing a household's profiles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileDto>,
}

/// Request for switching the active profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetActiveProfileRequest {
    pub profile_id: String,
    /// Required when the target profile is PIN protected
    pub pin: Option<String>,
}

/// Response containing the active profile, if any
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveProfileResponse {
    pub active_profile: Option<ProfileDto>,
}

/// A chore assigned to one or more household members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: String,
    pub household_id: String,
    pub title: String,
    pub description: String,
    pub assignee_ids: Vec<String>,
    pub due_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    pub points: i64,
    pub category: TaskCategory,
    pub recurrence: Recurrence,
    pub status: TaskStatus,
    pub photo_proof_url: Option<String>,
    pub created_at: String,           // RFC 3339 timestamp
    pub updated_at: String,           // RFC 3339 timestamp
    pub completed_at: Option<String>, // RFC 3339 timestamp
}

/// Request for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateTaskRequest {
    pub household_id: String,
    pub actor_profile_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignee_ids: Vec<String>,
    pub due_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    /// Falls back to the household's default point value when omitted
    pub points: Option<i64>,
    pub category: Option<TaskCategory>,
    pub recurrence: Option<Recurrence>,
}

/// Response after creating or updating a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskResponse {
    pub task: TaskDto,
    pub success_message: String,
}

/// Response containing a household's tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskDto>,
}

/// Request for updating a task's details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateTaskRequest {
    pub actor_profile_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee_ids: Option<Vec<String>>,
    pub due_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    pub points: Option<i64>,
    pub category: Option<TaskCategory>,
    pub recurrence: Option<Recurrence>,
}

/// Request for advancing a task to its next status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvanceTaskRequest {
    pub actor_profile_id: String,
    /// Photo proof attached when moving into review
    pub photo_proof_url: Option<String>,
}

/// Response after advancing a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvanceTaskResponse {
    pub task: TaskDto,
    /// Points granted to each assignee when the task reached done
    pub awarded_points: Option<i64>,
    /// Badges newly earned by assignees as a completion side effect
    pub new_badges: Vec<EarnedBadgeDto>,
    pub success_message: String,
}

/// A reward in the household shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardDto {
    pub id: String,
    pub household_id: String,
    pub title: String,
    pub description: String,
    pub cost: i64,
    pub category: RewardCategory,
    /// None means unlimited
    pub stock: Option<u32>,
    /// Stock left after non-rejected claims; None when unlimited
    pub remaining_stock: Option<u32>,
    pub is_active: bool,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new reward
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateRewardRequest {
    pub household_id: String,
    pub actor_profile_id: String,
    pub title: String,
    pub description: Option<String>,
    pub cost: i64,
    pub category: Option<RewardCategory>,
    pub stock: Option<u32>,
}

/// Request for updating a reward (pause/resume via is_active)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateRewardRequest {
    pub actor_profile_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cost: Option<i64>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
}

/// Response after creating or updating a reward
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardResponse {
    pub reward: RewardDto,
    pub success_message: String,
}

/// Response containing a household's rewards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardListResponse {
    pub rewards: Vec<RewardDto>,
}

/// One claim attempt against a reward, kept forever for history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDto {
    pub id: String,
    pub reward_id: String,
    pub claimant_id: String,
    pub status: ClaimStatus,
    pub claimed_at: String,          // RFC 3339 timestamp
    pub redeemed_at: Option<String>, // RFC 3339 timestamp
    pub reviewed_by: Option<String>, // reviewer profile id
    pub rejection_reason: Option<String>,
    pub cooldown_until: Option<String>, // RFC 3339 timestamp
}

/// Request for claiming a reward
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimRewardRequest {
    pub claimant_profile_id: String,
}

/// Response after a successful claim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimRewardResponse {
    pub claim: ClaimDto,
    pub new_balance: i64,
    pub success_message: String,
}

/// Request for approving a pending claim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApproveClaimRequest {
    pub reviewer_profile_id: String,
}

/// Request for rejecting a pending claim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RejectClaimRequest {
    pub reviewer_profile_id: String,
    pub reason: Option<String>,
}

/// Response after approving or rejecting a claim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimReviewResponse {
    pub claim: ClaimDto,
    /// Claimant balance after a rejection refund; unchanged on approval
    pub claimant_balance: i64,
    pub success_message: String,
}

/// Response containing a reward's claim history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimDto>,
}

/// A badge earned by a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadgeDto {
    pub badge_id: String,
    pub name: String,
    pub tier: BadgeTier,
    pub profile_id: String,
    pub earned_at: String, // RFC 3339 timestamp
}

/// Response containing a profile's earned badges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EarnedBadgeListResponse {
    pub badges: Vec<EarnedBadgeDto>,
}

/// Current and longest streak for a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreakResponse {
    pub profile_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_active_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
}

/// One row of the family leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub profile_id: String,
    pub name: String,
    pub points: i64,
    pub current_streak: u32,
    pub completed_tasks: u32,
}

/// Response containing the household leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_advance_sequence() {
        assert_eq!(TaskStatus::Todo.advance(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.advance(), TaskStatus::Review);
        assert_eq!(TaskStatus::Review.advance(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.advance(), TaskStatus::Archived);
    }

    #[test]
    fn test_task_status_archived_is_terminal() {
        assert_eq!(TaskStatus::Archived.advance(), TaskStatus::Archived);
        assert!(TaskStatus::Archived.is_terminal());
        assert!(!TaskStatus::Done.is_terminal());
    }

    #[test]
    fn test_task_status_never_moves_backward() {
        // Walking the sequence from any starting point only ever hits
        // states later in the fixed order.
        let order = [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Done,
            TaskStatus::Archived,
        ];
        let position = |s: TaskStatus| order.iter().position(|o| *o == s).unwrap();

        for start in order {
            let mut current = start;
            for _ in 0..10 {
                let next = current.advance();
                assert!(position(next) >= position(current));
                current = next;
            }
            assert_eq!(current, TaskStatus::Archived);
        }
    }

    #[test]
    fn test_task_status_string_round_trip() {
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Done,
            TaskStatus::Archived,
        ] {
            assert_eq!(TaskStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(TaskStatus::from_str("in progress").is_err());
    }

    #[test]
    fn test_claim_status_string_round_trip() {
        for status in [ClaimStatus::Pending, ClaimStatus::Approved, ClaimStatus::Rejected] {
            assert_eq!(ClaimStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(ClaimStatus::from_str("redeemed").is_err());
    }

    #[test]
    fn test_profile_role_parse() {
        assert_eq!(ProfileRole::from_str("parent").unwrap(), ProfileRole::Parent);
        assert_eq!(ProfileRole::from_str("CHILD").unwrap(), ProfileRole::Child);
        assert!(ProfileRole::from_str("admin").is_err());
    }

    #[test]
    fn test_recurrence_empty_string_is_none() {
        assert_eq!(Recurrence::from_str("").unwrap(), Recurrence::None);
        assert_eq!(Recurrence::from_str("weekly").unwrap(), Recurrence::Weekly);
    }

    #[test]
    fn test_task_status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let parsed: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }
}
