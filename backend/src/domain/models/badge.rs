use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use shared::BadgeTier;

/// Rule a profile's stats must satisfy to earn a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRequirement {
    TasksCompleted(u32),
    StreakDays(u32),
    PointsEarned(i64),
    Special(SpecialCondition),
}

/// Named conditions for special badges, evaluated from counters
/// maintained at task-completion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCondition {
    /// Completions before 08:00 UTC
    MorningTasks(u32),
    /// Completions at or after 20:00 UTC
    NightTasks(u32),
    /// At least one completed task on seven consecutive days
    PerfectWeek,
}

/// Static catalog entry for an achievement badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: BadgeTier,
    pub requirement: BadgeRequirement,
}

/// Snapshot of the stats a badge rule can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStats {
    pub completed_tasks: u32,
    pub current_streak: u32,
    pub lifetime_points: i64,
    pub morning_completions: u32,
    pub night_completions: u32,
}

impl BadgeDefinition {
    /// Whether the stats snapshot satisfies this badge's rule.
    pub fn qualifies(&self, stats: &BadgeStats) -> bool {
        match self.requirement {
            BadgeRequirement::TasksCompleted(threshold) => stats.completed_tasks >= threshold,
            BadgeRequirement::StreakDays(threshold) => stats.current_streak >= threshold,
            BadgeRequirement::PointsEarned(threshold) => stats.lifetime_points >= threshold,
            BadgeRequirement::Special(condition) => match condition {
                SpecialCondition::MorningTasks(threshold) => {
                    stats.morning_completions >= threshold
                }
                SpecialCondition::NightTasks(threshold) => stats.night_completions >= threshold,
                SpecialCondition::PerfectWeek => stats.current_streak >= 7,
            },
        }
    }
}

/// The badge catalog. Static by design: definitions are code, earned
/// records are data.
pub static BADGE_CATALOG: Lazy<Vec<BadgeDefinition>> = Lazy::new(|| {
    vec![
        BadgeDefinition {
            id: "first-steps",
            name: "First Steps",
            tier: BadgeTier::Bronze,
            requirement: BadgeRequirement::TasksCompleted(1),
        },
        BadgeDefinition {
            id: "task-master",
            name: "Task Master",
            tier: BadgeTier::Silver,
            requirement: BadgeRequirement::TasksCompleted(10),
        },
        BadgeDefinition {
            id: "super-achiever",
            name: "Super Achiever",
            tier: BadgeTier::Gold,
            requirement: BadgeRequirement::TasksCompleted(50),
        },
        BadgeDefinition {
            id: "on-a-roll",
            name: "On a Roll",
            tier: BadgeTier::Bronze,
            requirement: BadgeRequirement::StreakDays(3),
        },
        BadgeDefinition {
            id: "week-warrior",
            name: "Week Warrior",
            tier: BadgeTier::Silver,
            requirement: BadgeRequirement::StreakDays(7),
        },
        BadgeDefinition {
            id: "streak-legend",
            name: "Streak Legend",
            tier: BadgeTier::Gold,
            requirement: BadgeRequirement::StreakDays(30),
        },
        BadgeDefinition {
            id: "point-collector",
            name: "Point Collector",
            tier: BadgeTier::Bronze,
            requirement: BadgeRequirement::PointsEarned(100),
        },
        BadgeDefinition {
            id: "point-hoarder",
            name: "Point Hoarder",
            tier: BadgeTier::Silver,
            requirement: BadgeRequirement::PointsEarned(500),
        },
        BadgeDefinition {
            id: "early-bird",
            name: "Early Bird",
            tier: BadgeTier::Silver,
            requirement: BadgeRequirement::Special(SpecialCondition::MorningTasks(5)),
        },
        BadgeDefinition {
            id: "night-owl",
            name: "Night Owl",
            tier: BadgeTier::Silver,
            requirement: BadgeRequirement::Special(SpecialCondition::NightTasks(5)),
        },
        BadgeDefinition {
            id: "perfect-week",
            name: "Perfect Week",
            tier: BadgeTier::Gold,
            requirement: BadgeRequirement::Special(SpecialCondition::PerfectWeek),
        },
    ]
});

/// Look up a catalog entry by id.
pub fn find_badge(badge_id: &str) -> Option<&'static BadgeDefinition> {
    BADGE_CATALOG.iter().find(|b| b.id == badge_id)
}

/// A badge a profile has earned, persisted with its award timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub badge_id: String,
    pub profile_id: String,
    pub earned_at: DateTime<Utc>,
}
