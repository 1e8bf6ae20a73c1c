//! Achievement definitions and per-user progress records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suffix marking a cumulative per-exercise requirement, e.g. `push_ups_total`.
pub const EXERCISE_TOTAL_SUFFIX: &str = "_total";

/// Achievement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    /// Workout count milestones
    Workout,
    /// Cumulative exercise totals
    Exercise,
    /// Quest completion milestones
    Quest,
    /// Completion streaks
    Streak,
    /// Level milestones
    Level,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::Workout => "workout",
            AchievementCategory::Exercise => "exercise",
            AchievementCategory::Quest => "quest",
            AchievementCategory::Streak => "streak",
            AchievementCategory::Level => "level",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "workout" => Some(AchievementCategory::Workout),
            "exercise" => Some(AchievementCategory::Exercise),
            "quest" => Some(AchievementCategory::Quest),
            "streak" => Some(AchievementCategory::Streak),
            "level" => Some(AchievementCategory::Level),
            _ => None,
        }
    }
}

/// How rare an achievement is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// What an achievement measures.
///
/// Stored as its string key: `total_workouts`, `total_quests_completed`,
/// `current_streak`, `level`, or `<exercise>_total`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RequirementType {
    TotalWorkouts,
    TotalQuestsCompleted,
    CurrentStreak,
    Level,
    /// Sum of logged values for one exercise type
    ExerciseTotal(String),
}

impl RequirementType {
    pub fn as_key(&self) -> String {
        match self {
            RequirementType::TotalWorkouts => "total_workouts".to_string(),
            RequirementType::TotalQuestsCompleted => "total_quests_completed".to_string(),
            RequirementType::CurrentStreak => "current_streak".to_string(),
            RequirementType::Level => "level".to_string(),
            RequirementType::ExerciseTotal(exercise) => {
                format!("{}{}", exercise, EXERCISE_TOTAL_SUFFIX)
            }
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "total_workouts" => Some(RequirementType::TotalWorkouts),
            "total_quests_completed" => Some(RequirementType::TotalQuestsCompleted),
            "current_streak" => Some(RequirementType::CurrentStreak),
            "level" => Some(RequirementType::Level),
            other => other
                .strip_suffix(EXERCISE_TOTAL_SUFFIX)
                .filter(|exercise| !exercise.is_empty())
                .map(|exercise| RequirementType::ExerciseTotal(exercise.to_string())),
        }
    }
}

impl TryFrom<String> for RequirementType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RequirementType::from_key(&value)
            .ok_or_else(|| format!("unknown requirement type: {}", value))
    }
}

impl From<RequirementType> for String {
    fn from(value: RequirementType) -> Self {
        value.as_key()
    }
}

impl std::fmt::Display for RequirementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Catalog entry describing a milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    /// Stable short key
    pub key: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub requirement_type: RequirementType,
    /// Value the requirement must reach
    pub requirement_value: u64,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub icon: String,
    pub rarity: Rarity,
    pub created_at: DateTime<Utc>,
}

impl Achievement {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        key: &str,
        name: &str,
        description: &str,
        category: AchievementCategory,
        requirement_type: RequirementType,
        requirement_value: u64,
        rarity: Rarity,
        icon: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            requirement_type,
            requirement_value,
            xp_reward: 0,
            gold_reward: 0,
            icon: icon.to_string(),
            rarity,
            created_at: Utc::now(),
        }
    }

    /// Set the XP and gold granted by this achievement.
    pub fn with_rewards(mut self, xp: u64, gold: u64) -> Self {
        self.xp_reward = xp;
        self.gold_reward = gold;
        self
    }

    /// Whether `value` satisfies the requirement.
    pub fn is_met_by(&self, value: u64) -> bool {
        value >= self.requirement_value
    }
}

/// A user's progress toward one achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAchievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_id: Uuid,
    pub current_progress: u64,
    pub completed: bool,
    /// Set once, on the transition into completed
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl UserAchievement {
    /// Create an empty progress record.
    pub fn new(user_id: Uuid, achievement_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            achievement_id,
            current_progress: 0,
            completed: false,
            unlocked_at: None,
        }
    }

    /// Record the latest measured value.
    ///
    /// Returns `true` if this call moved the record into completed.
    pub fn record(&mut self, value: u64, achievement: &Achievement, now: DateTime<Utc>) -> bool {
        self.current_progress = value;

        let met = achievement.is_met_by(value);
        let newly_completed = met && !self.completed;
        if newly_completed {
            self.unlocked_at = Some(now);
        }
        self.completed = self.completed || met;
        newly_completed
    }

    /// Progress percentage (0-100).
    pub fn percentage(&self, achievement: &Achievement) -> f32 {
        if achievement.requirement_value == 0 {
            return if self.completed { 100.0 } else { 0.0 };
        }
        ((self.current_progress as f64 / achievement.requirement_value as f64) * 100.0).min(100.0)
            as f32
    }
}
