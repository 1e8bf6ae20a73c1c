//! Quest, quest template and workout log types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of quest. Daily quests are replaced on every generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Daily,
    Weekly,
    Special,
}

impl QuestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestType::Daily => "daily",
            QuestType::Weekly => "weekly",
            QuestType::Special => "special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(QuestType::Daily),
            "weekly" => Some(QuestType::Weekly),
            "special" => Some(QuestType::Special),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// Accepting progress
    Active,
    /// Target reached, rewards granted
    Completed,
}

impl QuestStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, QuestStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::Active => "active",
            QuestStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(QuestStatus::Active),
            "completed" => Some(QuestStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of a quest that can be instantiated for any user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestTemplate {
    pub title: String,
    pub description: String,
    /// Exercise key, e.g. `push_ups`
    pub exercise_type: String,
    pub target_value: u32,
    pub xp_reward: u64,
    pub gold_reward: u64,
}

impl QuestTemplate {
    pub fn new(
        title: &str,
        description: &str,
        exercise_type: &str,
        target_value: u32,
        xp_reward: u64,
        gold_reward: u64,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            exercise_type: exercise_type.to_string(),
            target_value,
            xp_reward,
            gold_reward,
        }
    }
}

/// A quest instance owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quest_type: QuestType,
    pub title: String,
    pub description: String,
    pub exercise_type: String,
    pub target_value: u32,
    /// Always within `0..=target_value`
    pub current_progress: u32,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub item_reward: Option<String>,
    pub status: QuestStatus,
    /// Optimistic concurrency version, bumped by every stored update
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Quest {
    /// Instantiate a template as an active quest with zero progress.
    pub fn from_template(
        user_id: Uuid,
        quest_type: QuestType,
        template: &QuestTemplate,
        created_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            quest_type,
            title: template.title.clone(),
            description: template.description.clone(),
            exercise_type: template.exercise_type.clone(),
            target_value: template.target_value,
            current_progress: 0,
            xp_reward: template.xp_reward,
            gold_reward: template.gold_reward,
            item_reward: None,
            status: QuestStatus::Active,
            version: 0,
            created_at,
            expires_at: created_at + lifetime,
        }
    }

    /// Whether the expiry time has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Progress percentage (0-100).
    pub fn progress_percent(&self) -> f32 {
        if self.target_value == 0 {
            return 100.0;
        }
        (self.current_progress as f32 / self.target_value as f32 * 100.0).min(100.0)
    }
}

/// Workout submitted by a user against a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub exercise_type: String,
    /// Amount performed; must not be negative
    pub value: i64,
    pub notes: Option<String>,
}

impl WorkoutEntry {
    pub fn new(exercise_type: &str, value: i64) -> Self {
        Self {
            exercise_type: exercise_type.to_string(),
            value,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Append-only record of a logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Quest the workout was applied to, if any
    pub quest_id: Option<Uuid>,
    pub exercise_type: String,
    pub value: u32,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl WorkoutLog {
    pub fn new(user_id: Uuid, quest_id: Option<Uuid>, exercise_type: &str, value: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            quest_id,
            exercise_type: exercise_type.to_string(),
            value,
            notes: None,
            logged_at: Utc::now(),
        }
    }
}
