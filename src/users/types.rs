//! User progression record and per-user settings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progression::leveling::{xp_required_for_level, AvatarTier};

/// Starting value of each character stat.
pub const BASE_STAT: u32 = 10;

/// A registered user and their progression state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Unique display name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Current level (>= 1)
    pub level: u32,
    /// Cumulative experience
    pub total_xp: u64,
    /// Experience still needed to reach the next level (cached)
    pub xp_to_next_level: u64,
    pub strength: u32,
    pub agility: u32,
    pub stamina: u32,
    pub vitality: u32,
    /// Gold balance accumulated from quest rewards
    pub gold: u64,
    pub total_quests_completed: u32,
    pub total_workouts: u32,
    /// Consecutive days with at least one completed quest
    pub current_streak: u32,
    /// Day of the most recent quest completion
    pub last_quest_completed_on: Option<NaiveDate>,
    /// Rank derived from level (cached)
    pub avatar_tier: AvatarTier,
    /// Optimistic concurrency version, bumped by every stored update
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a level 1 user with base stats.
    pub fn new(username: String, email: String) -> Self {
        Self::with_base_stat(username, email, BASE_STAT)
    }

    /// Create a level 1 user with every stat set to `base_stat`.
    pub fn with_base_stat(username: String, email: String, base_stat: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            level: 1,
            total_xp: 0,
            xp_to_next_level: xp_required_for_level(1),
            strength: base_stat,
            agility: base_stat,
            stamina: base_stat,
            vitality: base_stat,
            gold: 0,
            total_quests_completed: 0,
            total_workouts: 0,
            current_streak: 0,
            last_quest_completed_on: None,
            avatar_tier: AvatarTier::Bronze,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of the four character stats.
    pub fn total_stats(&self) -> u32 {
        self.strength + self.agility + self.stamina + self.vitality
    }
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Unit system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Metric units (km, kg)
    #[default]
    Metric,
    /// Imperial units (miles, lbs)
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "metric" => Some(Units::Metric),
            "imperial" => Some(Units::Imperial),
            _ => None,
        }
    }
}

/// Notification, privacy and app preferences of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: Uuid,
    pub notification_quest_reminders: bool,
    pub notification_level_up: bool,
    pub notification_achievement_unlock: bool,
    pub privacy_profile_visible: bool,
    pub privacy_stats_visible: bool,
    pub app_theme: Theme,
    pub app_units: Units,
    /// BCP 47 language tag
    pub app_language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Default settings for a user: everything enabled, dark theme, metric, English.
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            notification_quest_reminders: true,
            notification_level_up: true,
            notification_achievement_unlock: true,
            privacy_profile_visible: true,
            privacy_stats_visible: true,
            app_theme: Theme::Dark,
            app_units: Units::Metric,
            app_language: "en".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the provided fields of a partial update.
    ///
    /// Returns `true` if any field was provided.
    pub fn apply(&mut self, update: &SettingsUpdate) -> bool {
        let mut changed = false;

        if let Some(value) = update.notification_quest_reminders {
            self.notification_quest_reminders = value;
            changed = true;
        }
        if let Some(value) = update.notification_level_up {
            self.notification_level_up = value;
            changed = true;
        }
        if let Some(value) = update.notification_achievement_unlock {
            self.notification_achievement_unlock = value;
            changed = true;
        }
        if let Some(value) = update.privacy_profile_visible {
            self.privacy_profile_visible = value;
            changed = true;
        }
        if let Some(value) = update.privacy_stats_visible {
            self.privacy_stats_visible = value;
            changed = true;
        }
        if let Some(value) = update.app_theme {
            self.app_theme = value;
            changed = true;
        }
        if let Some(value) = update.app_units {
            self.app_units = value;
            changed = true;
        }
        if let Some(value) = &update.app_language {
            self.app_language = value.clone();
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Partial settings update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub notification_quest_reminders: Option<bool>,
    pub notification_level_up: Option<bool>,
    pub notification_achievement_unlock: Option<bool>,
    pub privacy_profile_visible: Option<bool>,
    pub privacy_stats_visible: Option<bool>,
    pub app_theme: Option<Theme>,
    pub app_units: Option<Units>,
    pub app_language: Option<String>,
}
