//! Document store interface used by the progression core.
//!
//! Each method is scoped to one collection. Updates of users and quests are
//! conditional on the `version` the caller read; a mismatch fails with
//! [`StoreError::VersionConflict`] and nothing is written.

use thiserror::Error;
use uuid::Uuid;

use crate::achievements::{Achievement, UserAchievement};
use crate::quests::{Quest, QuestStatus, QuestType, WorkoutLog};
use crate::users::{UserProfile, UserSettings};

/// Persistence operations required by the progression core.
pub trait ProgressionStore {
    // ========== Users ==========

    fn insert_user(&self, user: &UserProfile) -> Result<(), StoreError>;

    fn find_user(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError>;

    fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Replace a user document if its stored version equals `user.version`.
    ///
    /// Returns the new version.
    fn update_user(&self, user: &UserProfile) -> Result<u64, StoreError>;

    // ========== Quests ==========

    fn insert_quests(&self, quests: &[Quest]) -> Result<(), StoreError>;

    /// Find a quest by id that belongs to `user_id` and is still active.
    fn find_active_quest(&self, user_id: Uuid, quest_id: Uuid)
        -> Result<Option<Quest>, StoreError>;

    /// Quests of a user, oldest first, optionally filtered by status.
    fn find_quests(
        &self,
        user_id: Uuid,
        status: Option<QuestStatus>,
    ) -> Result<Vec<Quest>, StoreError>;

    /// Replace a quest document if its stored version equals `quest.version`.
    ///
    /// Returns the new version.
    fn update_quest(&self, quest: &Quest) -> Result<u64, StoreError>;

    /// Delete the active quests of one type for a user.
    fn delete_active_quests(&self, user_id: Uuid, quest_type: QuestType)
        -> Result<usize, StoreError>;

    // ========== Workout logs ==========

    fn insert_workout_log(&self, log: &WorkoutLog) -> Result<(), StoreError>;

    /// Logs of a user, oldest first.
    fn find_workout_logs(&self, user_id: Uuid) -> Result<Vec<WorkoutLog>, StoreError>;

    /// Sum of `value` over a user's logs of one exercise type.
    fn sum_workout_values(&self, user_id: Uuid, exercise_type: &str) -> Result<u64, StoreError>;

    // ========== Achievements ==========

    fn count_achievements(&self) -> Result<usize, StoreError>;

    fn insert_achievements(&self, achievements: &[Achievement]) -> Result<(), StoreError>;

    /// All definitions in seeding order.
    fn find_achievements(&self) -> Result<Vec<Achievement>, StoreError>;

    fn find_user_achievements(&self, user_id: Uuid) -> Result<Vec<UserAchievement>, StoreError>;

    /// Insert or replace the record for `(user_id, achievement_id)`.
    fn upsert_user_achievement(&self, record: &UserAchievement) -> Result<(), StoreError>;

    // ========== Settings ==========

    fn find_settings(&self, user_id: Uuid) -> Result<Option<UserSettings>, StoreError>;

    fn upsert_settings(&self, settings: &UserSettings) -> Result<(), StoreError>;
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Version conflict on {collection} {id}")]
    VersionConflict { collection: &'static str, id: Uuid },

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}
