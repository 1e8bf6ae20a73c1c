//! Quest generation and progress logging.

use chrono::Utc;
use uuid::Uuid;

use super::catalog::{QuestCatalog, QuestSampler};
use super::tracker::{self, ProgressUpdate};
use super::types::{Quest, QuestStatus, QuestType, WorkoutEntry, WorkoutLog};
use crate::error::ProgressionError;
use crate::storage::config::QuestSettings;
use crate::storage::ProgressionStore;

/// A quest after a workout was applied to it.
#[derive(Debug, Clone)]
pub struct LoggedWorkout {
    /// The quest as persisted after the update
    pub quest: Quest,
    pub update: ProgressUpdate,
    pub log: WorkoutLog,
}

/// Manager for quest instances.
pub struct QuestManager<'a> {
    store: &'a dyn ProgressionStore,
    catalog: &'a QuestCatalog,
    settings: &'a QuestSettings,
}

impl<'a> QuestManager<'a> {
    pub fn new(
        store: &'a dyn ProgressionStore,
        catalog: &'a QuestCatalog,
        settings: &'a QuestSettings,
    ) -> Self {
        Self {
            store,
            catalog,
            settings,
        }
    }

    /// Replace the user's active daily quests with a fresh random set.
    ///
    /// Completed daily quests and quests of other types are kept.
    pub fn generate_daily_quests(
        &self,
        user_id: Uuid,
        sampler: &dyn QuestSampler,
    ) -> Result<Vec<Quest>, ProgressionError> {
        let removed = self.store.delete_active_quests(user_id, QuestType::Daily)?;

        let now = Utc::now();
        let quests: Vec<Quest> = self
            .catalog
            .select(sampler, self.settings.daily_count)
            .into_iter()
            .map(|template| {
                Quest::from_template(
                    user_id,
                    QuestType::Daily,
                    template,
                    now,
                    self.settings.lifetime(),
                )
            })
            .collect();

        self.store.insert_quests(&quests)?;

        tracing::debug!(
            "Generated {} daily quests for user {} (replaced {})",
            quests.len(),
            user_id,
            removed
        );
        Ok(quests)
    }

    /// Active quests of a user, oldest first.
    pub fn active_quests(&self, user_id: Uuid) -> Result<Vec<Quest>, ProgressionError> {
        Ok(self.store.find_quests(user_id, Some(QuestStatus::Active))?)
    }

    /// Apply a workout to one of the user's active quests and log it.
    ///
    /// The amount is validated before anything is read or written. The log
    /// entry is appended even when the quest progress does not change.
    pub fn log_workout(
        &self,
        user_id: Uuid,
        quest_id: Uuid,
        entry: &WorkoutEntry,
    ) -> Result<LoggedWorkout, ProgressionError> {
        let delta = tracker::validate_delta(entry.value).map_err(ProgressionError::ValidationError)?;
        if entry.exercise_type.trim().is_empty() {
            return Err(ProgressionError::ValidationError(
                "Exercise type must not be empty".to_string(),
            ));
        }

        let mut quest = self
            .store
            .find_active_quest(user_id, quest_id)?
            .ok_or(ProgressionError::QuestNotFound(quest_id))?;

        let update = tracker::advance(&mut quest, delta);
        quest.version = self.store.update_quest(&quest).map_err(|e| {
            tracing::warn!("Quest {} update failed: {}", quest_id, e);
            e
        })?;

        let mut log = WorkoutLog::new(user_id, Some(quest_id), &entry.exercise_type, delta);
        log.notes = entry.notes.clone();
        self.store.insert_workout_log(&log)?;

        if update.completed {
            tracing::info!("User {} completed quest '{}'", user_id, quest.title);
        } else {
            tracing::debug!(
                "Quest {} progress {}/{}",
                quest_id,
                update.new_progress,
                update.target
            );
        }

        Ok(LoggedWorkout { quest, update, log })
    }
}
