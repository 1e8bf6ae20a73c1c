//! Achievement evaluation against a user's current aggregates.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::types::{Achievement, RequirementType, UserAchievement};
use crate::error::ProgressionError;
use crate::storage::ProgressionStore;
use crate::users::UserProfile;

/// Checks every achievement definition for one user and records progress.
pub struct AchievementEvaluator<'a> {
    store: &'a dyn ProgressionStore,
}

impl<'a> AchievementEvaluator<'a> {
    pub fn new(store: &'a dyn ProgressionStore) -> Self {
        Self { store }
    }

    /// Current value of a requirement for `user`.
    pub fn current_value(
        &self,
        user: &UserProfile,
        requirement: &RequirementType,
    ) -> Result<u64, ProgressionError> {
        let value = match requirement {
            RequirementType::TotalWorkouts => u64::from(user.total_workouts),
            RequirementType::TotalQuestsCompleted => u64::from(user.total_quests_completed),
            RequirementType::CurrentStreak => u64::from(user.current_streak),
            RequirementType::Level => u64::from(user.level),
            RequirementType::ExerciseTotal(exercise) => {
                self.store.sum_workout_values(user.id, exercise)?
            }
        };
        Ok(value)
    }

    /// Re-check all achievements and return those unlocked by this pass.
    ///
    /// Achievements the user already completed are skipped. Every other
    /// achievement gets its progress record created or updated.
    pub fn evaluate(&self, user: &UserProfile) -> Result<Vec<Achievement>, ProgressionError> {
        let achievements = self.store.find_achievements()?;
        let mut records: HashMap<Uuid, UserAchievement> = self
            .store
            .find_user_achievements(user.id)?
            .into_iter()
            .map(|record| (record.achievement_id, record))
            .collect();

        let now = Utc::now();
        let mut newly_unlocked = Vec::new();

        for achievement in achievements {
            let mut record = match records.remove(&achievement.id) {
                Some(record) if record.completed => continue,
                Some(record) => record,
                None => UserAchievement::new(user.id, achievement.id),
            };

            let value = self.current_value(user, &achievement.requirement_type)?;
            let unlocked = record.record(value, &achievement, now);
            self.store.upsert_user_achievement(&record)?;

            if unlocked {
                tracing::info!(
                    "User {} unlocked achievement '{}'",
                    user.id,
                    achievement.name
                );
                newly_unlocked.push(achievement);
            }
        }

        tracing::debug!(
            "Evaluated achievements for user {}: {} newly unlocked",
            user.id,
            newly_unlocked.len()
        );

        Ok(newly_unlocked)
    }
}
