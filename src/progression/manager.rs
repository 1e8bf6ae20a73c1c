//! Reward application against stored users.

use chrono::Utc;
use uuid::Uuid;

use super::rewards::{apply_reward, LevelChange};
use crate::achievements::{Achievement, AchievementEvaluator};
use crate::error::ProgressionError;
use crate::storage::config::ProgressionRules;
use crate::storage::{ProgressionStore, StoreError};
use crate::users::UserProfile;

/// Attempts at the user write once a quest is already stored as completed.
pub const MAX_USER_WRITE_ATTEMPTS: u32 = 8;

/// Experience and gold granted for one completed quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestReward {
    pub xp: u64,
    pub gold: u64,
}

/// Result of granting a quest reward.
#[derive(Debug, Clone)]
pub struct RewardOutcome {
    pub level_change: LevelChange,
    pub newly_unlocked: Vec<Achievement>,
}

impl RewardOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level_change.leveled_up()
    }

    pub fn new_level(&self) -> u32 {
        self.level_change.new_level
    }

    pub fn xp_to_next_level(&self) -> u64 {
        self.level_change.xp_to_next_level
    }
}

/// Grants rewards and re-checks achievements.
pub struct ProgressionManager<'a> {
    store: &'a dyn ProgressionStore,
    rules: &'a ProgressionRules,
}

impl<'a> ProgressionManager<'a> {
    pub fn new(store: &'a dyn ProgressionStore, rules: &'a ProgressionRules) -> Self {
        Self { store, rules }
    }

    /// Add a completed quest's experience and gold to a user.
    ///
    /// The user record is written with a version check, so a concurrent
    /// writer makes this fail with [`ProgressionError::Conflict`] instead
    /// of losing either update.
    pub fn apply_quest_reward(
        &self,
        user_id: Uuid,
        xp_reward: u64,
        gold_reward: u64,
    ) -> Result<RewardOutcome, ProgressionError> {
        let mut user = self.load_user(user_id)?;
        let level_change = self.grant(&mut user, QuestReward { xp: xp_reward, gold: gold_reward });
        user.version = self.store.update_user(&user)?;

        self.finish_reward(&user, level_change)
    }

    /// Count a logged workout and, if it completed a quest, grant the reward.
    ///
    /// Both changes go into one user update. The quest write that precedes
    /// this call is the only one that can complete the quest, so a version
    /// conflict here re-reads the user and applies the same changes again
    /// instead of dropping the reward.
    pub fn record_workout(
        &self,
        user_id: Uuid,
        reward: Option<QuestReward>,
    ) -> Result<Option<RewardOutcome>, ProgressionError> {
        let mut attempt = 1;
        loop {
            let mut user = self.load_user(user_id)?;
            user.total_workouts += 1;
            user.updated_at = Utc::now();
            let level_change = reward.map(|reward| self.grant(&mut user, reward));

            match self.store.update_user(&user) {
                Ok(version) => {
                    user.version = version;
                    return match level_change {
                        Some(level_change) => self.finish_reward(&user, level_change).map(Some),
                        None => Ok(None),
                    };
                }
                Err(StoreError::VersionConflict { .. }) if attempt < MAX_USER_WRITE_ATTEMPTS => {
                    tracing::warn!(
                        "User {} changed during workout logging, retrying (attempt {})",
                        user_id,
                        attempt
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn load_user(&self, user_id: Uuid) -> Result<UserProfile, ProgressionError> {
        self.store
            .find_user(user_id)?
            .ok_or(ProgressionError::UserNotFound(user_id))
    }

    fn grant(&self, user: &mut UserProfile, reward: QuestReward) -> LevelChange {
        let today = Utc::now().date_naive();
        apply_reward(user, reward.xp, reward.gold, self.rules, today)
    }

    fn finish_reward(
        &self,
        user: &UserProfile,
        level_change: LevelChange,
    ) -> Result<RewardOutcome, ProgressionError> {
        if level_change.leveled_up() {
            tracing::info!(
                "User {} reached level {} ({})",
                user.username,
                level_change.new_level,
                level_change.avatar_tier
            );
        }

        let newly_unlocked = AchievementEvaluator::new(self.store).evaluate(user)?;

        Ok(RewardOutcome {
            level_change,
            newly_unlocked,
        })
    }
}
