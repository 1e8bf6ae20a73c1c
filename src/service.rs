//! Service facade over the progression core.
//!
//! Each method is one logical operation against the injected store.

use std::sync::Arc;

use uuid::Uuid;

use crate::achievements::definitions::default_achievements;
use crate::achievements::{Achievement, AchievementEvaluator, UserAchievement};
use crate::error::ProgressionError;
use crate::progression::{ProgressionManager, QuestReward, RewardOutcome};
use crate::quests::{Quest, QuestCatalog, QuestManager, QuestSampler, RandomSampler, WorkoutEntry};
use crate::storage::config::{AppConfig, ProgressionRules, QuestSettings};
use crate::storage::ProgressionStore;
use crate::users::{SettingsUpdate, UserManager, UserProfile, UserSettings};

/// Result of logging a workout against a quest.
#[derive(Debug, Clone)]
pub struct WorkoutOutcome {
    pub quest_completed: bool,
    pub new_progress: u32,
    pub target: u32,
    /// Present when this workout completed the quest
    pub reward: Option<RewardOutcome>,
}

/// Entry point for all progression operations.
pub struct FitnessService {
    store: Arc<dyn ProgressionStore>,
    catalog: QuestCatalog,
    sampler: Box<dyn QuestSampler>,
    quest_settings: QuestSettings,
    rules: ProgressionRules,
}

impl FitnessService {
    /// Create a service with the default catalog and an entropy-seeded sampler.
    pub fn new(store: Arc<dyn ProgressionStore>, config: &AppConfig) -> Self {
        Self::with_sampler(store, config, Box::new(RandomSampler::from_entropy()))
    }

    /// Create a service with a specific quest sampler.
    pub fn with_sampler(
        store: Arc<dyn ProgressionStore>,
        config: &AppConfig,
        sampler: Box<dyn QuestSampler>,
    ) -> Self {
        Self {
            store,
            catalog: QuestCatalog::default(),
            sampler,
            quest_settings: config.quests.clone(),
            rules: config.progression.clone(),
        }
    }

    fn users(&self) -> UserManager<'_> {
        UserManager::new(self.store.as_ref())
    }

    fn quests(&self) -> QuestManager<'_> {
        QuestManager::new(self.store.as_ref(), &self.catalog, &self.quest_settings)
    }

    fn progression(&self) -> ProgressionManager<'_> {
        ProgressionManager::new(self.store.as_ref(), &self.rules)
    }

    /// Seed the achievement definitions if none exist yet.
    ///
    /// Returns the number of definitions inserted.
    pub fn initialize_achievements(&self) -> Result<usize, ProgressionError> {
        if self.store.count_achievements()? > 0 {
            tracing::debug!("Achievements already initialized");
            return Ok(0);
        }

        let achievements = default_achievements();
        self.store.insert_achievements(&achievements)?;
        tracing::info!("Seeded {} achievements", achievements.len());
        Ok(achievements.len())
    }

    // ========== Users ==========

    /// Register a user and hand out the first daily quests.
    pub fn register_user(&self, username: &str, email: &str) -> Result<UserProfile, ProgressionError> {
        let user = self.users().register(username, email, &self.rules)?;
        self.quests()
            .generate_daily_quests(user.id, self.sampler.as_ref())?;
        Ok(user)
    }

    pub fn profile(&self, user_id: Uuid) -> Result<UserProfile, ProgressionError> {
        self.users().get(user_id)
    }

    pub fn settings(&self, user_id: Uuid) -> Result<UserSettings, ProgressionError> {
        self.users().settings(user_id)
    }

    pub fn update_settings(
        &self,
        user_id: Uuid,
        update: &SettingsUpdate,
    ) -> Result<UserSettings, ProgressionError> {
        self.users().update_settings(user_id, update)
    }

    // ========== Quests ==========

    /// Replace the user's active daily quests with a new random set.
    pub fn generate_daily_quests(&self, user_id: Uuid) -> Result<Vec<Quest>, ProgressionError> {
        self.quests()
            .generate_daily_quests(user_id, self.sampler.as_ref())
    }

    pub fn active_quests(&self, user_id: Uuid) -> Result<Vec<Quest>, ProgressionError> {
        self.quests().active_quests(user_id)
    }

    /// Log a workout against an active quest.
    ///
    /// When the workout completes the quest, its rewards are granted and
    /// achievements are re-evaluated in the same call.
    pub fn log_workout(
        &self,
        user_id: Uuid,
        quest_id: Uuid,
        entry: &WorkoutEntry,
    ) -> Result<WorkoutOutcome, ProgressionError> {
        let logged = self.quests().log_workout(user_id, quest_id, entry)?;

        let quest_reward = logged.update.completed.then(|| QuestReward {
            xp: logged.quest.xp_reward,
            gold: logged.quest.gold_reward,
        });
        let reward = self.progression().record_workout(user_id, quest_reward)?;

        Ok(WorkoutOutcome {
            quest_completed: logged.update.completed,
            new_progress: logged.update.new_progress,
            target: logged.update.target,
            reward,
        })
    }

    // ========== Progression ==========

    pub fn apply_quest_reward(
        &self,
        user_id: Uuid,
        xp_reward: u64,
        gold_reward: u64,
    ) -> Result<RewardOutcome, ProgressionError> {
        self.progression()
            .apply_quest_reward(user_id, xp_reward, gold_reward)
    }

    // ========== Achievements ==========

    /// Re-check every achievement for a user, returning new unlocks.
    pub fn evaluate_achievements(&self, user_id: Uuid) -> Result<Vec<Achievement>, ProgressionError> {
        let user = self.users().get(user_id)?;
        AchievementEvaluator::new(self.store.as_ref()).evaluate(&user)
    }

    pub fn achievements(&self) -> Result<Vec<Achievement>, ProgressionError> {
        Ok(self.store.find_achievements()?)
    }

    pub fn user_achievements(&self, user_id: Uuid) -> Result<Vec<UserAchievement>, ProgressionError> {
        self.users().get(user_id)?;
        Ok(self.store.find_user_achievements(user_id)?)
    }
}
