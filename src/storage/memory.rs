//! In-memory document store.
//!
//! Used by tests and for ephemeral runs; every collection lives in one
//! mutex-guarded set of vectors.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::store::{ProgressionStore, StoreError};
use crate::achievements::{Achievement, UserAchievement};
use crate::quests::{Quest, QuestStatus, QuestType, WorkoutLog};
use crate::users::{UserProfile, UserSettings};

#[derive(Default)]
struct Collections {
    users: Vec<UserProfile>,
    quests: Vec<Quest>,
    workout_logs: Vec<WorkoutLog>,
    achievements: Vec<Achievement>,
    user_achievements: Vec<UserAchievement>,
    settings: HashMap<Uuid, UserSettings>,
}

/// Volatile [`ProgressionStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, Collections> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ProgressionStore for MemoryStore {
    fn insert_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        let mut state = self.state();
        if state.users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::Duplicate(format!("user {}", user.id)));
        }
        state.users.push(user.clone());
        Ok(())
    }

    fn find_user(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.state().users.iter().find(|u| u.email == email).cloned())
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    fn update_user(&self, user: &UserProfile) -> Result<u64, StoreError> {
        let mut state = self.state();
        let stored = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user.id)))?;

        if stored.version != user.version {
            return Err(StoreError::VersionConflict {
                collection: "users",
                id: user.id,
            });
        }

        *stored = user.clone();
        stored.version = user.version + 1;
        Ok(stored.version)
    }

    fn insert_quests(&self, quests: &[Quest]) -> Result<(), StoreError> {
        self.state().quests.extend_from_slice(quests);
        Ok(())
    }

    fn find_active_quest(
        &self,
        user_id: Uuid,
        quest_id: Uuid,
    ) -> Result<Option<Quest>, StoreError> {
        Ok(self
            .state()
            .quests
            .iter()
            .find(|q| q.id == quest_id && q.user_id == user_id && q.status.is_active())
            .cloned())
    }

    fn find_quests(
        &self,
        user_id: Uuid,
        status: Option<QuestStatus>,
    ) -> Result<Vec<Quest>, StoreError> {
        Ok(self
            .state()
            .quests
            .iter()
            .filter(|q| q.user_id == user_id)
            .filter(|q| status.map_or(true, |s| q.status == s))
            .cloned()
            .collect())
    }

    fn update_quest(&self, quest: &Quest) -> Result<u64, StoreError> {
        let mut state = self.state();
        let stored = state
            .quests
            .iter_mut()
            .find(|q| q.id == quest.id)
            .ok_or_else(|| StoreError::NotFound(format!("quest {}", quest.id)))?;

        if stored.version != quest.version {
            return Err(StoreError::VersionConflict {
                collection: "quests",
                id: quest.id,
            });
        }

        *stored = quest.clone();
        stored.version = quest.version + 1;
        Ok(stored.version)
    }

    fn delete_active_quests(
        &self,
        user_id: Uuid,
        quest_type: QuestType,
    ) -> Result<usize, StoreError> {
        let mut state = self.state();
        let before = state.quests.len();
        state.quests.retain(|q| {
            !(q.user_id == user_id && q.quest_type == quest_type && q.status.is_active())
        });
        Ok(before - state.quests.len())
    }

    fn insert_workout_log(&self, log: &WorkoutLog) -> Result<(), StoreError> {
        self.state().workout_logs.push(log.clone());
        Ok(())
    }

    fn find_workout_logs(&self, user_id: Uuid) -> Result<Vec<WorkoutLog>, StoreError> {
        Ok(self
            .state()
            .workout_logs
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    fn sum_workout_values(&self, user_id: Uuid, exercise_type: &str) -> Result<u64, StoreError> {
        Ok(self
            .state()
            .workout_logs
            .iter()
            .filter(|l| l.user_id == user_id && l.exercise_type == exercise_type)
            .map(|l| u64::from(l.value))
            .sum())
    }

    fn count_achievements(&self) -> Result<usize, StoreError> {
        Ok(self.state().achievements.len())
    }

    fn insert_achievements(&self, achievements: &[Achievement]) -> Result<(), StoreError> {
        self.state().achievements.extend_from_slice(achievements);
        Ok(())
    }

    fn find_achievements(&self) -> Result<Vec<Achievement>, StoreError> {
        Ok(self.state().achievements.clone())
    }

    fn find_user_achievements(&self, user_id: Uuid) -> Result<Vec<UserAchievement>, StoreError> {
        Ok(self
            .state()
            .user_achievements
            .iter()
            .filter(|ua| ua.user_id == user_id)
            .cloned()
            .collect())
    }

    fn upsert_user_achievement(&self, record: &UserAchievement) -> Result<(), StoreError> {
        let mut state = self.state();
        match state.user_achievements.iter_mut().find(|ua| {
            ua.user_id == record.user_id && ua.achievement_id == record.achievement_id
        }) {
            Some(existing) => {
                let id = existing.id;
                *existing = record.clone();
                existing.id = id;
            }
            None => state.user_achievements.push(record.clone()),
        }
        Ok(())
    }

    fn find_settings(&self, user_id: Uuid) -> Result<Option<UserSettings>, StoreError> {
        Ok(self.state().settings.get(&user_id).cloned())
    }

    fn upsert_settings(&self, settings: &UserSettings) -> Result<(), StoreError> {
        self.state()
            .settings
            .insert(settings.user_id, settings.clone());
        Ok(())
    }
}
