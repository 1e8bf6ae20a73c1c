//! Integration tests for workout logging while another writer updates the user.

use std::sync::{Arc, Mutex};

use levelup::achievements::{Achievement, UserAchievement};
use levelup::progression::manager::MAX_USER_WRITE_ATTEMPTS;
use levelup::quests::{Quest, QuestSampler, QuestStatus, QuestType, WorkoutEntry, WorkoutLog};
use levelup::storage::config::AppConfig;
use levelup::storage::StoreError;
use levelup::users::{UserProfile, UserSettings};
use levelup::{FitnessService, MemoryStore, ProgressionError, ProgressionStore};
use uuid::Uuid;

/// Memory store where another writer touches the user right before
/// each of the next `pending` user updates.
struct ContendedStore {
    inner: MemoryStore,
    pending: Mutex<u32>,
}

impl ContendedStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            pending: Mutex::new(0),
        }
    }

    fn contend(&self, writes: u32) {
        *self.pending.lock().unwrap() = writes;
    }
}

impl ProgressionStore for ContendedStore {
    fn insert_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.inner.insert_user(user)
    }

    fn find_user(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        self.inner.find_user(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        self.inner.find_user_by_email(email)
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>, StoreError> {
        self.inner.find_user_by_username(username)
    }

    fn update_user(&self, user: &UserProfile) -> Result<u64, StoreError> {
        let interfere = {
            let mut pending = self.pending.lock().unwrap();
            if *pending > 0 {
                *pending -= 1;
                true
            } else {
                false
            }
        };
        if interfere {
            if let Some(mut current) = self.inner.find_user(user.id)? {
                current.total_workouts += 100;
                self.inner.update_user(&current)?;
            }
        }
        self.inner.update_user(user)
    }

    fn insert_quests(&self, quests: &[Quest]) -> Result<(), StoreError> {
        self.inner.insert_quests(quests)
    }

    fn find_active_quest(
        &self,
        user_id: Uuid,
        quest_id: Uuid,
    ) -> Result<Option<Quest>, StoreError> {
        self.inner.find_active_quest(user_id, quest_id)
    }

    fn find_quests(
        &self,
        user_id: Uuid,
        status: Option<QuestStatus>,
    ) -> Result<Vec<Quest>, StoreError> {
        self.inner.find_quests(user_id, status)
    }

    fn update_quest(&self, quest: &Quest) -> Result<u64, StoreError> {
        self.inner.update_quest(quest)
    }

    fn delete_active_quests(
        &self,
        user_id: Uuid,
        quest_type: QuestType,
    ) -> Result<usize, StoreError> {
        self.inner.delete_active_quests(user_id, quest_type)
    }

    fn insert_workout_log(&self, log: &WorkoutLog) -> Result<(), StoreError> {
        self.inner.insert_workout_log(log)
    }

    fn find_workout_logs(&self, user_id: Uuid) -> Result<Vec<WorkoutLog>, StoreError> {
        self.inner.find_workout_logs(user_id)
    }

    fn sum_workout_values(&self, user_id: Uuid, exercise_type: &str) -> Result<u64, StoreError> {
        self.inner.sum_workout_values(user_id, exercise_type)
    }

    fn count_achievements(&self) -> Result<usize, StoreError> {
        self.inner.count_achievements()
    }

    fn insert_achievements(&self, achievements: &[Achievement]) -> Result<(), StoreError> {
        self.inner.insert_achievements(achievements)
    }

    fn find_achievements(&self) -> Result<Vec<Achievement>, StoreError> {
        self.inner.find_achievements()
    }

    fn find_user_achievements(&self, user_id: Uuid) -> Result<Vec<UserAchievement>, StoreError> {
        self.inner.find_user_achievements(user_id)
    }

    fn upsert_user_achievement(&self, record: &UserAchievement) -> Result<(), StoreError> {
        self.inner.upsert_user_achievement(record)
    }

    fn find_settings(&self, user_id: Uuid) -> Result<Option<UserSettings>, StoreError> {
        self.inner.find_settings(user_id)
    }

    fn upsert_settings(&self, settings: &UserSettings) -> Result<(), StoreError> {
        self.inner.upsert_settings(settings)
    }
}

/// Always hands out the running quest first.
struct RunningFirst;

impl QuestSampler for RunningFirst {
    fn pick(&self, _pool_size: usize, _count: usize) -> Vec<usize> {
        vec![2, 0, 1]
    }
}

fn setup() -> (Arc<ContendedStore>, FitnessService, UserProfile, Quest) {
    let store = Arc::new(ContendedStore::new());
    let service = FitnessService::with_sampler(
        store.clone(),
        &AppConfig::default(),
        Box::new(RunningFirst),
    );
    service.initialize_achievements().unwrap();
    let user = service.register_user("sung", "sung@example.com").unwrap();
    let running = service.active_quests(user.id).unwrap().remove(0);
    assert_eq!(running.exercise_type, "running");
    (store, service, user, running)
}

#[test]
fn test_completion_reward_survives_user_conflict() {
    let (store, service, user, running) = setup();
    store.contend(1);

    let outcome = service
        .log_workout(user.id, running.id, &WorkoutEntry::new("running", 2))
        .unwrap();
    assert!(outcome.quest_completed);
    assert!(outcome.reward.is_some());

    let profile = service.profile(user.id).unwrap();
    assert_eq!(profile.total_xp, 75);
    assert_eq!(profile.gold, 40);
    assert_eq!(profile.total_quests_completed, 1);
    // The other writer's change is kept alongside ours
    assert_eq!(profile.total_workouts, 101);
    assert_eq!(profile.version, 2);

    assert_eq!(store.find_workout_logs(user.id).unwrap().len(), 1);
    assert_eq!(
        store.find_quests(user.id, Some(QuestStatus::Completed)).unwrap().len(),
        1
    );
}

#[test]
fn test_partial_log_survives_user_conflict() {
    let (store, service, user, running) = setup();
    store.contend(2);

    let outcome = service
        .log_workout(user.id, running.id, &WorkoutEntry::new("running", 1))
        .unwrap();
    assert!(!outcome.quest_completed);
    assert!(outcome.reward.is_none());

    let profile = service.profile(user.id).unwrap();
    assert_eq!(profile.total_workouts, 201);
    assert_eq!(profile.total_xp, 0);
}

#[test]
fn test_persistent_contention_is_reported() {
    let (store, service, user, running) = setup();
    store.contend(MAX_USER_WRITE_ATTEMPTS);

    let result = service.log_workout(user.id, running.id, &WorkoutEntry::new("running", 1));
    assert!(matches!(result, Err(ProgressionError::Conflict(_))));
    assert_eq!(service.profile(user.id).unwrap().total_xp, 0);
}
