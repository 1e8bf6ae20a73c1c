//! Integration tests for the full workout -> reward -> achievement flow.

use std::sync::Arc;

use levelup::quests::{QuestSampler, RandomSampler, WorkoutEntry};
use levelup::storage::config::AppConfig;
use levelup::{FitnessService, MemoryStore, ProgressionError};
use uuid::Uuid;

/// Always hands out the same templates, in order.
struct FixedSampler(Vec<usize>);

impl QuestSampler for FixedSampler {
    fn pick(&self, _pool_size: usize, _count: usize) -> Vec<usize> {
        self.0.clone()
    }
}

fn service_with(indices: Vec<usize>) -> FitnessService {
    let service = FitnessService::with_sampler(
        Arc::new(MemoryStore::new()),
        &AppConfig::default(),
        Box::new(FixedSampler(indices)),
    );
    service.initialize_achievements().unwrap();
    service
}

#[test]
fn test_complete_all_daily_quests() {
    // push_ups, water_intake, running
    let service = service_with(vec![0, 1, 2]);
    let user = service.register_user("sung", "sung@example.com").unwrap();
    let quests = service.active_quests(user.id).unwrap();
    assert_eq!(quests.len(), 3);

    let mut total_xp = 0;
    let mut total_gold = 0;
    for quest in &quests {
        let outcome = service
            .log_workout(
                user.id,
                quest.id,
                &WorkoutEntry::new(&quest.exercise_type, i64::from(quest.target_value)),
            )
            .unwrap();
        assert!(outcome.quest_completed);
        assert!(outcome.reward.is_some());
        total_xp += quest.xp_reward;
        total_gold += quest.gold_reward;
    }

    // 50 + 30 + 75 = 155 crosses level 1
    let profile = service.profile(user.id).unwrap();
    assert_eq!(profile.total_xp, total_xp);
    assert_eq!(profile.gold, total_gold);
    assert_eq!(profile.level, 2);
    assert_eq!(profile.xp_to_next_level, 95);
    assert_eq!(profile.strength, 12);
    assert_eq!(profile.total_quests_completed, 3);
    assert_eq!(profile.total_workouts, 3);
    assert_eq!(profile.current_streak, 1);
    assert!(service.active_quests(user.id).unwrap().is_empty());
}

#[test]
fn test_level_up_reported_once() {
    let service = service_with(vec![4, 0, 1]);
    let user = service.register_user("sung", "sung@example.com").unwrap();
    let quests = service.active_quests(user.id).unwrap();

    // gym_session: 100 xp exactly clears level 1
    let gym = quests.iter().find(|q| q.exercise_type == "gym_session").unwrap();
    let outcome = service
        .log_workout(user.id, gym.id, &WorkoutEntry::new("gym_session", 45))
        .unwrap();
    let reward = outcome.reward.unwrap();
    assert!(reward.leveled_up());
    assert_eq!(reward.new_level(), 2);
    assert_eq!(reward.xp_to_next_level(), 150);

    let push_ups = quests.iter().find(|q| q.exercise_type == "push_ups").unwrap();
    let outcome = service
        .log_workout(user.id, push_ups.id, &WorkoutEntry::new("push_ups", 20))
        .unwrap();
    assert!(!outcome.reward.unwrap().leveled_up());
}

#[test]
fn test_regenerate_after_completion() {
    let service = service_with(vec![2, 3, 4]);
    let user = service.register_user("sung", "sung@example.com").unwrap();
    let running = service
        .active_quests(user.id)
        .unwrap()
        .into_iter()
        .find(|q| q.exercise_type == "running")
        .unwrap();
    service
        .log_workout(user.id, running.id, &WorkoutEntry::new("running", 2))
        .unwrap();

    let fresh = service.generate_daily_quests(user.id).unwrap();
    assert_eq!(fresh.len(), 3);
    let active = service.active_quests(user.id).unwrap();
    assert_eq!(active.len(), 3);
    assert!(active.iter().all(|q| fresh.iter().any(|f| f.id == q.id)));
}

#[test]
fn test_validation_happens_first() {
    let service = service_with(vec![0, 1, 2]);
    let user = service.register_user("sung", "sung@example.com").unwrap();

    // A negative value on an unknown quest is a validation failure
    let result = service.log_workout(user.id, Uuid::new_v4(), &WorkoutEntry::new("push_ups", -1));
    assert!(matches!(result, Err(ProgressionError::ValidationError(_))));

    let result = service.log_workout(user.id, Uuid::new_v4(), &WorkoutEntry::new("push_ups", 1));
    assert!(matches!(result, Err(ProgressionError::QuestNotFound(_))));

    assert_eq!(service.profile(user.id).unwrap().total_workouts, 0);
}

#[test]
fn test_repeated_evaluation_is_stable() {
    let service = service_with(vec![0, 1, 2]);
    let user = service.register_user("sung", "sung@example.com").unwrap();
    let quest = service.active_quests(user.id).unwrap().remove(1);
    service
        .log_workout(user.id, quest.id, &WorkoutEntry::new(&quest.exercise_type, 1))
        .unwrap();

    let first = service.evaluate_achievements(user.id).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].key, "first_steps");
    let records = service.user_achievements(user.id).unwrap();

    assert!(service.evaluate_achievements(user.id).unwrap().is_empty());
    assert_eq!(service.user_achievements(user.id).unwrap(), records);
}

#[test]
fn test_random_service_registers_users_independently() {
    let service = FitnessService::with_sampler(
        Arc::new(MemoryStore::new()),
        &AppConfig::default(),
        Box::new(RandomSampler::seeded(7)),
    );
    service.initialize_achievements().unwrap();

    let a = service.register_user("a", "a@example.com").unwrap();
    let b = service.register_user("b", "b@example.com").unwrap();
    service.generate_daily_quests(a.id).unwrap();

    assert_eq!(service.active_quests(a.id).unwrap().len(), 3);
    assert_eq!(service.active_quests(b.id).unwrap().len(), 3);
    assert!(service
        .register_user("c", "A@example.com")
        .is_err());
}
