//! Integration tests for the progression flow on the SQLite store.

use std::sync::Arc;

use levelup::quests::{QuestStatus, RandomSampler, WorkoutEntry};
use levelup::storage::config::{load_config_from, AppConfig};
use levelup::users::{SettingsUpdate, Units};
use levelup::{Database, FitnessService, ProgressionError, ProgressionStore};
use tempfile::TempDir;

fn open_service(dir: &TempDir, seed: u64) -> FitnessService {
    let config = load_config_from(&dir.path().join("config.toml"), dir.path().to_path_buf()).unwrap();
    let db = Database::open(&config.database_path()).unwrap();
    FitnessService::with_sampler(Arc::new(db), &config, Box::new(RandomSampler::seeded(seed)))
}

#[test]
fn test_progress_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let (user_id, quest_id, target) = {
        let service = open_service(&dir, 1);
        assert_eq!(service.initialize_achievements().unwrap(), 9);
        let user = service.register_user("sung", "sung@example.com").unwrap();
        let quest = service.active_quests(user.id).unwrap().remove(0);
        let outcome = service
            .log_workout(user.id, quest.id, &WorkoutEntry::new(&quest.exercise_type, 1))
            .unwrap();
        assert_eq!(outcome.new_progress, 1);
        (user.id, quest.id, quest.target_value)
    };

    let service = open_service(&dir, 2);
    assert_eq!(service.initialize_achievements().unwrap(), 0);

    let quest = service
        .active_quests(user_id)
        .unwrap()
        .into_iter()
        .find(|q| q.id == quest_id)
        .unwrap();
    assert_eq!(quest.current_progress, 1);
    assert_eq!(quest.version, 1);

    let outcome = service
        .log_workout(user_id, quest_id, &WorkoutEntry::new(&quest.exercise_type, i64::from(target)))
        .unwrap();
    assert!(outcome.quest_completed);
    assert_eq!(outcome.new_progress, target);

    let profile = service.profile(user_id).unwrap();
    assert_eq!(profile.total_workouts, 2);
    assert_eq!(profile.total_quests_completed, 1);
    assert_eq!(profile.total_xp, quest.xp_reward);
    assert_eq!(profile.gold, quest.gold_reward);
    assert!(profile.last_quest_completed_on.is_some());
}

#[test]
fn test_completed_quest_rejects_further_logs() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir, 3);
    service.initialize_achievements().unwrap();
    let user = service.register_user("sung", "sung@example.com").unwrap();
    let quest = service.active_quests(user.id).unwrap().remove(0);

    service
        .log_workout(user.id, quest.id, &WorkoutEntry::new(&quest.exercise_type, 10_000))
        .unwrap();
    let again = service.log_workout(user.id, quest.id, &WorkoutEntry::new(&quest.exercise_type, 1));
    assert!(matches!(again, Err(ProgressionError::QuestNotFound(_))));
}

#[test]
fn test_stale_quest_update_conflicts() {
    let db = Database::open_in_memory().unwrap();
    let service_store: Arc<dyn ProgressionStore> = Arc::new(db);
    let service = FitnessService::with_sampler(
        service_store.clone(),
        &AppConfig::default(),
        Box::new(RandomSampler::seeded(4)),
    );
    let user = service.register_user("sung", "sung@example.com").unwrap();
    let quest = service.active_quests(user.id).unwrap().remove(0);

    let mut first = quest.clone();
    first.current_progress = 1;
    assert_eq!(service_store.update_quest(&first).unwrap(), 1);

    // Second writer still holds version 0
    let mut second = quest.clone();
    second.status = QuestStatus::Completed;
    let err = ProgressionError::from(service_store.update_quest(&second).unwrap_err());
    assert!(matches!(err, ProgressionError::Conflict(_)));

    let stored = service
        .active_quests(user.id)
        .unwrap()
        .into_iter()
        .find(|q| q.id == quest.id)
        .unwrap();
    assert_eq!(stored.current_progress, 1);
}

#[test]
fn test_settings_persist() {
    let dir = TempDir::new().unwrap();
    let user_id = {
        let service = open_service(&dir, 5);
        let user = service.register_user("sung", "sung@example.com").unwrap();
        let update = SettingsUpdate {
            app_units: Some(Units::Imperial),
            notification_level_up: Some(false),
            ..Default::default()
        };
        service.update_settings(user.id, &update).unwrap();
        user.id
    };

    let settings = open_service(&dir, 6).settings(user_id).unwrap();
    assert_eq!(settings.app_units, Units::Imperial);
    assert!(!settings.notification_level_up);
    assert!(settings.notification_quest_reminders);
    assert_eq!(settings.app_language, "en");
}
