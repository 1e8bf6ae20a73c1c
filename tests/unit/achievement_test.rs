//! Unit tests for achievement definitions and progress records.

use chrono::Utc;
use levelup::achievements::definitions::default_achievements;
use levelup::achievements::{AchievementCategory, Rarity, RequirementType, UserAchievement};
use uuid::Uuid;

#[test]
fn test_default_definitions() {
    let achievements = default_achievements();
    assert_eq!(achievements.len(), 9);

    let push_ups = achievements
        .iter()
        .find(|a| a.key == "push_up_champion")
        .unwrap();
    assert_eq!(
        push_ups.requirement_type,
        RequirementType::ExerciseTotal("push_ups".to_string())
    );
    assert_eq!(push_ups.requirement_value, 100);
    assert_eq!(push_ups.category, AchievementCategory::Exercise);

    let monarch = achievements
        .iter()
        .find(|a| a.key == "shadow_monarch")
        .unwrap();
    assert_eq!(monarch.requirement_type, RequirementType::Level);
    assert_eq!(monarch.requirement_value, 50);
    assert_eq!(monarch.rarity, Rarity::Legendary);
}

#[test]
fn test_requirement_keys() {
    assert_eq!(
        RequirementType::from_key("running_total"),
        Some(RequirementType::ExerciseTotal("running".to_string()))
    );
    assert_eq!(
        RequirementType::from_key("total_workouts"),
        Some(RequirementType::TotalWorkouts)
    );
    assert_eq!(RequirementType::from_key("_total"), None);
    assert_eq!(RequirementType::from_key("bogus"), None);
    assert_eq!(RequirementType::CurrentStreak.to_string(), "current_streak");
}

#[test]
fn test_requirement_serializes_as_key() {
    let json = serde_json::to_string(&RequirementType::ExerciseTotal("sit_ups".to_string())).unwrap();
    assert_eq!(json, "\"sit_ups_total\"");

    let parsed: Result<RequirementType, _> = serde_json::from_str("\"nonsense\"");
    assert!(parsed.is_err());
}

#[test]
fn test_unlock_timestamp_set_once() {
    let achievement = default_achievements().remove(0);
    let mut record = UserAchievement::new(Uuid::new_v4(), achievement.id);

    assert!(!record.record(0, &achievement, Utc::now()));
    assert!(record.unlocked_at.is_none());

    assert!(record.record(1, &achievement, Utc::now()));
    let unlocked_at = record.unlocked_at;
    assert!(unlocked_at.is_some());

    assert!(!record.record(3, &achievement, Utc::now()));
    assert_eq!(record.unlocked_at, unlocked_at);
    assert!(record.completed);
    assert_eq!(record.percentage(&achievement), 100.0);
}
