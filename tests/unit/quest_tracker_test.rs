//! Unit tests for quest progress arithmetic and the template catalog.

use chrono::{Duration, Utc};
use levelup::quests::tracker::{advance, validate_delta};
use levelup::quests::{Quest, QuestCatalog, QuestSampler, QuestStatus, QuestType, RandomSampler};
use uuid::Uuid;

fn quest_from(index: usize) -> Quest {
    let catalog = QuestCatalog::default();
    Quest::from_template(
        Uuid::new_v4(),
        QuestType::Daily,
        &catalog.templates()[index],
        Utc::now(),
        Duration::days(1),
    )
}

#[test]
fn test_catalog_rewards() {
    let catalog = QuestCatalog::default();
    let rows: Vec<(&str, u32, u64, u64)> = catalog
        .templates()
        .iter()
        .map(|t| (t.exercise_type.as_str(), t.target_value, t.xp_reward, t.gold_reward))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("push_ups", 20, 50, 25),
            ("water_intake", 8, 30, 15),
            ("running", 2, 75, 40),
            ("sit_ups", 30, 45, 20),
            ("gym_session", 30, 100, 50),
        ]
    );
}

#[test]
fn test_seeded_selection_is_distinct() {
    let catalog = QuestCatalog::default();
    for seed in 0..20 {
        let picked = catalog.select(&RandomSampler::seeded(seed), 3);
        assert_eq!(picked.len(), 3);
        for (i, a) in picked.iter().enumerate() {
            for b in picked.iter().skip(i + 1) {
                assert_ne!(a.title, b.title, "seed {}", seed);
            }
        }
    }
}

#[test]
fn test_sampler_never_exceeds_pool() {
    let indices = RandomSampler::seeded(9).pick(5, 10);
    assert_eq!(indices.len(), 5);
    assert!(indices.iter().all(|&i| i < 5));
}

#[test]
fn test_partial_progress() {
    let mut quest = quest_from(0);
    let update = advance(&mut quest, 15);

    assert!(!update.completed);
    assert_eq!(update.new_progress, 15);
    assert_eq!(update.target, 20);
    assert_eq!(quest.status, QuestStatus::Active);
}

#[test]
fn test_large_delta_clamps_to_target() {
    let mut quest = quest_from(2);
    let update = advance(&mut quest, 1_000);

    assert!(update.completed);
    assert_eq!(update.new_progress, 2);
    assert_eq!(quest.current_progress, quest.target_value);
    assert_eq!(quest.status, QuestStatus::Completed);
}

#[test]
fn test_exact_target_completes() {
    let mut quest = quest_from(1);
    advance(&mut quest, 5);
    let update = advance(&mut quest, 3);

    assert!(update.completed);
    assert_eq!(update.new_progress, 8);
}

#[test]
fn test_zero_delta_changes_nothing() {
    let mut quest = quest_from(3);
    advance(&mut quest, 10);
    let update = advance(&mut quest, 0);

    assert!(!update.completed);
    assert_eq!(update.new_progress, 10);
}

#[test]
fn test_validate_delta() {
    assert_eq!(validate_delta(0), Ok(0));
    assert_eq!(validate_delta(42), Ok(42));
    assert!(validate_delta(-1).is_err());
    assert!(validate_delta(i64::MAX).is_err());
}
