//! Default achievement catalog.

use super::types::{Achievement, AchievementCategory, Rarity, RequirementType};

/// Get all default achievement definitions.
pub fn default_achievements() -> Vec<Achievement> {
    let mut achievements = Vec::new();

    achievements.extend(workout_achievements());
    achievements.extend(quest_achievements());
    achievements.extend(level_achievements());

    achievements
}

fn exercise_total(exercise: &str) -> RequirementType {
    RequirementType::ExerciseTotal(exercise.to_string())
}

fn workout_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(
            "first_steps",
            "First Steps",
            "Complete your first workout",
            AchievementCategory::Workout,
            RequirementType::TotalWorkouts,
            1,
            Rarity::Common,
            "footsteps",
        )
        .with_rewards(50, 25),
        Achievement::new(
            "push_up_champion",
            "Push-up Champion",
            "Complete 100 push-ups in total",
            AchievementCategory::Exercise,
            exercise_total("push_ups"),
            100,
            Rarity::Rare,
            "fitness",
        )
        .with_rewards(100, 50),
        Achievement::new(
            "marathon_runner",
            "Marathon Runner",
            "Run a total of 26 miles",
            AchievementCategory::Exercise,
            exercise_total("running"),
            26,
            Rarity::Epic,
            "walk",
        )
        .with_rewards(200, 100),
    ]
}

fn quest_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(
            "quest_rookie",
            "Quest Rookie",
            "Complete 10 quests",
            AchievementCategory::Quest,
            RequirementType::TotalQuestsCompleted,
            10,
            Rarity::Common,
            "trophy",
        )
        .with_rewards(75, 40),
        Achievement::new(
            "streak_master",
            "Streak Master",
            "Maintain a 7-day quest completion streak",
            AchievementCategory::Streak,
            RequirementType::CurrentStreak,
            7,
            Rarity::Rare,
            "flame",
        )
        .with_rewards(150, 75),
        Achievement::new(
            "dedicated_hunter",
            "Dedicated Hunter",
            "Complete 50 quests",
            AchievementCategory::Quest,
            RequirementType::TotalQuestsCompleted,
            50,
            Rarity::Epic,
            "medal",
        )
        .with_rewards(250, 125),
    ]
}

fn level_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(
            "novice_hunter",
            "Novice Hunter",
            "Reach level 5",
            AchievementCategory::Level,
            RequirementType::Level,
            5,
            Rarity::Common,
            "shield",
        )
        .with_rewards(100, 50),
        Achievement::new(
            "elite_hunter",
            "Elite Hunter",
            "Reach level 20",
            AchievementCategory::Level,
            RequirementType::Level,
            20,
            Rarity::Epic,
            "star",
        )
        .with_rewards(300, 150),
        Achievement::new(
            "shadow_monarch",
            "Shadow Monarch",
            "Reach level 50 and unlock Shadow tier",
            AchievementCategory::Level,
            RequirementType::Level,
            50,
            Rarity::Legendary,
            "flash",
        )
        .with_rewards(1000, 500),
    ]
}
