//! Achievement catalog and evaluation.

pub mod definitions;
pub mod evaluator;
pub mod types;

pub use evaluator::AchievementEvaluator;
pub use types::{Achievement, AchievementCategory, Rarity, RequirementType, UserAchievement};
