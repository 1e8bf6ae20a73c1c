//! Progression module.
//!
//! Experience and level arithmetic plus the rewards granted on quest
//! completion.

pub mod leveling;
pub mod manager;
pub mod rewards;

pub use leveling::{level_from_total_xp, xp_required_for_level, AvatarTier};
pub use manager::{ProgressionManager, QuestReward, RewardOutcome};
pub use rewards::{apply_reward, advance_streak, LevelChange};
