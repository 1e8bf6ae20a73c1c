//! Quest completion rewards applied to a user record.

use chrono::{NaiveDate, Utc};

use super::leveling::{level_from_total_xp, AvatarTier};
use crate::storage::config::ProgressionRules;
use crate::users::UserProfile;

/// Level state before and after a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub previous_level: u32,
    pub new_level: u32,
    pub xp_to_next_level: u64,
    pub avatar_tier: AvatarTier,
}

impl LevelChange {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Streak after a quest completion on `today`.
///
/// A completion on the same day keeps the streak, one on the following day
/// extends it, and anything later starts over at 1.
pub fn advance_streak(current: u32, last_completed: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last_completed {
        Some(last) if last >= today => current.max(1),
        Some(last) if last.succ_opt() == Some(today) => current.saturating_add(1),
        _ => 1,
    }
}

/// Grant a completed quest's rewards to `user`.
///
/// Adds experience and gold, recomputes the cached level fields, raises all
/// four stats once when the level increases and counts the completion.
pub fn apply_reward(
    user: &mut UserProfile,
    xp_reward: u64,
    gold_reward: u64,
    rules: &ProgressionRules,
    today: NaiveDate,
) -> LevelChange {
    let previous_level = user.level;

    user.total_xp = user.total_xp.saturating_add(xp_reward);
    let (new_level, xp_to_next_level) = level_from_total_xp(user.total_xp);

    if new_level > previous_level {
        let gain = rules.stat_gain_per_level;
        user.strength += gain;
        user.agility += gain;
        user.stamina += gain;
        user.vitality += gain;
    }

    user.level = new_level;
    user.xp_to_next_level = xp_to_next_level;
    user.avatar_tier = AvatarTier::for_level(new_level);
    user.gold = user.gold.saturating_add(gold_reward);
    user.total_quests_completed += 1;
    user.current_streak = advance_streak(user.current_streak, user.last_quest_completed_on, today);
    user.last_quest_completed_on = Some(today);
    user.updated_at = Utc::now();

    LevelChange {
        previous_level,
        new_level,
        xp_to_next_level,
        avatar_tier: user.avatar_tier,
    }
}
