//! Experience and level arithmetic.
//!
//! Level requirements grow geometrically: level `n` needs
//! `floor(100 * 1.5^(n-1))` experience to clear. Total experience is
//! cumulative, so the current level is found by walking the requirement
//! ladder from level 1.

use serde::{Deserialize, Serialize};

/// Experience needed to clear level 1.
pub const BASE_LEVEL_XP: f64 = 100.0;

/// Growth factor between consecutive level requirements.
pub const LEVEL_XP_GROWTH: f64 = 1.5;

/// Experience required to clear `level` and reach the next one.
///
/// Levels below 1 are treated as level 1.
pub fn xp_required_for_level(level: u32) -> u64 {
    let exponent = level.max(1) - 1;
    // powf, not powi: powi may round differently at high exponents
    (BASE_LEVEL_XP * LEVEL_XP_GROWTH.powf(f64::from(exponent))).floor() as u64
}

/// Compute `(level, xp_to_next_level)` from cumulative experience.
pub fn level_from_total_xp(total_xp: u64) -> (u32, u64) {
    let mut level = 1;
    let mut remaining = total_xp;

    loop {
        let needed = xp_required_for_level(level);
        if remaining < needed {
            return (level, needed - remaining);
        }
        remaining -= needed;
        level += 1;
    }
}

/// Cosmetic rank derived from level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum AvatarTier {
    /// Levels 1-9
    #[default]
    Bronze,
    /// Levels 10-19
    Silver,
    /// Levels 20-29
    Gold,
    /// Levels 30-49
    Diamond,
    /// Level 50 and above
    Shadow,
}

impl AvatarTier {
    /// Tier for a level. Boundary levels belong to the higher tier.
    pub fn for_level(level: u32) -> Self {
        if level >= 50 {
            AvatarTier::Shadow
        } else if level >= 30 {
            AvatarTier::Diamond
        } else if level >= 20 {
            AvatarTier::Gold
        } else if level >= 10 {
            AvatarTier::Silver
        } else {
            AvatarTier::Bronze
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvatarTier::Bronze => "Bronze",
            AvatarTier::Silver => "Silver",
            AvatarTier::Gold => "Gold",
            AvatarTier::Diamond => "Diamond",
            AvatarTier::Shadow => "Shadow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Bronze" => Some(AvatarTier::Bronze),
            "Silver" => Some(AvatarTier::Silver),
            "Gold" => Some(AvatarTier::Gold),
            "Diamond" => Some(AvatarTier::Diamond),
            "Shadow" => Some(AvatarTier::Shadow),
            _ => None,
        }
    }
}

impl std::fmt::Display for AvatarTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
