//! Unit tests for experience, level and tier arithmetic.

use levelup::progression::{level_from_total_xp, xp_required_for_level, AvatarTier};

#[test]
fn test_xp_requirement_ladder() {
    assert_eq!(xp_required_for_level(1), 100);
    assert_eq!(xp_required_for_level(2), 150);
    assert_eq!(xp_required_for_level(3), 225);
    assert_eq!(xp_required_for_level(4), 337);
    assert_eq!(xp_required_for_level(5), 506);
}

#[test]
fn test_xp_requirement_strictly_increasing() {
    for level in 1..60 {
        assert!(
            xp_required_for_level(level + 1) > xp_required_for_level(level),
            "level {} -> {}",
            level,
            level + 1
        );
    }
}

#[test]
fn test_level_from_total_xp_boundaries() {
    assert_eq!(level_from_total_xp(0), (1, 100));
    assert_eq!(level_from_total_xp(99), (1, 1));
    assert_eq!(level_from_total_xp(100), (2, 150));
    assert_eq!(level_from_total_xp(249), (2, 1));
    assert_eq!(level_from_total_xp(250), (3, 225));
}

#[test]
fn test_level_matches_cumulative_requirements() {
    let mut total = 0;
    for level in 1..40 {
        assert_eq!(level_from_total_xp(total).0, level);
        total += xp_required_for_level(level);
    }
}

#[test]
fn test_avatar_tier_lower_bounds() {
    let cases = [
        (1, AvatarTier::Bronze),
        (9, AvatarTier::Bronze),
        (10, AvatarTier::Silver),
        (19, AvatarTier::Silver),
        (20, AvatarTier::Gold),
        (29, AvatarTier::Gold),
        (30, AvatarTier::Diamond),
        (49, AvatarTier::Diamond),
        (50, AvatarTier::Shadow),
        (120, AvatarTier::Shadow),
    ];

    for (level, tier) in cases {
        assert_eq!(AvatarTier::for_level(level), tier, "level {}", level);
    }
}

#[test]
fn test_avatar_tier_names() {
    assert_eq!(AvatarTier::Shadow.as_str(), "Shadow");
    assert_eq!(AvatarTier::from_str("Diamond"), Some(AvatarTier::Diamond));
    assert_eq!(AvatarTier::from_str("Platinum"), None);
    assert_eq!(AvatarTier::Gold.to_string(), "Gold");
}
