//! Quest progress arithmetic.

use super::types::{Quest, QuestStatus};

/// Result of applying a workout amount to a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// The quest reached its target with this update
    pub completed: bool,
    pub new_progress: u32,
    pub target: u32,
}

/// Validate a raw workout amount as a progress delta.
pub fn validate_delta(value: i64) -> Result<u32, String> {
    if value < 0 {
        return Err(format!("workout value must not be negative, got {}", value));
    }
    u32::try_from(value).map_err(|_| format!("workout value {} is too large", value))
}

/// Apply `delta` to an active quest.
///
/// Progress is clamped to the target; any excess is discarded. The quest is
/// marked completed once progress reaches the target.
pub fn advance(quest: &mut Quest, delta: u32) -> ProgressUpdate {
    let new_progress = quest
        .current_progress
        .saturating_add(delta)
        .min(quest.target_value);
    let completed = new_progress >= quest.target_value;

    quest.current_progress = new_progress;
    if completed {
        quest.status = QuestStatus::Completed;
    }

    ProgressUpdate {
        completed,
        new_progress,
        target: quest.target_value,
    }
}
