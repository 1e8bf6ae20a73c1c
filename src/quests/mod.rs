//! Quests module.
//!
//! Manages the quest lifecycle:
//! - Daily generation from a fixed template catalog
//! - Progress tracking with clamping to the target
//! - Workout logging

pub mod catalog;
pub mod manager;
pub mod tracker;
pub mod types;

// Re-exports for convenience
pub use catalog::{QuestCatalog, QuestSampler, RandomSampler};
pub use manager::QuestManager;
pub use tracker::ProgressUpdate;
pub use types::{Quest, QuestStatus, QuestTemplate, QuestType, WorkoutEntry, WorkoutLog};
