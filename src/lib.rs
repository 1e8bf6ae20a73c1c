//! Level Up Fitness - gamified fitness progression engine
//!
//! Users log workouts against auto-generated daily quests, earn experience
//! and gold, level up and unlock achievements. Persistence is injected
//! through [`storage::ProgressionStore`], with an in-memory store for tests
//! and a SQLite store for the server binary.

pub mod achievements;
pub mod error;
pub mod progression;
pub mod quests;
pub mod service;
pub mod storage;
pub mod users;

// Re-export commonly used types
pub use error::ProgressionError;
pub use service::FitnessService;
pub use storage::config::AppConfig;
pub use storage::{Database, MemoryStore, ProgressionStore};
pub use users::UserProfile;
