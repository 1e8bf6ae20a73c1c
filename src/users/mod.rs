//! Users module.
//!
//! Registration, the progression record and per-user settings.

pub mod manager;
pub mod types;

pub use manager::UserManager;
pub use types::{SettingsUpdate, Theme, Units, UserProfile, UserSettings};
