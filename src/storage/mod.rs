//! Storage module for the document store and configuration.

pub mod config;
pub mod database;
pub mod memory;
pub mod schema;
pub mod store;

pub use config::{AppConfig, ConfigError, DatabaseSettings, ProgressionRules, QuestSettings};
pub use database::Database;
pub use memory::MemoryStore;
pub use store::{ProgressionStore, StoreError};
