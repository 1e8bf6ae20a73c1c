//! User registration and settings management.

use uuid::Uuid;

use super::types::{SettingsUpdate, UserProfile, UserSettings};
use crate::error::ProgressionError;
use crate::storage::config::ProgressionRules;
use crate::storage::ProgressionStore;

/// Manager for user records and settings.
pub struct UserManager<'a> {
    store: &'a dyn ProgressionStore,
}

impl<'a> UserManager<'a> {
    /// Create a new user manager over a store.
    pub fn new(store: &'a dyn ProgressionStore) -> Self {
        Self { store }
    }

    /// Register a new user with base stats and default settings.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        rules: &ProgressionRules,
    ) -> Result<UserProfile, ProgressionError> {
        let username = username.trim();
        let email = email.trim().to_lowercase();

        if username.is_empty() {
            return Err(ProgressionError::ValidationError(
                "Username must not be empty".to_string(),
            ));
        }
        if !is_plausible_email(&email) {
            return Err(ProgressionError::ValidationError(format!(
                "Invalid email address: {}",
                email
            )));
        }
        if self.store.find_user_by_email(&email)?.is_some() {
            return Err(ProgressionError::ValidationError(
                "Email already registered".to_string(),
            ));
        }
        if self.store.find_user_by_username(username)?.is_some() {
            return Err(ProgressionError::ValidationError(
                "Username already taken".to_string(),
            ));
        }

        let user = UserProfile::with_base_stat(username.to_string(), email, rules.base_stat);
        self.store.insert_user(&user)?;
        self.store.upsert_settings(&UserSettings::new(user.id))?;

        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: Uuid) -> Result<UserProfile, ProgressionError> {
        self.store
            .find_user(user_id)?
            .ok_or(ProgressionError::UserNotFound(user_id))
    }

    /// Get a user's settings, creating the defaults if none exist.
    pub fn settings(&self, user_id: Uuid) -> Result<UserSettings, ProgressionError> {
        if let Some(settings) = self.store.find_settings(user_id)? {
            return Ok(settings);
        }

        self.get(user_id)?;
        let settings = UserSettings::new(user_id);
        self.store.upsert_settings(&settings)?;
        Ok(settings)
    }

    /// Apply a partial settings update.
    pub fn update_settings(
        &self,
        user_id: Uuid,
        update: &SettingsUpdate,
    ) -> Result<UserSettings, ProgressionError> {
        if let Some(language) = &update.app_language {
            if language.trim().is_empty() {
                return Err(ProgressionError::ValidationError(
                    "Language must not be empty".to_string(),
                ));
            }
        }

        let mut settings = self.settings(user_id)?;
        if settings.apply(update) {
            self.store.upsert_settings(&settings)?;
            tracing::debug!("Updated settings for user {}", user_id);
        }
        Ok(settings)
    }
}

/// Minimal shape check: one `@` with non-empty local part and a dotted domain.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
