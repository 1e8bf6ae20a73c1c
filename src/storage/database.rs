//! SQLite document store using rusqlite.
//!
//! Enums are stored as their snake_case names, timestamps as RFC 3339
//! strings and identifiers as hyphenated UUID strings.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use uuid::Uuid;

use super::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use super::store::{ProgressionStore, StoreError};
use crate::achievements::{Achievement, AchievementCategory, Rarity, RequirementType, UserAchievement};
use crate::progression::leveling::AvatarTier;
use crate::quests::{Quest, QuestStatus, QuestType, WorkoutLog};
use crate::users::{Theme, Units, UserProfile, UserSettings};

const USER_COLUMNS: &str = "id, username, email, level, total_xp, xp_to_next_level,
    strength, agility, stamina, vitality, gold, total_quests_completed, total_workouts,
    current_streak, last_quest_completed_on, avatar_tier, version, created_at, updated_at";

const QUEST_COLUMNS: &str = "id, user_id, quest_type, title, description, exercise_type,
    target_value, current_progress, xp_reward, gold_reward, item_reward, status, version,
    created_at, expires_at";

const ACHIEVEMENT_COLUMNS: &str = "id, achievement_key, name, description, category, requirement_type,
    requirement_value, xp_reward, gold_reward, icon, rarity, created_at";

const SETTINGS_COLUMNS: &str = "user_id, notification_quest_reminders, notification_level_up,
    notification_achievement_unlock, privacy_profile_visible, privacy_stats_visible,
    app_theme, app_units, app_language, created_at, updated_at";

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let conn = Connection::open(path)?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        let current_version = self.schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        let version = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), StoreError> {
        if from_version < 1 {
            self.apply_migration(SCHEMA, 1)?;
        }

        tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        Ok(())
    }

    fn apply_migration(&self, sql: &str, version: i32) -> Result<(), StoreError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;
        tx.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )
        .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        tx.commit()
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn exists(&self, table: &str, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table);
        let exists = self.conn.query_row(&sql, params![id.to_string()], |row| row.get(0))?;
        Ok(exists)
    }

    fn find_user_where(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<UserProfile>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?1", USER_COLUMNS, column);
        let user = self
            .conn
            .query_row(&sql, params![value], parse_user_row)
            .optional()?;
        Ok(user)
    }
}

impl ProgressionStore for Database {
    // ========== Users ==========

    fn insert_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO users (id, username, email, level, total_xp, xp_to_next_level,
             strength, agility, stamina, vitality, gold, total_quests_completed, total_workouts,
             current_streak, last_quest_completed_on, avatar_tier, version, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
            params![
                user.id.to_string(),
                user.username,
                user.email,
                user.level,
                user.total_xp as i64,
                user.xp_to_next_level as i64,
                user.strength,
                user.agility,
                user.stamina,
                user.vitality,
                user.gold as i64,
                user.total_quests_completed,
                user.total_workouts,
                user.current_streak,
                user.last_quest_completed_on.map(|d| d.to_string()),
                user.avatar_tier.as_str(),
                user.version as i64,
                user.created_at.to_rfc3339(),
                user.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn find_user(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        self.find_user_where("id", &id.to_string())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        self.find_user_where("email", email)
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>, StoreError> {
        self.find_user_where("username", username)
    }

    fn update_user(&self, user: &UserProfile) -> Result<u64, StoreError> {
        let updated = self.conn.execute(
            "UPDATE users SET
             username = ?1, email = ?2, level = ?3, total_xp = ?4, xp_to_next_level = ?5,
             strength = ?6, agility = ?7, stamina = ?8, vitality = ?9, gold = ?10,
             total_quests_completed = ?11, total_workouts = ?12, current_streak = ?13,
             last_quest_completed_on = ?14, avatar_tier = ?15, updated_at = ?16,
             version = version + 1
             WHERE id = ?17 AND version = ?18",
            params![
                user.username,
                user.email,
                user.level,
                user.total_xp as i64,
                user.xp_to_next_level as i64,
                user.strength,
                user.agility,
                user.stamina,
                user.vitality,
                user.gold as i64,
                user.total_quests_completed,
                user.total_workouts,
                user.current_streak,
                user.last_quest_completed_on.map(|d| d.to_string()),
                user.avatar_tier.as_str(),
                user.updated_at.to_rfc3339(),
                user.id.to_string(),
                user.version as i64,
            ],
        )?;

        if updated == 0 {
            if self.exists("users", user.id)? {
                return Err(StoreError::VersionConflict {
                    collection: "users",
                    id: user.id,
                });
            }
            return Err(StoreError::NotFound(format!("user {}", user.id)));
        }

        Ok(user.version + 1)
    }

    // ========== Quests ==========

    fn insert_quests(&self, quests: &[Quest]) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO quests (id, user_id, quest_type, title, description, exercise_type,
                 target_value, current_progress, xp_reward, gold_reward, item_reward, status,
                 version, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            )?;

            for quest in quests {
                stmt.execute(params![
                    quest.id.to_string(),
                    quest.user_id.to_string(),
                    quest.quest_type.as_str(),
                    quest.title,
                    quest.description,
                    quest.exercise_type,
                    quest.target_value,
                    quest.current_progress,
                    quest.xp_reward as i64,
                    quest.gold_reward as i64,
                    quest.item_reward,
                    quest.status.as_str(),
                    quest.version as i64,
                    quest.created_at.to_rfc3339(),
                    quest.expires_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn find_active_quest(
        &self,
        user_id: Uuid,
        quest_id: Uuid,
    ) -> Result<Option<Quest>, StoreError> {
        let sql = format!(
            "SELECT {} FROM quests WHERE id = ?1 AND user_id = ?2 AND status = 'active'",
            QUEST_COLUMNS
        );
        let quest = self
            .conn
            .query_row(
                &sql,
                params![quest_id.to_string(), user_id.to_string()],
                parse_quest_row,
            )
            .optional()?;
        Ok(quest)
    }

    fn find_quests(
        &self,
        user_id: Uuid,
        status: Option<QuestStatus>,
    ) -> Result<Vec<Quest>, StoreError> {
        let sql = format!(
            "SELECT {} FROM quests
             WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2)
             ORDER BY created_at ASC, rowid ASC",
            QUEST_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![user_id.to_string(), status.map(|s| s.as_str())],
            parse_quest_row,
        )?;

        let quests = rows.collect::<SqliteResult<Vec<_>>>()?;
        Ok(quests)
    }

    fn update_quest(&self, quest: &Quest) -> Result<u64, StoreError> {
        let updated = self.conn.execute(
            "UPDATE quests SET
             current_progress = ?1, status = ?2, item_reward = ?3, expires_at = ?4,
             version = version + 1
             WHERE id = ?5 AND version = ?6",
            params![
                quest.current_progress,
                quest.status.as_str(),
                quest.item_reward,
                quest.expires_at.to_rfc3339(),
                quest.id.to_string(),
                quest.version as i64,
            ],
        )?;

        if updated == 0 {
            if self.exists("quests", quest.id)? {
                return Err(StoreError::VersionConflict {
                    collection: "quests",
                    id: quest.id,
                });
            }
            return Err(StoreError::NotFound(format!("quest {}", quest.id)));
        }

        Ok(quest.version + 1)
    }

    fn delete_active_quests(
        &self,
        user_id: Uuid,
        quest_type: QuestType,
    ) -> Result<usize, StoreError> {
        let deleted = self.conn.execute(
            "DELETE FROM quests WHERE user_id = ?1 AND quest_type = ?2 AND status = 'active'",
            params![user_id.to_string(), quest_type.as_str()],
        )?;
        Ok(deleted)
    }

    // ========== Workout logs ==========

    fn insert_workout_log(&self, log: &WorkoutLog) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO workout_logs (id, user_id, quest_id, exercise_type, value, notes, logged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                log.id.to_string(),
                log.user_id.to_string(),
                log.quest_id.map(|id| id.to_string()),
                log.exercise_type,
                log.value,
                log.notes,
                log.logged_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn find_workout_logs(&self, user_id: Uuid) -> Result<Vec<WorkoutLog>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, quest_id, exercise_type, value, notes, logged_at
             FROM workout_logs
             WHERE user_id = ?1
             ORDER BY logged_at ASC, rowid ASC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok(WorkoutLog {
                id: uuid_column(row, 0)?,
                user_id: uuid_column(row, 1)?,
                quest_id: row
                    .get::<_, Option<String>>(2)?
                    .map(|s| parse_uuid(2, &s))
                    .transpose()?,
                exercise_type: row.get(3)?,
                value: row.get(4)?,
                notes: row.get(5)?,
                logged_at: timestamp_column(row, 6)?,
            })
        })?;

        let logs = rows.collect::<SqliteResult<Vec<_>>>()?;
        Ok(logs)
    }

    fn sum_workout_values(&self, user_id: Uuid, exercise_type: &str) -> Result<u64, StoreError> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(value), 0) FROM workout_logs
             WHERE user_id = ?1 AND exercise_type = ?2",
            params![user_id.to_string(), exercise_type],
            |row| row.get(0),
        )?;
        Ok(total.max(0) as u64)
    }

    // ========== Achievements ==========

    fn count_achievements(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM achievements", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn insert_achievements(&self, achievements: &[Achievement]) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO achievements (id, achievement_key, name, description, category, requirement_type,
                 requirement_value, xp_reward, gold_reward, icon, rarity, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;

            for achievement in achievements {
                stmt.execute(params![
                    achievement.id.to_string(),
                    achievement.key,
                    achievement.name,
                    achievement.description,
                    achievement.category.as_str(),
                    achievement.requirement_type.as_key(),
                    achievement.requirement_value as i64,
                    achievement.xp_reward as i64,
                    achievement.gold_reward as i64,
                    achievement.icon,
                    achievement.rarity.as_str(),
                    achievement.created_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn find_achievements(&self) -> Result<Vec<Achievement>, StoreError> {
        let sql = format!("SELECT {} FROM achievements ORDER BY rowid ASC", ACHIEVEMENT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], parse_achievement_row)?;

        let achievements = rows.collect::<SqliteResult<Vec<_>>>()?;
        Ok(achievements)
    }

    fn find_user_achievements(&self, user_id: Uuid) -> Result<Vec<UserAchievement>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, achievement_id, current_progress, completed, unlocked_at
             FROM user_achievements
             WHERE user_id = ?1
             ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok(UserAchievement {
                id: uuid_column(row, 0)?,
                user_id: uuid_column(row, 1)?,
                achievement_id: uuid_column(row, 2)?,
                current_progress: row.get::<_, i64>(3)?.max(0) as u64,
                completed: row.get(4)?,
                unlocked_at: row
                    .get::<_, Option<String>>(5)?
                    .map(|s| parse_timestamp(5, &s))
                    .transpose()?,
            })
        })?;

        let records = rows.collect::<SqliteResult<Vec<_>>>()?;
        Ok(records)
    }

    fn upsert_user_achievement(&self, record: &UserAchievement) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO user_achievements
             (id, user_id, achievement_id, current_progress, completed, unlocked_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id, achievement_id) DO UPDATE SET
             current_progress = excluded.current_progress,
             completed = excluded.completed,
             unlocked_at = excluded.unlocked_at",
            params![
                record.id.to_string(),
                record.user_id.to_string(),
                record.achievement_id.to_string(),
                record.current_progress as i64,
                record.completed,
                record.unlocked_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    // ========== Settings ==========

    fn find_settings(&self, user_id: Uuid) -> Result<Option<UserSettings>, StoreError> {
        let sql = format!("SELECT {} FROM user_settings WHERE user_id = ?1", SETTINGS_COLUMNS);
        let settings = self
            .conn
            .query_row(&sql, params![user_id.to_string()], parse_settings_row)
            .optional()?;
        Ok(settings)
    }

    fn upsert_settings(&self, settings: &UserSettings) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO user_settings
             (user_id, notification_quest_reminders, notification_level_up,
              notification_achievement_unlock, privacy_profile_visible, privacy_stats_visible,
              app_theme, app_units, app_language, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(user_id) DO UPDATE SET
             notification_quest_reminders = excluded.notification_quest_reminders,
             notification_level_up = excluded.notification_level_up,
             notification_achievement_unlock = excluded.notification_achievement_unlock,
             privacy_profile_visible = excluded.privacy_profile_visible,
             privacy_stats_visible = excluded.privacy_stats_visible,
             app_theme = excluded.app_theme,
             app_units = excluded.app_units,
             app_language = excluded.app_language,
             updated_at = excluded.updated_at",
            params![
                settings.user_id.to_string(),
                settings.notification_quest_reminders,
                settings.notification_level_up,
                settings.notification_achievement_unlock,
                settings.privacy_profile_visible,
                settings.privacy_stats_visible,
                settings.app_theme.as_str(),
                settings.app_units.as_str(),
                settings.app_language,
                settings.created_at.to_rfc3339(),
                settings.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

// ========== Row parsing ==========

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, message.into())
}

fn parse_uuid(column: usize, s: &str) -> SqliteResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn parse_timestamp(column: usize, s: &str) -> SqliteResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn uuid_column(row: &Row, column: usize) -> SqliteResult<Uuid> {
    let s: String = row.get(column)?;
    parse_uuid(column, &s)
}

fn timestamp_column(row: &Row, column: usize) -> SqliteResult<DateTime<Utc>> {
    let s: String = row.get(column)?;
    parse_timestamp(column, &s)
}

fn u64_column(row: &Row, column: usize) -> SqliteResult<u64> {
    let value: i64 = row.get(column)?;
    u64::try_from(value).map_err(|_| conversion_error(column, format!("negative value {}", value)))
}

fn enum_column<T>(row: &Row, column: usize, parse: fn(&str) -> Option<T>) -> SqliteResult<T> {
    let s: String = row.get(column)?;
    parse(&s).ok_or_else(|| conversion_error(column, format!("unknown value '{}'", s)))
}

/// Parse a database row into a UserProfile.
fn parse_user_row(row: &Row) -> SqliteResult<UserProfile> {
    let last_completed: Option<String> = row.get(14)?;
    let last_quest_completed_on = last_completed
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(14, Type::Text, Box::new(e)))
        })
        .transpose()?;

    Ok(UserProfile {
        id: uuid_column(row, 0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        level: row.get(3)?,
        total_xp: u64_column(row, 4)?,
        xp_to_next_level: u64_column(row, 5)?,
        strength: row.get(6)?,
        agility: row.get(7)?,
        stamina: row.get(8)?,
        vitality: row.get(9)?,
        gold: u64_column(row, 10)?,
        total_quests_completed: row.get(11)?,
        total_workouts: row.get(12)?,
        current_streak: row.get(13)?,
        last_quest_completed_on,
        avatar_tier: enum_column(row, 15, AvatarTier::from_str)?,
        version: u64_column(row, 16)?,
        created_at: timestamp_column(row, 17)?,
        updated_at: timestamp_column(row, 18)?,
    })
}

/// Parse a database row into a Quest.
fn parse_quest_row(row: &Row) -> SqliteResult<Quest> {
    Ok(Quest {
        id: uuid_column(row, 0)?,
        user_id: uuid_column(row, 1)?,
        quest_type: enum_column(row, 2, QuestType::from_str)?,
        title: row.get(3)?,
        description: row.get(4)?,
        exercise_type: row.get(5)?,
        target_value: row.get(6)?,
        current_progress: row.get(7)?,
        xp_reward: u64_column(row, 8)?,
        gold_reward: u64_column(row, 9)?,
        item_reward: row.get(10)?,
        status: enum_column(row, 11, QuestStatus::from_str)?,
        version: u64_column(row, 12)?,
        created_at: timestamp_column(row, 13)?,
        expires_at: timestamp_column(row, 14)?,
    })
}

/// Parse a database row into an Achievement.
fn parse_achievement_row(row: &Row) -> SqliteResult<Achievement> {
    Ok(Achievement {
        id: uuid_column(row, 0)?,
        key: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        category: enum_column(row, 4, AchievementCategory::from_str)?,
        requirement_type: enum_column(row, 5, RequirementType::from_key)?,
        requirement_value: u64_column(row, 6)?,
        xp_reward: u64_column(row, 7)?,
        gold_reward: u64_column(row, 8)?,
        icon: row.get(9)?,
        rarity: enum_column(row, 10, Rarity::from_str)?,
        created_at: timestamp_column(row, 11)?,
    })
}

/// Parse a database row into UserSettings.
fn parse_settings_row(row: &Row) -> SqliteResult<UserSettings> {
    Ok(UserSettings {
        user_id: uuid_column(row, 0)?,
        notification_quest_reminders: row.get(1)?,
        notification_level_up: row.get(2)?,
        notification_achievement_unlock: row.get(3)?,
        privacy_profile_visible: row.get(4)?,
        privacy_stats_visible: row.get(5)?,
        app_theme: enum_column(row, 6, Theme::from_str)?,
        app_units: enum_column(row, 7, Units::from_str)?,
        app_language: row.get(8)?,
        created_at: timestamp_column(row, 9)?,
        updated_at: timestamp_column(row, 10)?,
    })
}
