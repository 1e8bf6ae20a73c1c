//! LevelUp - gamified fitness progression
//!
//! Main entry point. Opens the SQLite store from the configured data
//! directory, seeds achievements and runs one command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use levelup::quests::WorkoutEntry;
use levelup::storage::config::{get_data_dir, load_config, load_config_from};
use levelup::{Database, FitnessService};

#[derive(Parser)]
#[command(name = "levelup")]
#[command(about = "Gamified fitness progression: quests, levels and achievements")]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user and generate the first daily quests
    Register { username: String, email: String },

    /// Show a user's progression record
    Profile { user_id: Uuid },

    /// List a user's active quests
    Quests { user_id: Uuid },

    /// Replace a user's active daily quests with a new set
    Refresh { user_id: Uuid },

    /// Log a workout against an active quest
    Log {
        user_id: Uuid,
        quest_id: Uuid,
        /// Exercise key, e.g. push_ups
        exercise_type: String,
        /// Amount done (repetitions, glasses, miles, minutes)
        #[arg(allow_negative_numbers = true)]
        value: i64,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Re-check and list a user's achievement progress
    Achievements { user_id: Uuid },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path, get_data_dir()),
        None => load_config(),
    }
    .context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LevelUp v{}", env!("CARGO_PKG_VERSION"));

    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    tracing::info!("Using database {}", db_path.display());

    let service = FitnessService::new(Arc::new(db), &config);
    service.initialize_achievements()?;

    match cli.command {
        Commands::Register { username, email } => {
            let user = service.register_user(&username, &email)?;
            print_json(&user)?;
            print_json(&service.active_quests(user.id)?)?;
        }
        Commands::Profile { user_id } => print_json(&service.profile(user_id)?)?,
        Commands::Quests { user_id } => print_json(&service.active_quests(user_id)?)?,
        Commands::Refresh { user_id } => print_json(&service.generate_daily_quests(user_id)?)?,
        Commands::Log {
            user_id,
            quest_id,
            exercise_type,
            value,
            notes,
        } => {
            let mut entry = WorkoutEntry::new(&exercise_type, value);
            if let Some(notes) = &notes {
                entry = entry.with_notes(notes);
            }

            let outcome = service.log_workout(user_id, quest_id, &entry)?;
            println!("progress: {}/{}", outcome.new_progress, outcome.target);
            if let Some(reward) = outcome.reward {
                println!("quest completed, level {}", reward.new_level());
                if reward.leveled_up() {
                    println!("level up! tier {}", reward.level_change.avatar_tier);
                }
                for achievement in reward.newly_unlocked {
                    println!("unlocked: {} ({})", achievement.name, achievement.rarity.as_str());
                }
            }
        }
        Commands::Achievements { user_id } => {
            service.evaluate_achievements(user_id)?;
            print_json(&service.user_achievements(user_id)?)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
