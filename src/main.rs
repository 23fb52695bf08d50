//! strength-log - relative strength analytics from workout logs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use strength_log_lib::commands::{get_pattern_breakdown, get_relative_strength, update_body_weight};
use strength_log_lib::models::ExerciseForce;
use strength_log_lib::movement_pattern::{classify, ExerciseMetadata};
use strength_log_lib::{db, logging, AppConfig, AppState};

#[derive(Parser)]
#[command(name = "strength-log")]
#[command(author, version, about = "Relative strength score from workout logs")]
struct Cli {
  /// SQLite database URL
  #[arg(long, global = true, env = "DATABASE_URL")]
  database_url: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the relative strength result as JSON (null without recent activity)
  Score {
    /// Athlete (profile user) id
    #[arg(short, long)]
    athlete: String,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,
  },

  /// Print the movement pattern breakdown of a recent period as JSON
  Breakdown {
    /// Athlete (profile user) id
    #[arg(short, long)]
    athlete: String,

    /// Period length in days
    #[arg(short, long, default_value = "14")]
    days: i64,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,
  },

  /// Record the athlete's current body weight (kg) and print the profile as JSON
  SetBodyWeight {
    /// Athlete (profile user) id
    #[arg(short, long)]
    athlete: String,

    /// Body weight in kilograms
    #[arg(short, long)]
    kg: f64,
  },

  /// Classify an exercise into a movement pattern
  Classify {
    /// push or pull
    #[arg(short, long)]
    force: Option<ExerciseForce>,

    /// Primary muscle (repeatable)
    #[arg(short, long = "muscle")]
    muscles: Vec<String>,

    /// Exercise category (e.g. strength, stretching, cardio)
    #[arg(short, long, default_value = "strength")]
    category: String,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let cli = Cli::parse();

  let mut config = AppConfig::from_env().context("Failed to load configuration")?;
  if let Some(url) = cli.database_url {
    config.database_url = url;
  }
  logging::init_logging(config.log_format);

  match cli.command {
    Commands::Classify {
      force,
      muscles,
      category,
    } => {
      let classification = classify(&ExerciseMetadata {
        force,
        primary_muscles: &muscles,
        category: &category,
      });
      println!("{}", classification);
    }

    Commands::Score { athlete, now } => {
      let state = connect(&config).await?;
      // Clock is read once per invocation
      let now = now.unwrap_or_else(Utc::now);
      let result = get_relative_strength(&state, &athlete, now).await?;
      println!("{}", serde_json::to_string_pretty(&result)?);
      state.db.close().await;
    }

    Commands::Breakdown { athlete, days, now } => {
      let state = connect(&config).await?;
      let now = now.unwrap_or_else(Utc::now);
      let report = get_pattern_breakdown(&state, &athlete, days, now).await?;
      println!("{}", serde_json::to_string_pretty(&report)?);
      state.db.close().await;
    }

    Commands::SetBodyWeight { athlete, kg } => {
      let state = connect(&config).await?;
      let profile = update_body_weight(&state, &athlete, kg, Utc::now()).await?;
      println!("{}", serde_json::to_string_pretty(&profile)?);
      state.db.close().await;
    }
  }

  Ok(())
}

async fn connect(config: &AppConfig) -> Result<AppState> {
  let pool = db::initialize_db(config)
    .await
    .context("Failed to initialize database")?;
  Ok(AppState { db: pool })
}
