//! Commands for the relative strength dashboard

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::AppState;
use crate::models::{BodyWeightProfile, PatternBreakdown, RelativeStrengthResult};
use crate::relative_strength::{
  breakdown_in_window, compute_relative_strength, days_ago_at_midnight, igfr, BodyWeight,
  EngineError,
};
use crate::repository::{self, RepositoryError};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
  #[error(transparent)]
  Repository(#[from] RepositoryError),

  #[error(transparent)]
  Engine(#[from] EngineError),

  #[error("No profile found for {0}")]
  ProfileNotFound(String),

  #[error("Period must be a positive number of days within range, got {0}")]
  InvalidPeriod(i64),
}

impl Serialize for CommandError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Relative Strength
/// ---------------------------------------------------------------------------

/// Relative strength for an athlete as of `now`.
///
/// `Ok(None)` when the athlete has no profile or nothing classifiable was
/// logged in the last 14 days.
pub async fn get_relative_strength(
  state: &AppState,
  athlete_id: &str,
  now: DateTime<Utc>,
) -> Result<Option<RelativeStrengthResult>, CommandError> {
  let Some(profile) = load_body_weight_profile(state, athlete_id).await? else {
    return Ok(None);
  };

  let logs = repository::load_logs(&state.db, athlete_id).await?;
  let result = compute_relative_strength(&profile, &logs, now)?;

  if result.is_none() {
    tracing::info!(athlete_id, "No current-period activity for relative strength");
  }

  Ok(result)
}

/// ---------------------------------------------------------------------------
/// Pattern Breakdown
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBreakdownReport {
  pub since: DateTime<Utc>,
  pub breakdown: Vec<PatternBreakdown>,
  pub igfr: f64,
}

/// Pattern breakdown over `[midnight(now - days), now)`
pub async fn get_pattern_breakdown(
  state: &AppState,
  athlete_id: &str,
  days: i64,
  now: DateTime<Utc>,
) -> Result<Option<PatternBreakdownReport>, CommandError> {
  if days < 1 {
    return Err(CommandError::InvalidPeriod(days));
  }

  let Some(profile) = load_body_weight_profile(state, athlete_id).await? else {
    return Ok(None);
  };
  let body_weight = BodyWeight::new(profile.body_weight)?;

  let since = days_ago_at_midnight(now, days).ok_or(CommandError::InvalidPeriod(days))?;
  let logs = repository::load_logs_since(&state.db, athlete_id, since).await?;
  let breakdown = breakdown_in_window(&logs, &(since..now), body_weight);

  Ok(Some(PatternBreakdownReport {
    since,
    igfr: igfr(&breakdown),
    breakdown,
  }))
}

/// ---------------------------------------------------------------------------
/// Body Weight
/// ---------------------------------------------------------------------------

/// Record a new body weight as of `now`, which also clears staleness
pub async fn update_body_weight(
  state: &AppState,
  athlete_id: &str,
  kg: f64,
  now: DateTime<Utc>,
) -> Result<BodyWeightProfile, CommandError> {
  let body_weight = BodyWeight::new(kg)?;

  let record = repository::update_body_weight(&state.db, athlete_id, body_weight, now)
    .await?
    .ok_or_else(|| CommandError::ProfileNotFound(athlete_id.to_string()))?;

  record
    .body_weight_profile()
    .ok_or(CommandError::Engine(EngineError::MissingBodyWeight))
}

/// ---------------------------------------------------------------------------
/// Helpers
/// ---------------------------------------------------------------------------

/// `Ok(None)` for an unknown athlete, an engine error when body weight is unset
async fn load_body_weight_profile(
  state: &AppState,
  athlete_id: &str,
) -> Result<Option<BodyWeightProfile>, CommandError> {
  let Some(record) = repository::find_profile(&state.db, athlete_id).await? else {
    tracing::debug!(athlete_id, "No profile found");
    return Ok(None);
  };

  record
    .body_weight_profile()
    .map(Some)
    .ok_or(CommandError::Engine(EngineError::MissingBodyWeight))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
