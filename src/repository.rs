//! Data access for relative strength
//!
//! Loads and updates the athlete profile, and loads the logged sets joined with their exercise
//! metadata. Only sets that belong to a workout session and carry weight are
//! returned; sets whose exercise can no longer be resolved are dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::{ExerciseForce, ProfileRecord, WorkoutLogEntry};
use crate::relative_strength::BodyWeight;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Malformed primary muscles for exercise {exercise_id}: {source}")]
  MalformedMuscles {
    exercise_id: i64,
    source: serde_json::Error,
  },

  #[error("Invalid rep count {reps} for workout log {log_id}")]
  InvalidReps { log_id: i64, reps: i64 },
}

impl Serialize for RepositoryError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Profiles
/// ---------------------------------------------------------------------------

/// Load a profile by user id
pub async fn find_profile(
  pool: &SqlitePool,
  user_id: &str,
) -> Result<Option<ProfileRecord>, RepositoryError> {
  let profile = sqlx::query_as::<_, ProfileRecord>(
    r#"
    SELECT user_id, full_name, body_weight, body_weight_updated_at
    FROM profiles
    WHERE user_id = ?1
    "#,
  )
  .bind(user_id)
  .fetch_optional(pool)
  .await?;

  Ok(profile)
}

/// Record a new body weight and restart its freshness clock.
///
/// Returns the updated profile, or `None` when the user has no profile.
pub async fn update_body_weight(
  pool: &SqlitePool,
  user_id: &str,
  body_weight: BodyWeight,
  now: DateTime<Utc>,
) -> Result<Option<ProfileRecord>, RepositoryError> {
  let profile = sqlx::query_as::<_, ProfileRecord>(
    r#"
    UPDATE profiles
    SET body_weight = ?2, body_weight_updated_at = ?3
    WHERE user_id = ?1
    RETURNING user_id, full_name, body_weight, body_weight_updated_at
    "#,
  )
  .bind(user_id)
  .bind(body_weight.kg())
  .bind(now)
  .fetch_optional(pool)
  .await?;

  if profile.is_some() {
    tracing::info!(user_id, body_weight = body_weight.kg(), "Updated body weight");
  }

  Ok(profile)
}

/// ---------------------------------------------------------------------------
/// Workout Logs
/// ---------------------------------------------------------------------------

#[derive(Debug, sqlx::FromRow)]
struct LogRow {
  id: i64,
  weight: f64,
  reps_completed: i64,
  completed_at: DateTime<Utc>,
  exercise_id: i64,
  force: Option<String>,
  primary_muscles_json: String,
  category: String,
}

impl LogRow {
  fn into_entry(self) -> Result<WorkoutLogEntry, RepositoryError> {
    let exercise_primary_muscles: Vec<String> = serde_json::from_str(&self.primary_muscles_json)
      .map_err(|source| RepositoryError::MalformedMuscles {
        exercise_id: self.exercise_id,
        source,
      })?;

    let reps_completed =
      u32::try_from(self.reps_completed).map_err(|_| RepositoryError::InvalidReps {
        log_id: self.id,
        reps: self.reps_completed,
      })?;

    // Catalog also knows "static"; only push/pull take part in classification
    let exercise_force = self
      .force
      .as_deref()
      .and_then(|f| f.parse::<ExerciseForce>().ok());

    Ok(WorkoutLogEntry {
      weight: self.weight,
      reps_completed,
      completed_at: self.completed_at,
      exercise_force,
      exercise_primary_muscles,
      exercise_category: self.category,
    })
  }
}

/// Load every qualifying set for an athlete, oldest first
pub async fn load_logs(
  pool: &SqlitePool,
  athlete_id: &str,
) -> Result<Vec<WorkoutLogEntry>, RepositoryError> {
  fetch_logs(pool, athlete_id, None).await
}

/// Load qualifying sets completed at or after `since`, oldest first
pub async fn load_logs_since(
  pool: &SqlitePool,
  athlete_id: &str,
  since: DateTime<Utc>,
) -> Result<Vec<WorkoutLogEntry>, RepositoryError> {
  fetch_logs(pool, athlete_id, Some(since)).await
}

async fn fetch_logs(
  pool: &SqlitePool,
  athlete_id: &str,
  since: Option<DateTime<Utc>>,
) -> Result<Vec<WorkoutLogEntry>, RepositoryError> {
  let rows = sqlx::query_as::<_, LogRow>(
    r#"
    SELECT
      l.id, l.weight, l.reps_completed, l.completed_at,
      e.id AS exercise_id, e.force, e.primary_muscles_json, e.category
    FROM workout_logs l
    JOIN workout_exercises we ON we.id = l.workout_exercise_id
    JOIN exercises e ON e.id = we.exercise_id
    WHERE l.athlete_id = ?1
      AND l.workout_session_id IS NOT NULL
      AND l.weight > 0
      AND (?2 IS NULL OR l.completed_at >= ?2)
    ORDER BY l.completed_at, l.id
    "#,
  )
  .bind(athlete_id)
  .bind(since)
  .fetch_all(pool)
  .await?;

  tracing::debug!(athlete_id, rows = rows.len(), since = ?since, "Loaded workout logs");

  rows.into_iter().map(LogRow::into_entry).collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{
    seed_test_exercise, seed_test_log, seed_test_profile, seed_test_session, setup_test_db,
    teardown_test_db,
  };
  use chrono::{Duration, TimeZone};

  fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
  }

  #[tokio::test]
  async fn test_find_profile() {
    let pool = setup_test_db().await;
    seed_test_profile(&pool, "athlete-1", Some(82.5), t0()).await;
    seed_test_profile(&pool, "athlete-2", None, t0()).await;

    let profile = find_profile(&pool, "athlete-1")
      .await
      .expect("Should query profile")
      .expect("Profile exists");
    assert_eq!(profile.body_weight, Some(82.5));
    assert_eq!(profile.body_weight_updated_at, t0());
    assert_eq!(profile.body_weight_profile().unwrap().body_weight, 82.5);

    let without_weight = find_profile(&pool, "athlete-2").await.unwrap().unwrap();
    assert!(without_weight.body_weight_profile().is_none());

    assert!(find_profile(&pool, "nobody").await.unwrap().is_none());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_update_body_weight() {
    let pool = setup_test_db().await;
    seed_test_profile(&pool, "athlete-1", None, t0() - Duration::days(30)).await;
    let kg = BodyWeight::new(78.4).unwrap();

    let updated = update_body_weight(&pool, "athlete-1", kg, t0())
      .await
      .expect("Should update")
      .expect("Profile exists");
    assert_eq!(updated.body_weight, Some(78.4));
    assert_eq!(updated.body_weight_updated_at, t0());

    let reloaded = find_profile(&pool, "athlete-1").await.unwrap().unwrap();
    assert_eq!(reloaded.body_weight, Some(78.4));
    assert_eq!(reloaded.body_weight_updated_at, t0());

    assert!(update_body_weight(&pool, "nobody", kg, t0()).await.unwrap().is_none());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_load_logs_joins_exercise_metadata() {
    let pool = setup_test_db().await;
    let bench = seed_test_exercise(&pool, "bench-press", Some("push"), &["chest", "triceps"], "strength").await;
    let plank = seed_test_exercise(&pool, "plank", Some("static"), &["abdominals"], "strength").await;
    let session = seed_test_session(&pool, "athlete-1", t0()).await;

    seed_test_log(&pool, "athlete-1", bench, Some(session), 80.0, 8, t0()).await;
    seed_test_log(&pool, "athlete-1", plank, Some(session), 10.0, 1, t0() - Duration::days(1)).await;

    let logs = load_logs(&pool, "athlete-1").await.expect("Should load logs");
    assert_eq!(logs.len(), 2);

    // Oldest first
    assert_eq!(logs[0].exercise_force, None);
    assert_eq!(logs[0].exercise_primary_muscles, vec!["abdominals"]);
    assert_eq!(logs[1].weight, 80.0);
    assert_eq!(logs[1].reps_completed, 8);
    assert_eq!(logs[1].completed_at, t0());
    assert_eq!(logs[1].exercise_force, Some(ExerciseForce::Push));
    assert_eq!(logs[1].exercise_primary_muscles, vec!["chest", "triceps"]);
    assert_eq!(logs[1].exercise_category, "strength");

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_load_logs_filters_sessionless_and_weightless_sets() {
    let pool = setup_test_db().await;
    let bench = seed_test_exercise(&pool, "bench-press", Some("push"), &["chest"], "strength").await;
    let pushups = seed_test_exercise(&pool, "pushups", Some("push"), &["chest"], "strength").await;
    let session = seed_test_session(&pool, "athlete-1", t0()).await;
    let other_session = seed_test_session(&pool, "athlete-2", t0()).await;

    seed_test_log(&pool, "athlete-1", bench, Some(session), 80.0, 8, t0()).await;
    seed_test_log(&pool, "athlete-1", bench, None, 90.0, 5, t0()).await;
    seed_test_log(&pool, "athlete-1", pushups, Some(session), 0.0, 20, t0()).await;
    seed_test_log(&pool, "athlete-2", bench, Some(other_session), 60.0, 10, t0()).await;

    let logs = load_logs(&pool, "athlete-1").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].weight, 80.0);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_load_logs_since() {
    let pool = setup_test_db().await;
    let bench = seed_test_exercise(&pool, "bench-press", Some("push"), &["chest"], "strength").await;
    let session = seed_test_session(&pool, "athlete-1", t0()).await;

    seed_test_log(&pool, "athlete-1", bench, Some(session), 70.0, 8, t0() - Duration::days(20)).await;
    seed_test_log(&pool, "athlete-1", bench, Some(session), 75.0, 8, t0() - Duration::days(14)).await;
    seed_test_log(&pool, "athlete-1", bench, Some(session), 80.0, 8, t0() - Duration::days(2)).await;

    let logs = load_logs_since(&pool, "athlete-1", t0() - Duration::days(14))
      .await
      .unwrap();
    let weights: Vec<f64> = logs.iter().map(|l| l.weight).collect();
    assert_eq!(weights, vec![75.0, 80.0]);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_malformed_muscles_is_an_error() {
    let pool = setup_test_db().await;
    let exercise_id = sqlx::query(
      "INSERT INTO exercises (slug, name, force, primary_muscles_json, category) VALUES ('broken', 'broken', 'push', 'chest', 'strength')",
    )
    .execute(&pool)
    .await
    .unwrap()
    .last_insert_rowid();
    let session = seed_test_session(&pool, "athlete-1", t0()).await;
    seed_test_log(&pool, "athlete-1", exercise_id, Some(session), 80.0, 8, t0()).await;

    let err = load_logs(&pool, "athlete-1").await.unwrap_err();
    assert!(matches!(err, RepositoryError::MalformedMuscles { .. }));
    assert!(err.to_string().contains("Malformed primary muscles"));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_negative_reps_is_an_error() {
    let pool = setup_test_db().await;
    let bench = seed_test_exercise(&pool, "bench-press", Some("push"), &["chest"], "strength").await;
    let session = seed_test_session(&pool, "athlete-1", t0()).await;
    seed_test_log(&pool, "athlete-1", bench, Some(session), 80.0, 8, t0() - Duration::days(1)).await;
    let log_id = seed_test_log(&pool, "athlete-1", bench, Some(session), 80.0, -8, t0()).await;

    let err = load_logs(&pool, "athlete-1").await.unwrap_err();
    match err {
      RepositoryError::InvalidReps { log_id: id, reps } => {
        assert_eq!(id, log_id);
        assert_eq!(reps, -8);
      }
      other => panic!("Expected InvalidReps, got {:?}", other),
    }

    teardown_test_db(pool).await;
  }
}
