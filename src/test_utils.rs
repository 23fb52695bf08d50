//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed helpers for profiles, exercises and logged sets
//! - Mock data factories

use crate::models::{BodyWeightProfile, ExerciseForce, WorkoutLogEntry};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed an athlete profile
pub async fn seed_test_profile(
  pool: &SqlitePool,
  user_id: &str,
  body_weight: Option<f64>,
  body_weight_updated_at: DateTime<Utc>,
) {
  sqlx::query(
    r#"
    INSERT INTO profiles (user_id, full_name, body_weight, body_weight_updated_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
  )
  .bind(user_id)
  .bind(format!("Athlete {}", user_id))
  .bind(body_weight)
  .bind(body_weight_updated_at)
  .execute(pool)
  .await
  .expect("Failed to seed profile");
}

/// Seed an exercise catalog entry, returns its id
pub async fn seed_test_exercise(
  pool: &SqlitePool,
  slug: &str,
  force: Option<&str>,
  primary_muscles: &[&str],
  category: &str,
) -> i64 {
  let muscles_json = serde_json::to_string(primary_muscles).expect("Failed to encode muscles");

  let result = sqlx::query(
    r#"
    INSERT INTO exercises (slug, name, force, primary_muscles_json, category)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(slug)
  .bind(slug.replace('-', " "))
  .bind(force)
  .bind(muscles_json)
  .bind(category)
  .execute(pool)
  .await
  .expect("Failed to seed exercise");

  result.last_insert_rowid()
}

/// Seed a workout session for an athlete, returns its id
pub async fn seed_test_session(pool: &SqlitePool, athlete_id: &str, started_at: DateTime<Utc>) -> i64 {
  sqlx::query("INSERT INTO workout_sessions (athlete_id, started_at) VALUES (?1, ?2)")
    .bind(athlete_id)
    .bind(started_at)
    .execute(pool)
    .await
    .expect("Failed to seed workout session")
    .last_insert_rowid()
}

/// Seed one logged set. `session_id = None` mimics a set logged outside a session.
pub async fn seed_test_log(
  pool: &SqlitePool,
  athlete_id: &str,
  exercise_id: i64,
  session_id: Option<i64>,
  weight: f64,
  reps: i64,
  completed_at: DateTime<Utc>,
) -> i64 {
  let workout_exercise_id = sqlx::query(
    "INSERT INTO workout_exercises (workout_session_id, exercise_id) VALUES (?1, ?2)",
  )
  .bind(session_id)
  .bind(exercise_id)
  .execute(pool)
  .await
  .expect("Failed to seed workout exercise")
  .last_insert_rowid();

  sqlx::query(
    r#"
    INSERT INTO workout_logs (
      athlete_id, workout_exercise_id, workout_session_id,
      weight, reps_completed, completed_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
  )
  .bind(athlete_id)
  .bind(workout_exercise_id)
  .bind(session_id)
  .bind(weight)
  .bind(reps)
  .bind(completed_at)
  .execute(pool)
  .await
  .expect("Failed to seed workout log")
  .last_insert_rowid()
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a logged set with exercise metadata already joined
pub fn mock_log(
  weight: f64,
  reps: u32,
  completed_at: DateTime<Utc>,
  force: Option<ExerciseForce>,
  primary_muscles: &[&str],
  category: &str,
) -> WorkoutLogEntry {
  WorkoutLogEntry {
    weight,
    reps_completed: reps,
    completed_at,
    exercise_force: force,
    exercise_primary_muscles: primary_muscles.iter().map(|m| m.to_string()).collect(),
    exercise_category: category.to_string(),
  }
}

/// Create a body weight profile
pub fn mock_profile(body_weight: f64, updated_at: DateTime<Utc>) -> BodyWeightProfile {
  BodyWeightProfile {
    body_weight,
    body_weight_updated_at: updated_at,
  }
}
