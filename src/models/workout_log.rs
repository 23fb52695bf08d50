use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Force direction of an exercise, as tagged in the exercise catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseForce {
  Push,
  Pull,
}

impl std::fmt::Display for ExerciseForce {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Push => write!(f, "push"),
      Self::Pull => write!(f, "pull"),
    }
  }
}

impl std::str::FromStr for ExerciseForce {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "push" => Ok(Self::Push),
      "pull" => Ok(Self::Pull),
      _ => Err(format!("Unknown exercise force: {}", s)),
    }
  }
}

/// One logged set joined with the metadata of its exercise.
///
/// Produced by the repository layer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogEntry {
  pub weight: f64,
  pub reps_completed: u32,
  pub completed_at: DateTime<Utc>,
  pub exercise_force: Option<ExerciseForce>,
  pub exercise_primary_muscles: Vec<String>,
  pub exercise_category: String,
}

impl WorkoutLogEntry {
  /// Training volume of the set (weight x reps)
  pub fn volume(&self) -> f64 {
    self.weight * self.reps_completed as f64
  }
}
