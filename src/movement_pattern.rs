//! Movement pattern classification
//!
//! Maps exercise metadata (force, primary muscles, category) onto one of the
//! five movement patterns. Rules are evaluated top-down and the first match
//! wins: muscle-based rules sit above the force-only fallbacks because force
//! alone is ambiguous (a push exercise can still be squat-dominant).

use crate::models::{Classification, ExerciseForce, MovementPattern, WorkoutLogEntry};

/// ---------------------------------------------------------------------------
/// Muscle Groups
/// ---------------------------------------------------------------------------

const EXCLUDED_CATEGORIES: &[&str] = &["stretching", "cardio"];

const CORE_MUSCLE: &str = "abdominals";
const PUSH_MUSCLES: &[&str] = &["chest", "shoulders", "triceps"];
const PULL_MUSCLES: &[&str] = &["lats", "middle back", "biceps"];
const SQUAT_MUSCLES: &[&str] = &["quadriceps", "glutes", "abductors", "adductors"];
const SQUAT_ANCHOR_MUSCLE: &str = "quadriceps";
const HINGE_MUSCLES: &[&str] = &["hamstrings", "lower back", "glutes"];

/// ---------------------------------------------------------------------------
/// Exercise Metadata
/// ---------------------------------------------------------------------------

/// The exercise fields classification looks at
#[derive(Debug, Clone, Copy)]
pub struct ExerciseMetadata<'a> {
  pub force: Option<ExerciseForce>,
  pub primary_muscles: &'a [String],
  pub category: &'a str,
}

impl<'a> ExerciseMetadata<'a> {
  fn has_muscle(&self, muscle: &str) -> bool {
    self.primary_muscles.iter().any(|m| m == muscle)
  }

  fn has_any(&self, group: &[&str]) -> bool {
    self.primary_muscles.iter().any(|m| group.contains(&m.as_str()))
  }
}

impl<'a> From<&'a WorkoutLogEntry> for ExerciseMetadata<'a> {
  fn from(log: &'a WorkoutLogEntry) -> Self {
    Self {
      force: log.exercise_force,
      primary_muscles: &log.exercise_primary_muscles,
      category: &log.exercise_category,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Rule Table
/// ---------------------------------------------------------------------------

struct ClassificationRule {
  name: &'static str,
  applies: fn(&ExerciseMetadata<'_>) -> bool,
  outcome: Classification,
}

/// Order is load-bearing. Do not sort.
const RULES: &[ClassificationRule] = &[
  ClassificationRule {
    name: "excluded_category",
    applies: is_excluded_category,
    outcome: Classification::Unclassified,
  },
  ClassificationRule {
    name: "core_muscle",
    applies: targets_core,
    outcome: Classification::Classified(MovementPattern::Core),
  },
  ClassificationRule {
    name: "push_force_push_muscles",
    applies: is_push_with_push_muscles,
    outcome: Classification::Classified(MovementPattern::Push),
  },
  ClassificationRule {
    name: "pull_force_pull_muscles",
    applies: is_pull_with_pull_muscles,
    outcome: Classification::Classified(MovementPattern::Pull),
  },
  ClassificationRule {
    name: "quad_dominant_legs",
    applies: is_quad_dominant,
    outcome: Classification::Classified(MovementPattern::Squat),
  },
  ClassificationRule {
    name: "posterior_chain",
    applies: targets_posterior_chain,
    outcome: Classification::Classified(MovementPattern::Hinge),
  },
  ClassificationRule {
    name: "leg_muscles",
    applies: targets_legs,
    outcome: Classification::Classified(MovementPattern::Squat),
  },
  ClassificationRule {
    name: "push_force",
    applies: is_push,
    outcome: Classification::Classified(MovementPattern::Push),
  },
  ClassificationRule {
    name: "pull_force",
    applies: is_pull,
    outcome: Classification::Classified(MovementPattern::Pull),
  },
];

fn is_excluded_category(e: &ExerciseMetadata<'_>) -> bool {
  EXCLUDED_CATEGORIES.contains(&e.category)
}

fn targets_core(e: &ExerciseMetadata<'_>) -> bool {
  e.has_muscle(CORE_MUSCLE)
}

fn is_push_with_push_muscles(e: &ExerciseMetadata<'_>) -> bool {
  is_push(e) && e.has_any(PUSH_MUSCLES)
}

fn is_pull_with_pull_muscles(e: &ExerciseMetadata<'_>) -> bool {
  is_pull(e) && e.has_any(PULL_MUSCLES)
}

fn is_quad_dominant(e: &ExerciseMetadata<'_>) -> bool {
  e.has_any(SQUAT_MUSCLES) && e.has_muscle(SQUAT_ANCHOR_MUSCLE)
}

fn targets_posterior_chain(e: &ExerciseMetadata<'_>) -> bool {
  e.has_any(HINGE_MUSCLES)
}

fn targets_legs(e: &ExerciseMetadata<'_>) -> bool {
  e.has_any(SQUAT_MUSCLES)
}

fn is_push(e: &ExerciseMetadata<'_>) -> bool {
  e.force == Some(ExerciseForce::Push)
}

fn is_pull(e: &ExerciseMetadata<'_>) -> bool {
  e.force == Some(ExerciseForce::Pull)
}

/// ---------------------------------------------------------------------------
/// Classification
/// ---------------------------------------------------------------------------

/// Classify an exercise. Total: anything no rule claims is `Unclassified`.
pub fn classify(exercise: &ExerciseMetadata<'_>) -> Classification {
  match RULES.iter().find(|rule| (rule.applies)(exercise)) {
    Some(rule) => {
      tracing::trace!(rule = rule.name, outcome = %rule.outcome, "Classified exercise");
      rule.outcome
    }
    None => Classification::Unclassified,
  }
}

/// Classify the exercise behind a logged set
pub fn classify_log(log: &WorkoutLogEntry) -> Classification {
  classify(&ExerciseMetadata::from(log))
}
