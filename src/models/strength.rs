use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coarse biomechanical grouping of exercises.
///
/// Variant order is the canonical order used when emitting breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
  Squat,
  Hinge,
  Push,
  Pull,
  Core,
}

impl std::fmt::Display for MovementPattern {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      MovementPattern::Squat => write!(f, "squat"),
      MovementPattern::Hinge => write!(f, "hinge"),
      MovementPattern::Push => write!(f, "push"),
      MovementPattern::Pull => write!(f, "pull"),
      MovementPattern::Core => write!(f, "core"),
    }
  }
}

/// Outcome of classifying one exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
  Classified(MovementPattern),
  /// Excluded from every aggregate
  Unclassified,
}

impl Classification {
  pub fn pattern(self) -> Option<MovementPattern> {
    match self {
      Classification::Classified(pattern) => Some(pattern),
      Classification::Unclassified => None,
    }
  }
}

impl std::fmt::Display for Classification {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Classification::Classified(pattern) => write!(f, "{}", pattern),
      Classification::Unclassified => write!(f, "unclassified"),
    }
  }
}

/// Average relative force of one movement pattern within a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternBreakdown {
  pub pattern: MovementPattern,
  pub fr: f64,
}

/// IGFR of one calendar week (weeks start on Monday)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEntry {
  pub week_start: NaiveDate,
  pub igfr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
  Up,
  Down,
  Stable,
}

impl std::fmt::Display for Trend {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Up => write!(f, "up"),
      Self::Down => write!(f, "down"),
      Self::Stable => write!(f, "stable"),
    }
  }
}

/// Everything the dashboard shows for relative strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeStrengthResult {
  /// Current IGFR as a percentage of the reference window (100 = best phase)
  pub score: i64,
  pub trend: Trend,
  /// Score change against the previous 14-day period
  pub trend_delta: i64,
  pub body_weight_stale: bool,
  pub breakdown: Vec<PatternBreakdown>,
  pub weekly_history: Vec<WeeklyEntry>,
}
