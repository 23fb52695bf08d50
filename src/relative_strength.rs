//! Relative strength engine
//!
//! Turns logged sets into a body-weight normalized strength score:
//! - FR per set: weight x reps / body weight
//! - per-pattern breakdown (mean FR per movement pattern)
//! - IGFR: mean of the per-pattern means
//! - weekly IGFR history and the best 4-week reference window
//! - score, trend against the previous 14 days, body weight staleness
//!
//! Everything here is a pure function of (profile, logs, now). The caller owns
//! the clock and the data access.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;

use crate::models::{
  BodyWeightProfile, MovementPattern, PatternBreakdown, RelativeStrengthResult, Trend,
  WeeklyEntry, WorkoutLogEntry,
};
use crate::movement_pattern::classify_log;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

/// Length of the current and previous evaluation periods
pub const EVALUATION_PERIOD_DAYS: i64 = 14;
/// Consecutive weeks averaged for the reference window
pub const REFERENCE_WINDOW_WEEKS: usize = 4;
/// Score deltas within +/- this many points count as stable
pub const TREND_STABLE_BAND: i64 = 2;
/// Body weight older than this is flagged as stale
pub const BODY_WEIGHT_STALE_DAYS: i64 = 14;
/// Score reported when there is no reference to compare against
const DEFAULT_SCORE: i64 = 100;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
  #[error("Body weight has not been recorded")]
  MissingBodyWeight,

  #[error("Invalid body weight: {0} (must be a positive number)")]
  InvalidBodyWeight(f64),
}

impl Serialize for EngineError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Body Weight
/// ---------------------------------------------------------------------------

/// Body weight validated to be finite and strictly positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyWeight(f64);

impl BodyWeight {
  pub fn new(kg: f64) -> Result<Self, EngineError> {
    if kg.is_finite() && kg > 0.0 {
      Ok(Self(kg))
    } else {
      Err(EngineError::InvalidBodyWeight(kg))
    }
  }

  pub fn kg(&self) -> f64 {
    self.0
  }
}

/// ---------------------------------------------------------------------------
/// Rounding
/// ---------------------------------------------------------------------------

/// Round to 2 decimals, half away from zero
pub fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
  let (sum, count) = values
    .into_iter()
    .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
  if count > 0 {
    Some(sum / count as f64)
  } else {
    None
  }
}

/// ---------------------------------------------------------------------------
/// FR and Pattern Breakdown
/// ---------------------------------------------------------------------------

/// Force Relative of a single set
pub fn force_relative(log: &WorkoutLogEntry, body_weight: BodyWeight) -> f64 {
  log.volume() / body_weight.kg()
}

/// Mean FR per movement pattern, rounded to 2 decimals.
///
/// Unclassified logs are skipped. Patterns without logs are omitted and the
/// output follows the canonical pattern order.
pub fn pattern_breakdown<'a, I>(logs: I, body_weight: BodyWeight) -> Vec<PatternBreakdown>
where
  I: IntoIterator<Item = &'a WorkoutLogEntry>,
{
  let mut pattern_frs: BTreeMap<MovementPattern, Vec<f64>> = BTreeMap::new();

  for log in logs {
    let Some(pattern) = classify_log(log).pattern() else {
      continue;
    };
    pattern_frs
      .entry(pattern)
      .or_default()
      .push(force_relative(log, body_weight));
  }

  pattern_frs
    .into_iter()
    .filter_map(|(pattern, frs)| {
      mean(frs).map(|fr| PatternBreakdown {
        pattern,
        fr: round2(fr),
      })
    })
    .collect()
}

/// Breakdown restricted to logs completed inside `window` (half-open)
pub fn breakdown_in_window(
  logs: &[WorkoutLogEntry],
  window: &Range<DateTime<Utc>>,
  body_weight: BodyWeight,
) -> Vec<PatternBreakdown> {
  pattern_breakdown(
    logs.iter().filter(|l| window.contains(&l.completed_at)),
    body_weight,
  )
}

/// Index of Global Force Relative: mean of the per-pattern means, 0 when empty
pub fn igfr(breakdown: &[PatternBreakdown]) -> f64 {
  mean(breakdown.iter().map(|b| b.fr)).unwrap_or(0.0)
}

/// ---------------------------------------------------------------------------
/// Weekly History
/// ---------------------------------------------------------------------------

/// Monday of the (UTC) calendar week containing `at`
pub fn week_start(at: DateTime<Utc>) -> NaiveDate {
  let date = at.date_naive();
  date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// IGFR per calendar week over the whole history, ascending by week start.
/// Weeks with no classified log are left out rather than zero-filled.
pub fn weekly_history(logs: &[WorkoutLogEntry], body_weight: BodyWeight) -> Vec<WeeklyEntry> {
  let mut weeks: BTreeMap<NaiveDate, Vec<&WorkoutLogEntry>> = BTreeMap::new();
  for log in logs {
    weeks.entry(week_start(log.completed_at)).or_default().push(log);
  }

  weeks
    .into_iter()
    .filter_map(|(week_start, week_logs)| {
      let breakdown = pattern_breakdown(week_logs, body_weight);
      if breakdown.is_empty() {
        return None;
      }
      Some(WeeklyEntry {
        week_start,
        igfr: round2(igfr(&breakdown)),
      })
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Reference Window
/// ---------------------------------------------------------------------------

/// Baseline IGFR: the best average over 4 consecutive weekly entries.
///
/// With 4 or fewer weeks the whole series is averaged. Ties keep the earliest
/// window (only a strictly greater average replaces the running best).
pub fn reference_igfr(history: &[WeeklyEntry]) -> f64 {
  if history.len() <= REFERENCE_WINDOW_WEEKS {
    return mean(history.iter().map(|w| w.igfr)).unwrap_or(0.0);
  }

  let mut best: Option<f64> = None;
  for window in history.windows(REFERENCE_WINDOW_WEEKS) {
    let sum: f64 = window.iter().map(|w| w.igfr).sum();
    let avg = sum / REFERENCE_WINDOW_WEEKS as f64;
    if best.is_none_or(|b| avg > b) {
      best = Some(avg);
    }
  }
  best.unwrap_or(0.0)
}

/// ---------------------------------------------------------------------------
/// Score and Trend
/// ---------------------------------------------------------------------------

/// Current and previous evaluation periods, both half-open
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationWindows {
  pub current: Range<DateTime<Utc>>,
  pub previous: Range<DateTime<Utc>>,
}

impl EvaluationWindows {
  /// current: [midnight(now - 14d), now); previous: [midnight(now - 28d), midnight(now - 14d))
  pub fn ending_at(now: DateTime<Utc>) -> Self {
    // Clamp at the start of representable time instead of overflowing
    let current_since =
      days_ago_at_midnight(now, EVALUATION_PERIOD_DAYS).unwrap_or(DateTime::<Utc>::MIN_UTC);
    let previous_since =
      days_ago_at_midnight(now, EVALUATION_PERIOD_DAYS * 2).unwrap_or(DateTime::<Utc>::MIN_UTC);
    Self {
      current: current_since..now,
      previous: previous_since..current_since,
    }
  }
}

/// Midnight (UTC) of the day `days` before `now`, `None` when that falls
/// outside the representable range
pub fn days_ago_at_midnight(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
  let earlier = now.checked_sub_signed(Duration::try_days(days)?)?;
  Some(earlier.date_naive().and_time(NaiveTime::MIN).and_utc())
}

/// IGFR as a whole-number percentage of the reference (100 without a reference)
pub fn score_against(igfr: f64, reference: f64) -> i64 {
  if reference > 0.0 {
    (igfr / reference * 100.0).round() as i64
  } else {
    DEFAULT_SCORE
  }
}

impl Trend {
  /// Only deltas strictly beyond +/-2 move the trend
  pub fn from_delta(delta: i64) -> Self {
    if delta > TREND_STABLE_BAND {
      Trend::Up
    } else if delta < -TREND_STABLE_BAND {
      Trend::Down
    } else {
      Trend::Stable
    }
  }
}

/// ---------------------------------------------------------------------------
/// Staleness
/// ---------------------------------------------------------------------------

/// Exact 14 x 24h offset from `now`; unlike the evaluation windows this is not
/// truncated to midnight.
pub fn is_body_weight_stale(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
  updated_at < now - Duration::days(BODY_WEIGHT_STALE_DAYS)
}

/// ---------------------------------------------------------------------------
/// Entry Point
/// ---------------------------------------------------------------------------

/// Compute the relative strength result for one athlete.
///
/// Returns `Ok(None)` when the last 14 days hold no classifiable activity.
/// Fails before any division when the body weight is not a positive number.
pub fn compute_relative_strength(
  profile: &BodyWeightProfile,
  all_logs: &[WorkoutLogEntry],
  now: DateTime<Utc>,
) -> Result<Option<RelativeStrengthResult>, EngineError> {
  let body_weight = BodyWeight::new(profile.body_weight)?;
  let windows = EvaluationWindows::ending_at(now);

  let breakdown = breakdown_in_window(all_logs, &windows.current, body_weight);
  if breakdown.is_empty() {
    tracing::debug!(logs = all_logs.len(), "No classified activity in current period");
    return Ok(None);
  }
  let current_igfr = igfr(&breakdown);

  let weekly_history = weekly_history(all_logs, body_weight);
  let reference = reference_igfr(&weekly_history);
  let score = score_against(current_igfr, reference);

  let prev_breakdown = breakdown_in_window(all_logs, &windows.previous, body_weight);
  let trend_delta = if prev_breakdown.is_empty() {
    0
  } else {
    score - score_against(igfr(&prev_breakdown), reference)
  };
  let trend = Trend::from_delta(trend_delta);

  let body_weight_stale = is_body_weight_stale(profile.body_weight_updated_at, now);

  tracing::debug!(
    score,
    %trend,
    trend_delta,
    current_igfr,
    reference,
    weeks = weekly_history.len(),
    body_weight_stale,
    "Computed relative strength"
  );

  Ok(Some(RelativeStrengthResult {
    score,
    trend,
    trend_delta,
    body_weight_stale,
    breakdown,
    weekly_history,
  }))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
