pub mod profile;
pub mod strength;
pub mod workout_log;

pub use profile::{BodyWeightProfile, ProfileRecord};
pub use strength::{
  Classification, MovementPattern, PatternBreakdown, RelativeStrengthResult, Trend, WeeklyEntry,
};
pub use workout_log::{ExerciseForce, WorkoutLogEntry};
