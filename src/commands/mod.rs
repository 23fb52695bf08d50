pub mod relative_strength;

pub use relative_strength::{
  get_pattern_breakdown, get_relative_strength, update_body_weight, CommandError,
  PatternBreakdownReport,
};
