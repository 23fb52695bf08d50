use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile row as stored. Body weight is optional until the athlete enters it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileRecord {
  pub user_id: String,
  pub full_name: Option<String>,
  pub body_weight: Option<f64>,
  pub body_weight_updated_at: DateTime<Utc>,
}

/// The part of a profile the strength engine reads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyWeightProfile {
  pub body_weight: f64,
  pub body_weight_updated_at: DateTime<Utc>,
}

impl ProfileRecord {
  /// `None` when no body weight has been recorded yet
  pub fn body_weight_profile(&self) -> Option<BodyWeightProfile> {
    self.body_weight.map(|body_weight| BodyWeightProfile {
      body_weight,
      body_weight_updated_at: self.body_weight_updated_at,
    })
  }
}
