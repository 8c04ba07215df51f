//! Gradient-boosted decision-stump classifier for binary churn labels.
//!
//! A lightweight boosted ensemble that keeps inference dependency-free:
//! each round adds one single-split stump to a running raw score, and the
//! logistic link maps the final score to a probability.

use serde::{Deserialize, Serialize};

/// Single-split weak learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stump {
    /// Feature index the split reads.
    pub split: u16,
    /// Split threshold in raw feature units.
    pub threshold: f32,
    /// Contribution for cells at or below the threshold.
    pub below: f32,
    /// Contribution for cells above the threshold.
    pub above: f32,
}

impl Stump {
    /// Contribution of this stump for one feature row.
    pub fn response(&self, features: &[f32]) -> f32 {
        let cell = features
            .get(usize::from(self.split))
            .copied()
            .unwrap_or_default();
        if cell > self.threshold { self.above } else { self.below }
    }
}

/// Boosted decision-stump model for binary classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtStumpModel {
    /// Number of `f32` values per feature row.
    pub feature_len: usize,
    /// Learning rate applied to each stump contribution.
    pub learning_rate: f32,
    /// Raw score before any boosting round.
    pub init_raw: f32,
    /// One stump per boosting round.
    pub stumps: Vec<Stump>,
}

impl GbdtStumpModel {
    /// Check the model's structural invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.feature_len == 0 {
            return Err("feature_len must be > 0".to_string());
        }
        if !self.learning_rate.is_finite() || !self.init_raw.is_finite() {
            return Err("learning_rate and init_raw must be finite".to_string());
        }
        for (idx, stump) in self.stumps.iter().enumerate() {
            if usize::from(stump.split) >= self.feature_len {
                return Err(format!(
                    "Stump {idx} splits on feature {} but the model takes {} features",
                    stump.split, self.feature_len
                ));
            }
        }
        Ok(())
    }

    /// Raw decision value for a feature row; positive favors churn.
    pub fn decision_value(&self, features: &[f32]) -> f32 {
        self.stumps.iter().fold(self.init_raw, |raw, stump| {
            raw + self.learning_rate * stump.response(features)
        })
    }
}
