//! Binary logistic regression over encoded feature rows.

use serde::{Deserialize, Serialize};

/// Logistic regression model over encoded feature rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Number of `f32` values per feature row.
    pub feature_len: usize,
    /// One weight per feature, in trained feature order.
    pub weights: Vec<f32>,
    /// Intercept added to the weighted sum.
    pub bias: f32,
}

impl LogisticModel {
    /// Validate the model dimensions.
    pub fn validate(&self) -> Result<(), String> {
        if self.feature_len == 0 {
            return Err("feature_len must be > 0".to_string());
        }
        if self.weights.len() != self.feature_len {
            return Err(format!(
                "weights length {} does not match feature_len {}",
                self.weights.len(),
                self.feature_len
            ));
        }
        if !self.bias.is_finite() {
            return Err("bias must be finite".to_string());
        }
        Ok(())
    }

    /// Raw log-odds for a feature row.
    ///
    /// Callers pass exactly `feature_len` values; extra values are ignored
    /// and missing ones contribute nothing.
    pub fn decision_value(&self, features: &[f32]) -> f32 {
        let mut sum = self.bias;
        for (weight, value) in self.weights.iter().zip(features) {
            sum += weight * value;
        }
        sum
    }
}
