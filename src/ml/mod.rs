//! Inference-side classifier primitives.
//!
//! Model bundles carry one of a small set of binary classifiers, all
//! serialized as JSON. Each variant exposes a raw decision value; the
//! churn probability is the logistic link applied to that value, and the
//! hard label follows the probability at the 0.5 cut.

use serde::{Deserialize, Serialize};

pub mod gbdt_stump;
pub mod logistic;

pub use gbdt_stump::{GbdtStumpModel, Stump};
pub use logistic::LogisticModel;

/// Binary classifier variants a model bundle can carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Logistic(LogisticModel),
    GbdtStump(GbdtStumpModel),
}

impl Classifier {
    /// Number of `f32` values expected per feature row.
    pub fn feature_len(&self) -> usize {
        match self {
            Self::Logistic(model) => model.feature_len,
            Self::GbdtStump(model) => model.feature_len,
        }
    }

    /// Validate structural invariants of the wrapped model.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Logistic(model) => model.validate(),
            Self::GbdtStump(model) => model.validate(),
        }
    }

    /// Raw decision value for a feature row; positive favors churn.
    pub fn decision_value(&self, features: &[f32]) -> f32 {
        match self {
            Self::Logistic(model) => model.decision_value(features),
            Self::GbdtStump(model) => model.decision_value(features),
        }
    }

    /// Churn probability for a feature row.
    pub fn predict_proba(&self, features: &[f32]) -> f32 {
        sigmoid(self.decision_value(features))
    }

    /// Hard label for a feature row: `1` when churn is at least as likely as not.
    pub fn predict(&self, features: &[f32]) -> u8 {
        if self.predict_proba(features) >= 0.5 { 1 } else { 0 }
    }
}

/// Compute a numerically-stable logistic sigmoid.
pub fn sigmoid(raw: f32) -> f32 {
    if raw >= 0.0 {
        let e = (-raw).exp();
        1.0 / (1.0 + e)
    } else {
        let e = raw.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(100.0) > 0.999);
        assert!(sigmoid(-100.0) < 0.001);
        assert!(sigmoid(1000.0).is_finite());
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn label_follows_probability_cut() {
        let model = Classifier::Logistic(LogisticModel {
            feature_len: 1,
            weights: vec![1.0],
            bias: 0.0,
        });
        assert_eq!(model.predict(&[2.0]), 1);
        assert_eq!(model.predict(&[-2.0]), 0);
        // Probability exactly 0.5 counts as churn.
        assert_eq!(model.predict(&[0.0]), 1);
    }

    #[test]
    fn tagged_json_selects_the_variant() {
        let json = r#"{
            "kind": "logistic",
            "feature_len": 2,
            "weights": [0.5, -0.25],
            "bias": 0.1
        }"#;
        let model: Classifier = serde_json::from_str(json).unwrap();
        assert!(matches!(model, Classifier::Logistic(_)));
        assert_eq!(model.feature_len(), 2);
        model.validate().unwrap();

        let json = r#"{
            "kind": "gbdt_stump",
            "feature_len": 2,
            "learning_rate": 0.1,
            "init_raw": 0.0,
            "stumps": [
                {"split": 0, "threshold": 1.0, "below": -1.0, "above": 1.0}
            ]
        }"#;
        let model: Classifier = serde_json::from_str(json).unwrap();
        assert!(matches!(model, Classifier::GbdtStump(_)));
        model.validate().unwrap();
    }
}
