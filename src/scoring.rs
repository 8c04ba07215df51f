//! Churn scoring: label encoding, feature reindexing, and prediction.
//!
//! [`ScoringContext`] holds everything one prediction needs, loaded once at
//! startup. Scoring takes an assembled [`FeatureRecord`], encodes its
//! categorical cells, reorders the row to the trained feature order, and
//! runs the classifier.

use thiserror::Error;
use tracing::{debug, info};

use crate::artifact::{ArtifactError, ModelBundle, resolve_bundle_path};
use crate::config::ModelSettings;
use crate::encoding::{EncodeError, EncoderSet};
use crate::features::{FeatureRecord, FieldValue};
use crate::ml::Classifier;

/// Failures while turning an assembled record into a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The model expects a feature the record does not carry.
    #[error("Missing expected feature column {column}")]
    MissingFeature { column: String },
}

/// Churn verdict for one scored record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Hard label: `1` churn, `0` retain.
    pub label: u8,
    /// Churn probability in `[0, 1]`.
    pub probability: f32,
}

impl Prediction {
    /// Whether the hard label says churn.
    pub fn is_churn(&self) -> bool {
        self.label == 1
    }

    /// Probability rendered to two decimals, as shown in the result panel.
    pub fn probability_text(&self) -> String {
        format!("{:.2}", self.probability)
    }

    /// Headline message for the result panel.
    pub fn message(&self) -> String {
        if self.is_churn() {
            format!(
                "This customer is likely to churn (Probability: {})",
                self.probability_text()
            )
        } else {
            format!(
                "This customer is unlikely to churn (Probability: {})",
                self.probability_text()
            )
        }
    }
}

/// Immutable scoring state: classifier, trained feature order, and encoders.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    classifier: Classifier,
    feature_names: Vec<String>,
    encoders: EncoderSet,
}

impl ScoringContext {
    /// Build a context from parts already validated against each other.
    pub fn new(classifier: Classifier, feature_names: Vec<String>, encoders: EncoderSet) -> Self {
        Self {
            classifier,
            feature_names,
            encoders,
        }
    }

    /// Build a context from a validated bundle.
    pub fn from_bundle(bundle: ModelBundle) -> Self {
        Self::new(bundle.classifier, bundle.feature_names, bundle.encoders)
    }

    /// Locate, load, and validate the bundle for `settings`.
    pub fn load(settings: &ModelSettings) -> Result<Self, ArtifactError> {
        let path = resolve_bundle_path(settings)?;
        let bundle = ModelBundle::load_json(&path)?;
        info!(path = %path.display(), "Loaded model bundle");
        Ok(Self::from_bundle(bundle))
    }

    /// Feature names in the order the classifier consumes them.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Fitted label encoders keyed by column name.
    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    /// Score one assembled record.
    ///
    /// Record columns the model was not trained on are dropped; a trained
    /// feature missing from the record is an error, as is a categorical
    /// value the encoders have never seen.
    pub fn score(&self, record: &FeatureRecord) -> Result<Prediction, ScoringError> {
        let features = self.reindex(record)?;
        let probability = self.classifier.predict_proba(&features);
        let label = self.classifier.predict(&features);
        Ok(Prediction { label, probability })
    }

    /// Encode and reorder `record` into the trained feature order.
    fn reindex(&self, record: &FeatureRecord) -> Result<Vec<f32>, ScoringError> {
        let mut features = Vec::with_capacity(self.feature_names.len());
        for name in &self.feature_names {
            let cell = record
                .get(name)
                .ok_or_else(|| ScoringError::MissingFeature {
                    column: name.clone(),
                })?;
            let value = match cell {
                FieldValue::Numeric(value) => *value,
                FieldValue::Categorical(raw) => self.encoders.encode(name, raw)? as f32,
            };
            features.push(value);
        }
        for name in record.column_names() {
            if !self.feature_names.iter().any(|trained| trained == name) {
                debug!(column = name, "Dropping column the model was not trained on");
            }
        }
        Ok(features)
    }
}
