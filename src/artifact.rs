//! Model bundle artifacts: locating, loading, and validating.
//!
//! A bundle is a single JSON document carrying the trained classifier, the
//! feature names in trained order, and the fitted label encoders. The three
//! sections ship together so they can never drift apart on disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};
use crate::config::ModelSettings;
use crate::encoding::EncoderSet;
use crate::ml::Classifier;

/// File name of the default bundle under the app models directory.
pub const BUNDLE_FILE_NAME: &str = "expresso_churn_model.json";

/// Bundle format version this build reads.
pub const SUPPORTED_BUNDLE_VERSION: i64 = 1;

/// Failures while locating or loading a model bundle.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Model bundle not found at {path}")]
    Missing { path: PathBuf },
    #[error("Failed to read model bundle {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse model bundle {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid model bundle {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
    #[error(transparent)]
    AppDir(#[from] AppDirError),
}

/// Everything scoring needs, serialized as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Bundle format version.
    pub bundle_version: i64,
    /// Trained classifier.
    pub classifier: Classifier,
    /// Feature names in the order the classifier was trained on.
    pub feature_names: Vec<String>,
    /// Fitted label encoders keyed by column name.
    pub encoders: EncoderSet,
}

impl ModelBundle {
    /// Load a bundle from a JSON file and validate it.
    pub fn load_json(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing {
                path: path.to_path_buf(),
            });
        }
        let bytes = fs::read(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle: Self =
            serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        bundle.validate().map_err(|reason| ArtifactError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(bundle)
    }

    /// Validate the bundle sections against each other.
    pub fn validate(&self) -> Result<(), String> {
        if self.bundle_version != SUPPORTED_BUNDLE_VERSION {
            return Err(format!(
                "Unsupported bundle_version {} (expected {})",
                self.bundle_version, SUPPORTED_BUNDLE_VERSION
            ));
        }
        self.classifier.validate()?;
        if self.feature_names.len() != self.classifier.feature_len() {
            return Err(format!(
                "feature_names length {} does not match classifier feature_len {}",
                self.feature_names.len(),
                self.classifier.feature_len()
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(format!("Duplicate feature name {name}"));
            }
        }
        self.encoders.validate()?;
        for column in self.encoders.columns() {
            if !seen.contains(column) {
                return Err(format!("Encoder column {column} is not a trained feature"));
            }
        }
        Ok(())
    }
}

/// Absolute path the bundle should load from, honoring the config override.
pub fn resolve_bundle_path(settings: &ModelSettings) -> Result<PathBuf, ArtifactError> {
    if let Some(path) = &settings.bundle_path {
        return Ok(path.clone());
    }
    Ok(app_dirs::models_dir()?.join(BUNDLE_FILE_NAME))
}
