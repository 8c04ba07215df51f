//! Per-column categorical encoders fitted at training time.
//!
//! A [`LabelEncoder`] is the explicit, finite category-to-code mapping the
//! model was trained with: a class's position in the fitted class list is its
//! integer code, so the mapping is bidirectional by construction. Values the
//! encoder was never fitted on fail to encode; they are never defaulted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while encoding categorical values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The record carries a categorical column no encoder was fitted for.
    #[error("No label encoder fitted for column {column}")]
    MissingEncoder {
        /// Column whose encoder is absent.
        column: String,
    },
    /// The value was never seen when the column's encoder was fitted.
    #[error("Column {column} has no code for category '{value}'")]
    UnknownCategory {
        /// Column being encoded.
        column: String,
        /// The offending categorical value.
        value: String,
    },
}

/// Fitted finite mapping from categorical strings to integer codes.
///
/// Serialized as the bare class list; the code of a class is its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder from an explicit, already-ordered class list.
    pub fn from_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Fit an encoder on observed values: unique classes, sorted
    /// lexicographically, matching the training-side convention.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(str::to_string).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Integer code for `value`, if the encoder was fitted on it.
    pub fn code_of(&self, value: &str) -> Option<u32> {
        self.classes
            .iter()
            .position(|class| class == value)
            .map(|idx| idx as u32)
    }

    /// Category string for `code`, the inverse of [`LabelEncoder::code_of`].
    pub fn class_of(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    /// Fitted class list in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of fitted classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the encoder has no fitted classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Validate structural invariants of the fitted mapping.
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("Encoder has no fitted classes".to_string());
        }
        let mut seen = self.classes.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != self.classes.len() {
            return Err("Encoder class list contains duplicates".to_string());
        }
        Ok(())
    }
}

/// Per-column encoders keyed by training column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncoderSet {
    columns: BTreeMap<String, LabelEncoder>,
}

impl EncoderSet {
    /// Create an empty encoder set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the encoder fitted for `column`.
    pub fn insert(&mut self, column: impl Into<String>, encoder: LabelEncoder) {
        self.columns.insert(column.into(), encoder);
    }

    /// Encoder fitted for `column`, if any.
    pub fn get(&self, column: &str) -> Option<&LabelEncoder> {
        self.columns.get(column)
    }

    /// Encode one categorical value through its column's fitted encoder.
    pub fn encode(&self, column: &str, value: &str) -> Result<u32, EncodeError> {
        let encoder = self
            .columns
            .get(column)
            .ok_or_else(|| EncodeError::MissingEncoder {
                column: column.to_string(),
            })?;
        encoder
            .code_of(value)
            .ok_or_else(|| EncodeError::UnknownCategory {
                column: column.to_string(),
                value: value.to_string(),
            })
    }

    /// Column names with a fitted encoder, in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of fitted columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the set holds no encoders.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Validate every contained encoder.
    pub fn validate(&self) -> Result<(), String> {
        for (column, encoder) in &self.columns {
            encoder
                .validate()
                .map_err(|reason| format!("Encoder for column {column}: {reason}"))?;
        }
        Ok(())
    }
}
