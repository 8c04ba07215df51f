//! Shared state types for the churn form UI.

use crate::features::CustomerForm;
use crate::scoring::Prediction;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Current widget values, one field per training column.
    pub form: CustomerForm,
    /// Result panel content for the last submit.
    pub outcome: Outcome,
}

/// What the result panel shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Outcome {
    /// Nothing scored yet.
    #[default]
    Idle,
    /// The last submit produced a prediction.
    Scored(Prediction),
    /// The last submit failed; the message is user-readable.
    Failed(String),
}

impl Outcome {
    /// Whether the panel has something to show.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
