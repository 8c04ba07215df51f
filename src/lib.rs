//! Library exports for reuse in integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Model bundle loading and validation.
pub mod artifact;
/// App configuration loaded from disk.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Label encoding for categorical features.
pub mod encoding;
/// Feature record assembly from form inputs.
pub mod features;
/// Tracing-based logging setup.
pub mod logging;
/// Classifier models and inference.
pub mod ml;
/// Scoring pipeline from record to prediction.
pub mod scoring;
