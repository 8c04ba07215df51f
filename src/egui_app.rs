//! egui user interface for the churn prediction form.

pub mod state;
pub mod style;
pub mod ui;

pub use ui::ChurnApp;
