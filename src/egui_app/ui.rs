//! egui renderer for the churn prediction form.

use eframe::egui::{self, RichText, Ui};
use tracing::{info, warn};

use crate::egui_app::state::{Outcome, UiState};
use crate::egui_app::style::{self, StatusTone};
use crate::features::{FeatureRecord, MRG_OPTIONS, REGION_OPTIONS, TENURE_OPTIONS, TOP_PACK_OPTIONS};
use crate::scoring::ScoringContext;

/// Minimum viewport size for the form window.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(460.0, 560.0);

/// Renders the churn prediction form against a loaded scoring context.
pub struct ChurnApp {
    scoring: ScoringContext,
    ui: UiState,
    visuals_set: bool,
}

impl ChurnApp {
    /// Create the app, loading configuration and the model bundle.
    pub fn new() -> Result<Self, String> {
        let config = crate::config::load_or_default()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        let scoring = ScoringContext::load(&config.model).map_err(|err| err.to_string())?;
        Ok(Self::with_context(scoring))
    }

    /// Build the app around an already-loaded scoring context.
    pub fn with_context(scoring: ScoringContext) -> Self {
        Self {
            scoring,
            ui: UiState::default(),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Assemble the current form into a record and score it.
    fn submit(&mut self) {
        let record = FeatureRecord::from_form(&self.ui.form);
        self.ui.outcome = match self.scoring.score(&record) {
            Ok(prediction) => {
                info!(
                    label = prediction.label,
                    probability = prediction.probability,
                    "Scored customer record"
                );
                Outcome::Scored(prediction)
            }
            Err(err) => {
                warn!(error = %err, "Scoring failed");
                Outcome::Failed(err.to_string())
            }
        };
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let form = &mut self.ui.form;
        egui::Grid::new("churn_form")
            .num_columns(2)
            .striped(true)
            .min_col_width(150.0)
            .show(ui, |ui| {
                category_combo(ui, "TENURE", &TENURE_OPTIONS, &mut form.tenure);
                numeric_input(ui, "MONTANT", &mut form.montant);
                numeric_input(ui, "FREQUENCE_RECH", &mut form.frequence_rech);
                numeric_input(ui, "REVENUE", &mut form.revenue);
                numeric_input(ui, "ARPU_SEGMENT", &mut form.arpu_segment);
                numeric_input(ui, "FREQUENCE", &mut form.frequence);
                numeric_input(ui, "DATA_VOLUME", &mut form.data_volume);
                numeric_input(ui, "ON_NET", &mut form.on_net);
                numeric_input(ui, "ORANGE", &mut form.orange);
                numeric_input(ui, "TIGO", &mut form.tigo);
                numeric_input(ui, "REGULARITY", &mut form.regularity);
                category_combo(ui, "TOP_PACK", &TOP_PACK_OPTIONS, &mut form.top_pack);
                numeric_input(ui, "FREQ_TOP_PACK", &mut form.freq_top_pack);
                category_combo(ui, "REGION", &REGION_OPTIONS, &mut form.region);
                category_combo(ui, "MRG", &MRG_OPTIONS, &mut form.mrg);
            });
    }

    fn render_outcome(&self, ui: &mut Ui) {
        if !self.ui.outcome.is_settled() {
            ui.label(
                RichText::new("Fill in the customer details, then press Predict Churn.")
                    .color(style::status_color(StatusTone::Info)),
            );
            return;
        }
        ui.separator();
        ui.add_space(4.0);
        ui.label(
            RichText::new("Prediction Result:")
                .strong()
                .color(style::palette().text_primary),
        );
        ui.add_space(4.0);
        match &self.ui.outcome {
            Outcome::Idle => {}
            Outcome::Scored(prediction) => {
                let tone = if prediction.is_churn() {
                    StatusTone::Warning
                } else {
                    StatusTone::Success
                };
                ui.label(RichText::new(prediction.message()).color(style::status_color(tone)));
            }
            Outcome::Failed(message) => {
                ui.label(RichText::new(message).color(style::status_color(StatusTone::Error)));
            }
        }
    }
}

impl eframe::App for ChurnApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Expresso Churn Prediction");
            ui.label(
                RichText::new("Enter customer features to predict churn probability")
                    .color(style::palette().text_muted),
            );
            ui.add_space(10.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_form(ui);
                ui.add_space(10.0);
                if ui.button("Predict Churn").clicked() {
                    self.submit();
                }
                ui.add_space(8.0);
                self.render_outcome(ui);
            });
        });
    }
}

fn numeric_input(ui: &mut Ui, label: &str, value: &mut f32) {
    ui.label(label);
    ui.add(egui::DragValue::new(value).speed(1.0));
    ui.end_row();
}

fn category_combo(ui: &mut Ui, label: &str, options: &[&str], value: &mut String) {
    ui.label(label);
    egui::ComboBox::from_id_salt(label)
        .width(220.0)
        .selected_text(value.clone())
        .show_ui(ui, |ui| {
            for option in options {
                let selected = value.as_str() == *option;
                if ui.selectable_label(selected, *option).clicked() {
                    *value = (*option).to_string();
                }
            }
        });
    ui.end_row();
}
