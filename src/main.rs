#![deny(missing_docs)]
#![deny(warnings)]

//! Desktop entry point for the churn prediction form.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use churnscope::egui_app::style::{self, StatusTone};
use churnscope::egui_app::ui::{ChurnApp, MIN_VIEWPORT_SIZE};
use churnscope::logging;
use eframe::egui;

const WINDOW_TITLE: &str = "Expresso Churn Prediction";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 680.0])
            .with_min_inner_size(MIN_VIEWPORT_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(|_cc| match ChurnApp::new() {
            Ok(app) => Ok(Box::new(app)),
            Err(reason) => Ok(Box::new(StartupFailure { reason })),
        }),
    )?;
    Ok(())
}

/// Fallback screen shown when the real app cannot be constructed.
struct StartupFailure {
    reason: String,
}

impl eframe::App for StartupFailure {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("Churnscope could not start");
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(&self.reason)
                        .color(style::status_color(StatusTone::Error)),
                );
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("Fix the model bundle or configuration and relaunch.")
                        .color(style::palette().text_muted),
                );
            });
        });
    }
}
