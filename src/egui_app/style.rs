use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

/// Fixed dark palette shared by the form and the result panel.
#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_window: Color32,
    pub bg_panel: Color32,
    pub bg_widget: Color32,
    pub outline: Color32,
    pub stripe: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub danger: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_window: Color32::from_rgb(14, 17, 20),
        bg_panel: Color32::from_rgb(22, 27, 32),
        bg_widget: Color32::from_rgb(34, 41, 48),
        outline: Color32::from_rgb(48, 56, 64),
        stripe: Color32::from_rgb(27, 33, 39),
        text_primary: Color32::from_rgb(198, 205, 211),
        text_muted: Color32::from_rgb(132, 141, 150),
        accent: Color32::from_rgb(94, 200, 184),
        success: Color32::from_rgb(97, 181, 128),
        warning: Color32::from_rgb(209, 154, 62),
        danger: Color32::from_rgb(201, 85, 72),
    }
}

/// Tone of the result panel and status text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Warning,
    Error,
}

/// Text color for a status message of the given tone.
pub fn status_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Info => palette.text_muted,
        StatusTone::Success => palette.success,
        StatusTone::Warning => palette.warning,
        StatusTone::Error => palette.danger,
    }
}

/// Flat, squared-off dark theme for the whole window.
pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_window;
    visuals.panel_fill = palette.bg_panel;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_window;
    visuals.faint_bg_color = palette.stripe;
    visuals.warn_fg_color = palette.warning;
    visuals.error_fg_color = palette.danger;
    visuals.selection.bg_fill = palette.bg_widget;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_panel;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    for state in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        square_off(state, &palette);
    }
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn square_off(vis: &mut WidgetVisuals, palette: &Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_widget;
    vis.weak_bg_fill = palette.stripe;
    vis.bg_stroke = Stroke::new(1.0, palette.outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}
