use egui::{Color32, FontId, Rounding, Stroke, Visuals};
use project_desk::settings::ColorMode;

// ── Palette ──────────────────────────────────────────────────────────────────

pub struct Palette {
    pub bg_base: Color32,
    pub bg_panel: Color32,
    pub bg_field: Color32,
    pub bg_selected: Color32,
    pub border_subtle: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_dim: Color32,
    pub accent: Color32,
    pub danger: Color32,
    pub success: Color32,
}

pub const DARK: Palette = Palette {
    bg_base: Color32::from_rgb(24, 24, 32),
    bg_panel: Color32::from_rgb(30, 30, 40),
    bg_field: Color32::from_rgb(20, 20, 28),
    bg_selected: Color32::from_rgba_premultiplied(80, 140, 220, 45),
    border_subtle: Color32::from_rgb(50, 52, 64),
    text_primary: Color32::from_rgb(230, 232, 240),
    text_secondary: Color32::from_rgb(155, 160, 178),
    text_dim: Color32::from_rgb(100, 105, 120),
    accent: Color32::from_rgb(80, 140, 220),
    danger: Color32::from_rgb(240, 90, 90),
    success: Color32::from_rgb(90, 190, 120),
};

pub const LIGHT: Palette = Palette {
    bg_base: Color32::from_rgb(246, 247, 250),
    bg_panel: Color32::from_rgb(255, 255, 255),
    bg_field: Color32::from_rgb(238, 240, 245),
    bg_selected: Color32::from_rgb(214, 228, 248),
    border_subtle: Color32::from_rgb(218, 221, 230),
    text_primary: Color32::from_rgb(30, 32, 40),
    text_secondary: Color32::from_rgb(88, 94, 110),
    text_dim: Color32::from_rgb(140, 146, 160),
    accent: Color32::from_rgb(24, 117, 210),
    danger: Color32::from_rgb(200, 40, 40),
    success: Color32::from_rgb(40, 140, 70),
};

pub fn palette(mode: ColorMode) -> &'static Palette {
    match mode {
        ColorMode::Dark => &DARK,
        ColorMode::Light => &LIGHT,
    }
}

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const SIDE_PANEL_WIDTH: f32 = 300.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const DIALOG_WIDTH: f32 = 340.0;
pub const ROW_HEIGHT: f32 = 26.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context, mode: ColorMode) {
    let p = palette(mode);
    let mut visuals = match mode {
        ColorMode::Dark => Visuals::dark(),
        ColorMode::Light => Visuals::light(),
    };

    visuals.override_text_color = Some(p.text_primary);
    visuals.panel_fill = p.bg_panel;
    visuals.window_fill = p.bg_panel;
    visuals.extreme_bg_color = p.bg_field;
    visuals.faint_bg_color = p.bg_base;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, p.border_subtle);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, p.text_secondary);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, p.border_subtle);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, p.text_primary);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, p.accent);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_stroke = Stroke::new(1.0, p.accent);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = p.bg_selected;
    visuals.selection.stroke = Stroke::new(1.0, p.accent);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, p.border_subtle);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
