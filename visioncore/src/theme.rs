//! visionOS theme: bold pop palette
//!
//! Saturated fills, thick black borders and hard offset shadows.
//! No rounding anywhere.

use egui::{Color32, FontFamily, FontId, Pos2, Rect, Rounding, Stroke, Style, TextStyle, Vec2, Visuals};

/// The pop palette used by every surface of the desktop.
pub struct PopColors;

impl PopColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const BORDER: Color32 = Color32::from_rgb(0, 0, 0);
    pub const DESKTOP: Color32 = Color32::from_rgb(0x00, 0xa8, 0xa8);
    pub const GRID: Color32 = Color32::from_rgb(0x7f, 0xff, 0xd4);
    pub const CYAN: Color32 = Color32::from_rgb(0x4d, 0xe8, 0xf4);
    pub const PURPLE: Color32 = Color32::from_rgb(0x9b, 0x5d, 0xe5);
    pub const PINK: Color32 = Color32::from_rgb(0xff, 0x5c, 0xa8);
    pub const YELLOW: Color32 = Color32::from_rgb(0xff, 0xe1, 0x4d);
    pub const LIME: Color32 = Color32::from_rgb(0x7a, 0xff, 0x59);
    pub const GRAY: Color32 = Color32::from_rgb(0xc0, 0xc0, 0xc0);
    /// Translucent black used for hard shadows.
    pub const SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);
}

/// Theme configuration for visionOS apps
pub struct VisionTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for VisionTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 22.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl VisionTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();

        visuals.window_fill = PopColors::WHITE;
        visuals.panel_fill = PopColors::DESKTOP;
        visuals.extreme_bg_color = PopColors::WHITE;

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(3.0, PopColors::BORDER);

        let pop = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(2.0, PopColors::BORDER);
            ws.fg_stroke = Stroke::new(1.0, PopColors::BLACK);
            ws.rounding = Rounding::ZERO;
        };
        pop(&mut visuals.widgets.noninteractive, PopColors::WHITE);
        pop(&mut visuals.widgets.inactive, PopColors::WHITE);
        pop(&mut visuals.widgets.hovered, Color32::from_gray(240));
        pop(&mut visuals.widgets.active, PopColors::YELLOW);
        pop(&mut visuals.widgets.open, PopColors::WHITE);

        // Shadows are drawn by hand as hard offsets
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        visuals.selection.bg_fill = PopColors::PINK;
        visuals.selection.stroke = Stroke::new(1.0, PopColors::BLACK);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}

/// Paint a hard offset shadow behind `rect` (drawn before the surface itself).
pub fn hard_shadow(painter: &egui::Painter, rect: Rect, offset: f32) {
    let shadow = Rect::from_min_size(rect.min + Vec2::splat(offset), rect.size());
    painter.rect_filled(shadow, 0.0, PopColors::BLACK);
}

/// Paint a square grid over `rect` with the given spacing.
pub fn draw_grid(painter: &egui::Painter, rect: Rect, spacing: f32, color: Color32) {
    if spacing <= 0.0 {
        return;
    }
    let stroke = Stroke::new(1.0, color);
    let mut x = rect.min.x;
    while x <= rect.max.x {
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        x += spacing;
    }
    let mut y = rect.min.y;
    while y <= rect.max.y {
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        y += spacing;
    }
}
