//! Paint application: toolbar, palette and a freehand canvas
//!
//! The same widget runs inside a desktop window (`PaintApp::ui`) and as the
//! standalone `visionpaint` binary (the `eframe::App` impl).

use crate::canvas::Canvas;
use crate::tools::{Brush, Tool, PALETTE};
use egui::{Color32, Context, Pos2, Rect, Sense, Stroke, TextureHandle, Ui, Vec2};
use visioncore::theme::PopColors;
use visioncore::widgets::PopButton;

const SWATCH_SIZE: f32 = 22.0;

pub struct PaintApp {
    /// Created on first layout, sized to the content area.
    canvas: Option<Canvas>,
    texture: Option<TextureHandle>,
    brush: Brush,
    last_point: Option<(i32, i32)>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::new()
    }
}

impl PaintApp {
    pub fn new() -> Self {
        Self {
            canvas: None,
            texture: None,
            brush: Brush::default(),
            last_point: None,
        }
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Whether a stroke is in progress (the host keeps repainting meanwhile).
    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        egui::Frame::none()
            .fill(PopColors::GRAY)
            .inner_margin(egui::Margin::same(4.0))
            .show(ui, |ui| self.render_toolbar(ui));
        ui.painter().hline(
            ui.max_rect().x_range(),
            ui.min_rect().bottom(),
            Stroke::new(2.0, PopColors::BLACK),
        );
        self.render_canvas(ui);
    }

    fn render_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            for tool in Tool::all() {
                let selected = self.brush.tool == *tool;
                let r = ui.add(PopButton::new(tool.icon()).selected(selected));
                if r.on_hover_text(tool.name()).clicked() {
                    self.brush.pick_tool(*tool);
                }
            }
            ui.add_space(8.0);

            for color in PALETTE {
                let (rect, response) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::click());
                let painter = ui.painter();
                painter.rect_filled(rect, 0.0, to_color32(color));
                let active = self.brush.tool == Tool::Pencil && self.brush.color == color;
                let stroke = if active {
                    Stroke::new(3.0, PopColors::WHITE)
                } else {
                    Stroke::new(1.0, PopColors::BLACK)
                };
                painter.rect_stroke(rect, 0.0, stroke);
                if response.clicked() {
                    self.brush.pick_color(color);
                }
            }
            ui.add_space(8.0);

            if ui.add(PopButton::new("CLEAR").fill(PopColors::PINK, PopColors::WHITE)).clicked() {
                if let Some(canvas) = &mut self.canvas {
                    canvas.clear();
                    log::debug!("[visionpaint] canvas cleared");
                }
            }
        });
    }

    fn render_canvas(&mut self, ui: &mut Ui) {
        let available = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(available, Sense::click_and_drag());
        let width = available.width().max(1.0) as u32;
        let height = available.height().max(1.0) as u32;

        let canvas = self.canvas.get_or_insert_with(|| Canvas::new(width, height));
        // Grow with the window; never shrink so a resize round-trip keeps the drawing
        if width > canvas.width() || height > canvas.height() {
            canvas.resize(width.max(canvas.width()), height.max(canvas.height()));
        }

        let canvas_rect = Rect::from_min_size(
            available.min,
            Vec2::new(canvas.width() as f32, canvas.height() as f32),
        );
        handle_drawing(canvas, &self.brush, &mut self.last_point, canvas_rect, &response);

        if canvas.dirty || self.texture.is_none() {
            let image = canvas.to_texture_data();
            self.texture = Some(ui.ctx().load_texture("visionpaint-canvas", image, egui::TextureOptions::NEAREST));
            canvas.dirty = false;
        }

        let painter = ui.painter().with_clip_rect(available);
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                canvas_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    }
}

fn handle_drawing(
    canvas: &mut Canvas,
    brush: &Brush,
    last_point: &mut Option<(i32, i32)>,
    canvas_rect: Rect,
    response: &egui::Response,
) {
    let to_canvas = |pos: Pos2| {
        let rel = pos - canvas_rect.min;
        (rel.x as i32, rel.y as i32)
    };

    if response.drag_started() || response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = to_canvas(pos);
            canvas.dab(x, y, brush.ink(), brush.width());
            *last_point = Some((x, y));
        }
    }

    if response.dragged() {
        if let (Some(pos), Some((lx, ly))) = (response.interact_pointer_pos(), *last_point) {
            let (x, y) = to_canvas(pos);
            if (x, y) != (lx, ly) {
                canvas.draw_line(lx, ly, x, y, brush.ink(), brush.width());
                *last_point = Some((x, y));
            }
        }
    }

    if response.drag_stopped() || response.clicked() {
        *last_point = None;
    }
}

fn to_color32(color: image::Rgba<u8>) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3])
}

impl eframe::App for PaintApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PopColors::WHITE))
            .show(ctx, |ui| self.ui(ui));
    }
}
