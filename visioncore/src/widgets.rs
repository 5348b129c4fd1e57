//! Custom widgets: white boxes, thick outlines, hard shadows

use crate::theme::{hard_shadow, PopColors};
use egui::{Response, Sense, Stroke, Ui, Widget};

/// Action returned by window control buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowAction {
    None,
    Close,
    Minimize,
    Maximize,
}

const CONTROL_SIZE: f32 = 22.0;

/// Draw minimize, maximize and close buttons in that order.
///
/// Each button senses clicks on its own rect only, so a press here never
/// reaches the header underneath (no drag, no double-click maximize).
pub fn window_control_buttons(ui: &mut Ui, maximized: bool) -> WindowAction {
    let mut action = WindowAction::None;

    if control_button(ui, PopColors::WHITE, |painter, rect| {
        let m = 6.0;
        painter.line_segment(
            [
                egui::pos2(rect.left() + m, rect.center().y),
                egui::pos2(rect.right() - m, rect.center().y),
            ],
            Stroke::new(3.0, PopColors::BLACK),
        );
    })
    .clicked()
    {
        action = WindowAction::Minimize;
    }

    if control_button(ui, PopColors::WHITE, |painter, rect| {
        // Small square when maximized (restore), larger one otherwise
        let inset = if maximized { 7.0 } else { 5.0 };
        painter.rect_stroke(rect.shrink(inset), 0.0, Stroke::new(2.0, PopColors::BLACK));
    })
    .clicked()
    {
        action = WindowAction::Maximize;
    }

    if control_button(ui, PopColors::PINK, |painter, rect| {
        let m = 6.0;
        let stroke = Stroke::new(3.0, PopColors::WHITE);
        painter.line_segment(
            [rect.left_top() + egui::vec2(m, m), rect.right_bottom() - egui::vec2(m, m)],
            stroke,
        );
        painter.line_segment(
            [rect.right_top() + egui::vec2(-m, m), rect.left_bottom() + egui::vec2(m, -m)],
            stroke,
        );
    })
    .clicked()
    {
        action = WindowAction::Close;
    }

    action
}

fn control_button(
    ui: &mut Ui,
    fill: egui::Color32,
    glyph: impl FnOnce(&egui::Painter, egui::Rect),
) -> Response {
    let (rect, resp) = ui.allocate_exact_size(egui::vec2(CONTROL_SIZE, CONTROL_SIZE), Sense::click());
    if ui.is_rect_visible(rect) {
        let pressed = resp.is_pointer_button_down_on();
        let rect = if pressed { rect.translate(egui::vec2(1.0, 1.0)) } else { rect };
        let painter = ui.painter();
        if !pressed {
            hard_shadow(painter, rect, 2.0);
        }
        let fill = if resp.hovered() && fill == PopColors::WHITE {
            egui::Color32::from_gray(240)
        } else {
            fill
        };
        painter.rect_filled(rect, 0.0, fill);
        painter.rect_stroke(rect, 0.0, Stroke::new(2.0, PopColors::BLACK));
        glyph(painter, rect);
    }
    resp
}

/// A button: colored fill, 2px outline, hard shadow that collapses when
/// pressed or selected.
pub struct PopButton<'a> {
    text: &'a str,
    fill: egui::Color32,
    text_color: egui::Color32,
    selected: bool,
    max_width: Option<f32>,
}

impl<'a> PopButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            fill: PopColors::WHITE,
            text_color: PopColors::BLACK,
            selected: false,
            max_width: None,
        }
    }

    pub fn fill(mut self, fill: egui::Color32, text_color: egui::Color32) -> Self {
        self.fill = fill;
        self.text_color = text_color;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

impl<'a> Widget for PopButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = egui::FontId::proportional(13.0);
        let galley = ui.painter().layout_no_wrap(self.text.to_string(), font, self.text_color);
        let padding = egui::vec2(12.0, 4.0);
        let mut width = galley.size().x + padding.x * 2.0;
        if let Some(max) = self.max_width {
            width = width.min(max);
        }
        let desired = egui::vec2(width, ui.spacing().interact_size.y.max(galley.size().y + padding.y * 2.0));
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());

        if ui.is_rect_visible(rect) {
            let pressed = response.is_pointer_button_down_on() || self.selected;
            let body = if pressed { rect.translate(egui::vec2(2.0, 2.0)) } else { rect };
            let painter = ui.painter().with_clip_rect(rect.expand(4.0));
            if !pressed {
                hard_shadow(&painter, body, 3.0);
            }
            painter.rect_filled(body, 0.0, self.fill);
            painter.rect_stroke(body, 0.0, Stroke::new(2.0, PopColors::BLACK));
            let text_pos = egui::pos2(body.left() + padding.x, body.center().y - galley.size().y / 2.0);
            painter.with_clip_rect(body.shrink(2.0)).galley(text_pos, galley, self.text_color);
        }

        response
    }
}

/// Status stripe at the bottom of a window: yellow band with black ticks
pub fn status_stripe(ui: &mut Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 12.0), Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, PopColors::YELLOW);
        painter.hline(rect.x_range(), rect.top(), Stroke::new(3.0, PopColors::BORDER));
        let mut x = rect.left() + 4.0;
        for _ in 0..20 {
            if x > rect.right() {
                break;
            }
            painter.vline(x, rect.y_range(), Stroke::new(2.0, PopColors::BLACK));
            x += 10.0;
        }
    }
}
