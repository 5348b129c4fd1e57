//! Window chrome
//!
//! A window is a controlled view: everything it shows (title, flags,
//! position) is passed in and everything the user does to it comes back as
//! [`DesktopIntent`]s. Only the drag position lives with the caller between
//! frames.

use crate::shell::DesktopIntent;
use egui::{Align2, Color32, Context, FontId, Id, Order, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use visioncore::safety::ellipsize;
use visioncore::theme::{hard_shadow, PopColors};
use visioncore::widgets::{status_stripe, window_control_buttons, WindowAction};

pub const WINDOW_WIDTH: f32 = 500.0;
pub const BODY_HEIGHT: f32 = 360.0;
pub const HEADER_HEIGHT: f32 = 40.0;
const BORDER: f32 = 3.0;
const SHADOW: f32 = 8.0;
const TITLE_CHARS: usize = 40;

pub struct WindowView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub active: bool,
    pub maximized: bool,
    /// Top-left corner when not maximized.
    pub position: Pos2,
    /// Area a maximized window fills.
    pub desktop: Rect,
}

pub struct WindowOutput {
    pub intents: Vec<DesktopIntent>,
    /// Screen rect the window occupied this frame.
    pub rect: Rect,
    /// Position after this frame's drag.
    pub position: Pos2,
}

impl<'a> WindowView<'a> {
    fn outer_rect(&self) -> Rect {
        if self.maximized {
            self.desktop
        } else {
            Rect::from_min_size(
                self.position,
                Vec2::new(WINDOW_WIDTH, HEADER_HEIGHT + BODY_HEIGHT + 12.0 + BORDER * 2.0),
            )
        }
    }

    pub fn show(self, ctx: &Context, add_contents: impl FnOnce(&mut Ui)) -> WindowOutput {
        let mut intents = Vec::new();
        let mut position = self.position;
        let rect = self.outer_rect();
        // Focused window above all; the rest share the middle layer in open order
        let order = if self.active { Order::Foreground } else { Order::Middle };

        egui::Area::new(Id::new(("vision-window", self.id)))
            .order(order)
            .fixed_pos(rect.min)
            .constrain(false)
            .show(ctx, |ui| {
                ui.set_clip_rect(rect.expand(SHADOW));
                // The area's hit box is whatever it claims, so claim the whole window
                ui.expand_to_include_rect(rect);
                let painter = ui.painter().clone();
                if !self.maximized {
                    hard_shadow(&painter, rect, SHADOW);
                }
                painter.rect_filled(rect, 0.0, PopColors::WHITE);

                // A press that lands on this window's layer asks for focus, once per press
                let press = ui.input(|i| i.pointer.any_pressed().then(|| i.pointer.interact_pos()).flatten());
                let mut wants_focus = !self.active
                    && press.map_or(false, |p| rect.contains(p) && ctx.layer_id_at(p) == Some(ui.layer_id()));

                let header = Rect::from_min_size(rect.min, Vec2::new(rect.width(), HEADER_HEIGHT));
                let header_response = ui.interact(
                    header,
                    Id::new(("vision-window-header", self.id)),
                    Sense::click_and_drag(),
                );
                painter.rect_filled(header, 0.0, if self.active { PopColors::PURPLE } else { PopColors::CYAN });
                painter.hline(header.x_range(), header.bottom(), Stroke::new(BORDER, PopColors::BORDER));
                let title = ellipsize(self.title, TITLE_CHARS);
                let title_pos = Pos2::new(header.left() + 12.0, header.center().y);
                painter.text(title_pos + Vec2::splat(2.0), Align2::LEFT_CENTER, &title, FontId::proportional(16.0), PopColors::BLACK);
                painter.text(title_pos, Align2::LEFT_CENTER, &title, FontId::proportional(16.0), PopColors::WHITE);

                // Controls sit on top of the header and consume their own clicks
                let controls = Rect::from_min_max(
                    Pos2::new(header.right() - 96.0, header.top()),
                    Pos2::new(header.right() - 8.0, header.bottom()),
                );
                let action = ui
                    .allocate_ui_at_rect(controls, |ui| {
                        ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 8.0;
                            window_control_buttons(ui, self.maximized)
                        })
                        .inner
                    })
                    .inner;
                let on_controls = ui.input(|i| i.pointer.interact_pos()).map_or(false, |p| controls.contains(p));
                match action {
                    WindowAction::Close => intents.push(DesktopIntent::Close(self.id.to_string())),
                    WindowAction::Minimize => intents.push(DesktopIntent::ToggleMinimize(self.id.to_string())),
                    WindowAction::Maximize => intents.push(DesktopIntent::ToggleMaximize(self.id.to_string())),
                    WindowAction::None => {}
                }
                if on_controls {
                    wants_focus = false;
                } else {
                    if header_response.double_clicked() {
                        intents.push(DesktopIntent::ToggleMaximize(self.id.to_string()));
                    }
                    if !self.maximized && header_response.dragged() {
                        position += header_response.drag_delta();
                    }
                }
                if wants_focus {
                    intents.push(DesktopIntent::Focus(self.id.to_string()));
                }

                let stripe_height = if self.maximized { 0.0 } else { 12.0 };
                let body = Rect::from_min_max(
                    Pos2::new(rect.left() + BORDER, header.bottom() + BORDER / 2.0),
                    Pos2::new(rect.right() - BORDER, rect.bottom() - BORDER - stripe_height),
                );
                paint_body_grid(&painter, body);
                let mut content_ui = ui.child_ui(body, egui::Layout::top_down(egui::Align::Min));
                content_ui.set_clip_rect(body);
                add_contents(&mut content_ui);

                if !self.maximized {
                    let stripe = Rect::from_min_size(
                        Pos2::new(rect.left(), rect.bottom() - BORDER - stripe_height),
                        Vec2::new(rect.width(), stripe_height),
                    );
                    let mut stripe_ui = ui.child_ui(stripe, egui::Layout::left_to_right(egui::Align::Min));
                    status_stripe(&mut stripe_ui);
                    painter.rect_stroke(rect, 0.0, Stroke::new(BORDER, PopColors::BORDER));
                }
            });

        WindowOutput {
            intents,
            rect,
            position,
        }
    }
}

fn paint_body_grid(painter: &egui::Painter, body: Rect) {
    visioncore::theme::draw_grid(painter, body, 20.0, Color32::from_black_alpha(25));
}
