//! Taskbar: start button, one entry per open window, clock
//!
//! Entries are drawn in open order. Clicking one sends
//! [`DesktopIntent::TaskbarClick`]; which of focus, minimize or restore that
//! means is the window manager's call.

use crate::shell::DesktopIntent;
use crate::window_manager::WindowManager;
use chrono::{Local, NaiveTime};
use egui::{Align2, Context, FontId, Rect, Sense, Stroke, Ui, Vec2};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use visioncore::safety::ellipsize;
use visioncore::theme::PopColors;
use visioncore::timer::Interval;
use visioncore::widgets::PopButton;

pub const TASKBAR_HEIGHT: f32 = 48.0;
const ENTRY_MAX_WIDTH: f32 = 150.0;
const ENTRY_CHARS: usize = 18;

/// Format a wall-clock time as hour:minute.
pub fn format_time(time: NaiveTime, use_24h: bool) -> String {
    if use_24h {
        time.format("%H:%M").to_string()
    } else {
        time.format("%l:%M %p").to_string().trim_start().to_string()
    }
}

/// Taskbar clock, refreshed by a one-second interval.
pub struct Clock {
    use_24h: bool,
    tick: Interval,
    text: String,
}

impl Clock {
    pub fn new(use_24h: bool, now: Instant) -> Self {
        Self {
            use_24h,
            tick: Interval::new(Duration::from_secs(1), now),
            text: format_time(Local::now().time(), use_24h),
        }
    }

    pub fn toggle_format(&mut self) {
        self.use_24h = !self.use_24h;
        self.refresh();
    }

    /// Re-read the wall clock if a tick is due.
    pub fn update(&mut self, now: Instant) {
        if self.tick.poll(now) > 0 {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.text = format_time(Local::now().time(), self.use_24h);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.tick.next_due()
    }
}

#[derive(Default)]
pub struct TaskbarOutput {
    pub intents: Vec<DesktopIntent>,
    /// Screen rect of each window's entry, used as the dock target for
    /// minimize/restore transitions.
    pub entry_rects: HashMap<String, Rect>,
}

pub fn show(ctx: &Context, windows: &WindowManager, clock: &mut Clock) -> TaskbarOutput {
    let mut out = TaskbarOutput::default();

    egui::TopBottomPanel::bottom("taskbar")
        .exact_height(TASKBAR_HEIGHT)
        .show_separator_line(false)
        .frame(
            egui::Frame::none()
                .fill(PopColors::CYAN)
                .inner_margin(egui::Margin::symmetric(8.0, 6.0)),
        )
        .show(ctx, |ui| {
            let full = ui.max_rect().expand2(Vec2::new(8.0, 6.0));
            ui.painter().hline(full.x_range(), full.top() + 1.5, Stroke::new(3.0, PopColors::BORDER));

            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 8.0;
                if start_button(ui) {
                    out.intents.push(DesktopIntent::OpenTutorial);
                }
                let (divider, _) = ui.allocate_exact_size(Vec2::new(3.0, 32.0), Sense::hover());
                ui.painter().rect_filled(divider, 0.0, PopColors::BLACK);

                for record in windows.windows() {
                    let pressed = windows.is_focused(&record.id) && !record.minimized;
                    let title = ellipsize(&record.item.name, ENTRY_CHARS);
                    let button = if pressed {
                        PopButton::new(&title).fill(PopColors::WHITE, PopColors::BLACK).selected(true)
                    } else {
                        PopButton::new(&title).fill(PopColors::PURPLE, PopColors::WHITE)
                    };
                    let response = ui.add(button.max_width(ENTRY_MAX_WIDTH));
                    out.entry_rects.insert(record.id.clone(), response.rect);
                    if response.clicked() {
                        out.intents.push(DesktopIntent::TaskbarClick(record.id.clone()));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if clock_box(ui, clock.text()) {
                        clock.toggle_format();
                    }
                });
            });
        });

    out
}

fn start_button(ui: &mut Ui) -> bool {
    let (rect, response) = ui.allocate_exact_size(Vec2::new(96.0, 34.0), Sense::click());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let down = response.is_pointer_button_down_on();
        let body = if down { rect.translate(Vec2::splat(2.0)) } else { rect };
        if !down {
            painter.rect_filled(rect.translate(Vec2::splat(3.0)), 0.0, PopColors::BLACK);
        }
        painter.rect_filled(body, 0.0, PopColors::WHITE);
        painter.rect_stroke(body, 0.0, Stroke::new(2.0, PopColors::BLACK));

        let glyph_center = body.left_center() + Vec2::new(18.0, 0.0);
        let play = vec![
            glyph_center + Vec2::new(-5.0, -7.0),
            glyph_center + Vec2::new(7.0, 0.0),
            glyph_center + Vec2::new(-5.0, 7.0),
        ];
        painter.add(egui::Shape::convex_polygon(play, PopColors::PINK, Stroke::new(1.5, PopColors::BLACK)));
        painter.text(
            body.left_center() + Vec2::new(32.0, 0.0),
            Align2::LEFT_CENTER,
            "START",
            FontId::proportional(15.0),
            PopColors::BLACK,
        );
    }
    response.clicked()
}

fn clock_box(ui: &mut Ui, text: &str) -> bool {
    let galley = ui.painter().layout_no_wrap(text.to_string(), FontId::monospace(14.0), PopColors::BLACK);
    let size = Vec2::new(galley.size().x + 24.0, 32.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, PopColors::WHITE);
        painter.rect_stroke(rect, 0.0, Stroke::new(2.0, PopColors::BLACK));
        painter.galley(rect.center() - galley.size() / 2.0, galley, PopColors::BLACK);
    }
    response.on_hover_text("click to toggle 12/24h").clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        let afternoon = NaiveTime::from_hms_opt(14, 5, 59).expect("valid time");
        assert_eq!(format_time(afternoon, true), "14:05");
        assert_eq!(format_time(afternoon, false), "2:05 PM");
        let midnight = NaiveTime::from_hms_opt(0, 30, 0).expect("valid time");
        assert_eq!(format_time(midnight, true), "00:30");
        assert_eq!(format_time(midnight, false), "12:30 AM");
    }

    #[test]
    fn test_clock_toggle_and_tick() {
        let t0 = Instant::now();
        let mut clock = Clock::new(true, t0);
        assert!(!clock.text().ends_with('M'));
        assert_eq!(clock.next_due(), Some(t0 + Duration::from_secs(1)));
        clock.toggle_format();
        assert!(clock.text().ends_with('M'));
        clock.update(t0 + Duration::from_millis(1500));
        assert_eq!(clock.next_due(), Some(t0 + Duration::from_secs(2)));
    }
}
