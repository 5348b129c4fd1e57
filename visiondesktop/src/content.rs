//! What goes inside a window, by item kind

use crate::filesystem::{FileSystemItem, ItemKind, PAINT_ID, SNAKE_ID};
use crate::icons::{desktop_icon, Glyph, ICON_HEIGHT, ICON_WIDTH};
use crate::shell::DesktopIntent;
use egui::{Align2, FontId, Pos2, RichText, Sense, Stroke, Ui, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use visioncore::theme::PopColors;
use visionpaint::PaintApp;
use visionsnake::{SnakeApp, SnakeEvent};

const FOLDER_COLUMNS: usize = 4;

/// Features the embedded player is allowed to use.
pub const PERMISSIONS: [&str; 7] = [
    "accelerometer",
    "autoplay",
    "clipboard-write",
    "encrypted-media",
    "gyroscope",
    "picture-in-picture",
    "fullscreen",
];

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?autoplay=1", video_id)
}

/// Live state of an application window. Created when the window opens,
/// dropped when it closes.
pub enum HostedApp {
    Snake(SnakeApp),
    Paint(PaintApp),
}

impl HostedApp {
    /// The application an item launches, if it is one we can host.
    pub fn for_item(item: &FileSystemItem, seed: u64, tick: Duration, now: Instant) -> Option<Self> {
        if item.kind != ItemKind::Application {
            return None;
        }
        match item.id.as_str() {
            SNAKE_ID => Some(HostedApp::Snake(SnakeApp::with_tick(StdRng::seed_from_u64(seed), tick, now))),
            PAINT_ID => Some(HostedApp::Paint(PaintApp::new())),
            other => {
                log::warn!("[visiondesktop] no application behind {}", other);
                None
            }
        }
    }

    pub fn next_due(&self) -> Option<Instant> {
        match self {
            HostedApp::Snake(app) => app.next_due(),
            HostedApp::Paint(_) => None,
        }
    }

    /// Hold or release the app's clock as its window hides or returns.
    pub fn set_shown(&mut self, shown: bool, now: Instant) {
        if let HostedApp::Snake(app) = self {
            if shown {
                app.wake(now);
            } else {
                app.suspend();
            }
        }
    }

    /// Whether the app needs frames at animation rate.
    pub fn is_active(&self) -> bool {
        match self {
            HostedApp::Snake(_) => false,
            HostedApp::Paint(app) => app.is_drawing(),
        }
    }
}

/// Per-frame inputs to a window body.
pub struct ContentView<'a> {
    pub item: &'a FileSystemItem,
    pub selected: Option<&'a str>,
    pub focused: bool,
    pub app: Option<&'a mut HostedApp>,
}

impl<'a> ContentView<'a> {
    pub fn show(self, ui: &mut Ui) -> Vec<DesktopIntent> {
        let mut intents = Vec::new();
        match self.item.kind {
            ItemKind::Folder => folder(ui, &self.item.children, self.selected, &mut intents),
            ItemKind::Text => text(ui, self.item.content()),
            ItemKind::Video => video(ui, self.item.content()),
            ItemKind::Application => match self.app {
                Some(HostedApp::Snake(app)) => {
                    if app.ui(ui, self.focused) == Some(SnakeEvent::Won) {
                        intents.push(DesktopIntent::SnakeWon);
                    }
                }
                Some(HostedApp::Paint(app)) => app.ui(ui),
                None => {
                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| ui.label("application not found"));
                }
            },
            // Never reached: locked items cannot be opened
            ItemKind::Locked => {}
        }
        intents
    }
}

fn folder(ui: &mut Ui, children: &[FileSystemItem], selected: Option<&str>, intents: &mut Vec<DesktopIntent>) {
    if children.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Empty folder").italics().color(PopColors::GRAY));
        });
        return;
    }
    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        ui.add_space(12.0);
        let cell = Vec2::new(ui.available_width() / FOLDER_COLUMNS as f32, ICON_HEIGHT + 16.0);
        for row in children.chunks(FOLDER_COLUMNS) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for child in row {
                    let (slot, _) = ui.allocate_exact_size(cell, Sense::hover());
                    let pos = Pos2::new(slot.center().x - ICON_WIDTH / 2.0, slot.top());
                    let is_selected = selected == Some(child.id.as_str());
                    let response = desktop_icon(ui, &child.id, pos, &child.name, Glyph::for_item(child), is_selected);
                    if response.double_clicked() {
                        intents.push(DesktopIntent::Open(child.clone()));
                    } else if response.clicked() {
                        intents.push(DesktopIntent::Select(Some(child.id.clone())));
                    }
                }
            });
        }
    });
}

fn text(ui: &mut Ui, body: &str) {
    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        egui::Frame::none().inner_margin(egui::Margin::same(16.0)).show(ui, |ui| {
            ui.add(egui::Label::new(RichText::new(body).monospace().size(14.0).color(PopColors::BLACK)).wrap(true));
        });
    });
}

fn video(ui: &mut Ui, video_id: &str) {
    let url = embed_url(video_id);
    let (screen, _) = ui.allocate_exact_size((ui.available_size() - Vec2::new(0.0, 44.0)).max(Vec2::ZERO), Sense::hover());
    let painter = ui.painter_at(screen);
    painter.rect_filled(screen, 0.0, PopColors::BLACK);
    painter.circle_filled(screen.center(), 32.0, PopColors::PINK);
    painter.circle_stroke(screen.center(), 32.0, Stroke::new(3.0, PopColors::WHITE));
    painter.text(screen.center(), Align2::CENTER_CENTER, "▶", FontId::proportional(28.0), PopColors::WHITE);
    painter.text(
        screen.center_bottom() - Vec2::new(0.0, 16.0),
        Align2::CENTER_CENTER,
        "playing in your browser",
        FontId::monospace(12.0),
        PopColors::GRAY,
    );

    ui.horizontal(|ui| {
        ui.add_space(8.0);
        ui.hyperlink_to(RichText::new("▶ play").strong(), &url);
        ui.label(RichText::new(&url).small().monospace());
    });
    ui.horizontal_wrapped(|ui| {
        ui.add_space(8.0);
        ui.label(RichText::new(format!("allow: {}", PERMISSIONS.join("; "))).small().color(PopColors::GRAY));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::FileTree;

    #[test]
    fn test_embed_url() {
        assert_eq!(embed_url("zZ6vybT1HQs"), "https://www.youtube.com/embed/zZ6vybT1HQs?autoplay=1");
    }

    #[test]
    fn test_permissions_include_autoplay_and_fullscreen() {
        assert!(PERMISSIONS.contains(&"autoplay"));
        assert!(PERMISSIONS.contains(&"fullscreen"));
        assert_eq!(PERMISSIONS.len(), 7);
    }

    #[test]
    fn test_hosted_app_by_item() {
        let tree = FileTree::initial();
        let now = Instant::now();
        let tick = Duration::from_millis(120);
        let snake = tree.find(SNAKE_ID).expect("snake");
        assert!(matches!(HostedApp::for_item(snake, 1, tick, now), Some(HostedApp::Snake(_))));
        let paint = tree.find(PAINT_ID).expect("paint");
        assert!(matches!(HostedApp::for_item(paint, 1, tick, now), Some(HostedApp::Paint(_))));
        let about = tree.find("about").expect("about");
        assert!(HostedApp::for_item(about, 1, tick, now).is_none());
    }

    #[test]
    fn test_snake_next_due_uses_configured_tick() {
        let tree = FileTree::initial();
        let now = Instant::now();
        let snake = tree.find(SNAKE_ID).expect("snake");
        let app = HostedApp::for_item(snake, 7, Duration::from_millis(200), now).expect("hosted");
        assert_eq!(app.next_due(), Some(now + Duration::from_millis(200)));
        assert!(!app.is_active());
    }
}
