//! visionOS desktop: the shell's single eframe app
//!
//! Every frame draws, in order: the taskbar, the background with its icon
//! column and mascot, the open windows (focused one last), the alert modal
//! and the minimize/restore transitions. Views only produce
//! [`DesktopIntent`]s; those are applied at the end of the frame, and the
//! resulting window changes drive the side effects (hosted apps, video
//! autoplay, transitions).

use crate::config::DesktopConfig;
use crate::content::{embed_url, ContentView, HostedApp};
use crate::filesystem::ItemKind;
use crate::icons::{desktop_icon, Glyph, ICON_HEIGHT, ICON_WIDTH};
use crate::mascot::Mascot;
use crate::shell::{DesktopIntent, Shell, MY_PC_ICON};
use crate::splash::Splash;
use crate::taskbar::{self, Clock};
use crate::window::{WindowView, HEADER_HEIGHT, WINDOW_WIDTH};
use crate::window_manager::{WindowChange, WindowLayer, WindowRecord};
use egui::{Align2, Context, FontId, Id, LayerId, Order, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use visioncore::animation::{Transition, TransitionKind, TransitionManager};
use visioncore::safety::catch_or;
use visioncore::theme::{draw_grid, hard_shadow, PopColors};
use visioncore::widgets::PopButton;
use visioncore::RepaintController;

const DESKTOP_PADDING: f32 = 16.0;
const ICON_GAP: f32 = 24.0;
const GRID_SPACING: f32 = 40.0;
/// Part of a dragged window that must stay on the desktop.
const KEEP_VISIBLE: f32 = 60.0;
/// Largest frame delta fed to transitions.
const MAX_DT: f32 = 0.1;

/// Top-left corners for `count` icons laid out in columns, top to bottom
/// then left to right.
pub fn icon_slots(area: Rect, count: usize) -> Vec<Pos2> {
    let step = ICON_HEIGHT + ICON_GAP;
    let per_column = (((area.height() - DESKTOP_PADDING * 2.0 + ICON_GAP) / step).floor() as usize).max(1);
    (0..count)
        .map(|i| {
            let (column, row) = (i / per_column, i % per_column);
            Pos2::new(
                area.left() + DESKTOP_PADDING + column as f32 * (ICON_WIDTH + ICON_GAP),
                area.top() + DESKTOP_PADDING + row as f32 * step,
            )
        })
        .collect()
}

/// Keep enough of a window on the desktop to grab its header again.
pub fn clamp_position(position: Pos2, desktop: Rect) -> Pos2 {
    let min_x = desktop.left() - WINDOW_WIDTH + KEEP_VISIBLE;
    let max_x = (desktop.right() - KEEP_VISIBLE).max(min_x);
    let max_y = (desktop.bottom() - HEADER_HEIGHT).max(desktop.top());
    Pos2::new(position.x.clamp(min_x, max_x), position.y.clamp(desktop.top(), max_y))
}

pub struct DesktopApp {
    shell: Shell,
    config: DesktopConfig,
    splash: Splash,
    mascot: Mascot,
    clock: Clock,
    /// Seeds the per-window random sources.
    rng: StdRng,
    /// Live Snake/Paint state, keyed by window id.
    apps: HashMap<String, HostedApp>,
    /// Window top-left corners, set on open and moved by dragging.
    positions: HashMap<String, Pos2>,
    /// Where each window was drawn last frame.
    window_rects: HashMap<String, Rect>,
    transitions: TransitionManager,
    repaint: RepaintController,
    desktop_rect: Rect,
    last_frame: Instant,
}

impl DesktopApp {
    pub fn new(config: DesktopConfig) -> Self {
        let now = Instant::now();
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let splash = if config.skip_intro {
            Splash::finished(now)
        } else {
            Splash::new(Duration::try_from_secs_f32(config.intro_seconds).unwrap_or_default(), now)
        };
        let mascot = Mascot::new(StdRng::seed_from_u64(rng.gen()), now);
        let shell = Shell::new();
        if let Some(id) = shell.tree.first_duplicate_id() {
            log::warn!("[visiondesktop] file tree has duplicate id {:?}; windows for it will collide", id);
        }
        log::info!(
            "[visiondesktop] starting (intro: {}, seed: {:?})",
            !config.skip_intro,
            config.rng_seed
        );

        Self {
            shell,
            clock: Clock::new(config.use_24h_time, now),
            config,
            splash,
            mascot,
            rng,
            apps: HashMap::new(),
            positions: HashMap::new(),
            window_rects: HashMap::new(),
            transitions: TransitionManager::new(),
            repaint: RepaintController::new(),
            desktop_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(1024.0, 720.0)),
            last_frame: now,
        }
    }

    fn draw_background(&self, ui: &mut Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, PopColors::DESKTOP);
        draw_grid(painter, rect, GRID_SPACING, PopColors::GRID.gamma_multiply(0.35));

        let anchor = rect.right_top() + Vec2::new(-40.0, 32.0);
        for (line, offset) in [("DESIGN BY", 0.0), ("JULES ROUTIER", 44.0)] {
            let pos = anchor + Vec2::new(0.0, offset);
            painter.text(pos + Vec2::splat(4.0), Align2::RIGHT_TOP, line, FontId::proportional(40.0), PopColors::BLACK);
            painter.text(pos, Align2::RIGHT_TOP, line, FontId::proportional(40.0), PopColors::WHITE);
        }
    }

    fn draw_icons(&self, ui: &mut Ui, intents: &mut Vec<DesktopIntent>) {
        let mut icons: Vec<(&str, &str, Glyph, DesktopIntent)> =
            vec![(MY_PC_ICON, "My PC", Glyph::Drive, DesktopIntent::OpenMyPc)];
        for item in self.shell.tree.items() {
            icons.push((&item.id, &item.name, Glyph::for_item(item), DesktopIntent::Open(item.clone())));
        }

        let slots = icon_slots(ui.max_rect(), icons.len());
        for ((id, label, glyph, open), pos) in icons.into_iter().zip(slots) {
            let selected = self.shell.selected.as_deref() == Some(id);
            let response = desktop_icon(ui, id, pos, label, glyph, selected);
            if response.double_clicked() {
                intents.push(open);
            } else if response.clicked() {
                intents.push(DesktopIntent::Select(Some(id.to_string())));
            }
        }
    }

    fn draw_windows(&mut self, ctx: &Context, intents: &mut Vec<DesktopIntent>) {
        let records: Vec<WindowRecord> = self.shell.windows.draw_order().into_iter().cloned().collect();
        for record in &records {
            // A restoring window appears once its transition lands
            if self.transitions.kind_for(&record.id) == Some(TransitionKind::Enter) {
                continue;
            }
            let desktop = self.desktop_rect;
            let fallback = self
                .shell
                .windows
                .default_position(&record.id)
                .map_or(desktop.min, |(x, y)| desktop.min + Vec2::new(x, y));
            let position = *self.positions.entry(record.id.clone()).or_insert(fallback);
            let active = match self.shell.windows.layer(&record.id) {
                WindowLayer::Hidden => continue,
                WindowLayer::Focused => true,
                WindowLayer::Background => false,
            };
            let view = ContentView {
                item: &record.item,
                selected: self.shell.selected.as_deref(),
                focused: active,
                app: self.apps.get_mut(&record.id),
            };

            let mut content_intents = Vec::new();
            let output = WindowView {
                id: &record.id,
                title: &record.item.name,
                active,
                maximized: record.maximized,
                position,
                desktop,
            }
            .show(ctx, |ui| {
                content_intents = match catch_or(None, || Some(view.show(ui))) {
                    Some(intents) => intents,
                    None => {
                        ui.colored_label(PopColors::PINK, "this window stopped responding");
                        Vec::new()
                    }
                };
            });

            self.positions.insert(record.id.clone(), clamp_position(output.position, desktop));
            self.window_rects.insert(record.id.clone(), output.rect);
            intents.extend(output.intents);
            intents.extend(content_intents);
        }
    }

    fn draw_alert(&self, ctx: &Context, intents: &mut Vec<DesktopIntent>) {
        let Some(message) = self.shell.alert.as_deref() else {
            return;
        };
        egui::Area::new(Id::new("vision-alert"))
            .order(Order::Tooltip)
            .fixed_pos(Pos2::ZERO)
            .show(ctx, |ui| {
                let screen = ctx.screen_rect();
                // Swallow clicks aimed at the desktop underneath
                ui.allocate_rect(screen, Sense::click());
                ui.painter().rect_filled(screen, 0.0, PopColors::SHADOW);

                let card = Rect::from_center_size(screen.center(), Vec2::new(340.0, 150.0));
                let painter = ui.painter();
                hard_shadow(painter, card, 8.0);
                painter.rect_filled(card, 0.0, PopColors::WHITE);
                let header = Rect::from_min_size(card.min, Vec2::new(card.width(), 32.0));
                painter.rect_filled(header, 0.0, PopColors::PINK);
                painter.text(header.left_center() + Vec2::new(12.0, 0.0), Align2::LEFT_CENTER, "ALERT", FontId::proportional(15.0), PopColors::WHITE);
                painter.rect_stroke(card, 0.0, Stroke::new(3.0, PopColors::BORDER));
                painter.text(
                    Pos2::new(card.center().x, header.bottom() + 36.0),
                    Align2::CENTER_CENTER,
                    message,
                    FontId::proportional(14.0),
                    PopColors::BLACK,
                );
                let ok = Rect::from_center_size(Pos2::new(card.center().x, card.bottom() - 30.0), Vec2::new(80.0, 28.0));
                let clicked = ui.put(ok, PopButton::new("OK").fill(PopColors::YELLOW, PopColors::BLACK)).clicked();
                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape));
                if clicked || enter {
                    intents.push(DesktopIntent::DismissAlert);
                }
            });
    }

    /// Apply the frame's intents and react to what they changed.
    fn apply(&mut self, ctx: &Context, intents: Vec<DesktopIntent>, docks: &HashMap<String, Rect>, now: Instant) {
        for intent in intents {
            let Some((id, change)) = self.shell.dispatch(intent) else {
                continue;
            };
            log::debug!("[visiondesktop] {} {:?} ({} open)", id, change, self.shell.windows.windows().len());
            match change {
                WindowChange::Opened => self.on_opened(ctx, &id, now),
                WindowChange::Closed => {
                    self.apps.remove(&id);
                    self.positions.remove(&id);
                    self.window_rects.remove(&id);
                    self.transitions.cancel(&id);
                }
                WindowChange::Minimized => {
                    if let Some(app) = self.apps.get_mut(&id) {
                        app.set_shown(false, now);
                    }
                    if let (Some(&from), Some(&dock)) = (self.window_rects.get(&id), docks.get(&id)) {
                        self.transitions.start(Transition::exit(from, dock, id));
                    }
                }
                WindowChange::Restored => {
                    if let Some(app) = self.apps.get_mut(&id) {
                        app.set_shown(true, now);
                    }
                    if let (Some(&to), Some(&dock)) = (self.window_rects.get(&id), docks.get(&id)) {
                        self.transitions.start(Transition::enter(dock, to, id));
                    }
                }
                _ => {}
            }
        }
    }

    fn on_opened(&mut self, ctx: &Context, id: &str, now: Instant) {
        let Some(record) = self.shell.windows.get(id) else {
            return;
        };
        let tick = Duration::from_millis(self.config.game_tick_ms);
        if let Some(app) = HostedApp::for_item(&record.item, self.rng.gen(), tick, now) {
            self.apps.insert(id.to_string(), app);
        }
        if record.item.kind == ItemKind::Video && self.config.autoplay_video {
            let url = embed_url(record.item.content());
            log::info!("[visiondesktop] playing {}", url);
            ctx.open_url(egui::OpenUrl::new_tab(url));
        }
    }

    fn schedule(&mut self) {
        self.repaint.schedule_at(self.mascot.next_due());
        self.repaint.schedule_opt(self.clock.next_due());
        self.repaint.schedule_opt(self.splash.next_due());
        for app in self.apps.values() {
            self.repaint.schedule_opt(app.next_due());
        }
        let animating = self.transitions.is_animating()
            || self.splash.is_animating()
            || self.apps.values().any(HostedApp::is_active);
        self.repaint.set_continuous(animating);
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame(ctx);
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32().min(MAX_DT);
        self.last_frame = now;

        if !self.splash.is_done() {
            self.splash.update(now);
            let mut skip = false;
            egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
                let screen = ui.max_rect();
                skip = self.splash.ui(ui, screen, now);
            });
            if skip {
                self.splash.skip();
                ctx.request_repaint();
            }
            self.schedule();
            self.repaint.end_frame(ctx);
            return;
        }

        self.clock.update(now);
        self.mascot.update(now);

        let mut intents = Vec::new();
        let bar = taskbar::show(ctx, &self.shell.windows, &mut self.clock);
        intents.extend(bar.intents);

        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            self.desktop_rect = ui.max_rect();
            let background = ui.interact(ui.max_rect(), Id::new("vision-desktop-bg"), Sense::click());
            self.draw_background(ui);
            self.draw_icons(ui, &mut intents);
            if background.clicked() {
                intents.push(DesktopIntent::Select(None));
            }
            let pointer = ui.input(|i| i.pointer.latest_pos());
            self.mascot.draw(ui.painter(), Mascot::rect_in(self.desktop_rect), pointer);
        });

        self.draw_windows(ctx, &mut intents);
        self.draw_alert(ctx, &mut intents);

        if !intents.is_empty() {
            self.apply(ctx, intents, &bar.entry_rects, now);
            ctx.request_repaint();
        }

        self.transitions.update(dt);
        let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("vision-transitions")));
        self.transitions.draw(&painter);

        self.schedule();
        self.repaint.end_frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{PAINT_ID, SNAKE_ID};

    fn app() -> DesktopApp {
        DesktopApp::new(DesktopConfig {
            skip_intro: true,
            autoplay_video: false,
            rng_seed: Some(5),
            ..DesktopConfig::default()
        })
    }

    fn open(app: &mut DesktopApp, ctx: &Context, id: &str) {
        let item = app.shell.tree.find(id).expect("item").clone();
        app.apply(ctx, vec![DesktopIntent::Open(item)], &HashMap::new(), Instant::now());
    }

    #[test]
    fn test_icon_slots_wrap_into_columns() {
        let area = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 300.0));
        let slots = icon_slots(area, 6);
        assert_eq!(slots[0], Pos2::new(DESKTOP_PADDING, DESKTOP_PADDING));
        assert_eq!(slots[1].x, slots[0].x);
        assert!(slots[1].y > slots[0].y);
        // 300 px fits two rows
        assert_eq!(slots[2].y, slots[0].y);
        assert!(slots[2].x > slots[0].x);
        assert!(icon_slots(Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 10.0)), 2)[1].x > 0.0);
    }

    #[test]
    fn test_clamp_position_keeps_header_reachable() {
        let desktop = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 700.0));
        assert_eq!(clamp_position(Pos2::new(150.0, 100.0), desktop), Pos2::new(150.0, 100.0));
        let far = clamp_position(Pos2::new(5000.0, 5000.0), desktop);
        assert_eq!(far, Pos2::new(1000.0 - KEEP_VISIBLE, 700.0 - HEADER_HEIGHT));
        let above = clamp_position(Pos2::new(-2000.0, -50.0), desktop);
        assert_eq!(above, Pos2::new(KEEP_VISIBLE - WINDOW_WIDTH, 0.0));
    }

    #[test]
    fn test_apps_live_with_their_window() {
        let ctx = Context::default();
        let mut app = app();
        open(&mut app, &ctx, SNAKE_ID);
        open(&mut app, &ctx, PAINT_ID);
        assert!(matches!(app.apps.get(SNAKE_ID), Some(HostedApp::Snake(_))));
        assert!(matches!(app.apps.get(PAINT_ID), Some(HostedApp::Paint(_))));

        app.apply(&ctx, vec![DesktopIntent::Close(SNAKE_ID.into())], &HashMap::new(), Instant::now());
        assert!(!app.apps.contains_key(SNAKE_ID));
        assert!(app.apps.contains_key(PAINT_ID));
    }

    #[test]
    fn test_reopening_keeps_running_app() {
        let ctx = Context::default();
        let mut app = app();
        open(&mut app, &ctx, SNAKE_ID);
        let first = app.apps.get(SNAKE_ID).and_then(HostedApp::next_due);
        // Opening again only focuses; the session is not replaced
        open(&mut app, &ctx, SNAKE_ID);
        assert_eq!(app.apps.get(SNAKE_ID).and_then(HostedApp::next_due), first);
    }

    #[test]
    fn test_minimize_and_restore_start_transitions() {
        let ctx = Context::default();
        let mut app = app();
        open(&mut app, &ctx, "about");
        let window = Rect::from_min_size(Pos2::new(150.0, 100.0), Vec2::new(500.0, 400.0));
        let dock = Rect::from_min_size(Pos2::new(120.0, 680.0), Vec2::new(150.0, 34.0));
        app.window_rects.insert("about".into(), window);
        let docks = HashMap::from([("about".to_string(), dock)]);

        app.apply(&ctx, vec![DesktopIntent::TaskbarClick("about".into())], &docks, Instant::now());
        assert_eq!(app.transitions.kind_for("about"), Some(TransitionKind::Exit));
        app.apply(&ctx, vec![DesktopIntent::TaskbarClick("about".into())], &docks, Instant::now());
        assert_eq!(app.transitions.kind_for("about"), Some(TransitionKind::Enter));

        app.apply(&ctx, vec![DesktopIntent::Close("about".into())], &docks, Instant::now());
        assert!(!app.transitions.is_window_animating("about"));
        assert!(!app.positions.contains_key("about"));
    }

    #[test]
    fn test_minimized_snake_does_not_wake_the_desktop() {
        let ctx = Context::default();
        let mut app = app();
        open(&mut app, &ctx, SNAKE_ID);
        let t0 = Instant::now();
        app.apply(&ctx, vec![DesktopIntent::ToggleMinimize(SNAKE_ID.into())], &HashMap::new(), t0);
        assert_eq!(app.apps.get(SNAKE_ID).and_then(HostedApp::next_due), None);

        // Long after the tick would have come due, nothing asks for a frame
        let later = t0 + Duration::from_millis(300);
        app.repaint.begin_frame(&ctx);
        app.schedule();
        assert_ne!(app.repaint.wake_after(later), Some(Duration::ZERO));

        app.apply(&ctx, vec![DesktopIntent::TaskbarClick(SNAKE_ID.into())], &HashMap::new(), later);
        let due = app.apps.get(SNAKE_ID).and_then(HostedApp::next_due).expect("ticking again");
        assert!(due > later);
    }

    #[test]
    fn test_snake_win_unlocks_secret_through_intents() {
        let ctx = Context::default();
        let mut app = app();
        app.apply(&ctx, vec![DesktopIntent::SnakeWon], &HashMap::new(), Instant::now());
        assert!(!app.shell.tree.find(crate::filesystem::SECRET_ID).expect("secret").locked);
        open(&mut app, &ctx, crate::filesystem::SECRET_ID);
        assert_eq!(app.shell.alert, None);
        assert_eq!(app.shell.windows.windows().len(), 1);
    }
}
