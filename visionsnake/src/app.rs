//! Snake.exe: board rendering, keyboard input and the game tick

use crate::game::{Cell, GameSession, Heading, Status, TickOutcome, GRID_SIZE, TICK_MS, WIN_SCORE};
use egui::{Align2, Color32, Context, FontId, Key, Rect, Sense, Stroke, Ui, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use visioncore::theme::PopColors;
use visioncore::timer::Interval;
use visioncore::widgets::PopButton;
use visioncore::RepaintController;

const CELL_PX: f32 = 15.0;
const SNAKE_COLOR: Color32 = Color32::from_rgb(0x00, 0xff, 0x00);
const FOOD_COLOR: Color32 = Color32::from_rgb(0xff, 0x00, 0x00);
const BOARD_COLOR: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

/// Reported to the host after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    /// The player reached the winning score.
    Won,
}

pub struct SnakeApp {
    game: GameSession,
    tick: Interval,
    rng: StdRng,
}

impl SnakeApp {
    pub fn new(rng: StdRng, now: Instant) -> Self {
        Self::with_tick(rng, Duration::from_millis(TICK_MS), now)
    }

    pub fn with_tick(rng: StdRng, period: Duration, now: Instant) -> Self {
        Self {
            game: GameSession::new(),
            tick: Interval::new(period, now),
            rng,
        }
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    /// When the board next needs a frame, if the game is still moving.
    pub fn next_due(&self) -> Option<Instant> {
        self.tick.next_due()
    }

    pub fn restart(&mut self, now: Instant) {
        self.game.restart();
        self.tick.reset(now);
        log::info!("[visionsnake] new game");
    }

    /// Arrow keys steer, space pauses.
    pub fn handle_keys(&mut self, ctx: &Context, now: Instant) {
        let (heading, space) = ctx.input(|i| {
            let heading = [Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight]
                .into_iter()
                .find(|k| i.key_pressed(*k))
                .and_then(Heading::from_key);
            (heading, i.key_pressed(Key::Space))
        });
        if let Some(heading) = heading {
            self.game.set_heading(heading);
        }
        if space {
            self.game.toggle_pause();
            self.sync_timer(now);
        }
    }

    /// Run due ticks. Returns `Won` on the frame the game is won.
    pub fn advance(&mut self, now: Instant) -> Option<SnakeEvent> {
        let mut event = None;
        for _ in 0..self.tick.poll(now) {
            match self.game.tick(&mut self.rng) {
                TickOutcome::Won => {
                    log::info!("[visionsnake] won with score {}", self.game.score());
                    event = Some(SnakeEvent::Won);
                }
                TickOutcome::Lost => {
                    log::info!("[visionsnake] game over at score {}", self.game.score());
                }
                _ => {}
            }
        }
        self.sync_timer(now);
        event
    }

    /// Stop the clock while the board is off screen.
    pub fn suspend(&mut self) {
        self.tick.pause();
    }

    /// Pick the clock back up a full period from `now`, if the game is running.
    pub fn wake(&mut self, now: Instant) {
        self.sync_timer(now);
    }

    fn sync_timer(&mut self, now: Instant) {
        if self.game.status() == Status::Running {
            self.tick.resume(now);
        } else {
            self.tick.pause();
        }
    }

    /// Draw the game into a window body and run input and ticks.
    pub fn ui(&mut self, ui: &mut Ui, focused: bool) -> Option<SnakeEvent> {
        let now = Instant::now();
        if focused {
            self.handle_keys(ui.ctx(), now);
        }
        let event = self.advance(now);

        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(format!("SCORE: {} / {}", self.game.score(), WIN_SCORE))
                    .monospace()
                    .strong(),
            );
            ui.add_space(4.0);
            self.render_board(ui, now);
            ui.add_space(4.0);
            ui.label(egui::RichText::new("ARROWS TO MOVE, SPACE TO PAUSE").small());
        });
        event
    }

    fn render_board(&mut self, ui: &mut Ui, now: Instant) {
        let side = GRID_SIZE as f32 * CELL_PX;
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BOARD_COLOR);

        let cell_rect = |c: Cell| {
            Rect::from_min_size(
                rect.min + Vec2::new(c.x as f32 * CELL_PX, c.y as f32 * CELL_PX),
                Vec2::splat(CELL_PX - 1.0),
            )
        };
        for cell in self.game.body() {
            painter.rect_filled(cell_rect(cell), 0.0, SNAKE_COLOR);
        }
        painter.rect_filled(cell_rect(self.game.food()), CELL_PX / 2.0, FOOD_COLOR);
        painter.rect_stroke(rect, 0.0, Stroke::new(3.0, PopColors::BLACK));

        let overlay = match self.game.status() {
            Status::Won => Some(("ACCESS GRANTED", Some("Secret file unlocked on desktop."), PopColors::LIME)),
            Status::Lost => Some(("GAME OVER", None, PopColors::PINK)),
            Status::Paused => Some(("PAUSED", None, PopColors::YELLOW)),
            Status::Running => None,
        };
        let Some((title, subtitle, color)) = overlay else {
            return;
        };

        painter.rect_filled(rect, 0.0, Color32::from_black_alpha(200));
        painter.text(
            rect.center() - Vec2::new(0.0, 40.0),
            Align2::CENTER_CENTER,
            title,
            FontId::monospace(24.0),
            color,
        );
        if let Some(subtitle) = subtitle {
            painter.text(
                rect.center() - Vec2::new(0.0, 12.0),
                Align2::CENTER_CENTER,
                subtitle,
                FontId::proportional(13.0),
                PopColors::WHITE,
            );
        }
        if self.game.status().is_over() {
            let button_rect = Rect::from_center_size(rect.center() + Vec2::new(0.0, 30.0), Vec2::new(120.0, 28.0));
            let clicked = ui
                .put(button_rect, PopButton::new("PLAY AGAIN").fill(PopColors::YELLOW, PopColors::BLACK))
                .clicked();
            if clicked {
                self.restart(now);
            }
        }
    }
}

/// Standalone window around [`SnakeApp`].
pub struct SnakeWindow {
    app: SnakeApp,
    repaint: RepaintController,
}

impl SnakeWindow {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            app: SnakeApp::new(rng, Instant::now()),
            repaint: RepaintController::new(),
        }
    }
}

impl eframe::App for SnakeWindow {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PopColors::WHITE).inner_margin(egui::Margin::same(12.0)))
            .show(ctx, |ui| {
                self.app.ui(ui, true);
            });
        self.repaint.schedule_opt(self.app.next_due());
        self.repaint.end_frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn app(now: Instant) -> SnakeApp {
        SnakeApp::new(StdRng::seed_from_u64(1), now)
    }

    #[test]
    fn test_ticks_follow_interval() {
        let t0 = Instant::now();
        let mut app = app(t0);
        assert_eq!(app.advance(t0 + 100 * MS), None);
        assert_eq!(app.game().head(), Cell::new(5, 5));
        app.advance(t0 + 120 * MS);
        assert_eq!(app.game().head(), Cell::new(6, 5));
        app.advance(t0 + 240 * MS);
        assert_eq!(app.game().head(), Cell::new(7, 5));
    }

    #[test]
    fn test_won_event_fires_once() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.game = GameSession::with_body([Cell::new(9, 10)], Heading::Right, Cell::new(10, 10));
        app.game.set_score(WIN_SCORE - 1);

        let mut wins = 0;
        let mut now = t0;
        for _ in 0..20 {
            now += 120 * MS;
            if app.advance(now) == Some(SnakeEvent::Won) {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(app.game().status(), Status::Won);
        assert_eq!(app.next_due(), None);
    }

    #[test]
    fn test_restart_rearms_tick() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.game.toggle_pause();
        app.advance(t0 + 10 * MS);
        assert_eq!(app.next_due(), None);
        app.restart(t0 + 20 * MS);
        assert_eq!(app.game().status(), Status::Running);
        assert_eq!(app.next_due(), Some(t0 + 140 * MS));
    }

    #[test]
    fn test_suspend_holds_the_board() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.suspend();
        assert_eq!(app.next_due(), None);
        assert_eq!(app.advance(t0 + 500 * MS), None);
        assert_eq!(app.game().head(), Cell::new(5, 5));

        app.wake(t0 + 600 * MS);
        assert_eq!(app.next_due(), Some(t0 + 720 * MS));
        app.advance(t0 + 720 * MS);
        assert_eq!(app.game().head(), Cell::new(6, 5));
    }
}
