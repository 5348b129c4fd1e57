//! Boot sequence: intro card, then a CRT switch-on, then the desktop
//!
//! The CRT part is three timed phases measured from its start: a horizontal
//! line grows for 400 ms, the line expands to a white screen until 1000 ms,
//! and the flash fades until 1500 ms. Each deadline is a [`Timeout`] owned by
//! the splash; once the desktop takes over the splash is dropped with them.

use egui::{Align2, Color32, FontId, Rect, Ui, Vec2};
use std::time::{Duration, Instant};
use visioncore::timer::Timeout;
use visioncore::widgets::PopButton;

pub const LINE_END: Duration = Duration::from_millis(400);
pub const EXPAND_END: Duration = Duration::from_millis(1000);
pub const FADE_END: Duration = Duration::from_millis(1500);
/// Time the line takes to open up into a full screen.
const EXPAND_GROW: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    Intro,
    Line,
    Expand,
    Fade,
    Done,
}

pub struct Splash {
    phase: SplashPhase,
    /// When the current phase began.
    phase_start: Instant,
    intro: Timeout,
    line: Timeout,
    expand: Timeout,
    fade: Timeout,
}

impl Splash {
    pub fn new(intro: Duration, now: Instant) -> Self {
        Self {
            phase: SplashPhase::Intro,
            phase_start: now,
            intro: Timeout::after(intro, now),
            line: Timeout::idle(),
            expand: Timeout::idle(),
            fade: Timeout::idle(),
        }
    }

    /// A splash that is already over.
    pub fn finished(now: Instant) -> Self {
        let mut splash = Self::new(Duration::ZERO, now);
        splash.skip();
        splash
    }

    pub fn is_done(&self) -> bool {
        self.phase == SplashPhase::Done
    }

    /// Jump straight to the desktop. Pending deadlines are cancelled.
    pub fn skip(&mut self) {
        for t in [&mut self.intro, &mut self.line, &mut self.expand, &mut self.fade] {
            t.cancel();
        }
        if self.phase != SplashPhase::Done {
            log::info!("[visiondesktop] intro skipped");
        }
        self.phase = SplashPhase::Done;
    }

    /// Advance through every phase whose deadline has passed.
    pub fn update(&mut self, now: Instant) -> SplashPhase {
        if self.intro.fire(now) {
            // CRT phases are timed from the frame that noticed the intro ended
            let start = now;
            self.phase = SplashPhase::Line;
            self.phase_start = start;
            self.line = Timeout::after(LINE_END, start);
            self.expand = Timeout::after(EXPAND_END, start);
            self.fade = Timeout::after(FADE_END, start);
        }
        if self.line.fire(now) {
            self.phase = SplashPhase::Expand;
        }
        if self.expand.fire(now) {
            self.phase = SplashPhase::Fade;
        }
        if self.fade.fire(now) {
            self.phase = SplashPhase::Done;
            log::debug!("[visiondesktop] boot sequence complete");
        }
        self.phase
    }

    pub fn next_due(&self) -> Option<Instant> {
        [&self.intro, &self.line, &self.expand, &self.fade]
            .into_iter()
            .filter_map(|t| t.next_due())
            .min()
    }

    /// Whether the frame needs animation-rate repaints (the CRT phases).
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, SplashPhase::Line | SplashPhase::Expand | SplashPhase::Fade)
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.phase_start)
    }

    /// Draw the current phase over `rect`. Returns `true` when SKIP_INTRO was
    /// clicked.
    pub fn ui(&self, ui: &mut Ui, rect: Rect, now: Instant) -> bool {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::BLACK);
        let t = self.elapsed(now);

        match self.phase {
            SplashPhase::Intro => {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "VISION OS",
                    FontId::monospace(48.0),
                    Color32::WHITE,
                );
                painter.text(
                    rect.center() + Vec2::new(0.0, 44.0),
                    Align2::CENTER_CENTER,
                    "v1.0",
                    FontId::monospace(16.0),
                    Color32::from_white_alpha(128),
                );
                let button = Rect::from_min_size(rect.right_bottom() - Vec2::new(140.0, 60.0), Vec2::new(110.0, 28.0));
                let skip = PopButton::new("SKIP_INTRO").fill(Color32::BLACK, Color32::from_white_alpha(160));
                return ui.put(button, skip).clicked();
            }
            SplashPhase::Line => {
                let p = fraction(t, LINE_END);
                let width = rect.width() * ease_out(p);
                let line = Rect::from_center_size(rect.center(), Vec2::new(width, 2.0));
                painter.rect_filled(line.expand(6.0), 0.0, Color32::from_white_alpha(40));
                painter.rect_filled(line, 0.0, Color32::WHITE);
            }
            SplashPhase::Expand => {
                let p = fraction(t.saturating_sub(LINE_END), EXPAND_GROW);
                let height = 2.0 + (rect.height() - 2.0) * ease_in_out(p);
                let band = Rect::from_center_size(rect.center(), Vec2::new(rect.width(), height));
                painter.rect_filled(band, 0.0, Color32::WHITE);
            }
            SplashPhase::Fade => {
                let p = fraction(t.saturating_sub(EXPAND_END), FADE_END - EXPAND_END);
                painter.rect_filled(rect, 0.0, Color32::from_white_alpha(((1.0 - p) * 255.0) as u8));
            }
            SplashPhase::Done => {}
        }
        false
    }
}

fn fraction(t: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (t.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_phase_timing() {
        let t0 = Instant::now();
        let mut splash = Splash::new(4000 * MS, t0);
        assert_eq!(splash.update(t0 + 3999 * MS), SplashPhase::Intro);
        let crt = t0 + 4000 * MS;
        assert_eq!(splash.update(crt), SplashPhase::Line);
        assert_eq!(splash.update(crt + 399 * MS), SplashPhase::Line);
        assert_eq!(splash.update(crt + 400 * MS), SplashPhase::Expand);
        assert_eq!(splash.update(crt + 999 * MS), SplashPhase::Expand);
        assert_eq!(splash.update(crt + 1000 * MS), SplashPhase::Fade);
        assert_eq!(splash.update(crt + 1500 * MS), SplashPhase::Done);
        assert_eq!(splash.next_due(), None);
    }

    #[test]
    fn test_next_due_tracks_earliest_deadline() {
        let t0 = Instant::now();
        let mut splash = Splash::new(4000 * MS, t0);
        assert_eq!(splash.next_due(), Some(t0 + 4000 * MS));
        splash.update(t0 + 4000 * MS);
        assert_eq!(splash.next_due(), Some(t0 + 4400 * MS));
        assert!(splash.is_animating());
    }

    #[test]
    fn test_skip_jumps_to_done() {
        let t0 = Instant::now();
        let mut splash = Splash::new(4000 * MS, t0);
        splash.skip();
        assert!(splash.is_done());
        assert_eq!(splash.next_due(), None);
        // Cancelled deadlines never drag it back
        assert_eq!(splash.update(t0 + 10_000 * MS), SplashPhase::Done);
    }

    #[test]
    fn test_skip_during_crt() {
        let t0 = Instant::now();
        let mut splash = Splash::new(Duration::ZERO, t0);
        assert_eq!(splash.update(t0), SplashPhase::Line);
        splash.skip();
        assert_eq!(splash.update(t0 + 500 * MS), SplashPhase::Done);
    }

    #[test]
    fn test_finished_splash() {
        assert!(Splash::finished(Instant::now()).is_done());
    }

    #[test]
    fn test_late_frame_runs_all_due_phases() {
        let t0 = Instant::now();
        let mut splash = Splash::new(Duration::ZERO, t0);
        splash.update(t0);
        assert_eq!(splash.update(t0 + 2000 * MS), SplashPhase::Done);
    }
}
