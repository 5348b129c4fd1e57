//! The CRT mascot in the bottom-right corner
//!
//! Its pupils follow the pointer and it blinks at random intervals. Purely
//! decorative: it never takes input.

use egui::{Color32, Painter, Pos2, Rect, Rounding, Stroke, Vec2};
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use visioncore::theme::PopColors;
use visioncore::timer::{JitterTimer, Timeout};

pub const FIRST_BLINK: Duration = Duration::from_millis(3000);
pub const BLINK_MIN: Duration = Duration::from_millis(2000);
pub const BLINK_MAX: Duration = Duration::from_millis(6000);
pub const BLINK_LENGTH: Duration = Duration::from_millis(150);
/// Furthest a pupil may travel from the eye center, in pixels.
pub const PUPIL_REACH: f32 = 4.0;

pub const SIZE: f32 = 128.0;
const EYE_SIZE: Vec2 = Vec2::new(24.0, 32.0);
const EYE_GAP: f32 = 16.0;

/// Pupil displacement for an eye at `eye` looking at `pointer`:
/// `min(4, distance / 10)` along the direction to the pointer.
pub fn pupil_offset(eye: Pos2, pointer: Pos2) -> Vec2 {
    let delta = pointer - eye;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let reach = (distance / 10.0).min(PUPIL_REACH);
    delta / distance * reach
}

pub struct Mascot {
    blink: JitterTimer,
    open_eyes: Timeout,
    rng: StdRng,
}

impl Mascot {
    pub fn new(rng: StdRng, now: Instant) -> Self {
        Self {
            blink: JitterTimer::new(FIRST_BLINK, BLINK_MIN..BLINK_MAX, now),
            open_eyes: Timeout::idle(),
            rng,
        }
    }

    pub fn update(&mut self, now: Instant) {
        if self.blink.fire(now, &mut self.rng) {
            self.open_eyes = Timeout::after(BLINK_LENGTH, now);
        }
        self.open_eyes.fire(now);
    }

    pub fn is_blinking(&self) -> bool {
        self.open_eyes.is_pending()
    }

    pub fn next_due(&self) -> Instant {
        match self.open_eyes.next_due() {
            Some(open) => open.min(self.blink.next_due()),
            None => self.blink.next_due(),
        }
    }

    /// Where the mascot sits on a desktop of the given area.
    pub fn rect_in(area: Rect) -> Rect {
        Rect::from_min_size(area.right_bottom() - Vec2::new(32.0 + SIZE, 32.0 + SIZE), Vec2::splat(SIZE))
    }

    fn eye_centers(screen: Rect) -> [Pos2; 2] {
        let dx = (EYE_SIZE.x + EYE_GAP) / 2.0;
        [screen.center() - Vec2::new(dx, 0.0), screen.center() + Vec2::new(dx, 0.0)]
    }

    pub fn draw(&self, painter: &Painter, rect: Rect, pointer: Option<Pos2>) {
        let housing_color = Color32::from_gray(0xe0);
        let shadow = Color32::from_black_alpha(128);

        // Stand
        let stand = Rect::from_center_size(rect.center_bottom() + Vec2::new(0.0, 6.0), Vec2::new(64.0, 16.0));
        painter.rect_filled(stand.translate(Vec2::splat(4.0)), 4.0, shadow);
        painter.rect_filled(stand, Rounding { nw: 0.0, ne: 0.0, sw: 6.0, se: 6.0 }, PopColors::GRAY);
        painter.rect_stroke(stand, Rounding { nw: 0.0, ne: 0.0, sw: 6.0, se: 6.0 }, Stroke::new(3.0, PopColors::BLACK));

        // Housing, bezel, screen
        painter.rect_filled(rect.translate(Vec2::splat(4.0)), 8.0, shadow);
        painter.rect_filled(rect, 8.0, housing_color);
        painter.rect_stroke(rect, 8.0, Stroke::new(3.0, PopColors::BLACK));
        let bezel = rect.shrink(8.0);
        painter.rect_filled(bezel, 4.0, Color32::from_gray(0xa0));
        painter.rect_stroke(bezel, 4.0, Stroke::new(2.0, PopColors::BLACK));
        let screen = bezel.shrink(4.0);
        painter.rect_filled(screen, 0.0, Color32::from_gray(0x2b));
        painter.rect_stroke(screen, 0.0, Stroke::new(2.0, PopColors::BLACK));

        for center in Self::eye_centers(screen) {
            if self.is_blinking() {
                let lid = Rect::from_center_size(center, Vec2::new(EYE_SIZE.x, 2.0));
                painter.rect_filled(lid, 0.0, PopColors::LIME);
                continue;
            }
            let eye = Rect::from_center_size(center, EYE_SIZE);
            painter.rect_filled(eye, EYE_SIZE.x / 2.0, PopColors::BLACK);
            let offset = pointer.map_or(Vec2::ZERO, |p| pupil_offset(center, p));
            let pupil = center + offset;
            painter.circle_filled(pupil, 6.0, PopColors::LIME.gamma_multiply(0.3));
            painter.circle_filled(pupil, 4.0, PopColors::LIME);
        }

        // Scanlines
        let mut y = screen.top() + 2.0;
        while y < screen.bottom() {
            painter.hline(screen.x_range(), y, Stroke::new(1.0, Color32::from_black_alpha(32)));
            y += 4.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_pupil_offset_clamped() {
        let eye = Pos2::new(100.0, 100.0);
        let far = pupil_offset(eye, Pos2::new(400.0, 100.0));
        assert!((far - Vec2::new(4.0, 0.0)).length() < 1e-4);
        let near = pupil_offset(eye, Pos2::new(100.0, 120.0));
        assert!((near - Vec2::new(0.0, 2.0)).length() < 1e-4);
        assert_eq!(pupil_offset(eye, eye), Vec2::ZERO);
        let diagonal = pupil_offset(eye, Pos2::new(0.0, 0.0));
        assert!((diagonal.length() - 4.0).abs() < 1e-4);
        assert!(diagonal.x < 0.0 && diagonal.y < 0.0);
    }

    #[test]
    fn test_first_blink_after_three_seconds() {
        let t0 = Instant::now();
        let mut mascot = Mascot::new(StdRng::seed_from_u64(3), t0);
        mascot.update(t0 + 2999 * MS);
        assert!(!mascot.is_blinking());
        mascot.update(t0 + 3000 * MS);
        assert!(mascot.is_blinking());
        mascot.update(t0 + 3149 * MS);
        assert!(mascot.is_blinking());
        mascot.update(t0 + 3150 * MS);
        assert!(!mascot.is_blinking());
    }

    #[test]
    fn test_blink_intervals_stay_in_range() {
        let t0 = Instant::now();
        let mut mascot = Mascot::new(StdRng::seed_from_u64(11), t0);
        let mut now = t0 + FIRST_BLINK;
        mascot.update(now);
        for _ in 0..40 {
            let next = mascot.blink.next_due();
            let gap = next - now;
            assert!(gap >= BLINK_MIN && gap < BLINK_MAX, "gap {:?}", gap);
            // While the lid is down the next wake-up is the reopening
            assert_eq!(mascot.next_due(), now + BLINK_LENGTH);
            now = next;
            mascot.update(now);
            assert!(mascot.is_blinking());
        }
    }
}
