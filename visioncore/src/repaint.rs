//! Repaint scheduling for the visionOS desktop
//!
//! egui is an immediate-mode GUI: it only runs `update()` when something
//! wakes it. Input always wakes it. Everything else on the desktop is
//! driven by timers (the clock, the snake tick, the mascot blink, the
//! splash phases, window transitions), and those need a wake-up at their
//! deadline or they would sit frozen until the mouse moves.
//!
//! `RepaintController` collects the deadlines that the frame's widgets
//! report and asks egui for exactly one repaint at the earliest of them.
//!
//! 1. **Input-driven**: user typed, clicked, or moved. egui wakes itself.
//! 2. **Deadline**: a timer is due at a known instant. Wake then.
//! 3. **Continuous**: an animation is in flight. Wake every frame interval.
//! 4. **Idle**: nothing scheduled. Do *not* repaint.

use std::time::{Duration, Instant};

/// Frame interval used while an animation is running (~60 Hz).
const ANIMATION_INTERVAL: Duration = Duration::from_millis(16);

/// Why this frame is being painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintReason {
    /// First frame: always paint.
    Init,
    /// User input (mouse move, key press, scroll).
    Input,
    /// A scheduled deadline came due.
    Deadline,
    /// Animation frame.
    Continuous,
}

/// Controls when the egui context should request repaints.
///
/// Drop this into your app struct and call [`RepaintController::begin_frame`]
/// at the top of `update()` and [`RepaintController::end_frame`] at the bottom.
pub struct RepaintController {
    /// Whether an animation is in flight this frame.
    continuous: bool,
    /// Earliest deadline reported during this frame.
    next_deadline: Option<Instant>,
    /// Deadline that was scheduled by the previous frame.
    scheduled: Option<Instant>,
    /// Frame counter (0 = first frame).
    frame: u64,
    /// Why the current frame is being painted (set by begin_frame).
    reason: RepaintReason,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            continuous: false,
            next_deadline: None,
            scheduled: None,
            frame: 0,
            reason: RepaintReason::Init,
        }
    }

    /// Keep repainting at animation rate until the end of this frame.
    /// Must be re-asserted every frame the animation is still running.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// Ask for a repaint no later than `deadline`.
    ///
    /// Several calls in one frame coalesce into the earliest one.
    pub fn schedule_at(&mut self, deadline: Instant) {
        self.next_deadline = Some(match self.next_deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
    }

    /// Like [`schedule_at`](Self::schedule_at) but for an optional deadline,
    /// which is convenient with timer `next_due()` accessors.
    pub fn schedule_opt(&mut self, deadline: Option<Instant>) {
        if let Some(deadline) = deadline {
            self.schedule_at(deadline);
        }
    }

    /// Earliest deadline reported so far this frame.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Returns why the current frame is being painted.
    pub fn reason(&self) -> RepaintReason {
        self.reason
    }

    /// Current frame counter.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Call at the **start** of your `update()` method.
    pub fn begin_frame(&mut self, ctx: &egui::Context) {
        let had_input = ctx.input(|i| {
            !i.events.is_empty()
                || i.pointer.any_pressed()
                || i.pointer.any_released()
                || i.pointer.is_moving()
        });
        self.reason = self.classify(had_input, Instant::now());
        self.continuous = false;
        self.next_deadline = None;
    }

    fn classify(&self, had_input: bool, now: Instant) -> RepaintReason {
        if self.frame == 0 {
            RepaintReason::Init
        } else if had_input {
            RepaintReason::Input
        } else if self.scheduled.map_or(false, |d| d <= now) {
            RepaintReason::Deadline
        } else if self.continuous {
            RepaintReason::Continuous
        } else {
            RepaintReason::Input
        }
    }

    /// Call at the **end** of your `update()` method.
    ///
    /// - Animation in flight → repaint after one animation interval.
    /// - Deadline pending → repaint when it comes due.
    /// - Otherwise → no repaint (egui will wake on next input event).
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        self.frame += 1;
        let now = Instant::now();
        match self.wake_after(now) {
            Some(delay) if delay.is_zero() => ctx.request_repaint(),
            Some(delay) => ctx.request_repaint_after(delay),
            None => {}
        }
        self.scheduled = self.next_deadline;
    }

    /// How long egui may sleep before the next frame, or `None` to sleep
    /// until input.
    pub fn wake_after(&self, now: Instant) -> Option<Duration> {
        let deadline = self
            .next_deadline
            .map(|d| d.saturating_duration_since(now));
        match (self.continuous, deadline) {
            (true, Some(d)) => Some(d.min(ANIMATION_INTERVAL)),
            (true, None) => Some(ANIMATION_INTERVAL),
            (false, d) => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frame_sleeps() {
        let rc = RepaintController::new();
        assert_eq!(rc.wake_after(Instant::now()), None);
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let now = Instant::now();
        let mut rc = RepaintController::new();
        rc.schedule_at(now + Duration::from_secs(1));
        rc.schedule_at(now + Duration::from_millis(120));
        rc.schedule_opt(None);
        rc.schedule_opt(Some(now + Duration::from_secs(3)));
        assert_eq!(rc.wake_after(now), Some(Duration::from_millis(120)));
    }

    #[test]
    fn test_overdue_deadline_wakes_immediately() {
        let now = Instant::now();
        let mut rc = RepaintController::new();
        rc.schedule_at(now);
        assert_eq!(rc.wake_after(now + Duration::from_millis(5)), Some(Duration::ZERO));
    }

    #[test]
    fn test_continuous_caps_sleep() {
        let now = Instant::now();
        let mut rc = RepaintController::new();
        rc.set_continuous(true);
        assert_eq!(rc.wake_after(now), Some(ANIMATION_INTERVAL));
        rc.schedule_at(now + Duration::from_secs(1));
        assert_eq!(rc.wake_after(now), Some(ANIMATION_INTERVAL));
    }
}
