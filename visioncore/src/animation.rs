//! Window transitions for visionOS
//!
//! Minimizing and restoring a window runs a short "zoom" made of a few
//! trailing rectangle outlines that travel between the window and the
//! taskbar. The window itself is already out of (or back in) the layout;
//! the transition is drawn on its own layer on top.
//!
//! Transitions are keyed by window id. Starting a new transition for an
//! id replaces the running one, so hammering the minimize button never
//! leaves two ghosts of the same window on screen.

use egui::{Color32, Painter, Pos2, Rect, Stroke};

/// Duration of the exit (minimize) transition in seconds.
pub const EXIT_DURATION: f32 = 0.3;

/// Duration of the enter (restore) transition in seconds.
pub const ENTER_DURATION: f32 = 0.2;

/// Number of rectangle outlines drawn per transition
pub const TRANSITION_STEPS: usize = 4;

/// Direction of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Window leaving the layout (minimize): shrinks toward the taskbar
    Exit,
    /// Window returning to the layout (restore): grows from the taskbar
    Enter,
}

impl TransitionKind {
    pub fn duration(self) -> f32 {
        match self {
            TransitionKind::Exit => EXIT_DURATION,
            TransitionKind::Enter => ENTER_DURATION,
        }
    }
}

/// State of an active transition
#[derive(Debug, Clone)]
pub struct Transition {
    pub kind: TransitionKind,
    /// Rectangle at progress 0
    pub start_rect: Rect,
    /// Rectangle at progress 1
    pub end_rect: Rect,
    /// 0.0 to 1.0
    pub progress: f32,
    /// Window this transition belongs to
    pub window_id: String,
}

impl Transition {
    pub fn exit(window_rect: Rect, dock_rect: Rect, window_id: String) -> Self {
        Self {
            kind: TransitionKind::Exit,
            start_rect: window_rect,
            end_rect: dock_rect,
            progress: 0.0,
            window_id,
        }
    }

    pub fn enter(dock_rect: Rect, window_rect: Rect, window_id: String) -> Self {
        Self {
            kind: TransitionKind::Enter,
            start_rect: dock_rect,
            end_rect: window_rect,
            progress: 0.0,
            window_id,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.progress = (self.progress + dt / self.kind.duration()).min(1.0);
    }

    pub fn completed(&self) -> bool {
        self.progress >= 1.0
    }

    /// Interpolated rectangle for outline `step`; later steps trail behind.
    pub fn step_rect(&self, step: usize) -> Rect {
        let step_offset = (step as f32) / (TRANSITION_STEPS as f32) * 0.15;
        let t = (self.progress - step_offset).clamp(0.0, 1.0);
        lerp_rect(self.start_rect, self.end_rect, ease_out_quad(t))
    }

    pub fn draw(&self, painter: &Painter) {
        // Fade the outlines as the exit completes
        let alpha = match self.kind {
            TransitionKind::Exit => 1.0 - self.progress * 0.7,
            TransitionKind::Enter => 0.3 + self.progress * 0.7,
        };
        let color = Color32::BLACK.gamma_multiply(alpha);
        for step in 0..TRANSITION_STEPS {
            painter.rect_stroke(self.step_rect(step), 0.0, Stroke::new(2.0, color));
        }
    }
}

/// Tracks all running transitions
#[derive(Debug, Default)]
pub struct TransitionManager {
    transitions: Vec<Transition>,
}

impl TransitionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transition, replacing any running one for the same window.
    pub fn start(&mut self, transition: Transition) {
        self.transitions.retain(|t| t.window_id != transition.window_id);
        self.transitions.push(transition);
    }

    /// Drop any transition for a window (used when it closes).
    pub fn cancel(&mut self, window_id: &str) {
        self.transitions.retain(|t| t.window_id != window_id);
    }

    /// Advance all transitions; finished ones are removed.
    pub fn update(&mut self, dt: f32) {
        for t in &mut self.transitions {
            t.update(dt);
        }
        self.transitions.retain(|t| !t.completed());
    }

    pub fn draw(&self, painter: &Painter) {
        for t in &self.transitions {
            t.draw(painter);
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub fn is_window_animating(&self, window_id: &str) -> bool {
        self.transitions.iter().any(|t| t.window_id == window_id)
    }

    pub fn kind_for(&self, window_id: &str) -> Option<TransitionKind> {
        self.transitions
            .iter()
            .find(|t| t.window_id == window_id)
            .map(|t| t.kind)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

fn lerp_rect(a: Rect, b: Rect, t: f32) -> Rect {
    Rect::from_min_max(
        Pos2::new(lerp(a.min.x, b.min.x, t), lerp(a.min.y, b.min.y, t)),
        Pos2::new(lerp(a.max.x, b.max.x, t), lerp(a.max.y, b.max.y, t)),
    )
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}
