//! visioncore: shared library for the visionOS desktop and its applications

pub mod animation;
pub mod repaint;
pub mod safety;
pub mod storage;
pub mod theme;
pub mod timer;
pub mod widgets;

pub use repaint::RepaintController;
pub use theme::VisionTheme;
