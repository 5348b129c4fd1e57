//! visionpaint: freehand paint canvas
//!
//! Pencil and eraser over a white bitmap, a seven-color palette and a clear
//! button. Hosted by the desktop inside a window, or run on its own.

pub mod app;
pub mod canvas;
pub mod tools;

pub use app::PaintApp;
