//! visionsnake: Snake.exe
//!
//! Twenty-by-twenty wrapping board, one move every 120 ms. Reaching a score
//! of ten wins the game, which the desktop uses to unlock the secret file.

pub mod app;
pub mod game;

pub use app::{SnakeApp, SnakeEvent, SnakeWindow};
pub use game::{GameSession, Heading, Status};
