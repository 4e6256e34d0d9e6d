pub mod audio;
pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod frontend;
pub mod game;
pub mod headless;
pub mod items;
pub mod menu;
pub mod scores;
pub mod scoring;
pub mod snake;
pub mod term;
pub mod timers;

pub use error::{GameError, Result};
