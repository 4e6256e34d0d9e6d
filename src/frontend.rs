//! The narrow interfaces the game talks to: drawing, input, sound, frame
//! pacing and score persistence are all reached through these traits.

use std::time::Duration;

use crate::board::Coord;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
}

/// Where a line of text goes on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered horizontally, `dy` lines away from the vertical middle.
    Center { dy: i16 },
    TopLeft,
    TopRight,
}

pub trait Renderer {
    fn clear_frame(&mut self) -> Result<()>;
    fn draw_rect(&mut self, x: Coord, y: Coord, size: Coord, color: Color) -> Result<()>;
    fn draw_text(&mut self, text: &str, color: Color, anchor: Anchor) -> Result<()>;
    fn present_frame(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Leave the program right away.
    Quit,
    KeyUp,
    KeyDown,
    KeyLeft,
    KeyRight,
    KeyConfirm,
    KeyCancel,
    /// Any key without a binding.
    KeyOther,
}

pub trait InputSource {
    /// Everything that arrived since the last poll. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
    /// Blocks until the next event.
    fn wait_event(&mut self) -> Result<InputEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    Food,
    BonusFood,
    GameOver,
    PowerUp,
}

impl Track {
    pub const ALL: [Track; 1] = [Track::Background];

    pub fn file_name(self) -> &'static str {
        match self {
            Track::Background => "Retro-game-arcade-short.mp3",
        }
    }
}

impl Clip {
    pub const ALL: [Clip; 4] = [Clip::Food, Clip::BonusFood, Clip::GameOver, Clip::PowerUp];

    pub fn file_name(self) -> &'static str {
        match self {
            Clip::Food => "food_sound.wav",
            Clip::BonusFood => "bonus_food_sound.wav",
            Clip::GameOver => "game_over_sound.wav",
            Clip::PowerUp => "power_up_sound.wav",
        }
    }
}

/// Fire-and-forget sound output.
pub trait Audio {
    fn play_loop(&mut self, track: Track);
    fn stop_loop(&mut self);
    fn play_once(&mut self, clip: Clip);
}

pub trait Pacer {
    /// Waits until the next tick boundary at `rate` ticks per second.
    fn wait_for_tick(&mut self, rate: u32);
    fn hold(&mut self, duration: Duration);
}

/// Ordered list of past scores.
pub trait ScoreStore {
    /// Never fails: a missing or unreadable store reads as empty.
    fn load(&self) -> Vec<u32>;
    /// Replaces the stored list.
    fn save(&mut self, scores: &[u32]) -> Result<()>;
}

/// Every collaborator one run of the game needs.
pub struct Io<T, A, S, C> {
    pub screen: T,
    pub audio: A,
    pub scores: S,
    pub pacer: C,
}
