//! In-memory collaborators. They record what the game asked for instead of
//! touching a terminal, a sound device or the clock.

use std::collections::VecDeque;
use std::time::Duration;

use crate::board::Coord;
use crate::error::Result;
use crate::frontend::{
    Anchor, Audio, Clip, Color, InputEvent, InputSource, Pacer, Renderer, Track,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Rect { x: Coord, y: Coord, size: Coord, color: Color },
    Text { text: String, color: Color, anchor: Anchor },
}

/// Screen that keeps every presented frame and replays scripted input.
#[derive(Debug, Default)]
pub struct HeadlessScreen {
    pending: Vec<DrawCall>,
    pub frames: Vec<Vec<DrawCall>>,
    script: VecDeque<Vec<InputEvent>>,
}

impl HeadlessScreen {
    /// Each inner vec is what one poll returns.
    pub fn scripted(batches: Vec<Vec<InputEvent>>) -> Self {
        HeadlessScreen { script: batches.into(), ..Default::default() }
    }

    pub fn last_frame(&self) -> Option<&[DrawCall]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// All text drawn in presented frames, in order.
    pub fn texts(&self) -> Vec<String> {
        self.frames
            .iter()
            .flatten()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.clone()),
                DrawCall::Rect { .. } => None,
            })
            .collect()
    }
}

impl Renderer for HeadlessScreen {
    fn clear_frame(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn draw_rect(&mut self, x: Coord, y: Coord, size: Coord, color: Color) -> Result<()> {
        self.pending.push(DrawCall::Rect { x, y, size, color });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, color: Color, anchor: Anchor) -> Result<()> {
        self.pending.push(DrawCall::Text { text: text.to_string(), color, anchor });
        Ok(())
    }

    fn present_frame(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

impl InputSource for HeadlessScreen {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        Ok(self.script.pop_front().unwrap_or_default())
    }

    /// Once the script runs dry this reports `Quit`, so a driven game always ends.
    fn wait_event(&mut self) -> Result<InputEvent> {
        while let Some(mut batch) = self.script.pop_front() {
            if batch.is_empty() {
                continue;
            }
            let event = batch.remove(0);
            if !batch.is_empty() {
                self.script.push_front(batch);
            }
            return Ok(event);
        }
        Ok(InputEvent::Quit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Loop(Track),
    StopLoop,
    Once(Clip),
}

#[derive(Debug, Default)]
pub struct AudioLog {
    pub played: Vec<Sound>,
}

impl AudioLog {
    pub fn count(&self, clip: Clip) -> usize {
        self.played.iter().filter(|s| **s == Sound::Once(clip)).count()
    }
}

impl Audio for AudioLog {
    fn play_loop(&mut self, track: Track) {
        self.played.push(Sound::Loop(track));
    }

    fn stop_loop(&mut self) {
        self.played.push(Sound::StopLoop);
    }

    fn play_once(&mut self, clip: Clip) {
        self.played.push(Sound::Once(clip));
    }
}

/// Pacer that never sleeps.
#[derive(Debug, Default)]
pub struct ManualPacer {
    pub ticks: Vec<u32>,
    pub holds: Vec<Duration>,
}

impl Pacer for ManualPacer {
    fn wait_for_tick(&mut self, rate: u32) {
        self.ticks.push(rate);
    }

    fn hold(&mut self, duration: Duration) {
        self.holds.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::InputEvent::*;

    #[test]
    fn wait_skips_empty_batches_and_ends_with_quit() {
        let mut screen = HeadlessScreen::scripted(vec![vec![], vec![KeyUp, KeyConfirm]]);
        assert_eq!(screen.wait_event().unwrap(), KeyUp);
        assert_eq!(screen.wait_event().unwrap(), KeyConfirm);
        assert_eq!(screen.wait_event().unwrap(), Quit);
    }

    #[test]
    fn only_presented_frames_are_kept() {
        let mut screen = HeadlessScreen::default();
        screen.clear_frame().unwrap();
        screen.draw_text("hello", Color::White, Anchor::TopLeft).unwrap();
        assert!(screen.frames.is_empty());
        screen.present_frame().unwrap();
        assert_eq!(screen.texts(), vec!["hello".to_string()]);
    }
}
