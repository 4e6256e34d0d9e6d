//! Title menu, high-score screen and the loop that moves between them and
//! play sessions.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::board::Board;
use crate::error::Result;
use crate::frontend::{
    Anchor, Audio, Color, InputEvent, InputSource, Io, Pacer, Renderer, ScoreStore, Track,
};
use crate::game::{play, Exit, Game};
use crate::scores::{top_scores, TOP_SCORES};

const TITLE: &str = "Enhanced Snake Game";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    HighScores,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Start, MenuItem::HighScores, MenuItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "Start Game",
            MenuItem::HighScores => "High Scores",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug, Default)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    /// Moves the selection (wrapping at both ends). Returns the chosen item on confirm.
    pub fn handle(&mut self, event: InputEvent) -> Option<MenuItem> {
        let len = MenuItem::ALL.len();
        match event {
            InputEvent::KeyUp => self.selected = (self.selected + len - 1) % len,
            InputEvent::KeyDown => self.selected = (self.selected + 1) % len,
            InputEvent::KeyConfirm => return Some(self.selected()),
            _ => {}
        }
        None
    }

    pub fn draw<D: Renderer>(&self, screen: &mut D) -> Result<()> {
        screen.clear_frame()?;
        screen.draw_text(TITLE, Color::Green, Anchor::Center { dy: -4 })?;
        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let color = if i == self.selected { Color::White } else { Color::Green };
            screen.draw_text(item.label(), color, Anchor::Center { dy: i as i16 * 2 })?;
        }
        screen.present_frame()
    }
}

/// Shows the best scores and waits for any key.
pub fn show_high_scores<T, S>(screen: &mut T, store: &S) -> Result<Exit>
where
    T: Renderer + InputSource,
    S: ScoreStore,
{
    let top = top_scores(&store.load(), TOP_SCORES);

    screen.clear_frame()?;
    screen.draw_text("High Scores", Color::Green, Anchor::Center { dy: -4 })?;
    for (i, score) in top.iter().enumerate() {
        let line = format!("{}. {}", i + 1, score);
        screen.draw_text(&line, Color::White, Anchor::Center { dy: i as i16 - 2 })?;
    }
    screen.present_frame()?;

    match screen.wait_event()? {
        InputEvent::Quit => Ok(Exit::Quit),
        _ => Ok(Exit::ToMenu),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MenuActive,
    HighScoresActive,
    Playing,
    Terminated,
}

/// Top-level controller: menu, high scores and play sessions.
pub struct App<T, A, S, C> {
    io: Io<T, A, S, C>,
    board: Board,
    base_rate: u32,
    rng: StdRng,
    menu: Menu,
    state: Screen,
}

impl<T, A, S, C> App<T, A, S, C>
where
    T: Renderer + InputSource,
    A: Audio,
    S: ScoreStore,
    C: Pacer,
{
    pub fn new(io: Io<T, A, S, C>, board: Board, base_rate: u32, rng: StdRng) -> Self {
        App { io, board, base_rate, rng, menu: Menu::default(), state: Screen::MenuActive }
    }

    pub fn state(&self) -> Screen {
        self.state
    }

    pub fn io(&self) -> &Io<T, A, S, C> {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut Io<T, A, S, C> {
        &mut self.io
    }

    pub fn run(&mut self) -> Result<()> {
        while self.state != Screen::Terminated {
            self.step()?;
        }
        info!("leaving");
        Ok(())
    }

    /// Runs the current screen until it hands over to the next one.
    pub fn step(&mut self) -> Result<Screen> {
        self.state = match self.state {
            Screen::MenuActive => {
                self.menu.draw(&mut self.io.screen)?;
                match self.io.screen.wait_event()? {
                    InputEvent::Quit => Screen::Terminated,
                    event => match self.menu.handle(event) {
                        Some(MenuItem::Start) => Screen::Playing,
                        Some(MenuItem::HighScores) => Screen::HighScoresActive,
                        Some(MenuItem::Quit) => Screen::Terminated,
                        None => Screen::MenuActive,
                    },
                }
            }
            Screen::HighScoresActive => {
                match show_high_scores(&mut self.io.screen, &self.io.scores)? {
                    Exit::ToMenu => Screen::MenuActive,
                    Exit::Quit => Screen::Terminated,
                }
            }
            Screen::Playing => {
                let rng = StdRng::seed_from_u64(self.rng.gen());
                let mut game = Game::new(self.board, self.base_rate, rng);

                self.io.audio.play_loop(Track::Background);
                let exit = play(&mut game, &mut self.io)?;
                self.io.audio.stop_loop();

                match exit {
                    Exit::ToMenu => Screen::MenuActive,
                    Exit::Quit => Screen::Terminated,
                }
            }
            Screen::Terminated => Screen::Terminated,
        };
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::InputEvent::*;
    use crate::headless::{DrawCall, HeadlessScreen};
    use crate::scores::MemoryScoreStore;

    #[test]
    fn selection_wraps_both_ways() {
        let mut menu = Menu::default();
        assert_eq!(menu.selected(), MenuItem::Start);
        assert_eq!(menu.handle(KeyUp), None);
        assert_eq!(menu.selected(), MenuItem::Quit);
        menu.handle(KeyDown);
        assert_eq!(menu.selected(), MenuItem::Start);
        menu.handle(KeyDown);
        assert_eq!(menu.handle(KeyConfirm), Some(MenuItem::HighScores));
    }

    #[test]
    fn high_scores_show_top_five_descending() {
        let store = MemoryScoreStore { scores: vec![10, 80, 30, 120, 50, 20, 60] };
        let mut screen = HeadlessScreen::scripted(vec![vec![KeyOther]]);
        assert_eq!(show_high_scores(&mut screen, &store).unwrap(), Exit::ToMenu);

        let texts = screen.texts();
        assert_eq!(texts, vec!["High Scores", "1. 120", "2. 80", "3. 60", "4. 50", "5. 30"]);
    }

    #[test]
    fn quit_on_high_scores_ends_everything() {
        let store = MemoryScoreStore::default();
        let mut screen = HeadlessScreen::scripted(vec![vec![Quit]]);
        assert_eq!(show_high_scores(&mut screen, &store).unwrap(), Exit::Quit);
    }

    #[test]
    fn menu_highlights_selection() {
        let mut menu = Menu::default();
        menu.handle(KeyDown);
        let mut screen = HeadlessScreen::default();
        menu.draw(&mut screen).unwrap();

        let frame = screen.last_frame().unwrap();
        let highlighted: Vec<_> = frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, color: Color::White, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(highlighted, vec!["High Scores"]);
    }
}
