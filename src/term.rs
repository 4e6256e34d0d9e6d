use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read, poll};
use tracing::warn;

use crate::board::{Board, Coord};
use crate::config::{BLOCK_SIZE, BOARD_COLS, BOARD_ROWS};
use crate::error::Result;
use crate::frontend::{Anchor, Color, InputEvent, InputSource, Renderer};

type TermInt = u16;

const BLOCK_CHAR: char = '\u{2588}';
const BLOCK_WIDTH: TermInt = 2;
// HUD line plus the top and bottom border.
const CHROME_ROWS: TermInt = 3;
const CHROME_COLS: TermInt = 2;

/// Largest board (up to the default size) that fits a terminal of this size.
pub fn fit_board(term_width: TermInt, term_height: TermInt) -> Board {
    let cols = (term_width.saturating_sub(CHROME_COLS) / BLOCK_WIDTH).min(BOARD_COLS);
    let rows = term_height.saturating_sub(CHROME_ROWS).min(BOARD_ROWS);
    Board::new(cols, rows, BLOCK_SIZE)
}

pub fn map_key(ev: &KeyEvent) -> InputEvent {
    if is_ctrl_c(ev) {
        return InputEvent::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => InputEvent::KeyUp,
        KeyCode::Char('a') | KeyCode::Left => InputEvent::KeyLeft,
        KeyCode::Char('s') | KeyCode::Down => InputEvent::KeyDown,
        KeyCode::Char('d') | KeyCode::Right => InputEvent::KeyRight,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') => InputEvent::KeyConfirm,
        KeyCode::Esc | KeyCode::Char('q') => InputEvent::KeyCancel,
        _ => InputEvent::KeyOther,
    }
}

/// Top-left corner that centres a `width` x `height` area in the terminal.
fn centered_origin(
    term: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
) -> (TermInt, TermInt) {
    (term.0.saturating_sub(width) / 2, term.1.saturating_sub(height) / 2)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Black };

/// Draws frames into a back buffer and writes only the changed cells to the
/// terminal when a frame is presented.
pub struct TermManager {
    board: Board,
    width: TermInt,
    height: TermInt,
    origin: (TermInt, TermInt),
    stdout: Stdout,
    back: Vec<Glyph>,
    front: Vec<Option<Glyph>>,
}

impl TermManager {
    pub fn new(board: Board) -> Result<Self> {
        let width = board.cols() * BLOCK_WIDTH + CHROME_COLS;
        let height = board.rows() + CHROME_ROWS;
        let size = width as usize * height as usize;

        let mut term = TermManager {
            board,
            width,
            height,
            origin: (0, 0),
            stdout: stdout(),
            back: vec![BLANK; size],
            front: vec![None; size],
        };
        let (w, h) = terminal::size()?;
        term.resize(w, h);
        Ok(term)
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        execute!(self.stdout, style::ResetColor, LeaveAlternateScreen)?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn resize(&mut self, term_width: TermInt, term_height: TermInt) {
        self.origin = centered_origin((term_width, term_height), self.width, self.height);
        // Everything has to be written again at the new position.
        self.front.iter_mut().for_each(|g| *g = None);
        if let Err(e) = execute!(self.stdout, terminal::Clear(ClearType::All)) {
            warn!(error = %e, "could not clear the screen after a resize");
        }
    }

    fn put(&mut self, x: TermInt, y: TermInt, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.back[self.width as usize * y as usize + x as usize] = glyph;
        }
    }

    fn draw_borders(&mut self) {
        let (end_x, top, bottom) = (self.width - 1, 1, self.height - 1);
        let border = |ch| Glyph { ch, color: Color::White };

        for x in 0..self.width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.put(x, top, border(ch));
            self.put(x, bottom, border(ch));
        }

        for y in top + 1..bottom {
            self.put(0, y, border('|'));
            self.put(end_x, y, border('|'));
        }
    }

    fn map_event(&mut self, ev: Event) -> Option<InputEvent> {
        match ev {
            Event::Key(key) => Some(map_key(&key)),
            Event::Resize(w, h) => {
                self.resize(w, h);
                None
            }
            _ => None,
        }
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        if option {
            terminal::enable_raw_mode()?;
        } else {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        if option {
            execute!(self.stdout, cursor::Show)?;
        } else {
            execute!(self.stdout, cursor::Hide)?;
        }
        Ok(())
    }
}

impl Renderer for TermManager {
    fn clear_frame(&mut self) -> Result<()> {
        self.back.iter_mut().for_each(|g| *g = BLANK);
        self.draw_borders();
        Ok(())
    }

    fn draw_rect(&mut self, x: Coord, y: Coord, size: Coord, color: Color) -> Result<()> {
        if size <= 0 || x < 0 || y < 0 {
            return Ok(());
        }
        let (col, row) = (x / size, y / size);
        if col >= self.board.cols() as Coord || row >= self.board.rows() as Coord {
            return Ok(());
        }

        let tx = 1 + col as TermInt * BLOCK_WIDTH;
        let ty = 2 + row as TermInt;
        for dx in 0..BLOCK_WIDTH {
            self.put(tx + dx, ty, Glyph { ch: BLOCK_CHAR, color });
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, color: Color, anchor: Anchor) -> Result<()> {
        let len = text.chars().count().min(self.width as usize) as TermInt;
        let (x, y) = match anchor {
            Anchor::TopLeft => (1, 0),
            Anchor::TopRight => (self.width.saturating_sub(len + 1), 0),
            Anchor::Center { dy } => {
                let y = (self.height / 2) as i32 + dy as i32;
                ((self.width - len) / 2, y.max(0) as TermInt)
            }
        };

        for (i, ch) in text.chars().take(len as usize).enumerate() {
            self.put(x + i as TermInt, y, Glyph { ch, color });
        }
        Ok(())
    }

    fn present_frame(&mut self) -> Result<()> {
        for i in 0..self.back.len() {
            let glyph = self.back[i];
            if self.front[i] == Some(glyph) {
                continue;
            }
            let x = self.origin.0 + (i % self.width as usize) as TermInt;
            let y = self.origin.1 + (i / self.width as usize) as TermInt;
            queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                style::SetForegroundColor(term_color(glyph.color)),
                style::Print(glyph.ch)
            )?;
            self.front[i] = Some(glyph);
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl InputSource for TermManager {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Some(ev) = self.map_event(read()?) {
                events.push(ev);
            }
        }

        Ok(events)
    }

    fn wait_event(&mut self) -> Result<InputEvent> {
        loop {
            if let Some(ev) = self.map_event(read()?) {
                return Ok(ev);
            }
        }
    }
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::White => style::Color::White,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Blue => style::Color::Blue,
        Color::Yellow => style::Color::Yellow,
        Color::Orange => style::Color::Rgb { r: 255, g: 165, b: 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keys_map_to_game_events() {
        assert_eq!(map_key(&key(KeyCode::Up, KeyModifiers::NONE)), InputEvent::KeyUp);
        assert_eq!(map_key(&key(KeyCode::Char('a'), KeyModifiers::NONE)), InputEvent::KeyLeft);
        assert_eq!(map_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)), InputEvent::KeyConfirm);
        assert_eq!(map_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), InputEvent::Quit);
        assert_eq!(map_key(&key(KeyCode::Esc, KeyModifiers::NONE)), InputEvent::KeyCancel);
        assert_eq!(map_key(&key(KeyCode::Char('x'), KeyModifiers::NONE)), InputEvent::KeyOther);
    }

    #[test]
    fn frame_is_centred_and_pinned_to_the_corner_when_too_big() {
        assert_eq!(centered_origin((100, 40), 82, 33), (9, 3));
        assert_eq!(centered_origin((80, 24), 82, 33), (0, 0));
        assert_eq!(centered_origin((82, 33), 82, 33), (0, 0));
    }

    #[test]
    fn board_fits_small_terminals() {
        let board = fit_board(80, 24);
        assert_eq!(board.cols(), 39);
        assert_eq!(board.rows(), 21);

        let large = fit_board(200, 60);
        assert_eq!(large.cols(), BOARD_COLS);
        assert_eq!(large.rows(), BOARD_ROWS);
    }
}
