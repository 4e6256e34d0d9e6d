use std::collections::VecDeque;

use crate::board::{Board, Cell, Coord};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Velocity for one tick on a board with the given block size.
    pub fn delta(self, block: Coord) -> (Coord, Coord) {
        match self {
            Up => (0, -block),
            Down => (0, block),
            Left => (-block, 0),
            Right => (block, 0),
        }
    }
}

/// Snake body, oldest cell first and head last.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    length: usize,
    heading: Option<Direction>,
}

impl Snake {
    /// A one-cell snake that stays put until it is steered.
    pub fn new(head: Cell) -> Self {
        Snake { body: VecDeque::from(vec![head]), length: 1, heading: None }
    }

    /// Builds a snake from explicit cells (tail first). The target length is
    /// the number of cells given.
    pub fn from_cells(cells: Vec<Cell>, heading: Option<Direction>) -> Self {
        let length = cells.len().max(1);
        Snake { body: cells.into(), length, heading }
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Length the body is trimmed to on every move.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    /// Returns true if the heading changed. Reversals are ignored.
    pub fn steer(&mut self, new_direction: Direction) -> bool {
        match self.heading {
            Some(current) if current == new_direction || current == new_direction.opposite() => {
                false
            }
            _ => {
                self.heading = Some(new_direction);
                true
            }
        }
    }

    /// Where the head goes next. The old head is wrapped onto the board before
    /// the velocity is added, so a head may sit just past an edge for a tick.
    pub fn next_head(&self, board: &Board) -> Cell {
        let head = self.head().unwrap_or_else(|| board.center());
        let wrapped = board.wrap_cell(head);
        match self.heading {
            Some(dir) => wrapped.offset(dir.delta(board.block())),
            None => wrapped,
        }
    }

    /// Appends the new head, dropping tail cells beyond the target length.
    pub fn push_head(&mut self, head: Cell) {
        self.body.push_back(head);
        while self.body.len() > self.length {
            self.body.pop_front();
        }
    }

    pub fn bites_itself(&self) -> bool {
        match self.body.back() {
            Some(head) => self.body.iter().rev().skip(1).any(|cell| cell == head),
            None => false,
        }
    }

    pub fn grow(&mut self, cells: usize) {
        self.length += cells;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(40, 30, 20)
    }

    #[test]
    fn new_snake_is_stationary() {
        let snake = Snake::new(Cell::new(400, 300));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.heading(), None);
        assert_eq!(snake.next_head(&board()), Cell::new(400, 300));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new(Cell::new(400, 300));
        assert!(snake.steer(Right));
        assert!(!snake.steer(Left));
        assert_eq!(snake.heading(), Some(Right));
        assert!(snake.steer(Up));
        assert!(!snake.steer(Down));
        assert!(!snake.steer(Up));
        assert_eq!(snake.heading(), Some(Up));
    }

    #[test]
    fn any_direction_starts_a_stationary_snake() {
        for dir in [Up, Down, Left, Right] {
            let mut snake = Snake::new(Cell::new(400, 300));
            assert!(snake.steer(dir));
        }
    }

    #[test]
    fn wrap_happens_before_the_move() {
        let mut snake = Snake::new(Cell::new(780, 300));
        snake.steer(Right);
        let past_edge = snake.next_head(&board());
        assert_eq!(past_edge, Cell::new(800, 300));

        snake.push_head(past_edge);
        assert_eq!(snake.next_head(&board()), Cell::new(20, 300));
    }

    #[test]
    fn push_head_trims_to_length() {
        let mut snake = Snake::new(Cell::new(0, 0));
        snake.steer(Right);
        snake.grow(2);
        for _ in 0..5 {
            let head = snake.next_head(&board());
            snake.push_head(head);
            assert!(snake.len() <= snake.length());
        }
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Some(Cell::new(100, 0)));
    }

    #[test]
    fn detects_head_on_body() {
        let cells = vec![
            Cell::new(0, 0),
            Cell::new(20, 0),
            Cell::new(20, 20),
            Cell::new(0, 20),
            Cell::new(0, 0),
        ];
        let snake = Snake::from_cells(cells, Some(Up));
        assert!(snake.bites_itself());

        let straight = Snake::from_cells(vec![Cell::new(0, 0), Cell::new(20, 0)], Some(Right));
        assert!(!straight.bites_itself());
    }
}
