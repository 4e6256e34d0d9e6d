//! Playfield geometry. Positions are in board units and always aligned to the
//! block size, so a board of 40 x 30 blocks of size 20 spans 800 x 600 units.

use rand::Rng;

pub type Coord = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub fn new(x: Coord, y: Coord) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, (dx, dy): (Coord, Coord)) -> Self {
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

/// Maps a coordinate that left `[0, extent)` onto the opposite edge.
pub fn wrap(coord: Coord, extent: Coord, block: Coord) -> Coord {
    if coord >= extent {
        0
    } else if coord < 0 {
        extent - block
    } else {
        coord
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cols: u16,
    rows: u16,
    block: Coord,
}

impl Board {
    pub fn new(cols: u16, rows: u16, block: Coord) -> Self {
        Board { cols: cols.max(1), rows: rows.max(1), block: block.max(1) }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn block(&self) -> Coord {
        self.block
    }

    pub fn width(&self) -> Coord {
        self.cols as Coord * self.block
    }

    pub fn height(&self) -> Coord {
        self.rows as Coord * self.block
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.cols / 2) as Coord * self.block, (self.rows / 2) as Coord * self.block)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width()).contains(&cell.x) && (0..self.height()).contains(&cell.y)
    }

    pub fn wrap_cell(&self, cell: Cell) -> Cell {
        Cell::new(wrap(cell.x, self.width(), self.block), wrap(cell.y, self.height(), self.block))
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let col = rng.gen_range(0..self.cols) as Coord;
        let row = rng.gen_range(0..self.rows) as Coord;
        Cell::new(col * self.block, row * self.block)
    }
}
