//! The 15x15 board: premium squares and committed tiles

use serde::Serialize;
use std::fmt;

use super::placement::PlacedTile;
use super::tiles::Tile;

/// Squares per side.
pub const BOARD_SIZE: usize = 15;

/// The first move must cover this square.
pub const CENTER: Position = Position { row: 7, col: 7 };

/// Standard premium layout.
/// `T` triple word, `D` double word, `t` triple letter, `d` double letter.
const PREMIUM_LAYOUT: [&str; BOARD_SIZE] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...D...d..T",
    "..d...d.d...d..",
    ".t...t...t...t.",
    "....D.....D....",
    "d..D...d...D..d",
    "..D...d.d...D..",
    ".D...t...t...D.",
    "T..d...T...d..T",
];

/// Score multiplier printed on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Premium {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Premium {
    fn from_layout(c: char) -> Self {
        match c {
            'T' => Premium::TripleWord,
            'D' => Premium::DoubleWord,
            't' => Premium::TripleLetter,
            'd' => Premium::DoubleLetter,
            _ => Premium::None,
        }
    }

    pub fn letter_multiplier(self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }

    /// Short label for rendering.
    pub fn label(self) -> &'static str {
        match self {
            Premium::None => "",
            Premium::DoubleLetter => "DL",
            Premium::TripleLetter => "TL",
            Premium::DoubleWord => "DW",
            Premium::TripleWord => "TW",
        }
    }
}

/// Line a move or word runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A square on the board, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Coordinate along the given line.
    pub fn along(self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.col,
            Orientation::Vertical => self.row,
        }
    }

    /// Step one square forward (`+1`) or back (`-1`) along a line.
    /// `None` when the step leaves the board.
    pub fn step(self, orientation: Orientation, delta: isize) -> Option<Position> {
        let (row, col) = match orientation {
            Orientation::Horizontal => (self.row as isize, self.col as isize + delta),
            Orientation::Vertical => (self.row as isize + delta, self.col as isize),
        };
        if row < 0 || col < 0 {
            return None;
        }
        let pos = Position::new(row as usize, col as usize);
        pos.is_on_board().then_some(pos)
    }

    /// Orthogonal neighbours that are on the board.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        [
            self.step(Orientation::Vertical, -1),
            self.step(Orientation::Vertical, 1),
            self.step(Orientation::Horizontal, -1),
            self.step(Orientation::Horizontal, 1),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Cell {
    pub premium: Premium,
    /// Flips to true when a tile is committed here, never back.
    pub premium_used: bool,
    pub tile: Option<Tile>,
}

/// Row-major grid of committed tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board with the standard premium layout.
    pub fn new() -> Self {
        let cells = PREMIUM_LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| Cell {
                premium: Premium::from_layout(c),
                premium_used: false,
                tile: None,
            })
            .collect();
        Self { cells }
    }

    fn index(pos: Position) -> usize {
        pos.row * BOARD_SIZE + pos.col
    }

    /// The square at `pos`. Panics if `pos` is off the board.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[Self::index(pos)]
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        if !pos.is_on_board() {
            return None;
        }
        self.cell(pos).tile.as_ref()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIZE)
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.tile.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    /// Make staged tiles permanent and consume their squares' premiums.
    ///
    /// Callers validate first; a staged tile on an occupied or off-board
    /// square is skipped rather than overwriting.
    pub fn commit(&mut self, placed: &[PlacedTile]) {
        for p in placed {
            let pos = p.position();
            if !pos.is_on_board() || self.is_occupied(pos) {
                continue;
            }
            let cell = &mut self.cells[Self::index(pos)];
            cell.tile = Some(p.tile);
            cell.premium_used = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tiles::TileId;

    fn placed(row: usize, col: usize, letter: char, id: u32) -> PlacedTile {
        PlacedTile::new(Position::new(row, col), Tile::new(TileId(id), letter))
    }

    fn count(board: &Board, premium: Premium) -> usize {
        board
            .rows()
            .flat_map(|r| r.iter())
            .filter(|c| c.premium == premium)
            .count()
    }

    #[test]
    fn test_layout_rows_are_full_width() {
        for row in PREMIUM_LAYOUT {
            assert_eq!(row.len(), BOARD_SIZE);
        }
    }

    #[test]
    fn test_premium_counts() {
        let board = Board::new();
        assert_eq!(count(&board, Premium::TripleWord), 8);
        assert_eq!(count(&board, Premium::DoubleWord), 17);
        assert_eq!(count(&board, Premium::TripleLetter), 12);
        assert_eq!(count(&board, Premium::DoubleLetter), 24);
    }

    #[test]
    fn test_layout_is_symmetric() {
        let board = Board::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let here = board.cell(Position::new(row, col)).premium;
                assert_eq!(here, board.cell(Position::new(col, row)).premium);
                assert_eq!(
                    here,
                    board
                        .cell(Position::new(BOARD_SIZE - 1 - row, BOARD_SIZE - 1 - col))
                        .premium
                );
            }
        }
    }

    #[test]
    fn test_known_squares() {
        let board = Board::new();
        assert_eq!(board.cell(Position::new(0, 0)).premium, Premium::TripleWord);
        assert_eq!(board.cell(CENTER).premium, Premium::DoubleWord);
        assert_eq!(board.cell(Position::new(1, 5)).premium, Premium::TripleLetter);
        assert_eq!(board.cell(Position::new(8, 6)).premium, Premium::DoubleLetter);
        assert_eq!(board.cell(Position::new(7, 6)).premium, Premium::None);
    }

    #[test]
    fn test_new_board_is_empty_and_unused() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(board
            .rows()
            .flat_map(|r| r.iter())
            .all(|c| !c.premium_used && c.tile.is_none()));
    }

    #[test]
    fn test_commit_sets_tile_and_consumes_premium() {
        let mut board = Board::new();
        board.commit(&[placed(7, 7, 'A', 0), placed(7, 8, 'T', 1)]);

        assert_eq!(board.tile_count(), 2);
        assert_eq!(board.tile_at(CENTER).map(|t| t.letter), Some('A'));
        assert!(board.cell(CENTER).premium_used);
        assert!(board.cell(Position::new(7, 8)).premium_used);
        assert!(!board.cell(Position::new(7, 6)).premium_used);
    }

    #[test]
    fn test_commit_never_overwrites() {
        let mut board = Board::new();
        board.commit(&[placed(7, 7, 'A', 0)]);
        board.commit(&[placed(7, 7, 'Z', 1)]);
        assert_eq!(board.tile_at(CENTER).map(|t| t.letter), Some('A'));
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn test_step_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Orientation::Horizontal, -1), None);
        assert_eq!(corner.step(Orientation::Vertical, -1), None);
        assert_eq!(
            corner.step(Orientation::Horizontal, 1),
            Some(Position::new(0, 1))
        );
        let edge = Position::new(14, 14);
        assert_eq!(edge.step(Orientation::Vertical, 1), None);
        assert_eq!(corner.neighbors().count(), 2);
        assert_eq!(CENTER.neighbors().count(), 4);
    }
}
