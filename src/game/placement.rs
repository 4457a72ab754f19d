//! Placement validation for a staged move
//!
//! Checks, in order, failing on the first rule broken:
//! - At least one tile staged
//! - First move covers the center square
//! - All tiles on one row or one column
//! - No empty squares between staged tiles
//! - Touches an existing tile (after the first move)

use derive_more::{Display, Error};
use serde::Serialize;

use super::board::{Board, Orientation, Position, CENTER};
use super::tiles::Tile;

/// A tile staged on the board this turn, not yet committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedTile {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
}

impl PlacedTile {
    pub fn new(position: Position, tile: Tile) -> Self {
        Self {
            row: position.row,
            col: position.col,
            tile,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// First placement rule a staged move breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, Serialize)]
pub enum PlacementError {
    #[display("Place at least one tile")]
    NoTilesPlaced,
    #[display("The first word must cover the center square")]
    MustCrossCenter,
    #[display("Tiles must be in a single row or column")]
    NotInLine,
    #[display("Tiles must form one word without gaps")]
    HasGaps,
    #[display("Words must connect to tiles already on the board")]
    MustConnect,
    #[display("Words must be at least 2 letters long")]
    NoWordFormed,
}

impl PlacementError {
    /// Returns a user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Axis shared by all staged tiles. A lone tile counts as horizontal.
pub fn orientation(placed: &[PlacedTile]) -> Option<Orientation> {
    let first = placed.first()?;
    if placed.iter().all(|p| p.row == first.row) {
        Some(Orientation::Horizontal)
    } else if placed.iter().all(|p| p.col == first.col) {
        Some(Orientation::Vertical)
    } else {
        None
    }
}

/// Validate a staged move against the committed board.
///
/// Pure: the same inputs always give the same verdict. On success returns
/// the move's orientation.
pub fn validate_placement(
    placed: &[PlacedTile],
    board: &Board,
    is_first_move: bool,
) -> Result<Orientation, PlacementError> {
    if placed.is_empty() {
        return Err(PlacementError::NoTilesPlaced);
    }

    if is_first_move && !placed.iter().any(|p| p.position() == CENTER) {
        return Err(PlacementError::MustCrossCenter);
    }

    let orientation = orientation(placed).ok_or(PlacementError::NotInLine)?;

    if has_gaps(placed, board, orientation) {
        return Err(PlacementError::HasGaps);
    }

    if !is_first_move && !touches_board(placed, board) {
        return Err(PlacementError::MustConnect);
    }

    Ok(orientation)
}

/// Every square strictly between consecutive staged tiles must already hold
/// a committed tile.
fn has_gaps(placed: &[PlacedTile], board: &Board, orientation: Orientation) -> bool {
    let mut positions: Vec<Position> = placed.iter().map(|p| p.position()).collect();
    positions.sort_by_key(|p| p.along(orientation));

    positions.dedup();

    positions.windows(2).any(|pair| {
        let mut square = pair[0];
        loop {
            square = match square.step(orientation, 1) {
                Some(next) if next != pair[1] => next,
                _ => return false,
            };
            if !board.is_occupied(square) {
                return true;
            }
        }
    })
}

fn touches_board(placed: &[PlacedTile], board: &Board) -> bool {
    placed
        .iter()
        .any(|p| p.position().neighbors().any(|n| board.is_occupied(n)))
}
