//! Word discovery for a staged move
//!
//! Reads the committed board with the staged tiles laid over it and returns
//! the main word along the move plus every perpendicular word a staged tile
//! creates or extends. The overlay is a borrowed view; nothing is copied or
//! mutated.

use serde::Serialize;

use super::board::{Board, Orientation, Position};
use super::placement::{orientation, PlacedTile};
use super::tiles::Tile;

/// Committed board plus staged tiles, read-only.
pub struct BoardView<'a> {
    board: &'a Board,
    placed: &'a [PlacedTile],
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board, placed: &'a [PlacedTile]) -> Self {
        Self { board, placed }
    }

    /// Tile at `pos` and whether it was staged this turn.
    pub fn tile_at(&self, pos: Position) -> Option<(Tile, bool)> {
        if let Some(tile) = self.board.tile_at(pos) {
            return Some((*tile, false));
        }
        self.placed
            .iter()
            .find(|p| p.position() == pos)
            .map(|p| (p.tile, true))
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some()
    }
}

/// One square of a formed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordCell {
    pub position: Position,
    pub tile: Tile,
    /// Staged this turn, as opposed to already on the board.
    pub is_new: bool,
}

/// A word of two or more letters formed by the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormedWord {
    pub word: String,
    pub orientation: Orientation,
    pub cells: Vec<WordCell>,
}

impl FormedWord {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn new_tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_new).count()
    }
}

/// Every word the staged tiles form: the main word first, then one
/// perpendicular word per staged tile that touches a neighbour across the
/// move. Words shorter than two letters are dropped.
pub fn find_formed_words(board: &Board, placed: &[PlacedTile]) -> Vec<FormedWord> {
    let Some(axis) = orientation(placed) else {
        return Vec::new();
    };
    let view = BoardView::new(board, placed);
    let mut words = Vec::new();

    if let Some(start) = placed.iter().map(|p| p.position()).min_by_key(|p| p.along(axis)) {
        if let Some(main) = read_word(&view, start, axis) {
            words.push(main);
        }
    }

    let cross = axis.perpendicular();
    for p in placed {
        if let Some(word) = read_word(&view, p.position(), cross) {
            words.push(word);
        }
    }

    words
}

/// Walk back from `start` to the first letter of its run, then read forward.
fn read_word(view: &BoardView<'_>, start: Position, orientation: Orientation) -> Option<FormedWord> {
    let mut first = start;
    while let Some(prev) = first.step(orientation, -1) {
        if !view.is_occupied(prev) {
            break;
        }
        first = prev;
    }

    let mut cells = Vec::new();
    let mut square = Some(first);
    while let Some(pos) = square {
        let Some((tile, is_new)) = view.tile_at(pos) else {
            break;
        };
        cells.push(WordCell {
            position: pos,
            tile,
            is_new,
        });
        square = pos.step(orientation, 1);
    }

    if cells.len() < 2 {
        return None;
    }
    Some(FormedWord {
        word: cells.iter().map(|c| c.tile.letter).collect(),
        orientation,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tiles::TileId;

    fn tile_at(row: usize, col: usize, letter: char) -> PlacedTile {
        let id = (row * 15 + col) as u32;
        PlacedTile::new(Position::new(row, col), Tile::new(TileId(id), letter))
    }

    fn commit_word(board: &mut Board, row: usize, col: usize, word: &str, axis: Orientation) {
        let mut pos = Position::new(row, col);
        let mut tiles = Vec::new();
        for c in word.chars() {
            tiles.push(tile_at(pos.row, pos.col, c));
            if let Some(next) = pos.step(axis, 1) {
                pos = next;
            }
        }
        board.commit(&tiles);
    }

    fn words_of(found: &[FormedWord]) -> Vec<&str> {
        found.iter().map(|w| w.word.as_str()).collect()
    }

    #[test]
    fn test_cat_on_empty_board() {
        let board = Board::new();
        let placed = [tile_at(7, 6, 'C'), tile_at(7, 7, 'A'), tile_at(7, 8, 'T')];
        let words = find_formed_words(&board, &placed);

        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CAT");
        let squares: Vec<Position> = words[0].cells.iter().map(|c| c.position).collect();
        assert_eq!(
            squares,
            vec![Position::new(7, 6), Position::new(7, 7), Position::new(7, 8)]
        );
        assert!(words[0].cells.iter().all(|c| c.is_new));
    }

    #[test]
    fn test_staging_order_does_not_matter() {
        let board = Board::new();
        let placed = [tile_at(7, 8, 'T'), tile_at(7, 6, 'C'), tile_at(7, 7, 'A')];
        let words = find_formed_words(&board, &placed);
        assert_eq!(words_of(&words), vec!["CAT"]);
    }

    #[test]
    fn test_main_word_extends_through_committed_tiles() {
        let mut board = Board::new();
        commit_word(&mut board, 7, 6, "CAT", Orientation::Horizontal);
        let placed = [tile_at(7, 9, 'S')];
        let words = find_formed_words(&board, &placed);

        assert_eq!(words_of(&words), vec!["CATS"]);
        assert_eq!(words[0].new_tile_count(), 1);
    }

    #[test]
    fn test_tiles_on_both_sides_of_existing_word() {
        let mut board = Board::new();
        commit_word(&mut board, 7, 6, "CAT", Orientation::Horizontal);
        let placed = [tile_at(7, 5, 'S'), tile_at(7, 9, 'S')];
        let words = find_formed_words(&board, &placed);
        assert_eq!(words_of(&words), vec!["SCATS"]);
    }

    #[test]
    fn test_single_tile_forms_vertical_word_only() {
        let mut board = Board::new();
        commit_word(&mut board, 7, 6, "CAT", Orientation::Horizontal);
        // A under C spells CA downward, nothing across
        let words = find_formed_words(&board, &[tile_at(8, 6, 'A')]);
        assert_eq!(words_of(&words), vec!["CA"]);
        assert_eq!(words[0].orientation, Orientation::Vertical);
    }

    #[test]
    fn test_single_tile_forming_both_directions() {
        let mut board = Board::new();
        commit_word(&mut board, 7, 6, "CAT", Orientation::Horizontal);
        commit_word(&mut board, 8, 7, "N", Orientation::Horizontal);
        // O at (8,8): NO across, TO down
        let words = find_formed_words(&board, &[tile_at(8, 8, 'O')]);
        assert_eq!(words_of(&words), vec!["NO", "TO"]);
        assert_eq!(words[0].orientation, Orientation::Horizontal);
        assert_eq!(words[1].orientation, Orientation::Vertical);
    }

    #[test]
    fn test_perpendicular_words_for_parallel_play() {
        let mut board = Board::new();
        commit_word(&mut board, 7, 6, "CAT", Orientation::Horizontal);
        // AN under "AT": A under A, N under T
        let placed = [tile_at(8, 7, 'A'), tile_at(8, 8, 'N')];
        let words = find_formed_words(&board, &placed);
        assert_eq!(words_of(&words), vec!["AN", "AA", "TN"]);
    }

    #[test]
    fn test_lone_tile_without_neighbours_forms_nothing() {
        let board = Board::new();
        assert!(find_formed_words(&board, &[tile_at(7, 7, 'A')]).is_empty());
    }

    #[test]
    fn test_off_line_move_forms_nothing() {
        let board = Board::new();
        let placed = [tile_at(7, 7, 'A'), tile_at(8, 8, 'B')];
        assert!(find_formed_words(&board, &placed).is_empty());
    }

    #[test]
    fn test_word_stops_at_board_edge() {
        let board = Board::new();
        let placed = [tile_at(0, 13, 'A'), tile_at(0, 14, 'T')];
        let words = find_formed_words(&board, &placed);
        assert_eq!(words_of(&words), vec!["AT"]);
    }

    #[test]
    fn test_overlay_does_not_touch_board() {
        let board = Board::new();
        let placed = [tile_at(7, 7, 'A'), tile_at(7, 8, 'T')];
        let _ = find_formed_words(&board, &placed);
        assert!(board.is_empty());
    }
}
