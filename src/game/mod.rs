//! Game rules: tiles, rack, board, placement, word discovery, scoring

pub mod board;
pub mod dictionary;
pub mod placement;
pub mod rack;
pub mod scoring;
pub mod tiles;
pub mod words;

pub use board::{Board, Cell, Orientation, Position, Premium, BOARD_SIZE, CENTER};
pub use dictionary::{EmbeddedWords, Unavailable, WordList, WordOracle};
pub use placement::{validate_placement, PlacedTile, PlacementError};
pub use rack::{ExchangeError, Rack, RACK_SIZE};
pub use scoring::{score_move, MoveScore, WordScore, BINGO_BONUS, BINGO_LABEL};
pub use tiles::{LetterBag, Tile, TileId, BLANK, TOTAL_TILES};
pub use words::{find_formed_words, BoardView, FormedWord, WordCell};
