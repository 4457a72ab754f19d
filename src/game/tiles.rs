//! Letter tiles and the shuffled letter bag
//!
//! The bag is built once per game from the standard English distribution
//! (98 letters + 2 blanks). Tiles carry a stable id so duplicate letters can
//! be told apart wherever they travel: bag, rack, staging area, board.

use rand::prelude::*;
use serde::Serialize;

/// Letter shown on a blank tile that has not been assigned yet.
pub const BLANK: char = '?';

/// Number of tiles in a complete set.
pub const TOTAL_TILES: usize = 100;

/// Standard English tile set: (letter, count, points).
/// The blank row comes last.
const DISTRIBUTION: [(char, u32, u32); 27] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
    (BLANK, 2, 0),
];

/// Stable identity of a physical tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileId(pub u32);

/// A single letter tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
    pub points: u32,
    pub is_blank: bool,
}

impl Tile {
    /// Create a lettered tile. Points come from the distribution table.
    pub fn new(id: TileId, letter: char) -> Self {
        let letter = letter.to_ascii_uppercase();
        Self {
            id,
            letter,
            points: letter_points(letter).unwrap_or(0),
            is_blank: false,
        }
    }

    /// Create an unassigned blank tile.
    pub fn blank(id: TileId) -> Self {
        Self {
            id,
            letter: BLANK,
            points: 0,
            is_blank: true,
        }
    }

    /// Give a blank its effective letter. Returns false for lettered tiles
    /// and for anything that is not an ASCII letter.
    pub fn assign(&mut self, letter: char) -> bool {
        if !self.is_blank || !letter.is_ascii_alphabetic() {
            return false;
        }
        self.letter = letter.to_ascii_uppercase();
        true
    }

    /// Strip an assigned letter from a blank. No-op for lettered tiles.
    pub fn unassign(&mut self) {
        if self.is_blank {
            self.letter = BLANK;
        }
    }

    /// Whether the tile has a playable letter.
    pub fn is_assigned(&self) -> bool {
        self.letter != BLANK
    }
}

/// Face value of a letter, or `None` for anything outside A-Z.
pub fn letter_points(letter: char) -> Option<u32> {
    let letter = letter.to_ascii_uppercase();
    DISTRIBUTION
        .iter()
        .find(|(c, _, _)| *c == letter && letter != BLANK)
        .map(|(_, _, points)| *points)
}

/// The undrawn tiles of a game. Draws pop from the end.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LetterBag {
    tiles: Vec<Tile>,
}

impl LetterBag {
    /// Build and shuffle a full bag with the thread RNG.
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    /// Build and shuffle a full bag with a specific RNG (for testing/seeding).
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = Vec::with_capacity(TOTAL_TILES);
        let mut next_id = 0;
        for (letter, count, _) in DISTRIBUTION {
            for _ in 0..count {
                let id = TileId(next_id);
                next_id += 1;
                tiles.push(if letter == BLANK {
                    Tile::blank(id)
                } else {
                    Tile::new(id, letter)
                });
            }
        }

        let mut bag = Self { tiles };
        bag.shuffle(rng);
        bag
    }

    /// Fisher-Yates shuffle of the remaining tiles.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Draw up to `n` tiles. A short or empty bag yields fewer tiles.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let keep = self.tiles.len().saturating_sub(n);
        let mut drawn = self.tiles.split_off(keep);
        drawn.reverse();
        drawn
    }

    /// Put tiles back and reshuffle. Blanks lose their assigned letter.
    pub fn return_tiles<R: Rng + ?Sized>(&mut self, tiles: Vec<Tile>, rng: &mut R) {
        self.tiles.extend(tiles.into_iter().map(|mut tile| {
            tile.unassign();
            tile
        }));
        self.shuffle(rng);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Pull a specific letter out of the bag, keeping the order of the rest.
    #[cfg(test)]
    pub(crate) fn take_letter(&mut self, letter: char) -> Option<Tile> {
        let letter = letter.to_ascii_uppercase();
        let pos = self.tiles.iter().position(|t| t.letter == letter)?;
        Some(self.tiles.remove(pos))
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, mut tile: Tile) {
        tile.unassign();
        self.tiles.push(tile);
    }
}
