//! The player's letter rack

use derive_more::{Display, Error};
use rand::prelude::*;
use serde::Serialize;

use super::tiles::{LetterBag, Tile, TileId};

/// Tiles a full rack holds.
pub const RACK_SIZE: usize = 7;

/// Why an exchange was refused. A refused exchange changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ExchangeError {
    #[display("Select at least one tile to exchange")]
    NothingSelected,
    #[display("No tile at rack slot {index}")]
    InvalidIndex { index: usize },
    #[display("Rack slot {index} selected twice")]
    DuplicateIndex { index: usize },
    #[display("Only {available} tiles left in the bag, need {needed}")]
    BagTooSmall { needed: usize, available: usize },
    #[display("No exchanges left this game")]
    BudgetSpent,
}

/// Up to seven tiles available to play.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
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

    /// Draw from the bag until the rack is full or the bag runs dry.
    /// Returns how many tiles were drawn.
    pub fn refill(&mut self, bag: &mut LetterBag) -> usize {
        let drawn = bag.draw(RACK_SIZE.saturating_sub(self.tiles.len()));
        let count = drawn.len();
        self.tiles.extend(drawn);
        count
    }

    /// Remove a tile by id, keeping the order of the others.
    pub fn take(&mut self, id: TileId) -> Option<Tile> {
        let pos = self.tiles.iter().position(|t| t.id == id)?;
        Some(self.tiles.remove(pos))
    }

    /// Return a tile to the rack. Blanks lose their assigned letter.
    pub fn put_back(&mut self, mut tile: Tile) {
        tile.unassign();
        self.tiles.push(tile);
    }

    /// Find a tile for a typed letter, preferring a real letter over a blank.
    pub fn find_letter(&self, letter: char) -> Option<&Tile> {
        let letter = letter.to_ascii_uppercase();
        self.tiles
            .iter()
            .find(|t| !t.is_blank && t.letter == letter)
            .or_else(|| self.tiles.iter().find(|t| t.is_blank))
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|t| t.id == id)
    }

    /// Reorder the rack. No rule implications.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Swap the tiles at `indices` for fresh ones from the bag.
    ///
    /// The selected tiles go back into the bag, the bag is reshuffled, and
    /// the same number of tiles are drawn. On error nothing moves.
    pub fn exchange<R: Rng + ?Sized>(
        &mut self,
        indices: &[usize],
        bag: &mut LetterBag,
        rng: &mut R,
    ) -> Result<usize, ExchangeError> {
        if indices.is_empty() {
            return Err(ExchangeError::NothingSelected);
        }
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(ExchangeError::DuplicateIndex { index: pair[0] });
            }
        }
        if let Some(&index) = sorted.iter().find(|&&i| i >= self.tiles.len()) {
            return Err(ExchangeError::InvalidIndex { index });
        }
        if bag.len() < sorted.len() {
            return Err(ExchangeError::BagTooSmall {
                needed: sorted.len(),
                available: bag.len(),
            });
        }

        // Highest index first so earlier removals don't shift later ones
        let mut outgoing = Vec::with_capacity(sorted.len());
        for &index in sorted.iter().rev() {
            outgoing.push(self.tiles.remove(index));
        }
        let count = outgoing.len();
        bag.return_tiles(outgoing, rng);
        self.tiles.extend(bag.draw(count));
        Ok(count)
    }

    /// Replace the rack's contents with the given letters, trading with the bag.
    #[cfg(test)]
    pub(crate) fn rig(&mut self, letters: &str, bag: &mut LetterBag) {
        for tile in self.tiles.drain(..) {
            bag.push(tile);
        }
        for letter in letters.chars() {
            let tile = bag
                .take_letter(letter)
                .unwrap_or_else(|| panic!("no {} left in the bag", letter));
            self.tiles.push(tile);
        }
    }
}
