//! Move scoring
//!
//! A square's premium counts only on the move that first covers it: the
//! board's `premium_used` flag is still false for squares staged this turn
//! and true for everything committed earlier.

use serde::Serialize;

use super::board::Board;
use super::rack::RACK_SIZE;
use super::words::FormedWord;

/// Bonus for playing the whole rack in one move.
pub const BINGO_BONUS: u32 = 50;

/// Played-word entry recorded for the bingo bonus.
pub const BINGO_LABEL: &str = "BONUS: All 7 tiles!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordScore {
    pub word: String,
    pub score: u32,
}

/// Breakdown of one move's points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveScore {
    pub words: Vec<WordScore>,
    pub bingo_bonus: u32,
    pub total: u32,
}

impl MoveScore {
    pub fn is_bingo(&self) -> bool {
        self.bingo_bonus > 0
    }
}

/// Letter sum times word multipliers, premiums applied only on unused squares.
pub fn score_word(board: &Board, word: &FormedWord) -> u32 {
    let mut letters = 0;
    let mut multiplier = 1;
    for cell in &word.cells {
        let square = board.cell(cell.position);
        if square.premium_used {
            letters += cell.tile.points;
        } else {
            letters += cell.tile.points * square.premium.letter_multiplier();
            multiplier *= square.premium.word_multiplier();
        }
    }
    letters * multiplier
}

/// Score every formed word and add the bingo bonus when all seven rack tiles
/// were played. Pure: the board is only read.
pub fn score_move(board: &Board, words: &[FormedWord], tiles_placed: usize) -> MoveScore {
    let words: Vec<WordScore> = words
        .iter()
        .map(|w| WordScore {
            word: w.word.clone(),
            score: score_word(board, w),
        })
        .collect();

    let bingo_bonus = if tiles_placed == RACK_SIZE { BINGO_BONUS } else { 0 };
    let total = words.iter().map(|w| w.score).sum::<u32>() + bingo_bonus;

    MoveScore {
        words,
        bingo_bonus,
        total,
    }
}
