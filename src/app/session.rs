//! Game session state machine
//!
//! One session owns the board, rack, bag and the tiles staged this turn.
//! Phases run `Ready -> Play -> End(reason)`; every command checks the phase
//! first and leaves state untouched when it is the wrong one.
//!
//! Tiles never leave the session: at every point
//! `bag + rack + staged + board == TOTAL_TILES`.

use derive_more::{Display, Error, From};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::input::{Cursor, InputEvent};
use super::mode::{GameMode, ModeRules, ModeTable};
use crate::game::board::{Board, Position};
use crate::game::dictionary::WordOracle;
use crate::game::placement::{validate_placement, PlacedTile, PlacementError};
use crate::game::rack::{ExchangeError, Rack};
use crate::game::scoring::{score_move, MoveScore, BINGO_BONUS, BINGO_LABEL};
use crate::game::tiles::{LetterBag, Tile, TileId};
use crate::game::words::find_formed_words;
use crate::storage::{GameRecord, GameSummary, HighScoreStore};

/// Invalid words allowed before the game is lost.
pub const MAX_STRIKES: u32 = 3;

/// Rack exchanges allowed per game.
pub const MAX_EXCHANGES: u32 = 2;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    Won,
    StruckOut,
    TimeUp,
    OutOfTiles,
}

impl EndReason {
    /// Stable key used in storage.
    pub fn key(&self) -> &'static str {
        match self {
            EndReason::Won => "won",
            EndReason::StruckOut => "struckout",
            EndReason::TimeUp => "timeup",
            EndReason::OutOfTiles => "outoftiles",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "won" => Some(EndReason::Won),
            "struckout" => Some(EndReason::StruckOut),
            "timeup" => Some(EndReason::TimeUp),
            "outoftiles" => Some(EndReason::OutOfTiles),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EndReason::Won => "TARGET REACHED!",
            EndReason::StruckOut => "THREE STRIKES",
            EndReason::TimeUp => "TIME'S UP!",
            EndReason::OutOfTiles => "OUT OF TILES",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Phase {
    #[display("ready")]
    Ready,
    #[display("playing")]
    Play,
    #[display("game over")]
    End(EndReason),
}

/// A scored word in the game log. The bingo bonus is logged as its own entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedWord {
    pub word: String,
    pub score: u32,
    /// Milliseconds since the Unix epoch
    pub played_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Transient status line shown under the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Info,
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// A staged tile was refused. Staging errors never cost a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum StagingError {
    #[display("Tile {} is not on your rack", id.0)]
    UnknownTile { id: TileId },
    #[display("No {letter} on your rack")]
    NoTileForLetter { letter: char },
    #[display("Square {position} is off the board")]
    OffBoard { position: Position },
    #[display("Square {position} is already taken")]
    Occupied { position: Position },
    #[display("Square {position} used twice")]
    DuplicateSquare { position: Position },
    #[display("'{letter}' is not a letter")]
    InvalidLetter { letter: char },
    #[display("Choose a letter for the blank tile")]
    UnassignedBlank,
    #[display("No staged tile at {position}")]
    NoStagedTile { position: Position },
    #[display("The tile at {position} is not a blank")]
    NotABlank { position: Position },
}

/// A command was refused. State is unchanged unless noted on the command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    #[display("Not available while {phase}")]
    #[from(ignore)]
    WrongPhase { phase: Phase },
    #[display("{_0}")]
    Staging(StagingError),
    #[display("{_0}")]
    Exchange(ExchangeError),
}

/// One tile in a `place_word` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub tile_id: TileId,
    /// Letter for a blank; ignored for lettered tiles
    pub letter: Option<char>,
}

/// What a submitted move came to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Broke a placement rule; staging cleared, no strike
    Invalid(PlacementError),
    /// Refused before validation; staging kept, no strike
    Incomplete(StagingError),
    /// A formed word is not in the dictionary
    Struck { word: String, strikes: u32 },
    Scored(MoveScore),
}

/// Owned copy of everything a consumer can observe.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub mode: GameMode,
    pub score: u32,
    pub target_score: u32,
    pub strikes: u32,
    pub time_left: u32,
    pub exchanges_left: u32,
    pub high_score: u32,
    pub is_first_move: bool,
    pub bag_remaining: usize,
    pub board: Board,
    pub rack: Vec<Tile>,
    pub placed: Vec<PlacedTile>,
    pub played_words: Vec<PlayedWord>,
    pub message: Option<Message>,
    pub cursor: Cursor,
}

/// A single-player Rack Rush game.
pub struct GameSession {
    phase: Phase,
    mode: GameMode,
    rules: ModeRules,
    modes: ModeTable,
    board: Board,
    rack: Rack,
    bag: LetterBag,
    /// Tiles staged this turn, in the order they were staged
    placed: Vec<PlacedTile>,
    played_words: Vec<PlayedWord>,
    score: u32,
    strikes: u32,
    time_left: u32,
    exchanges_used: u32,
    is_first_move: bool,
    high_score: u32,
    new_high_score: bool,
    message: Option<Message>,
    cursor: Cursor,
    oracle: Box<dyn WordOracle>,
    scores: Box<dyn HighScoreStore>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(oracle: Box<dyn WordOracle>, scores: Box<dyn HighScoreStore>) -> Self {
        Self::with_rng(oracle, scores, StdRng::from_os_rng())
    }

    /// Create a session with a specific RNG (for deterministic games).
    pub fn with_rng(
        oracle: Box<dyn WordOracle>,
        scores: Box<dyn HighScoreStore>,
        mut rng: StdRng,
    ) -> Self {
        let mode = GameMode::default();
        let modes = ModeTable::default();
        let bag = LetterBag::with_rng(&mut rng);
        Self {
            phase: Phase::Ready,
            mode,
            rules: modes.rules(mode),
            modes,
            board: Board::new(),
            rack: Rack::new(),
            bag,
            placed: Vec::new(),
            played_words: Vec::new(),
            score: 0,
            strikes: 0,
            time_left: modes.rules(mode).time_limit_secs,
            exchanges_used: 0,
            is_first_move: true,
            high_score: 0,
            new_high_score: false,
            message: None,
            cursor: Cursor::default(),
            oracle,
            scores,
            rng,
        }
    }

    /// Replace the per-mode rules (time limits and targets).
    pub fn with_modes(mut self, modes: ModeTable) -> Self {
        self.modes = modes;
        self.rules = modes.rules(self.mode);
        self.time_left = self.rules.time_limit_secs;
        self
    }

    // ----- Accessors -----

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn rules(&self) -> ModeRules {
        self.rules
    }

    pub fn modes(&self) -> &ModeTable {
        &self.modes
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    pub fn placed(&self) -> &[PlacedTile] {
        &self.placed
    }

    pub fn played_words(&self) -> &[PlayedWord] {
        &self.played_words
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn exchanges_used(&self) -> u32 {
        self.exchanges_used
    }

    pub fn exchanges_left(&self) -> u32 {
        MAX_EXCHANGES.saturating_sub(self.exchanges_used)
    }

    pub fn is_first_move(&self) -> bool {
        self.is_first_move
    }

    /// Best score for the current mode, including this game once it ends.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Stored best score for any mode. Read failures count as no score.
    fn stored_high_score(&self, mode: GameMode) -> u32 {
        self.scores.high_score(mode).unwrap_or_else(|e| {
            warn!(error = %e, "could not read high score");
            0
        })
    }

    /// Stored best scores for every mode that has one.
    pub fn stored_high_scores(&self) -> Vec<(GameMode, u32)> {
        self.scores.high_scores().unwrap_or_else(|e| {
            warn!(error = %e, "could not read high scores");
            Vec::new()
        })
    }

    /// Most recent finished games, newest first.
    pub fn recent_games(&self, limit: usize) -> Vec<GameSummary> {
        self.scores.recent_games(limit).unwrap_or_else(|e| {
            warn!(error = %e, "could not read game history");
            Vec::new()
        })
    }

    /// Whether the game that just ended set a new high score.
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Play
    }

    /// Staged tile at a square, if any.
    pub fn placed_at(&self, position: Position) -> Option<&PlacedTile> {
        self.placed.iter().find(|p| p.position() == position)
    }

    /// Score the staged move would earn if every word checks out.
    /// `None` while the staging breaks a placement rule.
    pub fn preview(&self) -> Option<MoveScore> {
        if self.placed.iter().any(|p| !p.tile.is_assigned()) {
            return None;
        }
        validate_placement(&self.placed, &self.board, self.is_first_move).ok()?;
        let words = find_formed_words(&self.board, &self.placed);
        if words.is_empty() {
            return None;
        }
        Some(score_move(&self.board, &words, self.placed.len()))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            mode: self.mode,
            score: self.score,
            target_score: self.rules.target_score,
            strikes: self.strikes,
            time_left: self.time_left,
            exchanges_left: self.exchanges_left(),
            high_score: self.high_score,
            is_first_move: self.is_first_move,
            bag_remaining: self.bag.len(),
            board: self.board.clone(),
            rack: self.rack.tiles().to_vec(),
            placed: self.placed.clone(),
            played_words: self.played_words.clone(),
            message: self.message.clone(),
            cursor: self.cursor,
        }
    }

    // ----- Lifecycle -----

    /// Deal a fresh game in the given mode.
    pub fn start_game(&mut self, mode: GameMode) -> Result<(), SessionError> {
        if self.phase == Phase::Play {
            return Err(self.wrong_phase());
        }

        self.mode = mode;
        self.rules = self.modes.rules(mode);
        self.deal();
        self.rack.refill(&mut self.bag);
        self.time_left = self.rules.time_limit_secs;
        self.high_score = self.stored_high_score(mode);
        self.phase = Phase::Play;
        self.message = Some(Message::info(format!(
            "{}: reach {} points in {}s",
            mode, self.rules.target_score, self.rules.time_limit_secs
        )));

        info!(
            mode = mode.key(),
            time_limit = self.rules.time_limit_secs,
            target = self.rules.target_score,
            high_score = self.high_score,
            "game started"
        );
        Ok(())
    }

    /// Abandon whatever is in progress and return to `Ready`.
    pub fn reset_game(&mut self) {
        if self.phase == Phase::Play {
            info!(score = self.score, "game abandoned");
        }
        self.deal();
        self.time_left = self.rules.time_limit_secs;
        self.high_score = 0;
        self.message = None;
        self.phase = Phase::Ready;
    }

    /// Count down one second. Does nothing outside `Play`.
    pub fn tick(&mut self) {
        if self.phase != Phase::Play || self.time_left == 0 {
            return;
        }
        self.time_left -= 1;
        if self.time_left == 0 {
            self.end(EndReason::TimeUp);
        }
    }

    // ----- Staging -----

    /// Replace the staged tiles with `placements`.
    ///
    /// On any refused placement the whole request is dropped and nothing is
    /// left staged.
    pub fn place_word(&mut self, placements: &[Placement]) -> Result<(), SessionError> {
        self.require_play()?;
        self.return_staged();

        if let Err(e) = self.check_placements(placements) {
            self.message = Some(Message::error(e.to_string()));
            return Err(e.into());
        }

        for p in placements {
            if let Some(mut tile) = self.rack.take(p.tile_id) {
                if let Some(letter) = p.letter {
                    tile.assign(letter);
                }
                self.placed.push(PlacedTile::new(p.position, tile));
            }
        }
        self.message = None;
        Ok(())
    }

    fn check_placements(&self, placements: &[Placement]) -> Result<(), StagingError> {
        let mut squares = HashSet::new();
        let mut ids = HashSet::new();
        for p in placements {
            if !p.position.is_on_board() {
                return Err(StagingError::OffBoard {
                    position: p.position,
                });
            }
            if self.board.is_occupied(p.position) {
                return Err(StagingError::Occupied {
                    position: p.position,
                });
            }
            if !squares.insert(p.position) {
                return Err(StagingError::DuplicateSquare {
                    position: p.position,
                });
            }
            if !ids.insert(p.tile_id) || !self.rack.contains(p.tile_id) {
                return Err(StagingError::UnknownTile { id: p.tile_id });
            }
            if let Some(letter) = p.letter {
                if !letter.is_ascii_alphabetic() {
                    return Err(StagingError::InvalidLetter { letter });
                }
            }
        }
        Ok(())
    }

    /// Take one staged tile back to the rack.
    pub fn remove_placed_tile(&mut self, position: Position) -> Result<(), SessionError> {
        self.require_play()?;
        let index = self.staged_index(position)?;
        let placed = self.placed.remove(index);
        self.rack.put_back(placed.tile);
        Ok(())
    }

    /// Take every staged tile back to the rack.
    pub fn clear_placed_tiles(&mut self) -> Result<(), SessionError> {
        self.require_play()?;
        self.return_staged();
        self.message = None;
        Ok(())
    }

    /// Choose the letter a staged blank stands for.
    pub fn set_blank_letter(&mut self, position: Position, letter: char) -> Result<(), SessionError> {
        self.require_play()?;
        let index = self.staged_index(position)?;
        let tile = &mut self.placed[index].tile;
        if !tile.is_blank {
            return Err(StagingError::NotABlank { position }.into());
        }
        if !tile.assign(letter) {
            return Err(StagingError::InvalidLetter { letter }.into());
        }
        Ok(())
    }

    /// Give up on a staged blank: it goes back to the rack unassigned.
    pub fn cancel_blank_letter(&mut self, position: Position) -> Result<(), SessionError> {
        self.require_play()?;
        let index = self.staged_index(position)?;
        if !self.placed[index].tile.is_blank {
            return Err(StagingError::NotABlank { position }.into());
        }
        let placed = self.placed.remove(index);
        self.rack.put_back(placed.tile);
        Ok(())
    }

    fn staged_index(&self, position: Position) -> Result<usize, StagingError> {
        self.placed
            .iter()
            .position(|p| p.position() == position)
            .ok_or(StagingError::NoStagedTile { position })
    }

    fn return_staged(&mut self) {
        for placed in self.placed.drain(..) {
            self.rack.put_back(placed.tile);
        }
    }

    // ----- Moves -----

    /// Validate, check and score the staged tiles.
    pub fn submit_word(&mut self) -> Result<SubmitOutcome, SessionError> {
        self.require_play()?;

        if self.placed.iter().any(|p| !p.tile.is_assigned()) {
            let err = StagingError::UnassignedBlank;
            self.message = Some(Message::error(err.to_string()));
            return Ok(SubmitOutcome::Incomplete(err));
        }

        if let Err(err) = validate_placement(&self.placed, &self.board, self.is_first_move) {
            return Ok(self.refuse_placement(err));
        }

        let words = find_formed_words(&self.board, &self.placed);
        if words.is_empty() {
            return Ok(self.refuse_placement(PlacementError::NoWordFormed));
        }

        if let Some(bad) = words.iter().find(|w| !self.oracle.is_valid_word(&w.word)) {
            let word = bad.word.clone();
            self.strikes += 1;
            self.return_staged();
            debug!(word = %word, strikes = self.strikes, "word rejected");
            self.message = Some(Message::error(format!(
                "\"{}\" is not a valid word. Strike {}/{}",
                word, self.strikes, MAX_STRIKES
            )));
            if self.strikes >= MAX_STRIKES {
                self.end(EndReason::StruckOut);
            }
            return Ok(SubmitOutcome::Struck {
                word,
                strikes: self.strikes,
            });
        }

        // Score before commit: new squares still have their premiums
        let move_score = score_move(&self.board, &words, self.placed.len());
        self.board.commit(&self.placed);
        self.placed.clear();
        self.rack.refill(&mut self.bag);

        let now = now_millis();
        for w in &move_score.words {
            self.played_words.push(PlayedWord {
                word: w.word.clone(),
                score: w.score,
                played_at: now,
            });
        }
        if move_score.is_bingo() {
            self.played_words.push(PlayedWord {
                word: BINGO_LABEL.to_string(),
                score: BINGO_BONUS,
                played_at: now,
            });
        }
        self.score += move_score.total;
        self.is_first_move = false;

        let names: Vec<&str> = move_score.words.iter().map(|w| w.word.as_str()).collect();
        self.message = Some(Message::success(format!(
            "OK +{} ({})",
            move_score.total,
            names.join(", ")
        )));
        info!(
            words = %names.join(","),
            points = move_score.total,
            bingo = move_score.is_bingo(),
            score = self.score,
            "move scored"
        );

        if self.score >= self.rules.target_score {
            self.end(EndReason::Won);
        } else if self.rack.is_empty() && self.bag.is_empty() {
            self.end(EndReason::OutOfTiles);
        }

        Ok(SubmitOutcome::Scored(move_score))
    }

    fn refuse_placement(&mut self, err: PlacementError) -> SubmitOutcome {
        self.return_staged();
        self.message = Some(Message::error(err.message()));
        debug!(error = %err, "placement refused");
        SubmitOutcome::Invalid(err)
    }

    /// Reorder the rack.
    pub fn shuffle_rack(&mut self) -> Result<(), SessionError> {
        self.require_play()?;
        self.rack.shuffle(&mut self.rng);
        Ok(())
    }

    /// Swap the rack tiles at `indices` for new ones from the bag.
    ///
    /// Staged tiles go back to the rack first, so indices refer to the full
    /// rack. Returns how many tiles were swapped.
    pub fn exchange_tiles(&mut self, indices: &[usize]) -> Result<usize, SessionError> {
        self.require_play()?;

        let result = if self.exchanges_used >= MAX_EXCHANGES {
            Err(ExchangeError::BudgetSpent)
        } else {
            self.return_staged();
            self.rack.exchange(indices, &mut self.bag, &mut self.rng)
        };

        match result {
            Ok(count) => {
                self.exchanges_used += 1;
                self.message = Some(Message::info(format!(
                    "Exchanged {} tile{} ({} exchange{} left)",
                    count,
                    if count == 1 { "" } else { "s" },
                    self.exchanges_left(),
                    if self.exchanges_left() == 1 { "" } else { "s" }
                )));
                info!(count, used = self.exchanges_used, "tiles exchanged");
                Ok(count)
            }
            Err(e) => {
                self.message = Some(Message::error(e.to_string()));
                debug!(error = %e, "exchange refused");
                Err(e.into())
            }
        }
    }

    // ----- Keyboard -----

    pub fn set_cursor(&mut self, cursor: Cursor) {
        if cursor.position.is_on_board() {
            self.cursor = cursor;
        }
    }

    /// Apply one keyboard command.
    ///
    /// A refused keystroke leaves its reason in the status message.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), SessionError> {
        self.require_play()?;
        let result = match event {
            InputEvent::Char(c) => self.type_letter(c),
            InputEvent::Backspace => {
                if let Some(last) = self.placed.pop() {
                    self.cursor.position = last.position();
                    self.rack.put_back(last.tile);
                }
                Ok(())
            }
            InputEvent::Move(direction) => {
                self.cursor.nudge(direction);
                Ok(())
            }
            InputEvent::ToggleDirection => {
                self.cursor.toggle();
                Ok(())
            }
            InputEvent::Submit => self.submit_word().map(|_| ()),
            InputEvent::Clear => self.clear_placed_tiles(),
            InputEvent::Shuffle => self.shuffle_rack(),
        };
        if let Err(e) = &result {
            self.message = Some(Message::error(e.to_string()));
        }
        result
    }

    fn type_letter(&mut self, letter: char) -> Result<(), SessionError> {
        if !letter.is_ascii_alphabetic() {
            return Err(StagingError::InvalidLetter { letter }.into());
        }

        let mut position = self.cursor.position;
        while self.board.is_occupied(position) {
            match position.step(self.cursor.direction, 1) {
                Some(next) => position = next,
                None => {
                    return Err(StagingError::Occupied { position }.into());
                }
            }
        }
        if self.placed_at(position).is_some() {
            return Err(StagingError::Occupied { position }.into());
        }

        let id = self
            .rack
            .find_letter(letter)
            .map(|t| t.id)
            .ok_or(StagingError::NoTileForLetter {
                letter: letter.to_ascii_uppercase(),
            })?;
        if let Some(mut tile) = self.rack.take(id) {
            if tile.is_blank {
                tile.assign(letter);
            }
            self.placed.push(PlacedTile::new(position, tile));
        }

        self.cursor.position = self.skip_committed(position);
        Ok(())
    }

    /// First square past `from` along the cursor direction that is not
    /// committed. Stays put at the board edge.
    fn skip_committed(&self, from: Position) -> Position {
        let direction = self.cursor.direction;
        let mut position = from;
        while let Some(next) = position.step(direction, 1) {
            position = next;
            if !self.board.is_occupied(next) {
                return next;
            }
        }
        from
    }

    // ----- Internals -----

    fn require_play(&self) -> Result<(), SessionError> {
        if self.phase == Phase::Play {
            Ok(())
        } else {
            Err(self.wrong_phase())
        }
    }

    fn wrong_phase(&self) -> SessionError {
        SessionError::WrongPhase { phase: self.phase }
    }

    /// Fresh board, full bag, empty rack, zeroed counters.
    fn deal(&mut self) {
        self.board = Board::new();
        self.bag = LetterBag::with_rng(&mut self.rng);
        self.rack = Rack::new();
        self.placed.clear();
        self.played_words.clear();
        self.score = 0;
        self.strikes = 0;
        self.exchanges_used = 0;
        self.is_first_move = true;
        self.new_high_score = false;
        self.cursor = Cursor::default();
    }

    fn end(&mut self, reason: EndReason) {
        self.return_staged();
        self.phase = Phase::End(reason);

        let record = GameRecord {
            mode: self.mode,
            score: self.score,
            outcome: reason,
            words: &self.played_words,
        };
        match self.scores.record_game(&record) {
            Ok(true) => {
                self.new_high_score = true;
                self.high_score = self.score;
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not record game"),
        }

        let text = if self.new_high_score {
            format!("{} Final score {} (new high score!)", reason.label(), self.score)
        } else {
            format!("{} Final score {}", reason.label(), self.score)
        };
        self.message = Some(match reason {
            EndReason::Won => Message::success(text),
            _ => Message::info(text),
        });

        info!(
            reason = reason.key(),
            score = self.score,
            strikes = self.strikes,
            words = self.played_words.len(),
            new_high_score = self.new_high_score,
            "game ended"
        );
    }

    /// Rig the rack with specific letters (for deterministic tests).
    #[cfg(test)]
    pub(crate) fn rig_rack(&mut self, letters: &str) {
        self.return_staged();
        self.rack.rig(letters, &mut self.bag);
    }
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
