//! Application state and core logic

pub mod input;
pub mod mode;
pub mod screen;
pub mod session;

pub use input::{Cursor, Direction, InputEvent};
pub use mode::{GameMode, ModeRules, ModeTable};
pub use screen::{AppCoordinator, MenuOption, Records, Screen, RECENT_GAMES};
pub use session::{
    EndReason, GameSession, Message, MessageKind, Phase, Placement, PlayedWord, SessionError,
    SessionSnapshot, StagingError, SubmitOutcome, MAX_EXCHANGES, MAX_STRIKES,
};
