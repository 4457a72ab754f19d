//! Rack Rush - a single-player, timed word-building game
//!
//! Place tiles on a 15x15 premium board, score words against the clock and
//! reach the mode's target before three invalid words strike you out.

pub mod app;
pub mod config;
pub mod game;
pub mod storage;
pub mod tui;
