//! Keyboard-level commands and the typing cursor

use serde::Serialize;

use crate::game::board::{Orientation, Position, BOARD_SIZE, CENTER};

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One command from the keyboard, already decoded from the raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Stage a tile for this letter at the cursor
    Char(char),
    /// Take back the most recently staged tile
    Backspace,
    Move(Direction),
    ToggleDirection,
    Submit,
    Clear,
    Shuffle,
}

/// Where the next typed letter lands, and which way typing advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub position: Position,
    pub direction: Orientation,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: CENTER,
            direction: Orientation::Horizontal,
        }
    }
}

impl Cursor {
    /// Move one square, staying on the board.
    pub fn nudge(&mut self, direction: Direction) {
        let Position { row, col } = self.position;
        let last = BOARD_SIZE - 1;
        self.position = match direction {
            Direction::Up => Position::new(row.saturating_sub(1), col),
            Direction::Down => Position::new((row + 1).min(last), col),
            Direction::Left => Position::new(row, col.saturating_sub(1)),
            Direction::Right => Position::new(row, (col + 1).min(last)),
        };
    }

    pub fn toggle(&mut self) {
        self.direction = self.direction.perpendicular();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_center() {
        let cursor = Cursor::default();
        assert_eq!(cursor.position, CENTER);
        assert_eq!(cursor.direction, Orientation::Horizontal);
    }

    #[test]
    fn test_nudge_clamps_to_board() {
        let mut cursor = Cursor {
            position: Position::new(0, 14),
            direction: Orientation::Horizontal,
        };
        cursor.nudge(Direction::Up);
        cursor.nudge(Direction::Right);
        assert_eq!(cursor.position, Position::new(0, 14));

        cursor.nudge(Direction::Left);
        cursor.nudge(Direction::Down);
        assert_eq!(cursor.position, Position::new(1, 13));
    }

    #[test]
    fn test_toggle_direction() {
        let mut cursor = Cursor::default();
        cursor.toggle();
        assert_eq!(cursor.direction, Orientation::Vertical);
        cursor.toggle();
        assert_eq!(cursor.direction, Orientation::Horizontal);
        assert_eq!(cursor.position, CENTER);
    }
}
