//! Application screen state management
//!
//! Handles transitions between the application screens:
//! - Main menu (mode select)
//! - Playing, with an optional exchange picker
//! - End of game results

use super::input::InputEvent;
use super::mode::GameMode;
use super::session::{GameSession, Phase};
use crate::game::rack::RACK_SIZE;
use crate::storage::GameSummary;

/// Finished games listed on the menu
pub const RECENT_GAMES: usize = 5;

/// Menu option on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play(GameMode),
    Quit,
}

impl MenuOption {
    /// Get all menu options in order
    pub fn all() -> &'static [MenuOption] {
        &[
            MenuOption::Play(GameMode::Blitz),
            MenuOption::Play(GameMode::Classic),
            MenuOption::Play(GameMode::Marathon),
            MenuOption::Quit,
        ]
    }

    /// Get the display label for this option
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Play(mode) => mode.label(),
            MenuOption::Quit => "Quit",
        }
    }
}

/// The current application screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Main menu
    Menu { selected: usize },
    /// Playing a game. `exchange` holds the rack slots picked for an
    /// exchange while the picker is open.
    Playing { exchange: Option<Vec<usize>> },
    /// Game over
    Results,
}

/// Stored scores shown on the menu, refreshed on menu entry and at game end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    pub best: Vec<(GameMode, u32)>,
    pub recent: Vec<GameSummary>,
}

impl Records {
    fn load(session: &GameSession) -> Self {
        Self {
            best: session.stored_high_scores(),
            recent: session.recent_games(RECENT_GAMES),
        }
    }

    /// Best score for a mode, 0 if none.
    pub fn best(&self, mode: GameMode) -> u32 {
        self.best
            .iter()
            .find(|(m, _)| *m == mode)
            .map_or(0, |(_, score)| *score)
    }
}

/// Main application coordinator
pub struct AppCoordinator {
    /// Current screen
    pub screen: Screen,
    /// The game being played (or last played)
    pub session: GameSession,
    /// Best scores and history as of the last menu visit or game end
    pub records: Records,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppCoordinator {
    /// Create a new app coordinator starting at the menu, with `default_mode`
    /// highlighted.
    pub fn new(session: GameSession, default_mode: GameMode) -> Self {
        let selected = MenuOption::all()
            .iter()
            .position(|o| *o == MenuOption::Play(default_mode))
            .unwrap_or(0);
        let records = Records::load(&session);
        Self {
            screen: Screen::Menu { selected },
            session,
            records,
            should_quit: false,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Go back to the main menu, abandoning any game in progress
    pub fn go_to_menu(&mut self) {
        let selected = MenuOption::all()
            .iter()
            .position(|o| *o == MenuOption::Play(self.session.mode()))
            .unwrap_or(0);
        self.session.reset_game();
        self.records = Records::load(&self.session);
        self.screen = Screen::Menu { selected };
    }

    // ----- Menu -----

    /// Handle menu navigation (up)
    pub fn menu_up(&mut self) {
        if let Screen::Menu { selected } = &mut self.screen {
            if *selected > 0 {
                *selected -= 1;
            }
        }
    }

    /// Handle menu navigation (down)
    pub fn menu_down(&mut self) {
        if let Screen::Menu { selected } = &mut self.screen {
            if *selected < MenuOption::all().len() - 1 {
                *selected += 1;
            }
        }
    }

    /// Handle menu selection (Enter)
    pub fn menu_select(&mut self) {
        let Screen::Menu { selected } = self.screen else {
            return;
        };
        match MenuOption::all()[selected] {
            MenuOption::Play(mode) => self.start(mode),
            MenuOption::Quit => self.quit(),
        }
    }

    fn start(&mut self, mode: GameMode) {
        if self.session.start_game(mode).is_ok() {
            self.screen = Screen::Playing { exchange: None };
        }
    }

    // ----- Playing -----

    /// Forward a keyboard command to the session.
    pub fn play_input(&mut self, event: InputEvent) {
        if !matches!(self.screen, Screen::Playing { exchange: None }) {
            return;
        }
        // Refusals are already reported in the session message
        let _ = self.session.handle_input(event);
        self.sync_screen();
    }

    /// Open the exchange picker.
    pub fn begin_exchange(&mut self) {
        if let Screen::Playing { exchange } = &mut self.screen {
            if exchange.is_none() && self.session.is_playing() {
                *exchange = Some(Vec::new());
            }
        }
    }

    /// Pick or unpick a rack slot (0-based) for the exchange.
    pub fn toggle_exchange_slot(&mut self, slot: usize) {
        if slot >= RACK_SIZE {
            return;
        }
        if let Screen::Playing {
            exchange: Some(picked),
        } = &mut self.screen
        {
            if let Some(i) = picked.iter().position(|&s| s == slot) {
                picked.remove(i);
            } else {
                picked.push(slot);
                picked.sort_unstable();
            }
        }
    }

    /// Swap the picked slots and close the picker. A refused exchange keeps
    /// the picker open so the selection can be fixed.
    pub fn confirm_exchange(&mut self) {
        let Screen::Playing {
            exchange: Some(picked),
        } = &self.screen
        else {
            return;
        };
        let picked = picked.clone();
        if self.session.exchange_tiles(&picked).is_ok() {
            self.screen = Screen::Playing { exchange: None };
        }
        self.sync_screen();
    }

    pub fn cancel_exchange(&mut self) {
        if let Screen::Playing { exchange } = &mut self.screen {
            *exchange = None;
        }
    }

    /// Whether the exchange picker is open
    pub fn is_exchanging(&self) -> bool {
        matches!(self.screen, Screen::Playing { exchange: Some(_) })
    }

    /// Update the timer, moving to results when the game ends
    pub fn tick(&mut self) {
        self.session.tick();
        self.sync_screen();
    }

    fn sync_screen(&mut self) {
        if matches!(self.screen, Screen::Playing { .. })
            && matches!(self.session.phase(), Phase::End(_))
        {
            self.records = Records::load(&self.session);
            self.screen = Screen::Results;
        }
    }

    // ----- Results -----

    /// Start another game in the same mode
    pub fn play_again(&mut self) {
        if self.screen == Screen::Results {
            self.start(self.session.mode());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::mode::{ModeRules, ModeTable};
    use crate::app::session::EndReason;
    use crate::game::dictionary::WordList;
    use crate::storage::MemoryScores;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn coordinator() -> AppCoordinator {
        let mut modes = ModeTable::default();
        modes.set(
            GameMode::Blitz,
            ModeRules {
                time_limit_secs: 2,
                target_score: 150,
            },
        );
        let session = GameSession::with_rng(
            Box::new(WordList::from_words(["cat"])),
            Box::new(MemoryScores::new()),
            StdRng::seed_from_u64(3),
        )
        .with_modes(modes);
        AppCoordinator::new(session, GameMode::Classic)
    }

    fn start_blitz(app: &mut AppCoordinator) {
        app.screen = Screen::Menu { selected: 0 };
        app.menu_select();
    }

    #[test]
    fn test_default_mode_highlighted() {
        let app = coordinator();
        assert_eq!(app.screen, Screen::Menu { selected: 1 });
    }

    #[test]
    fn test_menu_navigation_clamps() {
        let mut app = coordinator();
        app.menu_up();
        app.menu_up();
        assert_eq!(app.screen, Screen::Menu { selected: 0 });
        for _ in 0..10 {
            app.menu_down();
        }
        assert_eq!(
            app.screen,
            Screen::Menu {
                selected: MenuOption::all().len() - 1
            }
        );
    }

    #[test]
    fn test_quit_option() {
        let mut app = coordinator();
        app.screen = Screen::Menu {
            selected: MenuOption::all().len() - 1,
        };
        app.menu_select();
        assert!(app.should_quit);
    }

    #[test]
    fn test_select_mode_starts_game() {
        let mut app = coordinator();
        start_blitz(&mut app);
        assert_eq!(app.screen, Screen::Playing { exchange: None });
        assert_eq!(app.session.mode(), GameMode::Blitz);
        assert!(app.session.is_playing());
    }

    #[test]
    fn test_timeout_moves_to_results() {
        let mut app = coordinator();
        start_blitz(&mut app);
        app.tick();
        assert!(matches!(app.screen, Screen::Playing { .. }));
        app.tick();
        assert_eq!(app.screen, Screen::Results);
        assert_eq!(app.session.phase(), Phase::End(EndReason::TimeUp));

        app.play_again();
        assert_eq!(app.screen, Screen::Playing { exchange: None });
        assert_eq!(app.session.time_left(), 2);
    }

    #[test]
    fn test_exchange_picker() {
        let mut app = coordinator();
        start_blitz(&mut app);

        app.begin_exchange();
        assert!(app.is_exchanging());
        app.toggle_exchange_slot(4);
        app.toggle_exchange_slot(1);
        app.toggle_exchange_slot(9);
        assert_eq!(
            app.screen,
            Screen::Playing {
                exchange: Some(vec![1, 4])
            }
        );
        app.toggle_exchange_slot(4);
        app.confirm_exchange();
        assert!(!app.is_exchanging());
        assert_eq!(app.session.exchanges_used(), 1);
    }

    #[test]
    fn test_empty_exchange_keeps_picker_open() {
        let mut app = coordinator();
        start_blitz(&mut app);
        app.begin_exchange();
        app.confirm_exchange();
        assert!(app.is_exchanging());
        assert_eq!(app.session.exchanges_used(), 0);

        app.cancel_exchange();
        assert!(!app.is_exchanging());
    }

    #[test]
    fn test_typing_blocked_while_exchanging() {
        let mut app = coordinator();
        start_blitz(&mut app);
        app.begin_exchange();
        let letter = app.session.rack().tiles()[0].letter;
        app.play_input(InputEvent::Char(letter));
        assert!(app.session.placed().is_empty());
    }

    #[test]
    fn test_records_refresh_when_game_ends() {
        let mut app = coordinator();
        assert!(app.records.best.is_empty());
        assert!(app.records.recent.is_empty());

        start_blitz(&mut app);
        app.tick();
        assert!(app.records.recent.is_empty());
        app.tick();
        assert_eq!(app.screen, Screen::Results);
        assert_eq!(app.records.recent.len(), 1);
        assert_eq!(app.records.recent[0].mode, GameMode::Blitz);
        assert_eq!(app.records.recent[0].outcome, EndReason::TimeUp);
        assert_eq!(app.records.best(GameMode::Blitz), 0);

        app.go_to_menu();
        assert_eq!(app.records.recent.len(), 1);
    }

    #[test]
    fn test_go_to_menu_abandons_game() {
        let mut app = coordinator();
        start_blitz(&mut app);
        app.go_to_menu();
        assert_eq!(app.screen, Screen::Menu { selected: 0 });
        assert_eq!(app.session.phase(), Phase::Ready);
    }
}
