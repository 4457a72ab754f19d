//! RACK RUSH - race the clock on a 15x15 word board
//!
//! Build words. Beat the target. Three strikes and you're out.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rackrush::app::{AppCoordinator, Direction, GameSession, InputEvent, Screen};
use rackrush::config::{Cli, Settings};
use rackrush::game::dictionary::{self, EmbeddedWords, WordList, WordOracle};
use rackrush::storage::{HighScoreStore, MemoryScores, Storage};
use rackrush::tui::{self, Tui};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    settings.apply_cli(&cli);
    let modes = settings.mode_table()?;

    init_logging(settings.log_filter.as_deref());
    info!(mode = settings.default_mode.key(), no_save = cli.no_save, "starting rackrush");

    let oracle = load_dictionary(&settings);
    let scores = open_scores(cli.no_save);
    let session = GameSession::new(oracle, scores).with_modes(modes);
    let mut app = AppCoordinator::new(session, settings.default_mode);

    run(&mut app)?;
    info!("bye");
    Ok(())
}

/// Main event loop: one writer, key events between one-second ticks
fn run(app: &mut AppCoordinator) -> Result<()> {
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let tick_rate = Duration::from_secs(1);
    let mut last_tick = Instant::now();

    loop {
        // Render
        terminal.draw(|frame| tui::render(frame, app))?;

        // Calculate timeout for next tick
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        // Poll for events with timeout
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        // Handle timer tick
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        // Check for quit
        if app.should_quit {
            break;
        }
    }

    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

fn handle_key(app: &mut AppCoordinator, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Menu { .. } => match key.code {
            KeyCode::Up => app.menu_up(),
            KeyCode::Down => app.menu_down(),
            KeyCode::Enter => app.menu_select(),
            KeyCode::Esc | KeyCode::Char('q') => app.quit(),
            _ => {}
        },
        Screen::Playing { exchange: Some(_) } => match key.code {
            KeyCode::Char(c @ '1'..='7') => {
                let slot = c as usize - '1' as usize;
                app.toggle_exchange_slot(slot);
            }
            KeyCode::Enter => app.confirm_exchange(),
            KeyCode::Esc | KeyCode::Tab => app.cancel_exchange(),
            _ => {}
        },
        Screen::Playing { exchange: None } => match key.code {
            KeyCode::Esc => app.go_to_menu(),
            KeyCode::Tab => app.begin_exchange(),
            KeyCode::Enter => app.play_input(InputEvent::Submit),
            KeyCode::Backspace => app.play_input(InputEvent::Backspace),
            KeyCode::Delete => app.play_input(InputEvent::Clear),
            KeyCode::Up => app.play_input(InputEvent::Move(Direction::Up)),
            KeyCode::Down => app.play_input(InputEvent::Move(Direction::Down)),
            KeyCode::Left => app.play_input(InputEvent::Move(Direction::Left)),
            KeyCode::Right => app.play_input(InputEvent::Move(Direction::Right)),
            KeyCode::Char(' ') => app.play_input(InputEvent::ToggleDirection),
            KeyCode::Char('/') => app.play_input(InputEvent::Shuffle),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                app.play_input(InputEvent::Char(c.to_ascii_uppercase()))
            }
            _ => {}
        },
        Screen::Results => match key.code {
            KeyCode::Enter => app.play_again(),
            KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
            _ => {}
        },
    }
}

/// Log to `rackrush.log` in the data directory so output never lands on
/// the game screen. Logging is skipped if the file can't be opened.
fn init_logging(filter: Option<&str>) {
    let Ok(dir) = Storage::data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(log_file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("rackrush.log"))
    else {
        return;
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
}

/// The configured word list, or the built-in one if it can't be used
fn load_dictionary(settings: &Settings) -> Box<dyn WordOracle> {
    if let Some(path) = &settings.dictionary {
        match WordList::load(path) {
            Ok(list) if !list.is_empty() => {
                info!(path = %path.display(), words = list.len(), "word list loaded");
                return Box::new(list);
            }
            Ok(_) => warn!(path = %path.display(), "word list is empty, using built-in list"),
            Err(e) => warn!(error = %e, "using built-in word list"),
        }
    }
    info!(words = dictionary::word_count(), "using built-in word list");
    Box::new(EmbeddedWords)
}

fn open_scores(no_save: bool) -> Box<dyn HighScoreStore> {
    if no_save {
        return Box::new(MemoryScores::new());
    }
    match Storage::open() {
        Ok(storage) => {
            if let Ok(count) = storage.game_count() {
                info!(games = count, "score database ready");
            }
            Box::new(storage)
        }
        Err(e) => {
            warn!(error = %e, "high scores will not be saved");
            Box::new(MemoryScores::new())
        }
    }
}
