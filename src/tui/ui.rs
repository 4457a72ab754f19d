//! UI rendering using ratatui
//!
//! Supports three screens:
//! - Menu: mode select with stored best scores and recent games
//! - Playing: board, rack, timer, strikes, played words
//! - Results: end of game summary

use crate::app::{
    AppCoordinator, EndReason, GameSession, MenuOption, MessageKind, Phase, Records, Screen,
    MAX_EXCHANGES, MAX_STRIKES,
};
use crate::game::board::{Cell, Orientation, Position, Premium, BOARD_SIZE, CENTER};
use crate::game::tiles::Tile;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Width of one board square in columns
const CELL_WIDTH: u16 = 3;

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Menu { selected } => {
            render_menu(frame, *selected, &coordinator.session, &coordinator.records)
        }
        Screen::Playing { exchange } => {
            render_game(frame, &coordinator.session, exchange.as_deref())
        }
        Screen::Results => render_results(frame, &coordinator.session),
    }
}

/// Render the main menu
fn render_menu(frame: &mut Frame, selected: usize, session: &GameSession, records: &Records) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(1), // Tagline
            Constraint::Length(1), // Spacer
            Constraint::Length(5), // Menu options
            Constraint::Min(4),    // Recent games
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let logo = r#"
 ___  _   ___ _  __  ___ _   _ ___ _  _
| _ \/_\ / __| |/ / | _ \ | | / __| || |
|   / _ \ (__| ' <  |   / |_| \__ \ __ |
|_|_\_/ \_\___|_|\_\ |_|_\\___/|___/_||_|
"#;
    let logo_widget = Paragraph::new(logo)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(logo_widget, layout[0]);

    let tagline = Paragraph::new("Build words. Beat the clock. Three strikes and you're out.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(tagline, layout[1]);

    let modes = session.modes();
    let items: Vec<ListItem> = MenuOption::all()
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            let text = match opt {
                MenuOption::Play(mode) => {
                    let rules = modes.rules(*mode);
                    format!(
                        "{}{:<10} {:>5}  target {:>4}  best {:>4}",
                        prefix,
                        opt.label(),
                        format_timer(rules.time_limit_secs),
                        rules.target_score,
                        records.best(*mode)
                    )
                }
                MenuOption::Quit => format!("{}{}", prefix, opt.label()),
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let menu = List::new(items).block(Block::default());
    frame.render_widget(menu, centered(layout[3], 50));

    if !records.recent.is_empty() {
        let games: Vec<ListItem> = records
            .recent
            .iter()
            .map(|g| {
                ListItem::new(format!(
                    "{:<10} {:>5}  {:>3} words  {}",
                    g.mode.label(),
                    g.score,
                    g.word_count,
                    g.outcome.label()
                ))
                .style(Style::default().fg(Color::Gray))
            })
            .collect();
        let recent = List::new(games).block(
            Block::default()
                .borders(Borders::TOP)
                .title(" Recent games ")
                .style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(recent, centered(layout[4], 50));
    }

    let footer = Paragraph::new("↑↓ Navigate  Enter Select  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[5]);
}

/// Render the in-game screen
fn render_game(frame: &mut Frame, session: &GameSession, exchange: Option<&[usize]>) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                       // Header
            Constraint::Length(BOARD_SIZE as u16 + 3),   // Board + side panel
            Constraint::Length(3),                       // Rack
            Constraint::Length(1),                       // Message
            Constraint::Min(0),                          // Footer
        ])
        .split(area);

    render_header(frame, layout[0], session);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_SIZE as u16 * CELL_WIDTH + 5),
            Constraint::Min(24),
        ])
        .split(layout[1]);

    render_board(frame, body[0], session);
    render_side_panel(frame, body[1], session);
    render_rack(frame, layout[2], session, exchange);
    render_message(frame, layout[3], session);

    let help = if exchange.is_some() {
        "1-7 Pick tiles  Enter Exchange  Esc Cancel"
    } else {
        "Type letters  ←↑↓→ Move  Space Direction  Enter Submit  Bksp Undo  Del Clear  / Shuffle  Tab Exchange  Esc Menu"
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[4]);
}

/// Render the header: logo, score against target, timer
fn render_header(frame: &mut Frame, area: Rect, session: &GameSession) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Logo
            Constraint::Min(20),    // Score
            Constraint::Length(10), // Timer
        ])
        .split(inner);

    let logo = Paragraph::new("RACK RUSH")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(logo, header_layout[0]);

    let score = Paragraph::new(format!(
        "{}  Score {} / {}",
        session.mode(),
        session.score(),
        session.rules().target_score
    ))
    .style(Style::default().fg(Color::Magenta).bold())
    .alignment(Alignment::Center);
    frame.render_widget(score, header_layout[1]);

    let time_left = session.time_left();
    let timer_color = if time_left <= 10 {
        Color::Red
    } else if time_left <= 30 {
        Color::Yellow
    } else {
        Color::Green
    };
    let timer = Paragraph::new(format_timer(time_left))
        .style(Style::default().fg(timer_color).bold())
        .alignment(Alignment::Right);
    frame.render_widget(timer, header_layout[2]);
}

/// Render the 15x15 grid, rows and columns labelled from 0
fn render_board(frame: &mut Frame, area: Rect, session: &GameSession) {
    let cursor = session.cursor();
    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);

    let mut labels = vec![Span::raw("   ")];
    for col in 0..BOARD_SIZE {
        labels.push(Span::styled(
            format!("{:^3}", col),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(labels));

    for (row, cells) in session.board().rows().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row),
            Style::default().fg(Color::DarkGray),
        )];
        for (col, cell) in cells.iter().enumerate() {
            let pos = Position::new(row, col);
            let staged = session.placed_at(pos).map(|p| p.tile);
            let (text, mut style) = cell_appearance(pos, cell, staged.as_ref());
            if session.is_playing() && pos == cursor.position {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let arrow = match cursor.direction {
        Orientation::Horizontal => "→",
        Orientation::Vertical => "↓",
    };
    let board = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!("Board {}", arrow)),
    );
    frame.render_widget(board, area);
}

/// Render strikes, exchanges, bag, best score and the played-word log
fn render_side_panel(frame: &mut Frame, area: Rect, session: &GameSession) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let strikes = session.strikes();
    let strike_marks: String = (0..MAX_STRIKES)
        .map(|i| if i < strikes { 'X' } else { '·' })
        .collect();
    let preview = session
        .preview()
        .map(|m| format!("+{}", m.total))
        .unwrap_or_else(|| "-".to_string());
    let status = vec![
        Line::from(vec![
            Span::raw("Strikes   "),
            Span::styled(strike_marks, Style::default().fg(Color::Red).bold()),
        ]),
        Line::from(format!(
            "Exchanges {}/{}",
            session.exchanges_left(),
            MAX_EXCHANGES
        )),
        Line::from(format!("Bag       {}", session.bag_len())),
        Line::from(format!("Best      {}", session.high_score())),
        Line::from(vec![
            Span::raw("Move      "),
            Span::styled(preview, Style::default().fg(Color::Green)),
        ]),
    ];
    let status = Paragraph::new(status).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Status"),
    );
    frame.render_widget(status, layout[0]);

    render_played_words(frame, layout[1], session);
}

/// Most recent words first
fn render_played_words(frame: &mut Frame, area: Rect, session: &GameSession) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = session
        .played_words()
        .iter()
        .rev()
        .take(visible)
        .map(|w| ListItem::new(format!("{:<12} {:>4}", w.word, w.score)))
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Words"),
        );
    frame.render_widget(list, area);
}

/// Render the rack; picked slots are highlighted while exchanging
fn render_rack(frame: &mut Frame, area: Rect, session: &GameSession, exchange: Option<&[usize]>) {
    let mut spans = Vec::new();
    for (i, tile) in session.rack().tiles().iter().enumerate() {
        let picked = exchange.is_some_and(|p| p.contains(&i));
        let style = if picked {
            Style::default().fg(Color::Black).bg(Color::Red).bold()
        } else {
            Style::default().fg(Color::Black).bg(Color::Yellow).bold()
        };
        if exchange.is_some() {
            spans.push(Span::styled(
                format!("{}", i + 1),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(format_tile(tile), style));
        spans.push(Span::raw(" "));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            "[ rack empty ]",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = if exchange.is_some() { "Exchange" } else { "Rack" };
    let rack = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        );
    frame.render_widget(rack, area);
}

fn render_message(frame: &mut Frame, area: Rect, session: &GameSession) {
    let Some(message) = session.message() else {
        return;
    };
    let color = match message.kind {
        MessageKind::Success => Color::Green,
        MessageKind::Error => Color::Red,
        MessageKind::Info => Color::White,
    };
    let widget = Paragraph::new(message.text.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

/// Render the end-of-game summary
fn render_results(frame: &mut Frame, session: &GameSession) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Final score
            Constraint::Length(1), // High score
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Words
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    let reason = match session.phase() {
        Phase::End(reason) => reason,
        _ => EndReason::TimeUp,
    };
    let title_color = if reason == EndReason::Won {
        Color::Green
    } else {
        Color::Red
    };
    let title = Paragraph::new(reason.label())
        .style(Style::default().fg(title_color).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let score = Paragraph::new(format!(
        "Final Score: {}  (target {})",
        session.score(),
        session.rules().target_score
    ))
    .style(Style::default().fg(Color::Yellow).bold())
    .alignment(Alignment::Center);
    frame.render_widget(score, layout[2]);

    let (high_text, high_color) = if session.is_new_high_score() {
        (
            format!("NEW HIGH SCORE for {}!", session.mode()),
            Color::Green,
        )
    } else {
        (
            format!("{} best: {}", session.mode(), session.high_score()),
            Color::DarkGray,
        )
    };
    let high = Paragraph::new(high_text)
        .style(Style::default().fg(high_color))
        .alignment(Alignment::Center);
    frame.render_widget(high, layout[3]);

    let items: Vec<ListItem> = session
        .played_words()
        .iter()
        .map(|w| ListItem::new(format!("{:<20} {:>4}", w.word, w.score)))
        .collect();
    let words = List::new(items)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!("Words Played: {}", session.played_words().len())),
        );
    frame.render_widget(words, centered(layout[5], 30));

    let instructions = Paragraph::new("Enter Play again  Esc Menu")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(instructions, layout[6]);
}

/// Text and style for one square: staged tiles over committed tiles over premiums
fn cell_appearance(pos: Position, cell: &Cell, staged: Option<&Tile>) -> (String, Style) {
    if let Some(tile) = staged {
        return (
            format_tile(tile),
            Style::default().fg(Color::Black).bg(Color::Yellow).bold(),
        );
    }
    if let Some(tile) = &cell.tile {
        return (
            format_tile(tile),
            Style::default().fg(Color::White).bg(Color::DarkGray).bold(),
        );
    }
    if pos == CENTER && !cell.premium_used {
        return (" ★ ".to_string(), Style::default().fg(Color::Magenta));
    }
    let style = match cell.premium {
        Premium::TripleWord => Style::default().fg(Color::Red),
        Premium::DoubleWord => Style::default().fg(Color::Magenta),
        Premium::TripleLetter => Style::default().fg(Color::Blue),
        Premium::DoubleLetter => Style::default().fg(Color::Cyan),
        Premium::None => Style::default().fg(Color::DarkGray),
    };
    let text = match cell.premium {
        Premium::None => " · ".to_string(),
        premium => format!("{:^3}", premium.label()),
    };
    (text, style)
}

/// A tile as three columns. Blanks show their letter in lowercase.
fn format_tile(tile: &Tile) -> String {
    let letter = if tile.is_blank {
        tile.letter.to_ascii_lowercase()
    } else {
        tile.letter
    };
    format!(" {} ", letter)
}

/// Format the timer display
fn format_timer(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Horizontally center a column of the given width inside `area`
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
