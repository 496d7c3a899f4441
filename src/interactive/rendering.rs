//! TUI rendering with ratatui
//!
//! Board, history and status panels for both games.

use super::app::{MessageLog, MessageStyle};
use super::codebreak::CodeBreakApp;
use super::wordsearch::{CELL_WIDTH, WordSearchApp};
use crate::codebreak::MAX_ATTEMPTS;
use crate::core::{CODE_LENGTH, Cell, Symbol};
use crate::output::formatters::{feedback_pegs, format_duration, format_timer};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

/// Terminal color for a peg
const fn symbol_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::Red => Color::Red,
        Symbol::Blue => Color::Blue,
        Symbol::Green => Color::Green,
        Symbol::Yellow => Color::Yellow,
        Symbol::Purple => Color::Magenta,
        Symbol::Orange => Color::Rgb(255, 165, 0),
    }
}

fn peg(symbol: Symbol) -> Span<'static> {
    Span::styled("●", Style::default().fg(symbol_color(symbol)))
}

/// Codebreak screen
pub fn ui_codebreak(f: &mut Frame, app: &CodeBreakApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, "🔐 CODEBREAK", chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(main_chunks[0]);

    render_board(f, app, left[0]);
    render_messages(f, &app.messages, left[1]);
    render_guess_history(f, app, main_chunks[1]);
    render_guess_input(f, app, chunks[2]);
    render_codebreak_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, title: &str, area: Rect) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &CodeBreakApp, area: Rect) {
    let mut secret = vec![Span::raw("Secret:  ")];
    match app.engine.revealed_secret() {
        Some(code) => {
            for &symbol in code {
                secret.push(peg(symbol));
                secret.push(Span::raw(" "));
            }
        }
        None => secret.push(Span::styled(
            "? ? ? ?",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let mut palette = vec![Span::raw("Colors:  ")];
    for symbol in Symbol::ALL {
        palette.push(Span::raw(format!("{}:", symbol.initial())));
        palette.push(peg(symbol));
        palette.push(Span::raw(" "));
    }

    let state = app.engine.state();
    let content = vec![
        Line::from(secret),
        Line::from(""),
        Line::from(palette),
        Line::from(""),
        Line::from(format!(
            "Attempts: {}/{MAX_ATTEMPTS}",
            state.attempts
        )),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_guess_history(f: &mut Frame, app: &CodeBreakApp, area: Rect) {
    let history = app.engine.history();
    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .rev()
        .map(|(i, record)| {
            let mut spans = vec![Span::raw(format!("{:>2}: ", i + 1))];
            for &symbol in &record.guess {
                spans.push(peg(symbol));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                feedback_pegs(record.feedback),
                Style::default().fg(Color::White),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" History ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(list, area);
}

fn render_guess_input(f: &mut Frame, app: &CodeBreakApp, area: Rect) {
    let state = app.engine.state();
    let (title, color) = if state.won {
        (
            " 🎉 CRACKED! 🎉 | Press 'n' for new game or 'q' to quit ",
            Color::Green,
        )
    } else if state.finished {
        (
            " Out of guesses | Press 'n' for new game or 'q' to quit ",
            Color::Red,
        )
    } else {
        (
            " Your Guess | 1-6 or R/B/G/Y/P/O pick, ←/→ move, Enter submits ",
            Color::Yellow,
        )
    };

    let mut spans = Vec::with_capacity(CODE_LENGTH * 3);
    for (slot, symbol) in app.engine.guess().iter().enumerate() {
        let active = !state.finished && slot == app.engine.active_slot();
        spans.push(Span::raw(if active { "[" } else { " " }));
        spans.push(match symbol {
            Some(s) => peg(*s),
            None => Span::styled("○", Style::default().fg(Color::DarkGray)),
        });
        spans.push(Span::raw(if active { "]" } else { " " }));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(color)),
    );
    f.render_widget(input, area);
}

fn render_codebreak_status(f: &mut Frame, app: &CodeBreakApp, area: Rect) {
    let chunks = status_columns(area);

    let time = Paragraph::new(format!("Time: {}", format_timer(app.engine.elapsed_seconds())))
        .alignment(Alignment::Center);
    f.render_widget(time, chunks[0]);

    let best = app
        .best_time
        .map_or_else(|| "--:--".to_string(), format_duration);
    f.render_widget(
        Paragraph::new(format!("Best: {best}")).alignment(Alignment::Center),
        chunks[1],
    );

    let attempts = Paragraph::new(format!(
        "Guess {}/{MAX_ATTEMPTS}",
        (app.engine.state().attempts + 1).min(MAX_ATTEMPTS)
    ))
    .alignment(Alignment::Center);
    f.render_widget(attempts, chunks[2]);

    let help = Paragraph::new("q: Quit | n: New Game")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

/// Word search screen
pub fn ui_wordsearch(f: &mut Frame, app: &WordSearchApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, "🔎 WORD SEARCH", chunks[0]);

    let grid = app.engine.grid();
    // Cast is safe: grids are far narrower than u16::MAX
    #[allow(clippy::cast_possible_truncation)]
    let grid_width = grid.cols() as u16 * CELL_WIDTH + 2;
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(grid_width + 2), Constraint::Min(20)])
        .split(chunks[1]);

    render_letter_grid(f, app, main_chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    render_word_list(f, app, right[0]);
    render_messages(f, &app.messages, right[1]);
    render_wordsearch_status(f, app, chunks[2]);
}

fn render_letter_grid(f: &mut Frame, app: &WordSearchApp, area: Rect) {
    let grid = app.engine.grid();
    let selection = app.engine.selection();

    #[allow(clippy::cast_possible_truncation)]
    let wanted = Rect {
        x: area.x,
        y: area.y,
        width: (grid.cols() as u16 * CELL_WIDTH + 2).min(area.width),
        height: (grid.rows() as u16 + 2).min(area.height),
    };
    app.grid_area.set(wanted);

    let lines: Vec<Line> = (0..grid.rows())
        .map(|row| {
            let spans: Vec<Span> = (0..grid.cols())
                .map(|col| {
                    let cell = Cell::new(row, col);
                    let letter = grid.letter(cell).unwrap_or(' ');
                    Span::styled(format!("{letter} "), cell_style(app, cell, selection))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = app
        .engine
        .report()
        .map_or_else(|| " Grid ".to_string(), |r| format!(" {} ", r.theme));
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, wanted);
}

fn cell_style(app: &WordSearchApp, cell: Cell, selection: &[Cell]) -> Style {
    let mut style = if selection.contains(&cell) {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else if app.engine.is_found_cell(cell) {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    if cell == app.cursor && !app.engine.is_completed() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn render_word_list(f: &mut Frame, app: &WordSearchApp, area: Rect) {
    let items: Vec<ListItem> = app
        .engine
        .words()
        .iter()
        .map(|word| {
            if app.engine.is_found(word) {
                ListItem::new(format!("✓ {word}")).style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ListItem::new(format!("  {word}"))
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Words ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}

fn render_wordsearch_status(f: &mut Frame, app: &WordSearchApp, area: Rect) {
    let chunks = status_columns(area);

    let found = Paragraph::new(format!(
        "Found: {}/{}",
        app.engine.found_words().len(),
        app.engine.words().len()
    ))
    .alignment(Alignment::Center);
    f.render_widget(found, chunks[0]);

    let time = Paragraph::new(format!("Time: {}", format_timer(app.engine.elapsed_seconds())))
        .alignment(Alignment::Center);
    f.render_widget(time, chunks[1]);

    let mode = if app.engine.is_completed() {
        "Completed!"
    } else if app.engine.is_selecting() {
        "Selecting"
    } else {
        "Browsing"
    };
    f.render_widget(
        Paragraph::new(format!("Mode: {mode}")).alignment(Alignment::Center),
        chunks[2],
    );

    let help = Paragraph::new("q: Quit | n: New Puzzle | Space: Select")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

fn status_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area)
}

fn render_messages(f: &mut Frame, messages: &MessageLog, area: Rect) {
    let items: Vec<ListItem> = messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(list, area);
}
