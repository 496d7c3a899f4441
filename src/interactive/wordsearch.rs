//! Word search screen state, cursor and drag handling

use super::app::{MessageLog, MessageStyle, Screen, is_quit_key};
use super::rendering;
use crate::core::Cell;
use crate::output::formatters::format_duration;
use crate::stats::KeyValueStore;
use crate::wordsearch::{WordSearchEngine, WordSearchEvent};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::warn;

/// Terminal columns per grid letter
pub const CELL_WIDTH: u16 = 2;

/// Word search TUI application
pub struct WordSearchApp {
    pub engine: WordSearchEngine,
    pub store: Box<dyn KeyValueStore>,
    pub messages: MessageLog,
    pub cursor: Cell,
    pub should_quit: bool,
    /// Where the grid was last drawn, for mapping mouse positions to cells
    pub grid_area: std::cell::Cell<Rect>,
}

impl WordSearchApp {
    #[must_use]
    pub fn new(engine: WordSearchEngine, store: Box<dyn KeyValueStore>) -> Self {
        let mut app = Self {
            engine,
            store,
            messages: MessageLog::default(),
            cursor: Cell::new(0, 0),
            should_quit: false,
            grid_area: std::cell::Cell::new(Rect::default()),
        };
        app.announce_puzzle();
        app
    }

    fn announce_puzzle(&mut self) {
        if let Some(report) = self.engine.report() {
            let text = format!("Theme: {}", report.theme);
            let skipped = report.skipped.len();
            self.messages.push(text, MessageStyle::Info);
            if skipped > 0 {
                self.messages.push(
                    format!("{skipped} word(s) did not fit and were dropped"),
                    MessageStyle::Error,
                );
            }
        }
        self.messages.push(
            "Arrows move, Space starts/ends a selection, or drag with the mouse",
            MessageStyle::Info,
        );
    }

    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let grid = self.engine.grid();
        let row = self
            .cursor
            .row
            .saturating_add_signed(dr)
            .min(grid.rows().saturating_sub(1));
        let col = self
            .cursor
            .col
            .saturating_add_signed(dc)
            .min(grid.cols().saturating_sub(1));
        self.cursor = Cell::new(row, col);

        if self.engine.is_selecting() {
            self.engine.extend_selection_to(self.cursor);
        }
    }

    fn finish_selection(&mut self) {
        for event in self.engine.end_selection() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: WordSearchEvent) {
        match event {
            WordSearchEvent::WordFound {
                word, found, total, ..
            } => {
                self.messages.push(
                    format!("Found {word} ({found}/{total})"),
                    MessageStyle::Success,
                );
                self.save_progress();
            }
            WordSearchEvent::Completed {
                total,
                elapsed_seconds,
            } => {
                self.messages.push(
                    format!(
                        "🎉 All {total} words found in {}!",
                        format_duration(elapsed_seconds)
                    ),
                    MessageStyle::Success,
                );
            }
        }
    }

    fn save_progress(&mut self) {
        if let Err(e) = self.engine.record_progress(&mut *self.store) {
            warn!(error = %e, "failed to save word search progress");
            self.messages
                .push(format!("Could not save progress: {e}"), MessageStyle::Error);
        }
    }

    fn new_puzzle(&mut self) {
        self.engine.reset();
        self.cursor = Cell::new(0, 0);
        self.messages.clear();
        self.announce_puzzle();
    }

    /// Grid cell under a terminal position, if any
    #[must_use]
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Cell> {
        let area = self.grid_area.get();
        // Skip the block border
        let x = column.checked_sub(area.x + 1)?;
        let y = row.checked_sub(area.y + 1)?;
        let cell = Cell::new(usize::from(y), usize::from(x / CELL_WIDTH));
        self.engine.grid().contains(cell).then_some(cell)
    }
}

impl Screen for WordSearchApp {
    fn draw(&self, f: &mut Frame) {
        rendering::ui_wordsearch(f, self);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_key(&key) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('n') => self.new_puzzle(),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char(' ') => {
                if self.engine.is_selecting() {
                    self.finish_selection();
                } else {
                    self.engine.begin_selection(self.cursor);
                }
            }
            KeyCode::Enter => self.finish_selection(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(cell) = self.cell_at(mouse.column, mouse.row) {
                    self.cursor = cell;
                    self.engine.begin_selection(cell);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(cell) = self.cell_at(mouse.column, mouse.row) {
                    self.cursor = cell;
                    self.engine.extend_selection_to(cell);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.finish_selection(),
            _ => {}
        }
    }

    fn on_tick(&mut self, now: Instant) -> bool {
        self.engine.poll_tick(now)
    }

    fn next_tick(&self, now: Instant) -> Option<Duration> {
        self.engine.time_until_tick(now)
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
