//! Codebreak screen state and key handling

use super::app::{MessageLog, MessageStyle, Screen, is_quit_key};
use super::rendering;
use crate::codebreak::{CodeBreakEngine, CodeBreakEvent};
use crate::core::{CODE_LENGTH, Symbol};
use crate::output::formatters::{code_initials, feedback_pegs, format_duration};
use crate::stats::{KeyValueStore, keys, read_number};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use std::time::{Duration, Instant};
use tracing::warn;

/// Codebreak TUI application
pub struct CodeBreakApp {
    pub engine: CodeBreakEngine,
    pub store: Box<dyn KeyValueStore>,
    pub messages: MessageLog,
    pub best_time: Option<u64>,
    pub should_quit: bool,
}

impl CodeBreakApp {
    #[must_use]
    pub fn new(engine: CodeBreakEngine, store: Box<dyn KeyValueStore>) -> Self {
        let best_time = read_number(&*store, keys::CODEBREAK_BEST_TIME);
        let mut messages = MessageLog::default();
        messages.push(
            "Crack the 4-peg code: keys 1-6 pick colors, Enter submits",
            MessageStyle::Info,
        );

        Self {
            engine,
            store,
            messages,
            best_time,
            should_quit: false,
        }
    }

    fn submit(&mut self) {
        if self.engine.state().finished {
            return;
        }
        if !self.engine.is_guess_complete() {
            self.messages
                .push("Fill all four slots first", MessageStyle::Error);
            return;
        }

        for event in self.engine.submit_guess() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: CodeBreakEvent) {
        match event {
            CodeBreakEvent::GuessScored { attempt, record } => {
                let pegs = feedback_pegs(record.feedback);
                self.messages.push(
                    format!(
                        "#{attempt}: {} {}",
                        code_initials(&record.guess),
                        if pegs.is_empty() { "-" } else { pegs.as_str() }
                    ),
                    MessageStyle::Info,
                );
            }
            CodeBreakEvent::Won {
                attempts,
                elapsed_seconds,
            } => {
                self.messages.push(
                    format!(
                        "🎉 Cracked in {attempts} guesses and {}!",
                        format_duration(elapsed_seconds)
                    ),
                    MessageStyle::Success,
                );
                match self
                    .engine
                    .record_best_time(&mut *self.store, elapsed_seconds)
                {
                    Ok(true) => {
                        self.best_time = Some(elapsed_seconds);
                        self.messages.push("New best time!", MessageStyle::Success);
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!(error = %e, "failed to save best time");
                        self.messages
                            .push(format!("Could not save best time: {e}"), MessageStyle::Error);
                    }
                }
            }
            CodeBreakEvent::Lost { secret } => {
                self.messages.push(
                    format!("Out of guesses. The code was {}", code_initials(&secret)),
                    MessageStyle::Error,
                );
            }
        }
    }

    fn new_game(&mut self) {
        self.engine.reset();
        self.messages.clear();
        self.messages.push("New code generated", MessageStyle::Info);
    }
}

impl Screen for CodeBreakApp {
    fn draw(&self, f: &mut Frame) {
        rendering::ui_codebreak(f, self);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_key(&key) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Enter => self.submit(),
            KeyCode::Left => {
                let slot = self.engine.active_slot();
                self.engine
                    .select_slot((slot + CODE_LENGTH - 1) % CODE_LENGTH);
            }
            KeyCode::Right | KeyCode::Tab => {
                let slot = self.engine.active_slot();
                self.engine.select_slot((slot + 1) % CODE_LENGTH);
            }
            KeyCode::Char(c) => {
                let symbol = Symbol::from_key(c).or_else(|| c.to_string().parse().ok());
                if let Some(symbol) = symbol
                    && !self.engine.state().finished
                {
                    self.engine.select_symbol(symbol);
                }
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Symbol::{Blue, Green, Red, Yellow};
    use crate::stats::MemoryStore;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut CodeBreakApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_with_secret() -> CodeBreakApp {
        let engine = CodeBreakEngine::with_secret([Red, Blue, Green, Yellow]);
        CodeBreakApp::new(engine, Box::new(MemoryStore::new()))
    }

    #[test]
    fn digit_keys_fill_slots_in_order() {
        let mut app = app_with_secret();
        for key in ['1', '2', '3', '4'] {
            press(&mut app, KeyCode::Char(key));
        }
        assert_eq!(
            app.engine.guess(),
            &[Some(Red), Some(Blue), Some(Green), Some(Yellow)]
        );
    }

    #[test]
    fn incomplete_guess_is_not_submitted() {
        let mut app = app_with_secret();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.engine.state().attempts, 0);
        assert_eq!(
            app.messages.last().map(|m| m.style),
            Some(MessageStyle::Error)
        );
    }

    #[test]
    fn winning_records_best_time() {
        let mut app = app_with_secret();
        for key in ['r', 'b', 'g', 'y'] {
            press(&mut app, KeyCode::Char(key));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.engine.state().won);
        assert!(app.best_time.is_some());
        assert!(app.store.get(keys::CODEBREAK_BEST_TIME).is_some());
    }

    #[test]
    fn left_wraps_to_last_slot() {
        let mut app = app_with_secret();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.engine.active_slot(), CODE_LENGTH - 1);
    }

    #[test]
    fn q_quits() {
        let mut app = app_with_secret();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
