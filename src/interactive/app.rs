//! Shared TUI plumbing: message log, the screen trait and the event loop

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Poll timeout when no game timer is running
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Messages kept in the log
const MESSAGE_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Rolling log of the most recent messages
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn push(&mut self, text: impl Into<String>, style: MessageStyle) {
        self.messages.push(Message {
            text: text.into(),
            style,
        });

        if self.messages.len() > MESSAGE_LIMIT {
            self.messages.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Messages, oldest first
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// A game screen driven by the event loop
pub trait Screen {
    /// Render the current state
    fn draw(&self, f: &mut Frame);

    /// React to a key press
    fn handle_key(&mut self, key: KeyEvent);

    /// React to a mouse event; ignored by default
    fn handle_mouse(&mut self, _mouse: MouseEvent) {}

    /// Advance timers; returns whether a redraw is due
    fn on_tick(&mut self, now: Instant) -> bool;

    /// Time until the next timer tick, `None` when no timer is running
    fn next_tick(&self, now: Instant) -> Option<Duration>;

    fn should_quit(&self) -> bool;
}

/// Check for the keys that quit any screen
#[must_use]
pub fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Run a screen in the terminal until it asks to quit
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: Screen>(screen: S) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, screen);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, S: Screen>(
    terminal: &mut Terminal<B>,
    mut screen: S,
) -> Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| screen.draw(f))?;
            dirty = false;
        }

        let now = Instant::now();
        let timeout = screen.next_tick(now).unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    screen.handle_key(key);
                    dirty = true;
                }
                Event::Mouse(mouse) => {
                    screen.handle_mouse(mouse);
                    dirty = true;
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        if screen.on_tick(Instant::now()) {
            dirty = true;
        }

        if screen.should_quit() {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_log_keeps_last_five() {
        let mut log = MessageLog::default();
        for i in 0..8 {
            log.push(format!("message {i}"), MessageStyle::Info);
        }

        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            ["message 3", "message 4", "message 5", "message 6", "message 7"]
        );
        assert_eq!(log.last().map(|m| m.style), Some(MessageStyle::Info));
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
