//! Interactive TUI for both games

mod app;
mod codebreak;
mod rendering;
mod wordsearch;

pub use app::{Message, MessageLog, MessageStyle, Screen, run_tui};
pub use codebreak::CodeBreakApp;
pub use wordsearch::WordSearchApp;
