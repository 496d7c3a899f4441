//! Formatting utilities for terminal output

use crate::core::{Feedback, Symbol};

/// Format seconds as a zero-padded `MM:SS` timer
#[must_use]
pub fn format_timer(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as `M:SS` for summaries
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format feedback as peg glyphs: ● per exact match, ○ per color match
#[must_use]
pub fn feedback_pegs(feedback: Feedback) -> String {
    let mut result = String::with_capacity(12);
    for _ in 0..feedback.exact() {
        result.push('●');
    }
    for _ in 0..feedback.color() {
        result.push('○');
    }
    result
}

/// Format a code as initials, e.g. "RBGY"
#[must_use]
pub fn code_initials(code: &[Symbol]) -> String {
    code.iter().map(|s| s.initial()).collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
