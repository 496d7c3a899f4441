//! Landing-page summary
//!
//! Reads the stored scores of both games without touching any engine state.

use super::store::KeyValueStore;
use serde::Serialize;

/// Store keys shared by the games and the dashboard
pub mod keys {
    /// Fastest winning code-break game, in seconds
    pub const CODEBREAK_BEST_TIME: &str = "codebreakBestTime";
    /// Words found in the current or most recent word search
    pub const WORD_SEARCH_FOUND: &str = "wordSearchFound";
    /// Words listed in the current or most recent word search
    pub const WORD_SEARCH_TOTAL: &str = "wordSearchTotal";
}

/// Read a decimal integer; missing or unparsable values are `None`
#[must_use]
pub fn read_number(store: &dyn KeyValueStore, key: &str) -> Option<u64> {
    store.get(key).and_then(|value| value.trim().parse().ok())
}

/// Summary stats shown on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Dashboard {
    pub codebreak_best_time: Option<u64>,
    pub words_found: u64,
    pub words_total: u64,
}

impl Dashboard {
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            codebreak_best_time: read_number(store, keys::CODEBREAK_BEST_TIME),
            words_found: read_number(store, keys::WORD_SEARCH_FOUND).unwrap_or(0),
            words_total: read_number(store, keys::WORD_SEARCH_TOTAL).unwrap_or(0),
        }
    }
}
