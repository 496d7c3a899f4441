//! Code-breaking game engine
//!
//! A pure state machine: the UI feeds it symbol choices and submissions and
//! renders the events it returns.

use crate::core::{CODE_LENGTH, Code, Feedback, Symbol};
use crate::stats::{KeyValueStore, StoreError, Stopwatch, Ticker, keys, read_number};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Guesses allowed per game
pub const MAX_ATTEMPTS: usize = 10;

/// A submitted guess and the feedback it earned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRecord {
    pub guess: Code,
    pub feedback: Feedback,
}

/// Progress of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameState {
    pub attempts: usize,
    pub won: bool,
    pub finished: bool,
}

/// State changes reported back to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeBreakEvent {
    /// A guess was scored; `attempt` is 1-based
    GuessScored { attempt: usize, record: GuessRecord },
    /// The secret was found
    Won { attempts: usize, elapsed_seconds: u64 },
    /// Attempts ran out; the secret is revealed
    Lost { secret: Code },
}

/// Code-breaking game
pub struct CodeBreakEngine {
    rng: StdRng,
    secret: Code,
    guess: [Option<Symbol>; CODE_LENGTH],
    active_slot: usize,
    history: Vec<GuessRecord>,
    state: GameState,
    stopwatch: Stopwatch,
    ticker: Ticker,
}

impl CodeBreakEngine {
    /// Start a game with an OS-seeded generator
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Start a reproducible game
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Start a game with a known secret
    #[must_use]
    pub fn with_secret(secret: Code) -> Self {
        let mut engine = Self::with_seed(0);
        engine.secret = secret;
        engine
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut engine = Self {
            rng,
            secret: [Symbol::Red; CODE_LENGTH],
            guess: [None; CODE_LENGTH],
            active_slot: 0,
            history: Vec::new(),
            state: GameState::default(),
            stopwatch: Stopwatch::start(),
            ticker: Ticker::default(),
        };
        engine.generate_secret_code();
        engine
    }

    /// Draw a new secret (uniform, repeats allowed) and reset game progress
    ///
    /// The guess is emptied, the first slot made active and the timer started over.
    pub fn generate_secret_code(&mut self) {
        let rng = &mut self.rng;
        self.secret = std::array::from_fn(|_| Symbol::ALL[rng.random_range(0..Symbol::COUNT)]);
        self.history.clear();
        self.state = GameState::default();
        self.guess = [None; CODE_LENGTH];
        self.active_slot = 0;
        self.stopwatch = Stopwatch::start();
        self.ticker.restart(Instant::now());

        debug!(secret = ?self.secret, "generated secret code");
    }

    /// Put `symbol` in slot `position`; ignored once finished or out of range
    pub fn set_guess_symbol(&mut self, position: usize, symbol: Symbol) {
        if self.state.finished {
            return;
        }
        if let Some(slot) = self.guess.get_mut(position) {
            *slot = Some(symbol);
        }
    }

    /// Put `symbol` in the active slot, then advance to the next slot
    pub fn select_symbol(&mut self, symbol: Symbol) {
        if self.state.finished {
            return;
        }
        self.set_guess_symbol(self.active_slot, symbol);
        if self.active_slot < CODE_LENGTH - 1 {
            self.active_slot += 1;
        }
    }

    /// Make `position` the active slot; ignored once finished or out of range
    pub fn select_slot(&mut self, position: usize) {
        if self.state.finished || position >= CODE_LENGTH {
            return;
        }
        self.active_slot = position;
    }

    /// Check if every slot holds a symbol
    #[must_use]
    pub fn is_guess_complete(&self) -> bool {
        self.guess.iter().all(Option::is_some)
    }

    /// Score the current guess
    ///
    /// Returns no events if the game is finished or the guess is incomplete.
    pub fn submit_guess(&mut self) -> Vec<CodeBreakEvent> {
        if self.state.finished {
            return Vec::new();
        }
        let Some(guess) = self.complete_guess() else {
            return Vec::new();
        };

        let feedback = Self::compute_feedback(&self.secret, &guess);
        let record = GuessRecord { guess, feedback };
        self.history.push(record);
        self.state.attempts += 1;

        let mut events = vec![CodeBreakEvent::GuessScored {
            attempt: self.state.attempts,
            record,
        }];

        if feedback.is_solved() {
            self.state.won = true;
            self.finish();
            info!(attempts = self.state.attempts, seconds = self.elapsed_seconds(), "code cracked");
            events.push(CodeBreakEvent::Won {
                attempts: self.state.attempts,
                elapsed_seconds: self.elapsed_seconds(),
            });
        } else if self.state.attempts >= MAX_ATTEMPTS {
            self.finish();
            info!(attempts = self.state.attempts, "out of attempts");
            events.push(CodeBreakEvent::Lost {
                secret: self.secret,
            });
        } else {
            self.guess = [None; CODE_LENGTH];
            self.active_slot = 0;
        }

        events
    }

    /// Two-pass exact/color scoring
    #[must_use]
    pub fn compute_feedback(secret: &Code, guess: &Code) -> Feedback {
        Feedback::calculate(secret, guess)
    }

    /// Whole seconds since the game started, frozen once finished
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.stopwatch.elapsed_seconds()
    }

    /// Store `seconds` as the best time if this game was won and it beats the stored best
    ///
    /// A missing or unparsable stored value counts as no best. Returns whether
    /// the store was written.
    ///
    /// # Errors
    /// Returns `StoreError` if the store rejects the write.
    pub fn record_best_time(
        &self,
        store: &mut dyn KeyValueStore,
        seconds: u64,
    ) -> Result<bool, StoreError> {
        if !self.state.won || self.state.attempts > MAX_ATTEMPTS {
            return Ok(false);
        }

        let improves = read_number(store, keys::CODEBREAK_BEST_TIME).is_none_or(|best| seconds < best);
        if improves {
            store.set(keys::CODEBREAK_BEST_TIME, &seconds.to_string())?;
            info!(seconds, "new best time");
        }
        Ok(improves)
    }

    /// Throw away the current game and start a new one
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.generate_secret_code();
    }

    /// Report whether a display refresh is due
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        self.ticker.poll(now)
    }

    /// Time until the next display refresh, `None` once finished
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn guess(&self) -> &[Option<Symbol>; CODE_LENGTH] {
        &self.guess
    }

    #[must_use]
    pub const fn active_slot(&self) -> usize {
        self.active_slot
    }

    /// Scored guesses in attempt order
    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// The secret, only once the game is over
    #[must_use]
    pub const fn revealed_secret(&self) -> Option<&Code> {
        if self.state.finished {
            Some(&self.secret)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    fn complete_guess(&self) -> Option<Code> {
        let mut code = [Symbol::Red; CODE_LENGTH];
        for (slot, symbol) in code.iter_mut().zip(self.guess) {
            *slot = symbol?;
        }
        Some(code)
    }

    fn finish(&mut self) {
        self.state.finished = true;
        self.stopwatch.stop();
        self.ticker.cancel();
    }
}

impl Default for CodeBreakEngine {
    fn default() -> Self {
        Self::new()
    }
}
