//! Code-breaking feedback calculation
//!
//! Feedback is a pair of peg counts:
//! - exact (red pegs): right symbol in the right slot
//! - color (white pegs): right symbol in a different slot, after exact matches are removed

use super::Symbol;

/// Number of slots in a code
pub const CODE_LENGTH: usize = 4;

/// A complete code: either the hidden secret or a submitted guess
pub type Code = [Symbol; CODE_LENGTH];

/// Feedback for one guess against the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    exact: u8,
    color: u8,
}

impl Feedback {
    /// All slots correct
    pub const SOLVED: Self = Self {
        exact: CODE_LENGTH as u8,
        color: 0,
    };

    /// Create feedback from raw counts
    ///
    /// # Panics
    /// Panics in debug mode if the counts exceed the code length
    #[inline]
    #[must_use]
    pub const fn new(exact: u8, color: u8) -> Self {
        debug_assert!(
            (exact as usize) + (color as usize) <= CODE_LENGTH,
            "Feedback counts must not exceed code length"
        );
        Self { exact, color }
    }

    /// Red pegs
    #[inline]
    #[must_use]
    pub const fn exact(self) -> u8 {
        self.exact
    }

    /// White pegs
    #[inline]
    #[must_use]
    pub const fn color(self) -> u8 {
        self.color
    }

    /// Check if the guess matched the secret exactly
    #[inline]
    #[must_use]
    pub const fn is_solved(self) -> bool {
        self.exact as usize == CODE_LENGTH
    }

    /// Calculate the feedback when `guess` is played against `secret`
    ///
    /// # Algorithm
    /// 1. First pass: count exact matches and consume both the secret and guess slot
    /// 2. Second pass: for each unconsumed guess symbol, consume the first unconsumed
    ///    secret slot holding the same symbol
    ///
    /// Consuming slots keeps duplicated symbols from being counted twice.
    ///
    /// # Examples
    /// ```
    /// use puzzle_pair::core::{Feedback, Symbol::*};
    ///
    /// let feedback = Feedback::calculate(&[Red, Red, Green, Blue], &[Red, Green, Green, Yellow]);
    /// assert_eq!(feedback.exact(), 1);
    /// assert_eq!(feedback.color(), 1);
    /// ```
    #[must_use]
    pub fn calculate(secret: &Code, guess: &Code) -> Self {
        let mut secret_left: [Option<Symbol>; CODE_LENGTH] = secret.map(Some);
        let mut guess_left: [Option<Symbol>; CODE_LENGTH] = guess.map(Some);
        let mut exact = 0u8;
        let mut color = 0u8;

        // First pass: exact matches
        // Allow: Index needed to compare both codes and clear both slots
        #[allow(clippy::needless_range_loop)]
        for i in 0..CODE_LENGTH {
            if guess[i] == secret[i] {
                exact += 1;
                secret_left[i] = None;
                guess_left[i] = None;
            }
        }

        // Second pass: right symbol, wrong slot
        for symbol in guess_left.into_iter().flatten() {
            if let Some(slot) = secret_left.iter_mut().find(|s| **s == Some(symbol)) {
                *slot = None;
                color += 1;
            }
        }

        Self { exact, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Symbol::{Blue, Green, Orange, Purple, Red, Yellow};
    use proptest::prelude::*;

    fn code_strategy() -> impl Strategy<Value = Code> {
        prop::array::uniform4(proptest::sample::select(Symbol::ALL.to_vec()))
    }

    #[test]
    fn solved_constant() {
        assert!(Feedback::SOLVED.is_solved());
        assert_eq!(Feedback::SOLVED.exact(), 4);
        assert_eq!(Feedback::SOLVED.color(), 0);
    }

    #[test]
    fn no_common_symbols() {
        let feedback = Feedback::calculate(&[Red, Red, Blue, Blue], &[Green, Yellow, Purple, Orange]);
        assert_eq!(feedback, Feedback::new(0, 0));
    }

    #[test]
    fn exact_guess_is_solved() {
        let code = [Purple, Orange, Purple, Red];
        assert_eq!(Feedback::calculate(&code, &code), Feedback::SOLVED);
    }

    #[test]
    fn duplicate_guess_symbol_counted_once() {
        // Second G matches the single remaining G, not twice
        let feedback = Feedback::calculate(&[Red, Red, Green, Blue], &[Red, Green, Green, Yellow]);
        assert_eq!(feedback.exact(), 1);
        assert_eq!(feedback.color(), 1);
    }

    #[test]
    fn exact_match_takes_priority_over_color() {
        // Guess R in slot 0 is exact; the other R must not also score white
        let feedback = Feedback::calculate(&[Red, Blue, Green, Yellow], &[Red, Red, Red, Red]);
        assert_eq!(feedback, Feedback::new(1, 0));
    }

    #[test]
    fn all_colors_wrong_slots() {
        let feedback = Feedback::calculate(&[Red, Blue, Green, Yellow], &[Yellow, Green, Blue, Red]);
        assert_eq!(feedback, Feedback::new(0, 4));
    }

    #[test]
    fn duplicates_in_secret_only() {
        let feedback = Feedback::calculate(&[Blue, Blue, Blue, Red], &[Red, Blue, Green, Green]);
        assert_eq!(feedback, Feedback::new(1, 1));
    }

    proptest! {
        #[test]
        fn counts_never_exceed_code_length(secret in code_strategy(), guess in code_strategy()) {
            let feedback = Feedback::calculate(&secret, &guess);
            prop_assert!(feedback.exact() + feedback.color() <= 4);
        }

        #[test]
        fn solved_iff_equal(secret in code_strategy(), guess in code_strategy()) {
            let feedback = Feedback::calculate(&secret, &guess);
            prop_assert_eq!(feedback.is_solved(), secret == guess);
        }

        #[test]
        fn feedback_is_symmetric(secret in code_strategy(), guess in code_strategy()) {
            prop_assert_eq!(
                Feedback::calculate(&secret, &guess),
                Feedback::calculate(&guess, &secret)
            );
        }
    }
}
