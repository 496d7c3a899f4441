//! Generation report command
//!
//! Generates many word search puzzles and measures how often words fail to
//! find a spot in the grid.

use crate::themes::Theme;
use crate::wordsearch::{GeneratorConfig, Puzzle, generate_puzzle};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Aggregated placement results
#[derive(Debug, Clone)]
pub struct GenerationStatistics {
    pub puzzles: usize,
    /// Puzzles where every theme word was placed
    pub fully_placed: usize,
    pub words_attempted: usize,
    pub words_skipped: usize,
    /// Skip count per word
    pub skipped_by_word: FxHashMap<String, usize>,
    /// Times each theme was drawn
    pub theme_counts: FxHashMap<String, usize>,
    pub duration: Duration,
}

impl GenerationStatistics {
    /// Fraction of words placed, 1.0 when nothing was attempted
    #[must_use]
    pub fn placement_rate(&self) -> f64 {
        if self.words_attempted == 0 {
            1.0
        } else {
            1.0 - self.words_skipped as f64 / self.words_attempted as f64
        }
    }

    /// Skipped words, most frequent first
    #[must_use]
    pub fn worst_words(&self, limit: usize) -> Vec<(String, usize)> {
        let mut words: Vec<(String, usize)> = self
            .skipped_by_word
            .iter()
            .map(|(w, &n)| (w.clone(), n))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(limit);
        words
    }
}

/// Generate `count` puzzles in parallel, puzzle `i` seeded with `base_seed + i`
///
/// Returns `None` for an empty catalog.
#[must_use]
pub fn run_generation_report(
    catalog: &[Theme],
    config: &GeneratorConfig,
    count: usize,
    base_seed: u64,
    show_progress: bool,
) -> Option<GenerationStatistics> {
    if catalog.is_empty() {
        return None;
    }

    let pb = if show_progress {
        ProgressBar::new(count as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let puzzles: Vec<Puzzle> = (0..count)
        .into_par_iter()
        .filter_map(|i| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let puzzle = generate_puzzle(catalog, config, &mut rng);
            pb.inc(1);
            puzzle
        })
        .collect();
    pb.finish_with_message("Complete!");

    let stats = summarize(&puzzles, start.elapsed());
    info!(
        puzzles = stats.puzzles,
        skipped = stats.words_skipped,
        seconds = stats.duration.as_secs_f64(),
        "generation report finished"
    );
    Some(stats)
}

fn summarize(puzzles: &[Puzzle], duration: Duration) -> GenerationStatistics {
    let mut skipped_by_word: FxHashMap<String, usize> = FxHashMap::default();
    let mut theme_counts: FxHashMap<String, usize> = FxHashMap::default();
    let mut words_attempted = 0;
    let mut words_skipped = 0;

    for puzzle in puzzles {
        let report = &puzzle.report;
        *theme_counts.entry(report.theme.clone()).or_insert(0) += 1;
        words_attempted += report.placed.len() + report.skipped.len();
        words_skipped += report.skipped.len();
        for word in &report.skipped {
            *skipped_by_word.entry(word.clone()).or_insert(0) += 1;
        }
    }

    GenerationStatistics {
        puzzles: puzzles.len(),
        fully_placed: puzzles.iter().filter(|p| p.report.all_placed()).count(),
        words_attempted,
        words_skipped,
        skipped_by_word,
        theme_counts,
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::builtin_catalog;

    #[test]
    fn report_counts_every_puzzle() {
        let catalog = builtin_catalog();
        let stats =
            run_generation_report(&catalog, &GeneratorConfig::default(), 40, 1, false).unwrap();

        assert_eq!(stats.puzzles, 40);
        assert_eq!(stats.theme_counts.values().sum::<usize>(), 40);
        assert_eq!(stats.words_attempted, 40 * 8);
        assert_eq!(
            stats.skipped_by_word.values().sum::<usize>(),
            stats.words_skipped
        );
        assert!(stats.fully_placed <= stats.puzzles);
        assert!((0.0..=1.0).contains(&stats.placement_rate()));
    }

    #[test]
    fn report_is_reproducible() {
        let catalog = builtin_catalog();
        let config = GeneratorConfig::square(9);
        let a = run_generation_report(&catalog, &config, 25, 77, false).unwrap();
        let b = run_generation_report(&catalog, &config, 25, 77, false).unwrap();

        assert_eq!(a.words_skipped, b.words_skipped);
        assert_eq!(a.theme_counts, b.theme_counts);
    }

    #[test]
    fn cramped_grid_skips_long_words() {
        let catalog = vec![Theme::new("long", ["CAT", "ENCYCLOPEDIA"]).unwrap()];
        let stats =
            run_generation_report(&catalog, &GeneratorConfig::square(6), 10, 0, false).unwrap();

        assert_eq!(stats.fully_placed, 0);
        assert_eq!(stats.worst_words(5), vec![("ENCYCLOPEDIA".to_string(), 10)]);
        assert!((stats.placement_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_catalog_has_no_report() {
        assert!(run_generation_report(&[], &GeneratorConfig::default(), 5, 0, false).is_none());
    }
}
