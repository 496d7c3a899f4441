//! End-to-end runs of both games against the stores

use puzzle_pair::codebreak::{CodeBreakEngine, CodeBreakEvent, MAX_ATTEMPTS};
use puzzle_pair::core::Symbol::{Blue, Green, Red, Yellow};
use puzzle_pair::core::{Cell, Grid, Symbol};
use puzzle_pair::stats::{Dashboard, JsonFileStore, KeyValueStore, MemoryStore, keys};
use puzzle_pair::themes::builtin_catalog;
use puzzle_pair::wordsearch::{WordSearchEngine, WordSearchEvent};

fn play(engine: &mut CodeBreakEngine, guess: [Symbol; 4]) -> Vec<CodeBreakEvent> {
    for symbol in guess {
        engine.select_symbol(symbol);
    }
    engine.submit_guess()
}

#[test]
fn codebreak_best_time_only_improves() {
    let mut store = MemoryStore::new();
    store.set(keys::CODEBREAK_BEST_TIME, "600").unwrap();

    let mut engine = CodeBreakEngine::with_secret([Red, Blue, Green, Yellow]);
    let events = play(&mut engine, [Red, Blue, Green, Yellow]);
    let Some(&CodeBreakEvent::Won { attempts, elapsed_seconds }) = events.last() else {
        panic!("expected a win, got {events:?}");
    };
    assert_eq!(attempts, 1);
    assert!(engine.stopwatch().is_stopped());

    assert!(engine.record_best_time(&mut store, elapsed_seconds).unwrap());
    assert_eq!(
        Dashboard::load(&store).codebreak_best_time,
        Some(elapsed_seconds)
    );

    // A slower run leaves the stored best alone
    assert!(!engine.record_best_time(&mut store, elapsed_seconds + 30).unwrap());
    assert_eq!(
        store.get(keys::CODEBREAK_BEST_TIME),
        Some(elapsed_seconds.to_string())
    );
}

#[test]
fn codebreak_loss_after_max_attempts() {
    let mut store = MemoryStore::new();
    let mut engine = CodeBreakEngine::with_secret([Red, Red, Red, Red]);

    let mut last = Vec::new();
    for _ in 0..MAX_ATTEMPTS {
        last = play(&mut engine, [Blue, Blue, Blue, Blue]);
    }

    assert_eq!(
        last.last(),
        Some(&CodeBreakEvent::Lost {
            secret: [Red, Red, Red, Red]
        })
    );
    let state = engine.state();
    assert!(state.finished);
    assert!(!state.won);
    assert_eq!(state.attempts, MAX_ATTEMPTS);

    // Finished games ignore further input and never write a best time
    assert!(play(&mut engine, [Red, Red, Red, Red]).is_empty());
    assert!(!engine.record_best_time(&mut store, 1).unwrap());
    assert!(store.is_empty());
}

#[test]
fn word_search_cat_completes() {
    let mut rows = vec![format!("CAT{}", "X".repeat(12))];
    rows.extend((1..15).map(|_| "X".repeat(15)));
    let grid = Grid::from_rows(&rows).unwrap();
    let mut engine = WordSearchEngine::from_parts(grid, vec!["CAT".to_string()]);

    engine.begin_selection(Cell::new(0, 0));
    engine.extend_selection_to(Cell::new(0, 2));
    let events = engine.end_selection();

    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], WordSearchEvent::WordFound { word, found: 1, total: 1, .. } if word == "CAT"));
    assert!(matches!(events[1], WordSearchEvent::Completed { total: 1, .. }));
    assert!(engine.is_completed());
    assert!(!engine.ticker().is_running());

    let mut store = MemoryStore::new();
    engine.record_progress(&mut store).unwrap();
    let dashboard = Dashboard::load(&store);
    assert_eq!(dashboard.words_found, 1);
    assert_eq!(dashboard.words_total, 1);
}

#[test]
fn generated_puzzles_are_completable() {
    for seed in 0..20 {
        let mut engine = WordSearchEngine::with_seed(builtin_catalog(), seed).unwrap();
        let placements = engine.report().unwrap().placed.clone();
        assert!(!placements.is_empty());

        for placement in &placements {
            let cells = placement.cells();
            engine.begin_selection(cells[0]);
            engine.extend_selection_to(cells[cells.len() - 1]);
            engine.end_selection();
            assert!(engine.is_found(&placement.word), "seed {seed}: {placement:?}");
        }
        assert!(engine.is_completed(), "seed {seed}");
    }
}

#[test]
fn new_rounds_after_finished_games() {
    let mut engine = CodeBreakEngine::with_secret([Red, Red, Blue, Blue]);
    play(&mut engine, [Red, Red, Blue, Blue]);
    assert!(engine.state().finished);

    engine.generate_secret_code();
    assert!(!engine.state().finished);
    assert!(engine.ticker().is_running());
    assert!(!play(&mut engine, [Green, Green, Green, Green]).is_empty());
    assert_eq!(engine.state().attempts, 1);

    let mut search = WordSearchEngine::with_seed(builtin_catalog(), 3).unwrap();
    let placements = search.report().unwrap().placed.clone();
    for placement in &placements {
        let cells = placement.cells();
        search.begin_selection(cells[0]);
        search.extend_selection_to(cells[cells.len() - 1]);
        search.end_selection();
    }
    assert!(search.is_completed());

    search.generate_puzzle(&builtin_catalog()).unwrap();
    assert!(!search.is_completed());
    assert!(search.found_words().is_empty());
    assert!(search.ticker().is_running());
}

#[test]
fn progress_survives_reopening_the_file_store() {
    let path = std::env::temp_dir().join(format!(
        "puzzle_pair_engines_{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut store = JsonFileStore::open(&path).unwrap();
        let mut engine = CodeBreakEngine::with_secret([Yellow, Green, Blue, Red]);
        play(&mut engine, [Yellow, Green, Blue, Red]);
        assert!(engine.record_best_time(&mut store, 42).unwrap());
    }

    let store = JsonFileStore::open(&path).unwrap();
    let dashboard = Dashboard::load(&store);
    assert_eq!(dashboard.codebreak_best_time, Some(42));
    assert_eq!(dashboard.words_found, 0);

    std::fs::remove_file(&path).unwrap();
}
