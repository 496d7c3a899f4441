//! Display functions for command results

use super::formatters::{create_progress_bar, format_duration};
use crate::commands::GenerationStatistics;
use crate::stats::Dashboard;
use crate::wordsearch::GeneratorConfig;
use colored::Colorize;

/// Print the landing-page summary of both games
pub fn print_dashboard(dashboard: &Dashboard) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "PUZZLE PAIR".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n🔐 {}", "Codebreak".bright_cyan().bold());
    match dashboard.codebreak_best_time {
        Some(seconds) => println!(
            "   Best time:    {}",
            format_duration(seconds).bright_yellow().bold()
        ),
        None => println!("   Best time:    {}", "--:--".bright_black()),
    }

    println!("\n🔎 {}", "Word Search".bright_cyan().bold());
    println!(
        "   Words found:  {} / {}",
        dashboard.words_found.to_string().bright_yellow().bold(),
        dashboard.words_total
    );
    println!();
}

/// Print the result of a generation report
pub fn print_generation_report(stats: &GenerationStatistics, config: &GeneratorConfig) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "GENERATION REPORT".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Placement:".bright_cyan().bold());
    println!(
        "   Grid:             {}x{} ({} tries per word)",
        config.rows, config.cols, config.placement_attempts
    );
    println!("   Puzzles:          {}", stats.puzzles);
    println!(
        "   Fully placed:     {}",
        format!("{}", stats.fully_placed).green()
    );
    println!(
        "   Words skipped:    {}",
        if stats.words_skipped == 0 {
            "0".green()
        } else {
            stats.words_skipped.to_string().yellow()
        }
    );
    let rate = stats.placement_rate() * 100.0;
    println!(
        "   Placement rate:   [{}] {}",
        create_progress_bar(rate, 100.0, 30).green(),
        format!("{rate:.2}%").bright_yellow().bold()
    );
    println!("   Time taken:       {:.2}s", stats.duration.as_secs_f64());

    println!("\n📈 {}", "Themes drawn:".bright_cyan().bold());
    let mut themes: Vec<_> = stats.theme_counts.iter().collect();
    themes.sort();
    for (theme, count) in themes {
        let pct = if stats.puzzles > 0 {
            *count as f64 / stats.puzzles as f64 * 100.0
        } else {
            0.0
        };
        println!("   {theme:<12} {count:5} ({pct:5.1}%)");
    }

    let worst = stats.worst_words(10);
    if !worst.is_empty() {
        println!("\n⚠️  {}", "Most skipped words:".bright_cyan().bold());
        for (word, count) in worst {
            println!("   {:<12} {}", word, count.to_string().red());
        }
    }
    println!();
}
