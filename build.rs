//! Build script to generate the embedded theme catalog
//!
//! Reads the theme file and generates Rust source code with a const array.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_theme_catalog(
        "data/themes.txt",
        &Path::new(&out_dir).join("themes.rs"),
        "THEMES",
        "Built-in word search themes",
    );

    // Rebuild if the catalog changes
    println!("cargo:rerun-if-changed=data/themes.txt");
}

fn generate_theme_catalog(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let themes: Vec<(&str, Vec<&str>)> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let (name, words) = line
                .split_once(':')
                .unwrap_or_else(|| panic!("Theme line missing ':' separator: {line}"));
            (name.trim(), words.split_whitespace().collect())
        })
        .collect();
    let count = themes.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated theme catalog").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "pub const {const_name}: &[(&str, &[&str])] = &[").unwrap();

    for (name, words) in themes {
        let quoted: Vec<String> = words
            .iter()
            .map(|w| format!("\"{}\"", w.to_ascii_uppercase()))
            .collect();
        writeln!(output, "    (\"{name}\", &[{}]),", quoted.join(", ")).unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of themes in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
