//! Hygiene: source-level budgets for the sticker engine.
//!
//! Library code runs inside a host UI event loop, so it must never crash the
//! host or write to stdout. These tests scan `src/` (excluding `*_test.rs`)
//! for patterns that break that. Every budget is zero; raising one needs a
//! matching removal elsewhere.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "propagate or absorb instead" },
    Budget { pattern: ".expect(", max: 0, why: "propagate or absorb instead" },
    Budget { pattern: "panic!(", max: 0, why: "the core absorbs bad input" },
    Budget { pattern: "unreachable!(", max: 0, why: "model the state instead" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "let _ =", max: 0, why: "inspect the result" },
    Budget { pattern: ".ok()", max: 0, why: "inspect the error" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" },
    Budget { pattern: "println!(", max: 0, why: "log through tracing" },
    Budget { pattern: "eprintln!(", max: 0, why: "log through tracing" },
    Budget { pattern: "dbg!(", max: 0, why: "debug leftover" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits_for(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn source_tree_is_found() {
    assert!(!source_files().is_empty(), "no sources under src/; run from the crate root");
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = hits_for(&files, budget.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail: Vec<String> = hits.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!(
                "{} budget exceeded: found {count}, max {} ({})\n{}",
                budget.pattern,
                budget.max,
                budget.why,
                detail.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn every_module_has_a_test_file() {
    let files = source_files();
    let missing: Vec<&str> = files
        .iter()
        .filter(|f| !f.path.ends_with("lib.rs") && !f.path.ends_with("consts.rs"))
        .filter(|f| !f.content.contains("_test.rs\"]"))
        .map(|f| f.path.as_str())
        .collect();
    assert!(missing.is_empty(), "modules without a sibling test file: {missing:?}");
}
