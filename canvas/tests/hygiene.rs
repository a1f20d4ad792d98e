//! Source hygiene for the canvas library.
//!
//! The canvas runs inside a host's event loop, so production code never
//! panics, never drops an error unseen, and never writes to stdout/stderr.
//! Each rule below is a pattern with a budget over `canvas/src/` (sibling
//! `*_test.rs` files and comment lines excluded). Budgets only go down.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    rule: &'static str,
}

// Panics.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, rule: "propagate or match instead" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, rule: "propagate or match instead" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, rule: "return an error or an empty action list" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, rule: "make the state unrepresentable" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, rule: "no stubs in shipped handlers" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, rule: "no stubs in shipped handlers" };

// Lost errors.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, rule: "inspect or log the value" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, rule: "map the error into LoadError or log it" };

// Dead code.
const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, rule: "delete it" };

// Output goes through `tracing`.
const EPRINTLN: Budget = Budget { pattern: "eprintln!(", max: 0, rule: "use tracing" };
const DBG: Budget = Budget { pattern: "dbg!(", max: 0, rule: "use tracing" };

// Pointer pixels become grid cells only at these float-to-int casts:
// `GridLayout::span`, `GridLayout::cell_at` and the resize delta.
const CELL_CAST: Budget = Budget { pattern: " as i32", max: 3, rule: "derive cells via cell_at/span" };

/// Production `.rs` files under `src/`, minus `*_test.rs`.
fn source_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

/// Per-file count of code lines matching `pattern`. `exclude`, when set,
/// drops lines that only match as part of a longer pattern.
fn hits(pattern: &str, exclude: Option<&str>) -> Vec<(String, usize)> {
    source_files()
        .into_iter()
        .filter_map(|(path, content)| {
            let count = content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .filter(|line| line.contains(pattern))
                .filter(|line| exclude.is_none_or(|ex| !line.contains(ex)))
                .count();
            (count > 0).then_some((path, count))
        })
        .collect()
}

fn check(budget: &Budget, exclude: Option<&str>) {
    let found = hits(budget.pattern, exclude);
    let count: usize = found.iter().map(|(_, c)| c).sum();
    let listing = found.iter().map(|(path, c)| format!("  {path}: {c}")).collect::<Vec<_>>().join("\n");
    assert!(
        count <= budget.max,
        "`{}` budget exceeded: found {count}, max {} ({}).\n{listing}",
        budget.pattern,
        budget.max,
        budget.rule
    );
}

#[test]
fn sources_are_found() {
    let names: Vec<_> = source_files().into_iter().map(|(path, _)| path).collect();
    assert!(names.iter().any(|p| p.ends_with("grid.rs")), "scanned {names:?}");
    assert!(names.iter().all(|p| !p.ends_with("_test.rs")));
}

#[test]
fn no_unwrap_or_expect() {
    check(&UNWRAP, None);
    check(&EXPECT, None);
}

#[test]
fn no_panicking_macros() {
    check(&PANIC, None);
    check(&UNREACHABLE, None);
    check(&TODO, None);
    check(&UNIMPLEMENTED, None);
}

#[test]
fn no_silently_dropped_errors() {
    check(&SILENT_DISCARD, None);
    check(&DOT_OK, None);
}

#[test]
fn no_dead_code_allowances() {
    check(&ALLOW_DEAD_CODE, None);
}

#[test]
fn no_console_output() {
    let println = Budget { pattern: "println!(", max: 0, rule: "use tracing" };
    check(&println, Some("eprintln!("));
    check(&EPRINTLN, None);
    check(&DBG, None);
}

#[test]
fn float_to_cell_casts_stay_put() {
    check(&CELL_CAST, None);
}
