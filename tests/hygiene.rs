//! Hygiene: source scans over production code in both workspace crates.
//!
//! Two kinds of check:
//! - per-scope pattern budgets (panics, swallowed errors, stray output)
//! - ownership rules: env reads, the HTTP client, and the bearer header each
//!   live in exactly one library file
//!
//! `*_test.rs` siblings are not production code and are skipped.

use std::fs;
use std::path::{Path, PathBuf};

const LIBRARY: &str = "src";
const CLI: &str = "cli/src";

/// How many production lines in a scope may contain `pattern`.
struct Budget {
    pattern: &'static str,
    max: usize,
}

const fn budget(pattern: &'static str, max: usize) -> Budget {
    Budget { pattern, max }
}

const LIBRARY_BUDGETS: &[Budget] = &[
    budget(".unwrap()", 0),
    budget(".expect(", 0),
    budget("panic!(", 0),
    budget("unreachable!(", 0),
    budget("todo!(", 0),
    budget("unimplemented!(", 0),
    budget("dbg!(", 0),
    budget("let _ =", 0),
    // `config::env_var`: an unset or non-UTF-8 variable reads as unset.
    budget(".ok()", 1),
    budget(".unwrap_or_default()", 0),
    budget("#[allow(dead_code)]", 0),
    // Library output goes through `tracing`.
    budget("println!", 0),
    budget("eprintln!", 0),
];

const CLI_BUDGETS: &[Budget] = &[
    budget(".unwrap()", 0),
    budget(".expect(", 0),
    budget("panic!(", 0),
    budget("unreachable!(", 0),
    budget("todo!(", 0),
    budget("dbg!(", 0),
    budget("let _ =", 0),
    budget(".ok()", 0),
    // `leave approve` / `leave reject` without `--comments`.
    budget(".unwrap_or_default()", 2),
    budget("#[allow(dead_code)]", 0),
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

impl SourceFile {
    fn hits(&self, pattern: &str) -> usize {
        self.content
            .lines()
            .filter(|line| line.contains(pattern))
            .count()
    }
}

fn production_files(root: &str) -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new(root), &mut files);
    assert!(!files.is_empty(), "no sources found under {root}");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("read {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.to_string_lossy();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {name}: {e}"));
        out.push(SourceFile { path, content });
    }
}

/// Files mentioning `pattern`, with per-file line counts.
fn locate(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|file| (file.path.display().to_string(), file.hits(pattern)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn check_budgets(root: &str, budgets: &[Budget]) {
    let files = production_files(root);
    let mut over = Vec::new();
    for Budget { pattern, max } in budgets {
        let hits = locate(&files, pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > *max {
            let detail: Vec<String> = hits
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect();
            over.push(format!("  `{pattern}`: found {count}, max {max}\n{}", detail.join("\n")));
        }
    }
    assert!(over.is_empty(), "{root} over budget:\n{}", over.join("\n"));
}

/// `pattern` appears only in `owner`, across both crates.
fn check_owned_by(pattern: &str, owner: &str) {
    let mut files = production_files(LIBRARY);
    files.extend(production_files(CLI));
    let owner = Path::new(owner);
    let strays: Vec<String> = locate(&files, pattern)
        .into_iter()
        .filter(|(path, _)| Path::new(path) != owner)
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect();
    assert!(strays.is_empty(), "`{pattern}` belongs in {} only:\n{}", owner.display(), strays.join("\n"));
}

// =============================================================================
// budgets
// =============================================================================

#[test]
fn library_within_budgets() {
    check_budgets(LIBRARY, LIBRARY_BUDGETS);
}

#[test]
fn cli_within_budgets() {
    check_budgets(CLI, CLI_BUDGETS);
}

// =============================================================================
// ownership
// =============================================================================

#[test]
fn env_read_only_in_config() {
    check_owned_by("std::env::var", "src/config.rs");
}

#[test]
fn http_client_built_only_in_client() {
    check_owned_by("Client::builder", "src/client.rs");
}

#[test]
fn bearer_attached_only_in_client() {
    check_owned_by("bearer_auth(", "src/client.rs");
}

#[test]
fn storage_keys_not_spelled_outside_config() {
    for key in ["\"auth_token\"", "\"refresh_token\""] {
        check_owned_by(key, "src/config.rs");
    }
}
