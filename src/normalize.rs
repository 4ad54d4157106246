//! Categorical normalization: free-text survey answers collapse into a closed
//! vocabulary of `missing`, `dont_know`, or the cleaned literal. Per-cell
//! normalization is pure and total; nothing in this module can fail.

use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

use crate::data::Value;
use crate::frame::Frame;

/// Sentinel written for absent or placeholder answers. Stays a literal string
/// because categorical columns are string-typed after normalization.
pub const MISSING_SENTINEL: &str = "missing";
/// Sentinel for the accepted spellings of "don't know".
pub const DONT_KNOW_SENTINEL: &str = "dont_know";

/// Case-insensitive placeholder answers treated as missing. Checked after
/// trimming and whitespace collapsing, so whitespace-only input matches the
/// empty token.
const MISSING_TOKENS: &[&str] = &[
    "",
    "n/a",
    "na",
    "none",
    "null",
    "nan",
    "refused",
    "prefer not to say",
    "not applicable",
];

/// Checked after curly apostrophes have been straightened.
const DONT_KNOW_TOKENS: &[&str] = &["don't know", "dont know"];

/// How many skipped column names the diagnostic note lists.
const SKIPPED_PREVIEW_LIMIT: usize = 10;

fn whitespace_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Trims, straightens typographic apostrophes, and collapses whitespace runs
/// to a single space.
pub fn clean_text(raw: &str) -> String {
    let straightened: String = raw
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' => '\'',
            other => other,
        })
        .collect();
    whitespace_run()
        .replace_all(straightened.trim(), " ")
        .trim()
        .to_string()
}

/// Maps one cell onto the closed vocabulary. Idempotent: the sentinels clean
/// to themselves and never match the token sets a second time differently.
pub fn normalize_value(cell: Option<&Value>) -> String {
    let Some(value) = cell else {
        return MISSING_SENTINEL.to_string();
    };
    let cleaned = clean_text(&value.as_display());
    let lowered = cleaned.to_lowercase();
    if MISSING_TOKENS.contains(&lowered.as_str()) {
        return MISSING_SENTINEL.to_string();
    }
    if DONT_KNOW_TOKENS.contains(&lowered.as_str()) {
        return DONT_KNOW_SENTINEL.to_string();
    }
    cleaned
}

/// True for cells the pipeline treats as absent: true-missing cells and the
/// normalizer's sentinel.
pub fn is_missing_marker(cell: Option<&Value>) -> bool {
    match cell {
        None => true,
        Some(Value::String(s)) => s == MISSING_SENTINEL,
        Some(_) => false,
    }
}

/// Normalizes the configured categorical columns that exist in the table and
/// reports the ones that do not. Absent columns are skipped and listed, never
/// an error.
pub fn normalize_categoricals(
    frame: &Frame,
    categorical_columns: &[String],
) -> (Frame, Vec<String>) {
    let mut normalized = frame.clone();
    let mut notes = Vec::new();

    let (existing, skipped): (Vec<&String>, Vec<&String>) = categorical_columns
        .iter()
        .partition(|column| normalized.has_column(column));

    for column in &existing {
        if let Some(index) = normalized.column_index(column) {
            normalized.map_column(index, |cell| Some(Value::String(normalize_value(cell))));
        }
    }

    notes.push(format!("Normalized {} categorical columns.", existing.len()));
    if !skipped.is_empty() {
        let preview = skipped
            .iter()
            .take(SKIPPED_PREVIEW_LIMIT)
            .map(|column| format!("'{column}'"))
            .join(", ");
        notes.push(format!(
            "Skipped {} categorical columns not present after mapping/alignment: [{preview}]",
            skipped.len()
        ));
    }

    (normalized, notes)
}
