//! Identifier mapping: every table leaves this stage with exactly one
//! identifier column named `business_id`, and the deprecated raw name never
//! survives past a stage boundary.

use itertools::Itertools;

use crate::data::Value;
use crate::frame::Frame;

pub const CANONICAL_IDENTIFIER: &str = "business_id";
pub const RAW_IDENTIFIER: &str = "ID";

/// Guarantees a `business_id` column, in priority order: keep an existing
/// one, rename the raw `ID` column, or synthesize a zero-padded sequence in
/// row order. The raw column is dropped afterwards if it still lingers.
pub fn map_identifier(frame: &Frame) -> (Frame, Vec<String>) {
    let mut mapped = frame.clone();
    let mut notes = Vec::new();

    if mapped.has_column(CANONICAL_IDENTIFIER) {
        notes.push(format!("'{CANONICAL_IDENTIFIER}' already present."));
    } else if mapped.rename_column(RAW_IDENTIFIER, CANONICAL_IDENTIFIER) {
        notes.push(format!("Renamed '{RAW_IDENTIFIER}' -> '{CANONICAL_IDENTIFIER}'."));
    } else {
        mapped.push_column_with(CANONICAL_IDENTIFIER, |row| {
            Some(Value::String(format!("auto_{:06}", row + 1)))
        });
        notes.push(format!(
            "No '{CANONICAL_IDENTIFIER}' found. Generated '{CANONICAL_IDENTIFIER}' as auto_000001..."
        ));
    }

    if let Some(note) = strip_raw_identifier(&mut mapped, "identifier mapping") {
        notes.push(note);
    }

    (mapped, notes)
}

/// Translates a configured column-name list onto the mapped schema: the raw
/// identifier becomes the canonical one, duplicates collapse to their first
/// occurrence, and any leftover raw name is dropped outright.
pub fn sanitize_feature_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            if name == RAW_IDENTIFIER {
                CANONICAL_IDENTIFIER
            } else {
                name.as_str()
            }
        })
        .unique()
        .filter(|name| *name != RAW_IDENTIFIER)
        .map(str::to_string)
        .collect()
}

/// Drops the raw identifier column if present, returning the note to log.
/// Called at every stage boundary where the table could have picked the
/// column back up.
pub fn strip_raw_identifier(frame: &mut Frame, stage: &str) -> Option<String> {
    frame
        .drop_column(RAW_IDENTIFIER)
        .then(|| format!("Dropped deprecated '{RAW_IDENTIFIER}' column ({stage})."))
}
