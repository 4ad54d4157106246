use crate::frame::Frame;
use crate::identifier::{sanitize_feature_names, strip_raw_identifier};

/// Aligns a table against the canonical feature list: every canonical column
/// exists afterwards, absent ones appended (in list order) with missing
/// cells. Existing columns and their order are left alone. A missing
/// canonical column is a normal, logged condition, never an error.
pub fn align_schema(frame: &Frame, canonical_features: &[String]) -> (Frame, Vec<String>) {
    let features = sanitize_feature_names(canonical_features);
    let mut aligned = frame.clone();
    let mut notes = Vec::new();

    for feature in &features {
        if aligned.push_column_with(feature, |_| None) {
            notes.push(format!(
                "Added missing column '{feature}' as missing (schema alignment)."
            ));
        }
    }

    if let Some(note) = strip_raw_identifier(&mut aligned, "schema alignment") {
        notes.push(note);
    }

    (aligned, notes)
}
