//! The shared pipeline trunk: identifier mapping, schema alignment,
//! categorical normalization, feature derivation, compatibility grading, in
//! that fixed order, with every stage's notes concatenated into one log.

use log::info;

use crate::frame::Frame;
use crate::grade::{self, Grade, SignalPolicy};
use crate::{align, derive, identifier, normalize};

/// Everything a pipeline run produces: the transformed table, its grade, the
/// ordered diagnostic log, and the canonical feature list actually used for
/// alignment (identifier-mapped and de-duplicated).
#[derive(Debug, Clone, PartialEq)]
pub struct ContractOutcome {
    pub frame: Frame,
    pub grade: Grade,
    pub notes: Vec<String>,
    pub canonical_features: Vec<String>,
}

pub fn run_contract(
    frame: &Frame,
    canonical_features: &[String],
    categorical_columns: &[String],
) -> ContractOutcome {
    run_contract_with_policy(
        frame,
        canonical_features,
        categorical_columns,
        &SignalPolicy::default(),
    )
}

/// Runs the five stages against `frame`. The input is never mutated; each
/// stage hands a fresh table to the next. Notes are appended in stage order
/// and never reordered or deduplicated, so repeated safety notes across
/// stages are expected.
pub fn run_contract_with_policy(
    frame: &Frame,
    canonical_features: &[String],
    categorical_columns: &[String],
    policy: &SignalPolicy,
) -> ContractOutcome {
    let mut notes = Vec::new();

    let (mapped, stage_notes) = identifier::map_identifier(frame);
    notes.extend(stage_notes);

    let features = identifier::sanitize_feature_names(canonical_features);
    let (aligned, stage_notes) = align::align_schema(&mapped, &features);
    notes.extend(stage_notes);

    let categoricals = identifier::sanitize_feature_names(categorical_columns);
    notes.push(format!(
        "Categorical columns mapped (raw {} -> mapped {}).",
        categorical_columns.len(),
        categoricals.len()
    ));
    let (normalized, stage_notes) = normalize::normalize_categoricals(&aligned, &categoricals);
    notes.extend(stage_notes);

    let (derived, stage_notes) = derive::derive_features(&normalized);
    notes.extend(stage_notes);

    let (grade, stage_notes) = grade::grade_compatibility(&derived, policy);
    notes.extend(stage_notes);

    info!(
        "Pipeline complete: grade {} over {} row(s), {} column(s), {} note(s)",
        grade.level(),
        derived.row_count(),
        derived.column_count(),
        notes.len()
    );

    ContractOutcome {
        frame: derived,
        grade,
        notes,
        canonical_features: features,
    }
}
