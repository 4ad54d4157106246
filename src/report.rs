//! Run report: the audit artifact recording what one pipeline invocation saw
//! and decided. Saved alongside the transformed table so a grade can be traced
//! back to the exact input bytes and the full note log.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::engine::ContractOutcome;
use crate::grade::Grade;
use crate::io_utils;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub input: String,
    /// SHA-256 of the raw input bytes; absent when the input came from stdin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_sha256: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub grade: Grade,
    pub grade_level: u8,
    pub notes: Vec<String>,
    pub canonical_features: Vec<String>,
}

impl RunReport {
    pub fn assemble(input: &Path, outcome: &ContractOutcome) -> Result<Self> {
        let input_sha256 = if io_utils::is_dash(input) {
            None
        } else {
            let bytes = fs::read(input)
                .with_context(|| format!("Reading input file {input:?} for digest"))?;
            Some(hex_digest(&bytes))
        };
        Ok(Self {
            generated_at: Utc::now(),
            input: input.display().to_string(),
            input_sha256,
            rows: outcome.frame.row_count(),
            columns: outcome.frame.column_count(),
            grade: outcome.grade,
            grade_level: outcome.grade.level(),
            notes: outcome.notes.clone(),
            canonical_features: outcome.canonical_features.clone(),
        })
    }

    /// Saves as pretty JSON when the target extension is `json`, YAML
    /// otherwise.
    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                serde_json::to_string_pretty(self).context("Serializing run report to JSON")?
            }
            _ => serde_yaml::to_string(self).context("Serializing run report to YAML")?,
        };
        fs::write(path, rendered).with_context(|| format!("Writing run report to {path:?}"))?;
        Ok(())
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
