use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::grade::{COUNTRY_COLUMN, SignalPolicy};
use crate::identifier::CANONICAL_IDENTIFIER;

/// The two configuration lists a pipeline run needs: the canonical schema the
/// downstream scorer expects and the columns holding free-text categorical
/// answers. Supplied as a YAML document; either identifier spelling is
/// accepted and normalized away by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractSpec {
    pub canonical_features: Vec<String>,
    pub categorical_columns: Vec<String>,
}

impl ContractSpec {
    /// Starter template seeded with the default canonical schema: identifier,
    /// country, and the three signal groups of the default grading policy.
    pub fn starter() -> Self {
        let policy = SignalPolicy::default();
        let mut canonical_features = vec![
            CANONICAL_IDENTIFIER.to_string(),
            COUNTRY_COLUMN.to_string(),
        ];
        canonical_features.extend(policy.basics.iter().cloned());
        canonical_features.extend(policy.financial_activity.iter().cloned());
        canonical_features.extend(policy.access_resilience.iter().cloned());

        let mut categorical_columns = vec![COUNTRY_COLUMN.to_string()];
        categorical_columns.extend(policy.access_resilience.iter().cloned());

        Self {
            canonical_features,
            categorical_columns,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading contract file {path:?}"))?;
        let spec: ContractSpec = serde_yaml::from_str(&raw)
            .with_context(|| format!("Parsing contract file {path:?}"))?;
        spec.validate()
            .with_context(|| format!("Validating contract file {path:?}"))?;
        Ok(spec)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = serde_yaml::to_string(self).context("Serializing contract")?;
        fs::write(path, rendered).with_context(|| format!("Writing contract file {path:?}"))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.canonical_features.is_empty() {
            bail!("Contract must declare at least one canonical feature");
        }
        if self
            .canonical_features
            .iter()
            .chain(&self.categorical_columns)
            .any(|name| name.trim().is_empty())
        {
            bail!("Contract column names must not be blank");
        }
        Ok(())
    }
}
