use crate::domain::rule::Member;
use crate::domain::split::VAULT_LABEL;
use crate::error::{Result, SplitError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the split CLI, loaded from TOML.
///
/// ```toml
/// vault_label = "Band Vault (Retained)"
/// display_precision = 2
/// log_level = "warn"
///
/// [[roster]]
/// id = "m1"
/// name = "Alex"
/// role = "Guitar"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Label of the line that receives the unallocated remainder.
    pub vault_label: String,
    /// Decimal places amounts are rounded to when rendered.
    pub display_precision: u32,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Members seeded by `init`, in display order.
    pub roster: Vec<Member>,
}

const MAX_DISPLAY_PRECISION: u32 = 10;

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            vault_label: VAULT_LABEL.to_string(),
            display_precision: 2,
            log_level: "warn".to_string(),
            roster: Vec::new(),
        }
    }
}

impl SplitConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SplitError::ConfigError(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| SplitError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.vault_label.trim().is_empty() {
            return Err(SplitError::ConfigError(
                "vault_label must not be empty".to_string(),
            ));
        }
        if self.display_precision > MAX_DISPLAY_PRECISION {
            return Err(SplitError::ConfigError(format!(
                "display_precision must be at most {MAX_DISPLAY_PRECISION}"
            )));
        }
        Ok(())
    }
}
