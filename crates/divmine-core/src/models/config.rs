//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::profile::{builtin_profiles, DocumentProfile};
use crate::error::{DivmineError, Result};
use crate::layout::DEFAULT_LINE_BUCKET;

/// Main configuration for divmine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DivmineConfig {
    /// Layout reconstruction configuration.
    pub layout: LayoutConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Known document-type profiles.
    pub profiles: Vec<DocumentProfile>,
}

impl Default for DivmineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            extraction: ExtractionConfig::default(),
            profiles: builtin_profiles(),
        }
    }
}

/// Layout reconstruction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical bucket width. Fragments whose tops snap to the same bucket
    /// form one line; lines closer than this will merge.
    pub line_bucket: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_bucket: DEFAULT_LINE_BUCKET,
        }
    }
}

/// What to do when the document-type marker is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// Fail with `AnchorNotFound`.
    #[default]
    Require,
    /// Omit the type and offset fields, keep keyword fields.
    SkipOffsetFields,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Handling of a missing anchor.
    pub anchor_policy: AnchorPolicy,
}

impl DivmineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            DivmineError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DivmineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Look up a profile by id (case-insensitive).
    pub fn profile(&self, id: &str) -> Result<&DocumentProfile> {
        self.profiles
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| DivmineError::Config(format!("unknown document profile: {}", id)))
    }
}
