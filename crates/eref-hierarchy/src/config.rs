use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, HierarchyResult};

/// What to do when two occupied slots carry the same tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateTagPolicy {
    /// Accept the hierarchy; tag lookups return the outermost match.
    #[default]
    FirstMatch,
    /// Fail construction with [`HierarchyError::DuplicateTag`].
    Reject,
}

/// Configuration for hierarchy construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Handling of repeated tags across slots.
    pub duplicate_tags: DuplicateTagPolicy,
}

impl HierarchyConfig {
    /// A configuration that rejects repeated tags.
    pub fn strict() -> Self {
        Self {
            duplicate_tags: DuplicateTagPolicy::Reject,
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> HierarchyResult<Self> {
        toml::from_str(s).map_err(|e| HierarchyError::Config(e.to_string()))
    }
}
