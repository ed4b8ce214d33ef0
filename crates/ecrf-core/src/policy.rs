//! Export policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which rows an export contains, relative to validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportPolicy {
    /// Export every row; validation is informational.
    #[default]
    All,
    /// Export only rows without validation errors.
    ValidOnly,
    /// Refuse to export when any row has a validation error.
    Block,
}

impl ExportPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ValidOnly => "valid-only",
            Self::Block => "block",
        }
    }

    /// True when the policy needs a validation result.
    pub fn requires_validation(&self) -> bool {
        !matches!(self, Self::All)
    }
}

impl fmt::Display for ExportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_settings_spelling() {
        assert_eq!(ExportPolicy::ValidOnly.to_string(), "valid-only");
        assert_eq!(ExportPolicy::Block.to_string(), "block");
    }

    #[test]
    fn only_all_skips_validation() {
        assert!(!ExportPolicy::All.requires_validation());
        assert!(ExportPolicy::ValidOnly.requires_validation());
        assert!(ExportPolicy::Block.requires_validation());
    }
}
