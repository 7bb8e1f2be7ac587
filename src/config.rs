use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::RuleId;

pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckOptions {
    pub detect_incomplete: bool,
    pub disabled_rules: BTreeSet<RuleId>,
    pub language: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            detect_incomplete: true,
            disabled_rules: BTreeSet::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl CheckOptions {
    pub fn with_detect_incomplete(mut self, detect: bool) -> Self {
        self.detect_incomplete = detect;
        self
    }

    pub fn disable_rule(mut self, rule: RuleId) -> Self {
        self.disabled_rules.insert(rule);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled_rules.contains(&rule)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
