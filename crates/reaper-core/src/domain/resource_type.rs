//! ResourceType - リソース種別
//!
//! プールサービスにとっては不透明な文字列。reaper は中身を解釈しない。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// ResourceType identifies a class of leasable resource (e.g. `project`, `vm`).
///
/// Always non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceType(String);

impl ResourceType {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ConfigError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyResourceType);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a comma separated list, skipping empty entries.
    ///
    /// `"project, vm,,gpu"` yields `[project, vm, gpu]`. Duplicates are kept
    /// once, first occurrence wins, so each type is swept once per pass.
    pub fn parse_list(value: &str) -> Vec<ResourceType> {
        let mut types: Vec<ResourceType> = Vec::new();
        for part in value.split(',') {
            if let Ok(rtype) = ResourceType::new(part)
                && !types.contains(&rtype)
            {
                types.push(rtype);
            }
        }
        types
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::new(s)
    }
}

impl TryFrom<String> for ResourceType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ResourceType::new(value)
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank() {
        assert_eq!(ResourceType::new("  vm ").unwrap().as_str(), "vm");
        assert!(matches!(
            ResourceType::new("   "),
            Err(ConfigError::EmptyResourceType)
        ));
    }

    #[test]
    fn parse_list_skips_empty_entries_and_duplicates() {
        let types = ResourceType::parse_list("project, vm,,project, gpu ");
        let names: Vec<&str> = types.iter().map(ResourceType::as_str).collect();
        assert_eq!(names, vec!["project", "vm", "gpu"]);
    }

    #[test]
    fn parse_list_of_nothing_is_empty() {
        assert!(ResourceType::parse_list("").is_empty());
        assert!(ResourceType::parse_list(" , ,").is_empty());
    }
}
