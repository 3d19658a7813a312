//! Reap request/result values.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::resource_type::ResourceType;
use super::state::ResourceState;

/// One conditional reset, built per sweep step from configuration.
///
/// There is no way to express an unconditional transition: `expiry` is
/// always part of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReapRequest {
    pub resource_type: ResourceType,
    pub source_state: ResourceState,
    pub target_state: ResourceState,
    pub expiry: Duration,
}

impl ReapRequest {
    pub fn new(
        resource_type: ResourceType,
        source_state: ResourceState,
        target_state: ResourceState,
        expiry: Duration,
    ) -> Self {
        Self {
            resource_type,
            source_state,
            target_state,
            expiry,
        }
    }
}

/// Resources actually transitioned by a reset: name -> previous owner.
///
/// Kept in a `BTreeMap` so logs and reports iterate in a stable order; the
/// service itself gives no ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReapResult {
    owners: BTreeMap<String, String>,
}

impl ReapResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, previous_owner: impl Into<String>) {
        self.owners.insert(name.into(), previous_owner.into());
    }

    pub fn previous_owner(&self, name: &str) -> Option<&str> {
        self.owners.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.owners.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.owners.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReapResult {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            owners: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_json_object() {
        let result: ReapResult =
            serde_json::from_str(r#"{"vm-2":"janitor","proj-1":"build-42"}"#).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.previous_owner("proj-1"), Some("build-42"));

        // iteration is by name
        let names: Vec<&str> = result.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["proj-1", "vm-2"]);
    }

    #[test]
    fn empty_object_is_empty_result() {
        let result: ReapResult = serde_json::from_str("{}").unwrap();
        assert!(result.is_empty());
    }
}
