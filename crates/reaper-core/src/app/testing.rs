//! Test doubles for the app layer.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ReapError, ReapRequest, ReapResult, ResourceState, ResourceType};
use crate::ports::PoolClient;

#[derive(Default)]
struct Script {
    calls: Vec<ReapRequest>,
    responses: HashMap<(String, ResourceState), ReapResult>,
    failing: HashSet<(String, ResourceState)>,
}

/// ScriptedPool records every reset and answers from a script.
///
/// Unscripted pairs answer with an empty result. Clones share the script.
#[derive(Clone, Default)]
pub(crate) struct ScriptedPool {
    script: Arc<Mutex<Script>>,
    unavailable: Arc<AtomicBool>,
}

impl ScriptedPool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer `result` once for the pair; later calls see an empty result.
    pub(crate) fn respond(&self, resource_type: &str, state: ResourceState, result: ReapResult) {
        self.script
            .lock()
            .unwrap()
            .responses
            .insert((resource_type.to_string(), state), result);
    }

    pub(crate) fn fail(&self, resource_type: &str, state: ResourceState) {
        self.script
            .lock()
            .unwrap()
            .failing
            .insert((resource_type.to_string(), state));
    }

    /// Simulate the whole service being down (or back up).
    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<ReapRequest> {
        self.script.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl PoolClient for ScriptedPool {
    async fn reset(
        &self,
        resource_type: &ResourceType,
        source_state: ResourceState,
        expiry: Duration,
        target_state: ResourceState,
    ) -> Result<ReapResult, ReapError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(ReapRequest::new(
            resource_type.clone(),
            source_state,
            target_state,
            expiry,
        ));

        let key = (resource_type.as_str().to_string(), source_state);
        if self.unavailable.load(Ordering::SeqCst) || script.failing.contains(&key) {
            return Err(ReapError::ServiceUnavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(script.responses.remove(&key).unwrap_or_default())
    }
}

/// A pool whose reset never completes.
pub(crate) struct HungPool;

#[async_trait]
impl PoolClient for HungPool {
    async fn reset(
        &self,
        _resource_type: &ResourceType,
        _source_state: ResourceState,
        _expiry: Duration,
        _target_state: ResourceState,
    ) -> Result<ReapResult, ReapError> {
        std::future::pending().await
    }
}
