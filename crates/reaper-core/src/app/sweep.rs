//! SweepOrchestrator - 1 回分の sweep
//!
//! # フロー
//! 1. 設定された resource type を設定順に走査
//! 2. 各 type について BUSY_STATES（busy → cleaning → leased）の順に ReapPolicy を実行
//! 3. 成功したら回収したリソースを 1 件ずつログ、失敗したらエラーをログして次へ
//!
//! 呼び出し間で状態は持ち越さない（毎回まっさらな全走査）。

use std::sync::Arc;

use tracing::{error, info};

use super::reap_policy::ReapPolicy;
use crate::config::ReaperConfig;
use crate::domain::{
    BUSY_STATES, ReapError, ReapRequest, ReapResult, ResourceState, ResourceType,
};
use crate::ports::PoolClient;

/// Outcome of one (resource type, source state) step.
#[derive(Debug)]
pub struct StepOutcome {
    pub request: ReapRequest,
    pub result: Result<ReapResult, ReapError>,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Number of resources reaped by this step (0 on failure).
    pub fn reaped(&self) -> usize {
        self.result.as_ref().map_or(0, ReapResult::len)
    }
}

/// SweepReport lists every step of one sweep, in traversal order.
#[derive(Debug, Default)]
pub struct SweepReport {
    steps: Vec<StepOutcome>,
}

impl SweepReport {
    pub fn steps(&self) -> &[StepOutcome] {
        &self.steps
    }

    pub fn step(&self, resource_type: &str, source_state: ResourceState) -> Option<&StepOutcome> {
        self.steps.iter().find(|step| {
            step.request.resource_type.as_str() == resource_type
                && step.request.source_state == source_state
        })
    }

    /// Steps for one resource type, in state order.
    pub fn for_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a StepOutcome> + 'a {
        self.steps
            .iter()
            .filter(move |step| step.request.resource_type.as_str() == resource_type)
    }

    pub fn reaped_count(&self) -> usize {
        self.steps.iter().map(StepOutcome::reaped).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|step| !step.is_ok()).count()
    }
}

/// SweepOrchestrator drives the ReapPolicy over configured types × busy states.
pub struct SweepOrchestrator<P> {
    policy: ReapPolicy<P>,
    config: Arc<ReaperConfig>,
}

impl<P: PoolClient> SweepOrchestrator<P> {
    pub fn new(client: P, config: Arc<ReaperConfig>) -> Self {
        Self {
            policy: ReapPolicy::new(client),
            config,
        }
    }

    pub fn config(&self) -> &ReaperConfig {
        &self.config
    }

    /// Run one complete pass. Never fails: per-step errors are logged and
    /// recorded in the report.
    pub async fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();
        for resource_type in &self.config.resource_types {
            self.sweep_type(resource_type, &mut report.steps).await;
        }
        report
    }

    async fn sweep_type(&self, resource_type: &ResourceType, steps: &mut Vec<StepOutcome>) {
        for source_state in BUSY_STATES {
            let request = ReapRequest::new(
                resource_type.clone(),
                source_state,
                self.config.target_state,
                self.config.expiry,
            );
            let result = self.policy.reap(&request).await;
            match &result {
                Ok(reaped) => log_reaped(&request, reaped),
                Err(err) => error!(
                    resource_type = %request.resource_type,
                    source_state = %request.source_state,
                    target_state = %request.target_state,
                    error = %err,
                    "Reset failed"
                ),
            }
            steps.push(StepOutcome { request, result });
        }
    }
}

fn log_reaped(request: &ReapRequest, reaped: &ReapResult) {
    for (name, previous_owner) in reaped.iter() {
        info!(
            resource_type = %request.resource_type,
            source_state = %request.source_state,
            target_state = %request.target_state,
            resource_name = name,
            previous_owner = previous_owner,
            "Reset resource"
        );
    }
}
