//! ReaperLoop - 期限切れ lease の定期回収
//!
//! # フロー
//! 1. interval ごとに tick
//! 2. tick ごとに SweepOrchestrator::sweep() を最後まで実行
//! 3. sweep が遅れても次の tick は重ならない（MissedTickBehavior::Delay）
//!
//! 最初の sweep は起動から 1 interval 後。

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, warn};

use super::sweep::{SweepOrchestrator, SweepReport};
use crate::ports::PoolClient;

/// ReaperLoop runs one sweep per tick until shutdown.
pub struct ReaperLoop<P> {
    orchestrator: SweepOrchestrator<P>,
    interval: Duration,
}

impl<P: PoolClient> ReaperLoop<P> {
    pub fn new(orchestrator: SweepOrchestrator<P>, interval: Duration) -> Self {
        Self {
            orchestrator,
            interval,
        }
    }

    pub fn orchestrator(&self) -> &SweepOrchestrator<P> {
        &self.orchestrator
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single sweep immediately.
    pub async fn sweep_once(&self) -> SweepReport {
        let report = self.orchestrator.sweep().await;
        log_summary(&report);
        report
    }

    /// Tick until `shutdown` resolves. Returns the number of completed sweeps.
    ///
    /// Shutdown drops an in-flight sweep; the next process start recomputes
    /// everything from the service's current state.
    pub async fn run_until<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            interval_secs = self.interval.as_secs_f64(),
            resource_types = self.orchestrator.config().resource_types.len(),
            "reaper loop started"
        );

        let mut completed = 0u64;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                _ = &mut shutdown => {
                    warn!("shutdown during sweep; abandoning in-flight resets");
                    break;
                }
                _ = self.sweep_once() => completed += 1,
            }
        }

        info!(sweeps = completed, "reaper loop stopped");
        completed
    }
}

fn log_summary(report: &SweepReport) {
    info!(
        steps = report.steps().len(),
        reaped = report.reaped_count(),
        failed = report.failed_count(),
        "sweep finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{HungPool, ScriptedPool};
    use crate::config::ReaperConfig;
    use crate::domain::ResourceType;
    use std::sync::Arc;

    fn reaper_loop<P: PoolClient>(pool: P, types: &[&str]) -> ReaperLoop<P> {
        let config = Arc::new(ReaperConfig::new(
            types.iter().map(|t| ResourceType::new(t).unwrap()).collect(),
        ));
        ReaperLoop::new(SweepOrchestrator::new(pool, config), Duration::from_secs(60))
    }

    #[tokio::test(start_paused = true)]
    async fn one_sweep_per_tick_after_the_first_interval() {
        let pool = ScriptedPool::new();
        let reaper = reaper_loop(pool.clone(), &["project"]);

        let sweeps = reaper
            .run_until(tokio::time::sleep(Duration::from_secs(185)))
            .await;

        assert_eq!(sweeps, 3);
        assert_eq!(pool.calls().len(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn no_sweep_before_the_first_tick() {
        let pool = ScriptedPool::new();
        let reaper = reaper_loop(pool.clone(), &["project"]);

        let sweeps = reaper
            .run_until(tokio::time::sleep(Duration::from_secs(59)))
            .await;

        assert_eq!(sweeps, 0);
        assert!(pool.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_ticks_keep_the_loop_running() {
        let pool = ScriptedPool::new();
        pool.set_unavailable(true);
        let reaper = reaper_loop(pool.clone(), &["project", "vm"]);

        let sweeps = reaper
            .run_until(tokio::time::sleep(Duration::from_secs(245)))
            .await;

        assert_eq!(sweeps, 4);
        assert_eq!(pool.calls().len(), 24);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_abandons_a_hung_sweep() {
        let reaper = reaper_loop(HungPool, &["project"]);

        let sweeps = reaper
            .run_until(tokio::time::sleep(Duration::from_secs(600)))
            .await;

        assert_eq!(sweeps, 0);
    }

    #[tokio::test]
    async fn sweep_once_runs_immediately() {
        let pool = ScriptedPool::new();
        let reaper = reaper_loop(pool.clone(), &["vm"]);

        let report = reaper.sweep_once().await;

        assert_eq!(report.steps().len(), 3);
        assert_eq!(pool.calls().len(), 3);
    }
}
