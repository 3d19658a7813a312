//! ReaperBuilder - reaper の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 設定はここで一度だけ組み立て、以後は不変（Arc で共有）

use std::sync::Arc;
use std::time::Duration;

use super::reaper_loop::ReaperLoop;
use super::sweep::SweepOrchestrator;
use crate::config::ReaperConfig;
use crate::domain::{ConfigError, ResourceState, ResourceType};
use crate::ports::PoolClient;

/// ReaperBuilder は ReaperConfig と PoolClient から ReaperLoop を構築
///
/// # 使用例
/// ```ignore
/// let reaper = ReaperBuilder::new()
///     .resource_types(ResourceType::parse_list("project,vm"))
///     .expiry(Duration::from_secs(30 * 60))
///     .build(client)?;
/// reaper.run_until(shutdown).await;
/// ```
///
/// # Fail-fast 設計
/// - resource type が 1 つも無ければ ConfigError::EmptyResourceTypes
/// - sweep が 1 回も走る前に失敗する
pub struct ReaperBuilder {
    config: ReaperConfig,
}

impl ReaperBuilder {
    /// 既定値（expiry 30 分、target dirty、interval 1 分）で開始
    pub fn new() -> Self {
        Self {
            config: ReaperConfig::new(Vec::new()),
        }
    }

    /// resource type を追加（重複は無視、順序は維持）
    pub fn resource_types(mut self, types: impl IntoIterator<Item = ResourceType>) -> Self {
        for rtype in types {
            if !self.config.resource_types.contains(&rtype) {
                self.config.resource_types.push(rtype);
            }
        }
        self
    }

    pub fn expiry(mut self, expiry: Duration) -> Self {
        self.config = self.config.with_expiry(expiry);
        self
    }

    pub fn target_state(mut self, target_state: ResourceState) -> Self {
        self.config = self.config.with_target_state(target_state);
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_interval(interval);
        self
    }

    /// 検証済みの ReaperConfig を取り出す
    pub fn build_config(self) -> Result<ReaperConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// 検証して ReaperLoop を生成
    pub fn build<P: PoolClient>(self, client: P) -> Result<ReaperLoop<P>, ConfigError> {
        let config = Arc::new(self.build_config()?);
        let interval = config.interval;
        Ok(ReaperLoop::new(
            SweepOrchestrator::new(client, config),
            interval,
        ))
    }
}

impl Default for ReaperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
