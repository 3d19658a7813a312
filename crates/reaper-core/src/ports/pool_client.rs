//! PoolClient port - プールサービス（正本）への窓口
//!
//! 状態・所有者・最終更新時刻の正本はプールサービスにある。
//! reaper は条件付き reset を依頼し、その結果を受け取るだけ。
//!
//! # 実装
//! - **HttpPoolClient**: 本番用（HTTP）
//! - **InMemoryPool**: テスト用

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ReapError, ReapResult, ResourceState, ResourceType};

/// PoolClient issues conditional bulk resets against the pool service.
///
/// # Contract
/// For every resource of `resource_type` currently in `source_state` whose
/// state has not changed for longer than `expiry`, the service moves it to
/// `target_state` atomically and reports `name -> previous owner`.
/// Resources under the threshold are untouched and not reported.
#[async_trait]
pub trait PoolClient: Send + Sync {
    async fn reset(
        &self,
        resource_type: &ResourceType,
        source_state: ResourceState,
        expiry: Duration,
        target_state: ResourceState,
    ) -> Result<ReapResult, ReapError>;
}

#[async_trait]
impl<P: PoolClient + ?Sized> PoolClient for Arc<P> {
    async fn reset(
        &self,
        resource_type: &ResourceType,
        source_state: ResourceState,
        expiry: Duration,
        target_state: ResourceState,
    ) -> Result<ReapResult, ReapError> {
        (**self)
            .reset(resource_type, source_state, expiry, target_state)
            .await
    }
}
