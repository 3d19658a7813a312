//! InMemoryPool - テスト・組み込み用のプール
//!
//! # 学習ポイント
//! - tokio::sync::Mutex による 1 回の reset 全体の排他（CAS 相当）
//! - Clock を差し替えて有効期限の境界を決定的にテストする

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{ReapError, ReapResult, ResourceState, ResourceType};
use crate::ports::{Clock, PoolClient};

/// One resource tracked by the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolResource {
    pub name: String,
    pub resource_type: ResourceType,
    pub state: ResourceState,
    pub owner: String,
    /// When `state` was last entered.
    pub last_update: DateTime<Utc>,
}

/// InMemoryPool はプールサービスの振る舞いをメモリ上で再現する
///
/// # 有効期限
/// `now - last_update > expiry` のリソースだけを遷移させる。
/// ちょうど `expiry` のものは対象外（境界は常に除外）。
pub struct InMemoryPool<C> {
    clock: C,
    resources: Mutex<BTreeMap<String, PoolResource>>,
}

impl<C: Clock> InMemoryPool<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            resources: Mutex::new(BTreeMap::new()),
        }
    }

    /// Add (or replace) a resource, stamping `last_update` with `now`.
    pub async fn add(
        &self,
        name: impl Into<String>,
        resource_type: ResourceType,
        state: ResourceState,
        owner: impl Into<String>,
    ) {
        let name = name.into();
        let resource = PoolResource {
            name: name.clone(),
            resource_type,
            state,
            owner: owner.into(),
            last_update: self.clock.now(),
        };
        self.resources.lock().await.insert(name, resource);
    }

    /// Move a resource to `state` under `owner`, as a leasing client would.
    ///
    /// Returns `false` when the resource does not exist.
    pub async fn update(&self, name: &str, state: ResourceState, owner: impl Into<String>) -> bool {
        let now = self.clock.now();
        let mut resources = self.resources.lock().await;
        match resources.get_mut(name) {
            Some(resource) => {
                if resource.state != state {
                    resource.last_update = now;
                }
                resource.state = state;
                resource.owner = owner.into();
                true
            }
            None => false,
        }
    }

    pub async fn get(&self, name: &str) -> Option<PoolResource> {
        self.resources.lock().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.resources.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.resources.lock().await.is_empty()
    }
}

#[async_trait]
impl<C: Clock> PoolClient for InMemoryPool<C> {
    async fn reset(
        &self,
        resource_type: &ResourceType,
        source_state: ResourceState,
        expiry: Duration,
        target_state: ResourceState,
    ) -> Result<ReapResult, ReapError> {
        let expiry = chrono::Duration::from_std(expiry)
            .map_err(|e| ReapError::RequestRejected {
                status: 400,
                body: format!("invalid expire: {e}"),
            })?;
        let now = self.clock.now();

        // 判定と遷移を同じロック内で行う
        let mut resources = self.resources.lock().await;
        let mut result = ReapResult::new();
        for resource in resources.values_mut() {
            if &resource.resource_type != resource_type || resource.state != source_state {
                continue;
            }
            if now - resource.last_update <= expiry {
                continue;
            }
            result.insert(resource.name.clone(), std::mem::take(&mut resource.owner));
            resource.state = target_state;
            resource.last_update = now;
        }
        Ok(result)
    }
}
