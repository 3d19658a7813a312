//! ReapPolicy - 1 組の (resource type, source state) に対する条件付き reset
//!
//! # フロー
//! 1. ReapRequest から PoolClient::reset() を 1 回だけ呼ぶ
//! 2. 結果を正規化して返す（所有者が空のものは "unknown" として報告）
//!
//! 期限判定と遷移（CAS）はプールサービス側の責務。

use tracing::debug;

use crate::domain::{ReapError, ReapRequest, ReapResult};
use crate::ports::PoolClient;

/// Owner reported when the service returns a blank previous owner.
pub const UNKNOWN_OWNER: &str = "unknown";

/// ReapPolicy issues one conditional bulk reset per request.
pub struct ReapPolicy<P> {
    client: P,
}

impl<P: PoolClient> ReapPolicy<P> {
    pub fn new(client: P) -> Self {
        Self { client }
    }

    /// Reap expired resources for one (type, source state) pair.
    ///
    /// Repeating the call with the same request is harmless: resources
    /// already moved are no longer in the source state and do not reappear.
    pub async fn reap(&self, request: &ReapRequest) -> Result<ReapResult, ReapError> {
        let raw = self
            .client
            .reset(
                &request.resource_type,
                request.source_state,
                request.expiry,
                request.target_state,
            )
            .await?;

        debug!(
            resource_type = %request.resource_type,
            source_state = %request.source_state,
            reaped = raw.len(),
            "reset completed"
        );

        Ok(raw
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, owner)| {
                let owner = if owner.trim().is_empty() {
                    UNKNOWN_OWNER
                } else {
                    owner
                };
                (name, owner)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::ScriptedPool;
    use crate::domain::{ResourceState, ResourceType};
    use crate::impls::InMemoryPool;
    use crate::ports::FixedClock;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use std::time::Duration;

    fn request(state: ResourceState) -> ReapRequest {
        ReapRequest::new(
            ResourceType::new("project").unwrap(),
            state,
            ResourceState::Dirty,
            Duration::from_secs(30 * 60),
        )
    }

    #[tokio::test]
    async fn forwards_request_to_pool_once() {
        let pool = ScriptedPool::new();
        let policy = ReapPolicy::new(pool.clone());

        policy.reap(&request(ResourceState::Cleaning)).await.unwrap();

        let calls = pool.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], request(ResourceState::Cleaning));
    }

    #[tokio::test]
    async fn blank_owners_are_reported_as_unknown() {
        let pool = ScriptedPool::new();
        pool.respond(
            "project",
            ResourceState::Busy,
            ReapResult::from_iter([("proj-1", ""), ("proj-2", "build-9"), ("", "ghost")]),
        );
        let policy = ReapPolicy::new(pool);

        let result = policy.reap(&request(ResourceState::Busy)).await.unwrap();

        assert_eq!(
            result,
            ReapResult::from_iter([("proj-1", UNKNOWN_OWNER), ("proj-2", "build-9")])
        );
    }

    #[tokio::test]
    async fn errors_are_returned_unchanged() {
        let pool = ScriptedPool::new();
        pool.fail("project", ResourceState::Leased);
        let policy = ReapPolicy::new(pool);

        let err = policy.reap(&request(ResourceState::Leased)).await.unwrap_err();
        assert!(matches!(err, ReapError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn immediate_repeat_reaps_nothing() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let pool = InMemoryPool::new(clock.clone());
        pool.add(
            "proj-1",
            ResourceType::new("project").unwrap(),
            ResourceState::Busy,
            "build-42",
        )
        .await;
        clock.advance(ChronoDuration::minutes(31));
        let policy = ReapPolicy::new(pool);

        let first = policy.reap(&request(ResourceState::Busy)).await.unwrap();
        let second = policy.reap(&request(ResourceState::Busy)).await.unwrap();

        assert_eq!(first, ReapResult::from_iter([("proj-1", "build-42")]));
        assert!(second.is_empty());
    }
}
