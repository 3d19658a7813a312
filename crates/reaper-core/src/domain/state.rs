//! State - プール上のリソース状態
//!
//! 状態の正本はプールサービス側にあり、reaper は遷移を「依頼」するだけです。
//! ここにあるのはワイヤ上のラベルとその解釈のみ。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// ResourceState はプールサービスが管理するリソースの状態ラベル
///
/// # 状態
/// - busy: lease 保持者が使用中
/// - cleaning: cleanup agent がリセット中
/// - dirty: 再利用前に cleanup が必要
/// - free: lease 可能
/// - leased: provisioner が確保済み（受け取り待ち）
/// - other / toBeDeleted / tombstone: サービス側のライフサイクル管理用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceState {
    Busy,
    Cleaning,
    Dirty,
    Free,
    Leased,
    Other,
    ToBeDeleted,
    Tombstone,
}

/// Busy states swept on every pass, in sweep order.
///
/// Each entry maps to a distinct upstream crash: a lease holder (busy), a
/// cleanup agent (cleaning), a provisioner (leased). Must track the pool
/// service's state enum.
pub const BUSY_STATES: [ResourceState; 3] = [
    ResourceState::Busy,
    ResourceState::Cleaning,
    ResourceState::Leased,
];

impl ResourceState {
    pub const ALL: [ResourceState; 8] = [
        ResourceState::Busy,
        ResourceState::Cleaning,
        ResourceState::Dirty,
        ResourceState::Free,
        ResourceState::Leased,
        ResourceState::Other,
        ResourceState::ToBeDeleted,
        ResourceState::Tombstone,
    ];

    /// Label used on the wire and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceState::Busy => "busy",
            ResourceState::Cleaning => "cleaning",
            ResourceState::Dirty => "dirty",
            ResourceState::Free => "free",
            ResourceState::Leased => "leased",
            ResourceState::Other => "other",
            ResourceState::ToBeDeleted => "toBeDeleted",
            ResourceState::Tombstone => "tombstone",
        }
    }

    /// Is this one of the held states the reaper sweeps?
    pub fn is_busy(self) -> bool {
        BUSY_STATES.contains(&self)
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceState {
    type Err = ConfigError;

    /// ワイヤ名を大文字小文字を区別せずに解釈する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ResourceState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lower("dirty", ResourceState::Dirty)]
    #[case::capitalized("Dirty", ResourceState::Dirty)]
    #[case::camel("toBeDeleted", ResourceState::ToBeDeleted)]
    #[case::upper("TOBEDELETED", ResourceState::ToBeDeleted)]
    #[case::padded(" busy ", ResourceState::Busy)]
    fn parses_wire_names(#[case] input: &str, #[case] expected: ResourceState) {
        assert_eq!(input.parse::<ResourceState>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_state() {
        let err = "zombie".parse::<ResourceState>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownState(s) if s == "zombie"));
    }

    #[test]
    fn busy_states_are_swept_in_fixed_order() {
        assert_eq!(
            BUSY_STATES,
            [ResourceState::Busy, ResourceState::Cleaning, ResourceState::Leased]
        );
        assert!(ResourceState::Leased.is_busy());
        assert!(!ResourceState::Dirty.is_busy());
    }

    #[test]
    fn serde_uses_wire_names() {
        for state in ResourceState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
    }
}
