//! Errors - エラー型と分類
//!
//! - ConfigError: 起動時の設定エラー（致命的、プロセス終了）
//! - ReapError: 1 回の reset 呼び出しの失敗（一時的、次の tick で再試行）

use std::path::PathBuf;

use thiserror::Error;

/// ConfigError is raised while assembling the reaper and is never recovered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--resource-type must not be empty")]
    EmptyResourceTypes,

    #[error("resource type must be a non-empty string")]
    EmptyResourceType,

    #[error("unknown resource state: {0:?}")]
    UnknownState(String),

    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("username {0:?} was given without a password file")]
    MissingPasswordFile(String),

    #[error("unable to read password file {path}")]
    PasswordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pool service url {0:?}")]
    InvalidUrl(String),

    #[error("unable to build pool client: {0}")]
    ClientBuild(String),
}

/// ReapError is the failure of a single (resource type, source state) reset.
///
/// It never crosses into sibling resets of the same sweep.
#[derive(Debug, Error)]
pub enum ReapError {
    #[error("pool service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("pool service rejected reset with status {status}: {body}")]
    RequestRejected { status: u16, body: String },

    #[error("malformed reset response: {0}")]
    MalformedResponse(String),
}
