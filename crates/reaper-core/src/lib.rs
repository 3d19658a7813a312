//! reaper-core
//!
//! プールサービス上で busy/cleaning/leased のまま放置されたリソースを
//! 定期的に回収（target state へ reset）するための部品。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ResourceType, ResourceState, ReapRequest, ReapResult, errors）
//! - **ports**: 抽象化レイヤー（PoolClient, Clock）
//! - **impls**: 実装（HttpPoolClient, InMemoryPool）
//! - **app**: アプリケーションロジック（ReaperBuilder, ReapPolicy, SweepOrchestrator, ReaperLoop）
//! - **config**: 不変の設定値と duration のパース
//! - **observability**: tracing の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
