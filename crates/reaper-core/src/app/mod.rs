//! App - アプリケーション層
//!
//! ports を組み合わせて reaper のロジックを実装します。
//!
//! # 主要コンポーネント
//! - **ReaperBuilder**: 設定の検証とワイヤリング
//! - **ReapPolicy**: (resource type, source state) ごとの条件付き reset
//! - **SweepOrchestrator**: 全 type × BUSY_STATES の 1 回分の走査
//! - **ReaperLoop**: 一定間隔で sweep を回す

pub mod builder;
pub mod reap_policy;
pub mod reaper_loop;
pub mod sweep;

#[cfg(test)]
pub(crate) mod testing;

// 主要な型を再エクスポート
pub use self::builder::ReaperBuilder;
pub use self::reap_policy::ReapPolicy;
pub use self::reaper_loop::ReaperLoop;
pub use self::sweep::{StepOutcome, SweepOrchestrator, SweepReport};
