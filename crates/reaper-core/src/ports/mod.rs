//! Ports - 抽象化レイヤー
//!
//! 外部システム（プールサービス、時計）へのインターフェース。
//! 実装は `impls` に置く。

pub mod clock;
pub mod pool_client;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::pool_client::PoolClient;
