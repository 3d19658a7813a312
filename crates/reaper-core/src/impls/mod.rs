//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpPoolClient**: プールサービスへの HTTP クライアント（本番用）
//! - **InMemoryPool**: メモリ上のプール（テスト・組み込み用）

pub mod http_pool;
pub mod inmem_pool;

pub use self::http_pool::HttpPoolClient;
pub use self::inmem_pool::{InMemoryPool, PoolResource};
