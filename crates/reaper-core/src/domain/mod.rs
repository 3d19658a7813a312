//! Domain model (resource types, states, reap requests/results, errors).

pub mod errors;
pub mod reap;
pub mod resource_type;
pub mod state;

pub use self::errors::{ConfigError, ReapError};
pub use self::reap::{ReapRequest, ReapResult};
pub use self::resource_type::ResourceType;
pub use self::state::{BUSY_STATES, ResourceState};
