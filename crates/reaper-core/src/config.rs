//! Reaper configuration.
//!
//! Built once at startup from flags and then shared read-only (`Arc`) with the
//! sweep orchestrator. Nothing in the crate reads configuration from globals.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{ConfigError, ResourceState, ResourceType};

/// Default staleness threshold before a busy resource is reaped.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(30 * 60);

/// Default cadence of the sweep loop.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

pub const DEFAULT_TARGET_STATE: ResourceState = ResourceState::Dirty;

pub const DEFAULT_POOL_URL: &str = "http://boskos";

/// Connection settings for the pool service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConnection {
    pub url: String,
    pub username: Option<String>,
    pub password_file: Option<PathBuf>,
}

impl Default for PoolConnection {
    fn default() -> Self {
        Self {
            url: DEFAULT_POOL_URL.to_string(),
            username: None,
            password_file: None,
        }
    }
}

/// ReaperConfig is the immutable configuration of one reaper process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaperConfig {
    pub resource_types: Vec<ResourceType>,
    pub expiry: Duration,
    pub target_state: ResourceState,
    pub interval: Duration,
}

impl ReaperConfig {
    /// Config with the default expiry, target state and interval.
    pub fn new(resource_types: Vec<ResourceType>) -> Self {
        Self {
            resource_types,
            expiry: DEFAULT_EXPIRY,
            target_state: DEFAULT_TARGET_STATE,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn with_target_state(mut self, target_state: ResourceState) -> Self {
        self.target_state = target_state;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Fail-fast check run by the builder before anything is scheduled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource_types.is_empty() {
            return Err(ConfigError::EmptyResourceTypes);
        }
        if self.interval.is_zero() {
            return Err(ConfigError::InvalidDuration {
                input: "0s".to_string(),
                reason: "sweep interval must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse a Go-style duration such as `30m`, `1h30m`, `1.5h` or `90s`.
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted.
/// Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut rest = input.trim();
    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }
    if rest.starts_with('-') {
        return Err(invalid("negative durations are not allowed"));
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(invalid("expected a number"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            "" => return Err(invalid("missing unit")),
            _ => return Err(invalid("unknown unit")),
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("number out of range"))?
        };
        let mut nanos = whole
            .checked_mul(unit_nanos)
            .ok_or_else(|| invalid("duration overflows"))?;
        if !fraction.is_empty() {
            let fraction: f64 = format!("0.{fraction}")
                .parse()
                .map_err(|_| invalid("bad fraction"))?;
            nanos += (fraction * unit_nanos as f64).round() as u128;
        }

        total_nanos = total_nanos
            .checked_add(nanos)
            .ok_or_else(|| invalid("duration overflows"))?;
        rest = tail;
    }

    let total_nanos = u64::try_from(total_nanos).map_err(|_| invalid("duration overflows"))?;
    Ok(Duration::from_nanos(total_nanos))
}

/// Format a duration the way the pool service prints and parses it
/// (`30m0s`, `1h0m0s`, `1.5s`, `250ms`).
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }
    if duration < Duration::from_secs(1) {
        let nanos = duration.subsec_nanos();
        return if nanos % 1_000_000 == 0 {
            format!("{}ms", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            format!("{}us", nanos / 1_000)
        } else {
            format!("{nanos}ns")
        };
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let mut seconds_part = seconds.to_string();
    let nanos = duration.subsec_nanos();
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        seconds_part.push('.');
        seconds_part.push_str(fraction.trim_end_matches('0'));
    }

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds_part}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds_part}s")
    } else {
        format!("{seconds_part}s")
    }
}
