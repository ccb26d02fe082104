//! Application-wide constants

pub const DEFAULT_SESSION_COOKIE: &str = "rentbook_sid";
pub const DEFAULT_IDLE_TIMEOUT_SECS: i64 = 86_400;
pub const DEFAULT_ABSOLUTE_TIMEOUT_SECS: i64 = 604_800;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;
pub const SESSION_TOKEN_BYTES: usize = 32;
pub const DEFAULT_ELECTRICITY_UNIT_RATE: i64 = 1;
