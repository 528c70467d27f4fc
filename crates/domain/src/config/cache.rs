use serde::{Deserialize, Serialize};

/// Lower bound for the configured TTL, in seconds.
pub const MIN_TTL_SECS: u32 = 60;

/// Upper bound for the configured TTL, in seconds (one day).
pub const MAX_TTL_SECS: u32 = 86_400;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Entry residency time in seconds. Governs both the eviction sweep
    /// interval and the TTL advertised in answers. Clamped to
    /// `[MIN_TTL_SECS, MAX_TTL_SECS]` when the configuration is loaded.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

fn default_ttl() -> u32 {
    300
}
