use serde::{Deserialize, Serialize};

use super::transport::TransportKind;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// `address:port` of the resolver cache misses are forwarded to.
    #[serde(default = "default_upstream_address")]
    pub address: String,

    #[serde(default)]
    pub transport: TransportKind,

    /// Per-attempt timeout in seconds. A single attempt is made per query;
    /// a timed-out lookup is reported as a resolution failure, not retried.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: default_upstream_address(),
            transport: TransportKind::Udp,
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_upstream_address() -> String {
    "1.1.1.1:53".to_string()
}

fn default_query_timeout() -> u64 {
    10
}
