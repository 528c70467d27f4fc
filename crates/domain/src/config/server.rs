use serde::{Deserialize, Serialize};

use super::transport::TransportKind;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Local `address:port` the DNS listener binds to.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    #[serde(default)]
    pub listen_transport: TransportKind,

    /// Address to hand back for filtered domains. Declared ahead of the
    /// filtering feature; the resolution path does not consult it yet.
    #[serde(default = "default_fake_address")]
    pub fake_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            listen_transport: TransportKind::Udp,
            fake_address: default_fake_address(),
        }
    }
}

fn default_listen_address() -> String {
    "0.0.0.0:53".to_string()
}

fn default_fake_address() -> String {
    "127.0.0.1".to_string()
}
