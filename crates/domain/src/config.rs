pub mod cache;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod transport;
pub mod upstream;

pub use cache::{CacheConfig, MAX_TTL_SECS, MIN_TTL_SECS};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use transport::TransportKind;
pub use upstream::UpstreamConfig;
