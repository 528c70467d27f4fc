use async_trait::async_trait;
use relay_dns_domain::DomainError;
use std::net::Ipv4Addr;

/// Port for the single-hop upstream lookup.
///
/// One attempt per call, bounded by the configured timeout. Implementations
/// return the first address of the upstream answer; every failure mode
/// (timeout, connection error, malformed or empty response) surfaces as an
/// `Err` and is never retried internally.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError>;
}
