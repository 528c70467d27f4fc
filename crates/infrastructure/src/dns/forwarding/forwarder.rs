use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::create_transport;
use async_trait::async_trait;
use relay_dns_application::ports::UpstreamResolver;
use relay_dns_domain::{DomainError, RecordType, TransportKind};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Upstream client: one A lookup per call against the configured server,
/// over the configured transport, bounded by the per-attempt timeout.
pub struct UpstreamForwarder {
    server_addr: SocketAddr,
    transport: TransportKind,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(server_addr: SocketAddr, transport: TransportKind, timeout: Duration) -> Self {
        Self {
            server_addr,
            transport,
            timeout,
        }
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamForwarder {
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        let request_bytes = MessageBuilder::build_query(domain, &RecordType::A)?;

        let transport = create_transport(self.transport, self.server_addr);
        let response = transport.send(&request_bytes, self.timeout).await?;

        let answer = ResponseParser::parse(&response.bytes)?;

        debug!(
            domain = %domain,
            server = %self.server_addr,
            protocol = response.protocol_used,
            addresses = answer.addresses.len(),
            rcode = ?answer.rcode,
            "Upstream lookup completed"
        );

        answer
            .first_address()
            .ok_or_else(|| DomainError::EmptyAnswer(domain.to_string()))
    }
}
