use relay_dns_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use tracing::debug;

/// The decoded pieces of an upstream answer the forwarding path cares
/// about: the A addresses in answer order, plus enough header state to
/// tell an empty success from a server-side error.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    pub addresses: Vec<Ipv4Addr>,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl UpstreamAnswer {
    /// The address served to the client: the first of the answer set.
    pub fn first_address(&self) -> Option<Ipv4Addr> {
        self.addresses.first().copied()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<UpstreamAnswer, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut addresses = Vec::new();
        for record in message.answers() {
            if let RData::A(a) = record.data() {
                addresses.push(a.0);
            }
        }

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(UpstreamAnswer {
            addresses,
            rcode,
            truncated,
        })
    }
}
