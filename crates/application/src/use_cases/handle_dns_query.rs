use crate::ports::{DnsCachePort, UpstreamResolver};
use relay_dns_domain::{DnsQuery, DnsRecord, RecordType};
use std::sync::Arc;
use tracing::debug;

/// Per-question entry point: cache hit short-circuits, cache miss goes
/// upstream and fills the cache, upstream failure yields no answer.
pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn DnsCachePort>,
    upstream: Arc<dyn UpstreamResolver>,
    answer_ttl: u32,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        cache: Arc<dyn DnsCachePort>,
        upstream: Arc<dyn UpstreamResolver>,
        answer_ttl: u32,
    ) -> Self {
        Self {
            cache,
            upstream,
            answer_ttl,
        }
    }

    /// Resolve one question into its answer record set.
    ///
    /// Only A questions are answered; every other type is acknowledged with
    /// an empty set, touching neither the cache nor the upstream. An empty
    /// result for an A question means the upstream attempt failed; the
    /// failure is absorbed here, never propagated.
    ///
    /// Answers always advertise the configured TTL, not the entry's
    /// remaining lifetime.
    pub async fn execute(&self, query: &DnsQuery) -> Vec<DnsRecord> {
        if query.record_type != RecordType::A {
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                "Unsupported question type, answering with zero records"
            );
            return vec![];
        }

        if let Some(address) = self.cache.lookup(&query.domain) {
            debug!(domain = %query.domain, %address, "Cache hit");
            return vec![self.answer(query, address)];
        }

        match self.upstream.resolve(&query.domain).await {
            Ok(address) => {
                // The round trip ran without any cache lock held; the insert
                // below is the only mutation and is visible to concurrent
                // lookups as soon as it completes.
                self.cache.insert(&query.domain, address);
                debug!(domain = %query.domain, %address, "Resolved upstream, cache filled");
                vec![self.answer(query, address)]
            }
            Err(e) => {
                debug!(domain = %query.domain, error = %e, "Upstream resolution failed");
                vec![]
            }
        }
    }

    fn answer(&self, query: &DnsQuery, address: std::net::Ipv4Addr) -> DnsRecord {
        DnsRecord::new(
            Arc::clone(&query.domain),
            RecordType::A,
            address,
            self.answer_ttl,
        )
    }
}
