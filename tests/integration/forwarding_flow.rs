//! End-to-end forwarding flow over the real cache and use case, with a
//! scripted upstream standing in for the network.

use async_trait::async_trait;
use relay_dns_application::ports::{DnsCachePort, UpstreamResolver};
use relay_dns_application::HandleDnsQueryUseCase;
use relay_dns_domain::{DnsQuery, DomainError, RecordType};
use relay_dns_infrastructure::dns::ResolutionCache;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Barrier;

const TTL_SECS: u32 = 300;
const EXAMPLE_ADDR: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

/// Scripted upstream: canned answers per domain, call counting.
#[derive(Default)]
struct ScriptedUpstream {
    responses: RwLock<HashMap<String, Ipv4Addr>>,
    call_count: AtomicUsize,
}

impl ScriptedUpstream {
    fn new() -> Self {
        Self::default()
    }

    fn set_response(&self, domain: &str, address: Ipv4Addr) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), address);
    }

    fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamResolver for ScriptedUpstream {
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.responses
            .read()
            .unwrap()
            .get(domain)
            .copied()
            .ok_or(DomainError::QueryTimeout)
    }
}

fn build_use_case(
    cache: Arc<ResolutionCache>,
    upstream: Arc<ScriptedUpstream>,
) -> HandleDnsQueryUseCase {
    HandleDnsQueryUseCase::new(cache, upstream, TTL_SECS)
}

#[tokio::test]
async fn test_end_to_end_a_query_then_cached_repeat_then_aaaa() {
    let cache = Arc::new(ResolutionCache::new());
    let upstream = Arc::new(ScriptedUpstream::new());
    upstream.set_response("example.com.", EXAMPLE_ADDR);

    let use_case = build_use_case(cache.clone(), upstream.clone());

    // First A query goes upstream and fills the cache.
    let answers = use_case
        .execute(&DnsQuery::new("example.com.", RecordType::A))
        .await;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].address, EXAMPLE_ADDR);
    assert_eq!(answers[0].ttl, TTL_SECS);
    assert_eq!(upstream.call_count(), 1);
    assert_eq!(cache.len(), 1);

    // Second identical query inside the TTL window is served from cache.
    let answers = use_case
        .execute(&DnsQuery::new("example.com.", RecordType::A))
        .await;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].address, EXAMPLE_ADDR);
    assert_eq!(upstream.call_count(), 1, "No second upstream call");

    // AAAA for the same name is acknowledged with zero records.
    let answers = use_case
        .execute(&DnsQuery::new("example.com.", RecordType::AAAA))
        .await;
    assert!(answers.is_empty());
    assert_eq!(upstream.call_count(), 1);
}

#[tokio::test]
async fn test_distinct_domains_resolve_independently() {
    let cache = Arc::new(ResolutionCache::new());
    let upstream = Arc::new(ScriptedUpstream::new());
    upstream.set_response("one.test.", Ipv4Addr::new(192, 0, 2, 1));
    upstream.set_response("two.test.", Ipv4Addr::new(192, 0, 2, 2));

    let use_case = build_use_case(cache.clone(), upstream.clone());

    let one = use_case
        .execute(&DnsQuery::new("one.test.", RecordType::A))
        .await;
    let two = use_case
        .execute(&DnsQuery::new("two.test.", RecordType::A))
        .await;

    assert_eq!(one[0].address, Ipv4Addr::new(192, 0, 2, 1));
    assert_eq!(two[0].address, Ipv4Addr::new(192, 0, 2, 2));
    assert_eq!(upstream.call_count(), 2);
    assert_eq!(cache.len(), 2);
}

/// Upstream double that blocks each resolve on a shared barrier, forcing
/// two lookups for the same domain to be in flight at once.
struct RendezvousUpstream {
    barrier: Barrier,
    addresses: [Ipv4Addr; 2],
    call_count: AtomicUsize,
}

impl RendezvousUpstream {
    fn new(addresses: [Ipv4Addr; 2]) -> Self {
        Self {
            barrier: Barrier::new(2),
            addresses,
            call_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UpstreamResolver for RendezvousUpstream {
    async fn resolve(&self, _domain: &str) -> Result<Ipv4Addr, DomainError> {
        let index = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.barrier.wait().await;
        Ok(self.addresses[index % 2])
    }
}

#[tokio::test]
async fn test_concurrent_misses_both_go_upstream_and_leave_one_entry() {
    let first = Ipv4Addr::new(198, 51, 100, 1);
    let second = Ipv4Addr::new(198, 51, 100, 2);

    let cache = Arc::new(ResolutionCache::new());
    let upstream = Arc::new(RendezvousUpstream::new([first, second]));
    let use_case = Arc::new(HandleDnsQueryUseCase::new(
        cache.clone(),
        upstream.clone(),
        TTL_SECS,
    ));

    // Both tasks miss, rendezvous inside resolve, and insert independently.
    let a = tokio::spawn({
        let use_case = Arc::clone(&use_case);
        async move {
            use_case
                .execute(&DnsQuery::new("example.com.", RecordType::A))
                .await
        }
    });
    let b = tokio::spawn({
        let use_case = Arc::clone(&use_case);
        async move {
            use_case
                .execute(&DnsQuery::new("example.com.", RecordType::A))
                .await
        }
    });

    let (answers_a, answers_b) = (a.await.unwrap(), b.await.unwrap());

    assert_eq!(upstream.call_count.load(Ordering::SeqCst), 2);
    assert_eq!(answers_a.len(), 1);
    assert_eq!(answers_b.len(), 1);

    // Exactly one entry survives; whichever insert lost the race is gone.
    assert_eq!(cache.len(), 1);
    let cached = cache.lookup("example.com.").unwrap();
    assert!(cached == first || cached == second);
}
