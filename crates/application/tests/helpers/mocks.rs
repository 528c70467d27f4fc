#![allow(dead_code)]

use async_trait::async_trait;
use relay_dns_application::ports::{DnsCachePort, UpstreamResolver};
use relay_dns_domain::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use tokio::time::Instant;

/// In-memory cache double that counts insertions.
#[derive(Default)]
pub struct MockDnsCache {
    entries: RwLock<HashMap<String, (Ipv4Addr, Instant)>>,
    insert_count: AtomicUsize,
}

impl MockDnsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_count(&self) -> usize {
        self.insert_count.load(Ordering::Relaxed)
    }

    pub fn preload(&self, domain: &str, address: Ipv4Addr) {
        self.entries
            .write()
            .unwrap()
            .insert(domain.to_string(), (address, Instant::now()));
    }
}

impl DnsCachePort for MockDnsCache {
    fn lookup(&self, domain: &str) -> Option<Ipv4Addr> {
        self.entries
            .read()
            .unwrap()
            .get(domain)
            .map(|(address, _)| *address)
    }

    fn insert(&self, domain: &str, address: Ipv4Addr) {
        self.insert_count.fetch_add(1, Ordering::Relaxed);
        self.entries
            .write()
            .unwrap()
            .insert(domain.to_string(), (address, Instant::now()));
    }

    fn evict_older_than(&self, cutoff: Instant) -> usize {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, (_, inserted_at)| *inserted_at >= cutoff);
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

/// Upstream double that counts resolve calls and serves canned results.
#[derive(Default)]
pub struct MockUpstreamResolver {
    responses: RwLock<HashMap<String, Result<Ipv4Addr, DomainError>>>,
    call_count: AtomicUsize,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, domain: &str, address: Ipv4Addr) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), Ok(address));
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.responses
            .read()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::InvalidDomainName(format!(
                    "No mock response for {}",
                    domain
                )))
            })
    }
}
