use relay_dns_application::ports::DnsCachePort;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{PoisonError, RwLock};
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    address: Ipv4Addr,
    inserted_at: Instant,
}

/// Address cache shared by every query task and the eviction sweeper.
///
/// A single `RwLock` guards the map: lookups take the read half,
/// insert/evict the write half. The lock is held only for the map
/// operation itself; the upstream round trip that precedes an insert runs
/// entirely outside it, so resolutions of different domains never
/// serialize behind network latency.
///
/// Lookups do not check entry age; freshness is enforced solely by the
/// sweeper, which bounds how stale a served entry can be.
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsCachePort for ResolutionCache {
    fn lookup(&self, domain: &str) -> Option<Ipv4Addr> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(domain)
            .map(|entry| entry.address)
    }

    fn insert(&self, domain: &str, address: Ipv4Addr) {
        let entry = CacheEntry {
            address,
            inserted_at: Instant::now(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(domain.to_string(), entry);
    }

    fn evict_older_than(&self, cutoff: Instant) -> usize {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Snapshot the expired keys, then remove; the scan never observes
        // its own removals.
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.inserted_at < cutoff)
            .map(|(domain, _)| domain.clone())
            .collect();

        for domain in &expired {
            entries.remove(domain);
        }

        if !expired.is_empty() {
            debug!(
                removed = expired.len(),
                remaining = entries.len(),
                "Evicted expired cache entries"
            );
        }

        expired.len()
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
