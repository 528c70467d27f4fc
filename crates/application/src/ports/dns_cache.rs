use std::net::Ipv4Addr;
use tokio::time::Instant;

/// Port for the resolution cache shared by the query path and the
/// eviction sweeper.
///
/// Implementations guard the underlying map with a single lock held only
/// for the in-memory mutation; none of these operations may block on the
/// network. Timestamps are `tokio::time::Instant` so a paused test clock
/// drives expiry deterministically.
pub trait DnsCachePort: Send + Sync {
    /// Returns the cached address for `domain` if an entry exists,
    /// regardless of its age. Freshness is the sweeper's job; a hit inside
    /// the staleness window bounded by the sweep interval is acceptable.
    fn lookup(&self, domain: &str) -> Option<Ipv4Addr>;

    /// Creates or overwrites the entry for `domain`, stamping the current
    /// time. Last write wins.
    fn insert(&self, domain: &str, address: Ipv4Addr);

    /// Removes every entry inserted strictly before `cutoff` and returns
    /// the number removed.
    fn evict_older_than(&self, cutoff: Instant) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
