use relay_dns_application::ports::DnsCachePort;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Background eviction sweeper for the resolution cache.
///
/// Wakes once per configured TTL period and removes every entry whose age
/// has reached the TTL. Entries younger than one full period survive the
/// pass, so an entry can live up to two periods before it is removed.
/// That is the accepted granularity of sweeping instead of per-entry timers.
///
/// The job runs for the process lifetime; the cancellation token exists so
/// tests can stop it deterministically.
pub struct CacheEvictionJob {
    cache: Arc<dyn DnsCachePort>,
    sweep_interval: Duration,
    shutdown: CancellationToken,
}

impl CacheEvictionJob {
    pub fn new(cache: Arc<dyn DnsCachePort>, ttl_secs: u32) -> Self {
        Self {
            cache,
            sweep_interval: Duration::from_secs(u64::from(ttl_secs)),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.sweep_interval.as_secs(),
            "Starting cache eviction sweeper"
        );

        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            // The first pass runs one full period after startup, never
            // immediately against a cache that cannot have aged entries.
            let start = Instant::now() + job.sweep_interval;
            let mut interval = interval_at(start, job.sweep_interval);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("CacheEvictionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        job.sweep();
                    }
                }
            }
        });
    }

    fn sweep(&self) {
        let now = Instant::now();
        let Some(cutoff) = now.checked_sub(self.sweep_interval) else {
            return;
        };

        let removed = self.cache.evict_older_than(cutoff);
        if removed > 0 {
            debug!(
                removed,
                cache_size = self.cache.len(),
                "Eviction sweep completed"
            );
        }
    }
}
