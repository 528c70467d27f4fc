use anyhow::Context;
use relay_dns_application::use_cases::HandleDnsQueryUseCase;
use relay_dns_domain::Config;
use relay_dns_infrastructure::dns::{ResolutionCache, UpstreamForwarder};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub cache: Arc<ResolutionCache>,
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream_addr: SocketAddr = config
            .upstream
            .address
            .parse()
            .with_context(|| format!("Invalid upstream address: {}", config.upstream.address))?;

        let cache = Arc::new(ResolutionCache::new());

        let forwarder = Arc::new(UpstreamForwarder::new(
            upstream_addr,
            config.upstream.transport,
            Duration::from_secs(config.upstream.query_timeout),
        ));

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(
            cache.clone(),
            forwarder,
            config.cache.ttl,
        ));

        info!(
            ttl_secs = config.cache.ttl,
            query_timeout_secs = config.upstream.query_timeout,
            "DNS services initialized"
        );

        Ok(Self {
            cache,
            handler_use_case,
        })
    }
}
