use clap::Parser;
use relay_dns_domain::{CliOverrides, TransportKind};
use relay_dns_infrastructure::dns::DnsServerHandler;
use relay_dns_jobs::CacheEvictionJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "relay-dns")]
#[command(version)]
#[command(about = "Relay DNS - Caching DNS forwarder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream server cache misses are forwarded to (<ip:port>)
    #[arg(short = 's', long)]
    upstream: Option<String>,

    /// Upstream connection type (udp|tcp)
    #[arg(long, value_name = "KIND")]
    upstream_transport: Option<TransportKind>,

    /// `address:port` to listen on. Use 127.0.0.1:53 for the loopback
    /// interface only, 0.0.0.0:53 for any interface.
    #[arg(short = 'a', long)]
    listen: Option<String>,

    /// Listener connection type (udp|tcp)
    #[arg(long, value_name = "KIND")]
    listen_transport: Option<TransportKind>,

    /// IP to send back for filtered domains
    #[arg(long)]
    fake_address: Option<String>,

    /// Cache TTL in seconds, clamped to 60..=86400
    #[arg(long)]
    ttl: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        upstream: cli.upstream,
        upstream_transport: cli.upstream_transport,
        listen: cli.listen,
        listen_transport: cli.listen_transport,
        fake_address: cli.fake_address,
        ttl: cli.ttl,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Relay DNS v{}", env!("CARGO_PKG_VERSION"));
    info!(
        server = %config.upstream.address,
        transport = %config.upstream.transport,
        "Upstream resolver"
    );
    info!(
        address = %config.server.listen_address,
        transport = %config.server.listen_transport,
        "DNS listener"
    );

    // Dependency Injection - Build cache, forwarder and the query use case
    let services = di::DnsServices::new(&config)?;

    // Start the eviction sweeper; it runs until the listener stops
    let shutdown = CancellationToken::new();
    let eviction_job = Arc::new(
        CacheEvictionJob::new(services.cache.clone(), config.cache.ttl)
            .with_cancellation(shutdown.clone()),
    );
    eviction_job.start().await;

    // Run the DNS listener (blocking); a bind failure is fatal
    let handler = DnsServerHandler::new(services.handler_use_case.clone());
    let result = server::start_dns_server(
        &config.server.listen_address,
        config.server.listen_transport,
        handler,
    )
    .await;

    shutdown.cancel();

    if let Err(e) = &result {
        error!(error = %e, "Fatal: failed to run DNS listener");
    }
    result?;

    info!("Server shutdown complete");
    Ok(())
}
