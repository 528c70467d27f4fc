use anyhow::Context;
use relay_dns_domain::TransportKind;
use relay_dns_infrastructure::dns::DnsServerHandler;
use hickory_server::ServerFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tracing::info;

/// Idle timeout for accepted TCP connections.
const TCP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Bind the configured transport and serve queries until the runtime
/// stops. A bind failure bubbles up as a fatal error.
pub async fn start_dns_server(
    bind_addr: &str,
    transport: TransportKind,
    handler: DnsServerHandler,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", bind_addr))?;

    let mut server = ServerFuture::new(handler);

    match transport {
        TransportKind::Udp => {
            let socket = UdpSocket::bind(socket_addr)
                .await
                .with_context(|| format!("Failed to bind UDP listener on {}", socket_addr))?;
            server.register_socket(socket);
        }
        TransportKind::Tcp => {
            let listener = TcpListener::bind(socket_addr)
                .await
                .with_context(|| format!("Failed to bind TCP listener on {}", socket_addr))?;
            server.register_listener(listener, TCP_REQUEST_TIMEOUT);
        }
    }

    info!(bind_address = %socket_addr, transport = %transport, "DNS server ready");

    server
        .block_until_done()
        .await
        .context("DNS server terminated with an error")?;

    Ok(())
}
