use super::server::DnsServerHandler;
use std::io;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

const RECV_BUFFER_SIZE: usize = 65535;

/// Receives queries on `socket` until `shutdown` fires.
///
/// Every datagram is handled on its own task, so one slow upstream never
/// holds up other clients. On shutdown the loop stops reading and waits for
/// in-flight queries, which the forwarder already bounds in time.
pub async fn serve_udp(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> io::Result<()> {
    let local_addr = socket.local_addr()?;
    info!(bind_address = %local_addr, "DNS listener ready");

    let tracker = TaskTracker::new();
    let mut recv_buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DNS listener: shutdown requested");
                break;
            }
            result = socket.recv_from(&mut recv_buf) => {
                match result {
                    Ok((len, peer)) => {
                        let query: Arc<[u8]> = Arc::from(&recv_buf[..len]);
                        let handler = handler.clone();
                        let socket = socket.clone();
                        tracker.spawn(async move {
                            if let Some(response) = handler.handle_raw(&query).await {
                                if let Err(e) = socket.send_to(&response, peer).await {
                                    warn!(client = %peer, error = %e, "Failed to send DNS response");
                                }
                            } else {
                                debug!(client = %peer, len = query.len(), "Datagram dropped");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "UDP recv error");
                    }
                }
            }
        }
    }

    tracker.close();
    if !tracker.is_empty() {
        info!(in_flight = tracker.len(), "DNS listener: draining in-flight queries");
    }
    tracker.wait().await;
    info!("DNS listener stopped");
    Ok(())
}
