use std::net::{IpAddr, Ipv4Addr};

use tokio::net::UdpSocket;
use tracing::debug;

/// Public address used only to pick the outbound interface; nothing is sent to it.
const PROBE_ADDR: &str = "8.8.8.8:80";

/// Returns the address other machines on the LAN would use to reach us,
/// or loopback if it cannot be determined.
pub async fn lan_ip() -> IpAddr {
    match probe_local_ip().await {
        Ok(ip) => ip,
        Err(e) => {
            debug!(error = %e, "Could not determine LAN address, falling back to loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

// Connecting a UDP socket only sets its default peer; the kernel picks the
// local address for that route without emitting any packet.
async fn probe_local_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect(PROBE_ADDR).await?;
    Ok(socket.local_addr()?.ip())
}
