//! UDP transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). If the response comes back with the
//! TC (truncated) bit set, the caller retries over TCP.

use super::DnsTransport;
use crate::dns::wire;
use async_trait::async_trait;
use hickory_proto::op::Message;
use relaydns_domain::ForwardError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn exchange(
        &self,
        query_bytes: &[u8],
        query_id: u16,
        timeout: Duration,
    ) -> Result<Message, ForwardError> {
        // Bind to ephemeral port (0 = OS assigns) in the server's family.
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| ForwardError::Io {
            server: self.server_addr.to_string(),
            reason: format!("failed to bind UDP socket: {}", e),
        })?;

        let server_addr = self.server_addr;
        tokio::time::timeout(timeout, async {
            let bytes_sent = socket
                .send_to(query_bytes, server_addr)
                .await
                .map_err(|e| ForwardError::UdpSend {
                    server: server_addr.to_string(),
                    reason: e.to_string(),
                })?;

            debug!(
                server = %server_addr,
                bytes_sent = bytes_sent,
                "UDP query sent"
            );

            let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            loop {
                let (bytes_received, from_addr) =
                    socket
                        .recv_from(&mut recv_buf)
                        .await
                        .map_err(|e| ForwardError::Io {
                            server: server_addr.to_string(),
                            reason: e.to_string(),
                        })?;

                if from_addr.ip() != server_addr.ip() {
                    warn!(
                        expected = %server_addr,
                        received_from = %from_addr,
                        "UDP response from unexpected source"
                    );
                }

                // Matching is by transaction id alone. Anything else on the
                // socket is dropped and the wait continues.
                match wire::parse(&recv_buf[..bytes_received]) {
                    Ok(message) if message.id() == query_id => {
                        debug!(
                            server = %server_addr,
                            bytes_received = bytes_received,
                            truncated = message.truncated(),
                            "UDP response received"
                        );
                        return Ok(message);
                    }
                    Ok(message) => {
                        debug!(
                            server = %server_addr,
                            got_id = message.id(),
                            want_id = query_id,
                            "Ignoring datagram with non-matching transaction id"
                        );
                    }
                    Err(e) => {
                        debug!(server = %server_addr, error = %e, "Dropping malformed datagram");
                    }
                }
            }
        })
        .await
        .map_err(|_| ForwardError::Timeout {
            server: self.server_addr.to_string(),
            protocol: "UDP",
        })?
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_udp_transport_creation() {
        let addr: SocketAddr = "8.8.8.8:53".parse().unwrap();
        let transport = UdpTransport::new(addr);
        assert_eq!(transport.server_addr, addr);
        assert_eq!(transport.protocol_name(), "UDP");
    }

    #[test]
    fn test_udp_transport_ipv6() {
        let addr: SocketAddr = "[2001:4860:4860::8888]:53".parse().unwrap();
        let transport = UdpTransport::new(addr);
        assert_eq!(transport.server_addr, addr);
    }
}
