//! TCP transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message on the stream is preceded by its length as a 2-byte unsigned
//! big-endian integer. A fresh connection is opened per exchange and torn
//! down with it; a frame that fails to decode aborts the connection, since
//! stream framing cannot resynchronize after a misread length.

use super::DnsTransport;
use crate::dns::wire;
use async_trait::async_trait;
use hickory_proto::op::Message;
use relaydns_domain::ForwardError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn exchange(
        &self,
        query_bytes: &[u8],
        query_id: u16,
        timeout: Duration,
    ) -> Result<Message, ForwardError> {
        let server_addr = self.server_addr;

        let mut stream = tokio::time::timeout(timeout, TcpStream::connect(server_addr))
            .await
            .map_err(|_| ForwardError::TcpConnect {
                server: server_addr.to_string(),
                reason: "connect timed out".to_string(),
            })?
            .map_err(|e| ForwardError::TcpConnect {
                server: server_addr.to_string(),
                reason: e.to_string(),
            })?;

        stream
            .set_nodelay(true)
            .map_err(|e| ForwardError::TcpConnect {
                server: server_addr.to_string(),
                reason: format!("failed to set TCP_NODELAY: {}", e),
            })?;

        // Second timer, independent of the UDP phase's.
        tokio::time::timeout(timeout, async {
            send_with_length_prefix(&mut stream, query_bytes)
                .await
                .map_err(|e| ForwardError::ConnectionTerminated {
                    server: server_addr.to_string(),
                    reason: e.to_string(),
                })?;

            debug!(
                server = %server_addr,
                message_len = query_bytes.len(),
                "TCP query sent"
            );

            loop {
                let frame = read_with_length_prefix(&mut stream).await.map_err(|e| {
                    ForwardError::ConnectionTerminated {
                        server: server_addr.to_string(),
                        reason: e.to_string(),
                    }
                })?;

                match wire::parse(&frame) {
                    Ok(message) if message.id() == query_id => {
                        debug!(
                            server = %server_addr,
                            response_len = frame.len(),
                            "TCP response received"
                        );
                        return Ok(message);
                    }
                    Ok(message) => {
                        debug!(
                            server = %server_addr,
                            got_id = message.id(),
                            want_id = query_id,
                            "Ignoring TCP frame with non-matching transaction id"
                        );
                    }
                    Err(e) => {
                        return Err(ForwardError::FrameDecode {
                            server: server_addr.to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        })
        .await
        .map_err(|_| ForwardError::Timeout {
            server: server_addr.to_string(),
            protocol: "TCP",
        })?
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = message_bytes.len() as u16;
    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await?;
    Ok(())
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    let message_len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;
    Ok(message)
}
