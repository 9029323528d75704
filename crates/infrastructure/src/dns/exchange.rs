//! The resolution client: one UDP attempt, promoted to a single TCP attempt
//! when the answer comes back truncated.

use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use crate::dns::wire;
use async_trait::async_trait;
use hickory_proto::op::Message;
use relaydns_application::ports::{AddressResolver, DnsExchange};
use relaydns_domain::{ForwardConfig, ForwardError, ServerEndpoint};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Performs one query/response exchange against a (host, port) upstream.
///
/// The host is resolved lazily through the [`AddressResolver`] port, the
/// query is serialized once, and the same bytes are reused for the UDP and
/// TCP attempts. Each attempt owns its socket and timer; nothing is shared
/// across exchanges.
pub struct TransportClient {
    resolver: Arc<dyn AddressResolver>,
    timeout: Duration,
}

impl TransportClient {
    pub fn new(resolver: Arc<dyn AddressResolver>) -> Self {
        Self::with_timeout_ms(resolver, DEFAULT_TIMEOUT_MS)
    }

    /// Zero is invalid and falls back to the default of 3000 ms.
    pub fn with_timeout_ms(resolver: Arc<dyn AddressResolver>, timeout_ms: u64) -> Self {
        let timeout_ms = if timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            timeout_ms
        };
        Self {
            resolver,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn from_config(resolver: Arc<dyn AddressResolver>, config: &ForwardConfig) -> Self {
        Self::with_timeout_ms(resolver, config.effective_timeout_ms())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves `query` against the upstream at (`host`, `port`).
    ///
    /// UDP is always attempted first. Only a truncated UDP answer triggers
    /// the TCP attempt, against the same resolved address and port, and an
    /// exchange never retries a transport it has already tried.
    pub async fn resolve(
        &self,
        host: &str,
        port: u16,
        query: &Message,
    ) -> Result<Message, ForwardError> {
        let server_addr = self.resolver.lookup(host, port).await?;
        let query_bytes = wire::serialize(query)?;
        let query_id = query.id();

        let udp = UdpTransport::new(server_addr);
        let response = udp.exchange(&query_bytes, query_id, self.timeout).await?;
        if !response.truncated() {
            return Ok(response);
        }

        debug!(server = %server_addr, id = query_id, "UDP response truncated, retrying over TCP");
        let tcp = TcpTransport::new(server_addr);
        tcp.exchange(&query_bytes, query_id, self.timeout).await
    }
}

#[async_trait]
impl DnsExchange for TransportClient {
    async fn exchange(
        &self,
        endpoint: &ServerEndpoint,
        query: &Message,
    ) -> Result<Message, ForwardError> {
        self.resolve(&endpoint.host, endpoint.port, query).await
    }
}
