use async_trait::async_trait;
use relaydns_application::ports::AddressResolver;
use relaydns_domain::ForwardError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::debug;

const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolves an upstream server's hostname through the operating system
/// resolver. The first returned address wins; literal addresses skip the
/// lookup entirely.
pub struct SystemAddressResolver {
    timeout: Duration,
}

impl SystemAddressResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemAddressResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_TIMEOUT)
    }
}

#[async_trait]
impl AddressResolver for SystemAddressResolver {
    async fn lookup(&self, host: &str, port: u16) -> Result<SocketAddr, ForwardError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, port));
        }

        let target = format!("{}:{}", host, port);
        let mut addrs = tokio::time::timeout(self.timeout, lookup_host(&target))
            .await
            .map_err(|_| ForwardError::AddressLookup {
                host: host.to_string(),
                reason: "lookup timed out".to_string(),
            })?
            .map_err(|e| ForwardError::AddressLookup {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        let addr = addrs.next().ok_or_else(|| ForwardError::AddressLookup {
            host: host.to_string(),
            reason: "no addresses found".to_string(),
        })?;

        debug!(host = %host, addr = %addr, family = if addr.is_ipv4() { "v4" } else { "v6" }, "Resolved upstream address");
        Ok(addr)
    }
}
