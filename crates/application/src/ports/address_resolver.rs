use async_trait::async_trait;
use relaydns_domain::ForwardError;
use std::net::SocketAddr;

/// Turns an upstream server's own hostname into a single network address.
/// The address family travels with the returned `SocketAddr`.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn lookup(&self, host: &str, port: u16) -> Result<SocketAddr, ForwardError>;
}
