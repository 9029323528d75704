use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::errors::ForwardError;

/// Port used when an endpoint string carries none.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// One upstream resolver the forwarder may try. The host may be a literal
/// address or a name; it is resolved lazily at query time, never cached
/// across endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerEndpoint {
    pub host: String,
    pub port: u16,
}

impl ServerEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port_str = rest.strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

impl FromStr for ServerEndpoint {
    type Err = ForwardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ForwardError::Config("empty server endpoint".to_string()));
        }
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(ServerEndpoint::new(addr.ip().to_string(), addr.port()));
        }
        // Bare IP (checked before host:port so IPv6 colons don't misparse).
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(ServerEndpoint::new(ip.to_string(), DEFAULT_DNS_PORT));
        }
        if let Some((host, port)) = parse_host_port(s) {
            if host.is_empty() {
                return Err(ForwardError::Config(format!("Invalid endpoint '{}'", s)));
            }
            return Ok(ServerEndpoint::new(host, port));
        }
        Ok(ServerEndpoint::new(s, DEFAULT_DNS_PORT))
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
