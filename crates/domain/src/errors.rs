use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ForwardError {
    #[error("Address lookup failed for {host}: {reason}")]
    AddressLookup { host: String, reason: String },

    #[error("Failed to encode DNS query: {0}")]
    Encode(String),

    #[error("Failed to send UDP query to {server}: {reason}")]
    UdpSend { server: String, reason: String },

    #[error("Socket error talking to {server}: {reason}")]
    Io { server: String, reason: String },

    #[error("Timeout waiting for {protocol} response from {server}")]
    Timeout {
        server: String,
        protocol: &'static str,
    },

    #[error("TCP connection to {server} failed: {reason}")]
    TcpConnect { server: String, reason: String },

    #[error("TCP connection to {server} terminated before a matching response: {reason}")]
    ConnectionTerminated { server: String, reason: String },

    #[error("Failed to decode TCP frame from {server}: {reason}")]
    FrameDecode { server: String, reason: String },

    #[error("No more servers to try")]
    ServersExhausted,

    #[error("Configuration error: {0}")]
    Config(String),
}
