//! relaydns domain layer
pub mod config;
pub mod endpoint;
pub mod errors;

pub use config::{ForwardConfig, ServerList};
pub use endpoint::{ServerEndpoint, DEFAULT_DNS_PORT};
pub use errors::ForwardError;
