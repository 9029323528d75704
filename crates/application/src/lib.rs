//! relaydns application layer
pub mod ports;
pub mod use_cases;

pub use ports::{AddressResolver, DnsExchange};
pub use use_cases::ForwardQueryUseCase;
