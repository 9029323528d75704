mod address_resolver;
mod dns_exchange;

pub use address_resolver::AddressResolver;
pub use dns_exchange::DnsExchange;
