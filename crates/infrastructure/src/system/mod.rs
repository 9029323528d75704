mod address_resolver;

pub use address_resolver::SystemAddressResolver;
