pub mod exchange;
pub mod transport;
pub mod wire;

pub use exchange::TransportClient;
