//! relaydns infrastructure layer: sockets, framing, and the system resolver.
pub mod dns;
pub mod system;
