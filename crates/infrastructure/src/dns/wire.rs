//! Thin wrappers over the hickory-proto wire codec. The codec itself is
//! treated as a black box; everything above this module works with parsed
//! `Message` values and opaque byte buffers.

use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use hickory_proto::ProtoError;
use relaydns_domain::ForwardError;

/// Serializes a message to wire format once; the same bytes are reused for
/// the UDP and TCP attempts of an exchange.
pub fn serialize(message: &Message) -> Result<Vec<u8>, ForwardError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message
        .emit(&mut encoder)
        .map_err(|e| ForwardError::Encode(e.to_string()))?;
    Ok(buf)
}

pub fn parse(bytes: &[u8]) -> Result<Message, ProtoError> {
    Message::from_vec(bytes)
}
