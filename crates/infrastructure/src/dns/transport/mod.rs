pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use hickory_proto::op::Message;
use relaydns_domain::ForwardError;
use std::time::Duration;

/// One transport attempt: send pre-serialized query bytes to the server this
/// transport was built for and wait for the response whose transaction id
/// matches `query_id`. A single timer bounds the attempt; every failure is
/// terminal for the attempt (the escalation policy lives a layer up).
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn exchange(
        &self,
        query_bytes: &[u8],
        query_id: u16,
        timeout: Duration,
    ) -> Result<Message, ForwardError>;

    fn protocol_name(&self) -> &'static str;
}
