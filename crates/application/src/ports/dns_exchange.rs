use async_trait::async_trait;
use hickory_proto::op::Message;
use relaydns_domain::{ForwardError, ServerEndpoint};

/// One full query/response exchange against a single upstream endpoint.
///
/// An implementation owns its transport details (UDP with TCP escalation on
/// truncation) and its timers. Exactly one exchange is attempted per call;
/// every failure is terminal for that endpoint.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn exchange(
        &self,
        endpoint: &ServerEndpoint,
        query: &Message,
    ) -> Result<Message, ForwardError>;
}
