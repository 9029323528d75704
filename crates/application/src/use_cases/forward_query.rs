use crate::ports::DnsExchange;
use hickory_proto::op::Message;
use relaydns_domain::{ForwardError, ServerEndpoint, ServerList};
use std::sync::Arc;
use tracing::{debug, warn};

/// Tries a caller-ordered list of upstream endpoints, one exchange each,
/// until one answers. The first success is merged into the caller's response
/// message; only exhaustion of the whole list is surfaced as an error.
pub struct ForwardQueryUseCase {
    exchange: Arc<dyn DnsExchange>,
    servers: Vec<ServerEndpoint>,
}

impl std::fmt::Debug for ForwardQueryUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardQueryUseCase")
            .field("servers", &self.servers)
            .finish_non_exhaustive()
    }
}

impl ForwardQueryUseCase {
    /// A single server string is accepted anywhere a list is.
    pub fn new(
        exchange: Arc<dyn DnsExchange>,
        servers: impl Into<ServerList>,
    ) -> Result<Self, ForwardError> {
        let servers = servers.into().endpoints()?;
        Ok(Self { exchange, servers })
    }

    pub fn with_endpoints(
        exchange: Arc<dyn DnsExchange>,
        servers: Vec<ServerEndpoint>,
    ) -> Result<Self, ForwardError> {
        if servers.is_empty() {
            return Err(ForwardError::Config(
                "at least one upstream server is required".to_string(),
            ));
        }
        Ok(Self { exchange, servers })
    }

    pub fn servers(&self) -> &[ServerEndpoint] {
        &self.servers
    }

    /// Forwards `request` and merges the winning answer into `response`.
    ///
    /// Endpoints are tried strictly in order; any exchange failure moves on
    /// to the next endpoint, whatever its kind. On success the response's
    /// status code is overwritten and the answer, authority, and additional
    /// records are appended after whatever the response already holds. On
    /// exhaustion the response is left untouched.
    pub async fn execute(
        &self,
        request: &Message,
        response: &mut Message,
    ) -> Result<(), ForwardError> {
        for endpoint in &self.servers {
            match self.exchange.exchange(endpoint, request).await {
                Ok(result) => {
                    debug!(
                        server = %endpoint,
                        rcode = ?result.response_code(),
                        answers = result.answers().len(),
                        "Upstream answered, merging into response"
                    );
                    merge_response(&result, response);
                    return Ok(());
                }
                Err(e) => {
                    debug!(server = %endpoint, error = %e, "Upstream exchange failed, trying next server");
                }
            }
        }

        warn!(
            servers = self.servers.len(),
            id = request.id(),
            "All upstream servers failed"
        );
        Err(ForwardError::ServersExhausted)
    }
}

fn merge_response(result: &Message, response: &mut Message) {
    response.set_response_code(result.response_code());
    for record in result.answers() {
        response.add_answer(record.clone());
    }
    for record in result.name_servers() {
        response.add_name_server(record.clone());
    }
    for record in result.additionals() {
        response.add_additional(record.clone());
    }
}
