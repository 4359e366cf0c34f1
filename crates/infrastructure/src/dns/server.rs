use ferrous_relay_application::services::error_reply;
use ferrous_relay_application::use_cases::HandleDnsQueryUseCase;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Wire-level entry point: datagram in, datagram out.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns the bytes to send back, or `None` when the datagram gets no reply.
    pub async fn handle_raw(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let query = match Message::from_vec(bytes) {
            Ok(query) => query,
            Err(e) => {
                warn!(error = %e, len = bytes.len(), "Failed to parse DNS query");
                return malformed_query_reply(bytes);
            }
        };

        if query.message_type() != MessageType::Query {
            debug!(id = query.id(), "Ignoring inbound DNS response");
            return None;
        }

        let response = self.use_case.execute(&query).await;
        match response.to_vec() {
            Ok(wire) => Some(wire),
            Err(e) => {
                error!(error = %e, id = query.id(), "Failed to encode response, answering SERVFAIL");
                error_reply(&query, ResponseCode::ServFail).to_vec().ok()
            }
        }
    }
}

/// FORMERR for bytes that don't decode, as long as there is an ID to echo.
fn malformed_query_reply(bytes: &[u8]) -> Option<Vec<u8>> {
    if bytes.len() < 2 {
        return None;
    }
    let id = u16::from_be_bytes([bytes[0], bytes[1]]);
    Message::error_msg(id, OpCode::Query, ResponseCode::FormErr)
        .to_vec()
        .ok()
}
