use super::forward_query::ForwardQueryUseCase;
use crate::services::{error_reply, Ipv6AnswerFilter};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns one client query into the reply sent back to it.
///
/// Never fails: forwarding errors become SERVFAIL and queries without a
/// question become FORMERR, so the client always gets an answer.
pub struct HandleDnsQueryUseCase {
    forwarder: Arc<ForwardQueryUseCase>,
    strip_ipv6: bool,
}

impl HandleDnsQueryUseCase {
    pub fn new(forwarder: Arc<ForwardQueryUseCase>, strip_ipv6: bool) -> Self {
        Self {
            forwarder,
            strip_ipv6,
        }
    }

    pub async fn execute(&self, query: &Message) -> Message {
        let Some(question) = query.queries().first() else {
            warn!(id = query.id(), "Query without question section");
            return error_reply(query, ResponseCode::FormErr);
        };

        debug!(
            domain = %question.name(),
            record_type = ?question.query_type(),
            id = query.id(),
            "DNS query received"
        );

        match self.forwarder.execute(query).await {
            Ok(outcome) => {
                let mut response = outcome.response;
                if self.strip_ipv6 {
                    response = Ipv6AnswerFilter::apply(response, query);
                } else {
                    response.set_id(query.id());
                }
                debug!(
                    domain = %question.name(),
                    server = %outcome.server,
                    answers = response.answers().len(),
                    rcode = ?response.response_code(),
                    "Sending response"
                );
                response
            }
            Err(e) => {
                error!(domain = %question.name(), error = %e, "Query forwarding failed, answering SERVFAIL");
                error_reply(query, ResponseCode::ServFail)
            }
        }
    }
}
