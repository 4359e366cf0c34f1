//! DNS Message Builder
//!
//! Constructs the probe queries used for upstream health checks and
//! serializes messages to wire format.

use ferrous_relay_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::str::FromStr;

/// Builds DNS query messages
pub struct MessageBuilder;

impl MessageBuilder {
    /// Recursive single-question query with a random ID.
    pub fn build_query(domain: &str, record_type: RecordType) -> Result<Message, DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new();
        message
            .set_id(fastrand::u16(..))
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(query);

        Ok(message)
    }

    /// A-record probe for `domain`.
    pub fn build_probe_query(domain: &str) -> Result<Message, DomainError> {
        Self::build_query(domain, RecordType::A)
    }

    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        message
            .to_vec()
            .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to serialize: {}", e)))
    }
}
