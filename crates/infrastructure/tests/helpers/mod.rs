#![allow(dead_code)]

mod dns_server_mock;

pub use dns_server_mock::{answer_types, MockBehavior, MockDnsServer, MOCK_IPV4};

use ferrous_relay_domain::ResolverAddr;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::net::SocketAddr;

pub fn resolver_for(addr: SocketAddr) -> ResolverAddr {
    ResolverAddr::parse(&addr.to_string()).unwrap()
}

pub fn query_message(domain: &str, record_type: RecordType, id: u16) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(domain).unwrap(), record_type));
    message
}
