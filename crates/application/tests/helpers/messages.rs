use ferrous_relay_domain::ResolverAddr;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, AAAA, CNAME};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};

pub fn addr(s: &str) -> ResolverAddr {
    ResolverAddr::parse(s).unwrap()
}

pub fn addrs(list: &[&str]) -> Vec<ResolverAddr> {
    list.iter().map(|s| addr(s)).collect()
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

/// Query with a header but an empty question section.
pub fn empty_query(id: u16) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query);
    message
}

pub fn a_record(domain: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(Name::from_ascii(domain).unwrap(), 300, RData::A(A::from(ip)))
}

pub fn aaaa_record(domain: &str, ip: Ipv6Addr) -> Record {
    Record::from_rdata(
        Name::from_ascii(domain).unwrap(),
        300,
        RData::AAAA(AAAA::from(ip)),
    )
}

pub fn cname_record(domain: &str, target: &str) -> Record {
    Record::from_rdata(
        Name::from_ascii(domain).unwrap(),
        300,
        RData::CNAME(CNAME(Name::from_ascii(target).unwrap())),
    )
}

/// Upstream-style response to `query`: same id and question, given answers.
pub fn response_to(query: &Message, answers: Vec<Record>, code: hickory_proto::op::ResponseCode) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(code);
    response.add_queries(query.queries().iter().cloned());
    response.insert_answers(answers);
    response
}

pub fn record_types(message: &Message) -> Vec<RecordType> {
    message.answers().iter().map(|r| r.record_type()).collect()
}
