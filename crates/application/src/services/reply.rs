use hickory_proto::op::{Message, ResponseCode};

/// Reply to `query` carrying only its question and the given response code.
pub fn error_reply(query: &Message, code: ResponseCode) -> Message {
    let mut reply = Message::error_msg(query.id(), query.op_code(), code);
    reply.add_queries(query.queries().iter().cloned());
    reply.set_recursion_desired(query.recursion_desired());
    reply.set_recursion_available(true);
    reply.set_checking_disabled(query.checking_disabled());
    reply
}
