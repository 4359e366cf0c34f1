use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Record, RecordType};
use tracing::debug;

/// Strips AAAA answers from upstream responses.
///
/// Policy:
/// - every AAAA record in the answer section is removed, everything else
///   (answers of other types, authority, additional, EDNS) is untouched;
/// - if no answers are left and the client asked for AAAA, the reply becomes
///   NXDOMAIN;
/// - in every other case the upstream response code is kept.
///
/// The returned message always carries the client's transaction id.
pub struct Ipv6AnswerFilter;

impl Ipv6AnswerFilter {
    pub fn apply(mut upstream: Message, original_query: &Message) -> Message {
        let query_type = original_query.queries().first().map(|q| q.query_type());

        let answers = upstream.take_answers();
        let total = answers.len();
        let kept: Vec<Record> = answers
            .into_iter()
            .filter(|record| record.record_type() != RecordType::AAAA)
            .collect();
        let removed = total - kept.len();

        let response_code = if kept.is_empty() && query_type == Some(RecordType::AAAA) {
            ResponseCode::NXDomain
        } else {
            upstream.response_code()
        };

        debug!(
            removed,
            kept = kept.len(),
            query_type = ?query_type,
            rcode = ?response_code,
            "IPv6 answers filtered"
        );

        upstream.insert_answers(kept);
        upstream.set_response_code(response_code);
        upstream.set_id(original_query.id());
        upstream
    }
}
