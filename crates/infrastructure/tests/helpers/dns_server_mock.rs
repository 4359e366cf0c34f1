use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const MOCK_IPV4: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);
pub const MOCK_IPV6: Ipv6Addr = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1);

/// How the mock upstream treats each query it receives.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// One A and one AAAA answer for the queried name.
    AnswerBoth,
    /// Empty answer section with the given response code.
    Rcode(ResponseCode),
    /// Reads the query, never answers.
    Silent,
    /// Answers under a different transaction ID.
    WrongId,
    /// Answers with bytes that are not a DNS message.
    Garbage,
    /// Waits before answering like `AnswerBoth`.
    Delayed(Duration),
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?);
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = received.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let query = buf[..len].to_vec();
                            let socket = socket.clone();
                            tokio::spawn(async move {
                                if let Some(response) = Self::build_response(&query, behavior).await {
                                    let _ = socket.send_to(&response, peer).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    async fn build_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;

        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true);
        response.add_queries(request.queries().iter().cloned());

        match behavior {
            MockBehavior::Silent => return None,
            MockBehavior::Garbage => return Some(vec![query[0], query[1], 0xff]),
            MockBehavior::Rcode(code) => {
                response.set_response_code(code);
            }
            MockBehavior::WrongId => {
                response.set_id(request.id().wrapping_add(1));
            }
            MockBehavior::Delayed(delay) => {
                tokio::time::sleep(delay).await;
                Self::add_answers(&mut response, &request);
            }
            MockBehavior::AnswerBoth => {
                Self::add_answers(&mut response, &request);
            }
        }

        response.to_vec().ok()
    }

    fn add_answers(response: &mut Message, request: &Message) {
        if let Some(question) = request.queries().first() {
            let name = question.name().clone();
            response.add_answer(Record::from_rdata(name.clone(), 60, RData::A(A(MOCK_IPV4))));
            response.add_answer(Record::from_rdata(name, 60, RData::AAAA(AAAA(MOCK_IPV6))));
        }
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn answer_types(message: &Message) -> Vec<RecordType> {
    message.answers().iter().map(|r| r.record_type()).collect()
}
