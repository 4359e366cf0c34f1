use super::messages::response_to;
use async_trait::async_trait;
use ferrous_relay_application::ports::UpstreamExchange;
use ferrous_relay_domain::{DomainError, ResolverAddr};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// What a scripted upstream does with a query.
#[derive(Clone)]
pub enum ScriptedReply {
    Answer {
        answers: Vec<Record>,
        code: ResponseCode,
    },
    Fail(DomainError),
    /// Never answers; only the caller's timeout ends the exchange.
    Hang,
}

impl ScriptedReply {
    pub fn answer(answers: Vec<Record>) -> Self {
        Self::Answer {
            answers,
            code: ResponseCode::NoError,
        }
    }

    pub fn code(code: ResponseCode) -> Self {
        Self::Answer {
            answers: Vec::new(),
            code,
        }
    }

    pub fn refused(server: &str) -> Self {
        Self::Fail(DomainError::TransportConnectionRefused {
            server: server.to_string(),
        })
    }
}

/// Upstream exchange with a per-server script; unscripted servers refuse.
#[derive(Clone, Default)]
pub struct MockUpstreamExchange {
    script: Arc<RwLock<HashMap<ResolverAddr, ScriptedReply>>>,
    calls: Arc<RwLock<Vec<ResolverAddr>>>,
}

impl MockUpstreamExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, server: &ResolverAddr, reply: ScriptedReply) {
        self.script
            .write()
            .unwrap()
            .insert(server.clone(), reply);
    }

    pub fn calls(&self) -> Vec<ResolverAddr> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstreamExchange {
    async fn exchange(
        &self,
        server: &ResolverAddr,
        query: &Message,
        _timeout: Duration,
    ) -> Result<Message, DomainError> {
        self.calls.write().unwrap().push(server.clone());

        let reply = self.script.read().unwrap().get(server).cloned();
        match reply {
            Some(ScriptedReply::Answer { answers, code }) => Ok(response_to(query, answers, code)),
            Some(ScriptedReply::Fail(e)) => Err(e),
            Some(ScriptedReply::Hang) => std::future::pending().await,
            None => Err(DomainError::TransportConnectionRefused {
                server: server.to_string(),
            }),
        }
    }
}
