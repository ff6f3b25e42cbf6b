//! In-memory fake transport (testing only)
//!
//! `MemoryTransport` serves queued responses per endpoint and records every
//! request it receives, so tests can script an API conversation without a
//! server.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::ClientError;
use crate::transport::{Query, Transport};
use crate::Result;

/// A request as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub query: Vec<(String, String)>,
}

#[derive(Clone)]
enum Response {
    Envelope(Envelope),
    Failure(String),
}

/// Transport backed by per-endpoint response queues.
///
/// The last queued response of an endpoint is sticky: it is served again
/// once the queue would otherwise run dry.
#[derive(Default)]
pub struct MemoryTransport {
    responses: Mutex<HashMap<String, VecDeque<Response>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an envelope for `endpoint`.
    pub fn push(&self, endpoint: &str, envelope: Envelope) {
        self.enqueue(endpoint, Response::Envelope(envelope));
    }

    /// Queue a transport failure for `endpoint`.
    pub fn fail(&self, endpoint: &str, message: &str) {
        self.enqueue(endpoint, Response::Failure(message.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn enqueue(&self, endpoint: &str, response: Response) {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(response);
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get_resource(&self, endpoint: &str, query: &Query<'_>) -> Result<Envelope> {
        self.requests.lock().unwrap().push(RecordedRequest {
            endpoint: endpoint.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(endpoint).ok_or_else(|| {
            ClientError::Transport(format!("no response queued for '{endpoint}'"))
        })?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        match response {
            Some(Response::Envelope(env)) => Ok(env),
            Some(Response::Failure(msg)) => Err(ClientError::Transport(msg)),
            None => Err(ClientError::Transport(format!(
                "no response queued for '{endpoint}'"
            ))),
        }
    }
}
