//! Shared test helpers for controller tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use lessonaid_core::error::AssistError;
use lessonaid_core::request::AssistanceRequest;
use lessonaid_core::transport::Transport;
use tokio::sync::oneshot;

type Reply = Result<String, AssistError>;

/// A transport that returns a sequence of scripted replies.
///
/// Each call to `post` returns the next reply in the queue.
/// Panics if more calls are made than replies provided.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<AssistanceRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A transport that answers once with `{"response": text}`.
    pub fn answering(text: &str) -> Self {
        Self::new(vec![Ok(serde_json::json!({ "response": text }).to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<AssistanceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn post(&self, _endpoint: &str, request: &AssistanceRequest) -> Reply {
        self.requests.lock().unwrap().push(request.clone());
        let mut replies = self.replies.lock().unwrap();
        match replies.pop_front() {
            Some(reply) => reply,
            None => panic!("ScriptedTransport: no more replies"),
        }
    }
}

/// A transport whose replies are released by the test, in any order.
///
/// Each call takes the next gate; the call resolves when the test sends on
/// the matching sender.
pub struct GatedTransport {
    gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
}

impl GatedTransport {
    pub fn new() -> Self {
        Self {
            gates: Mutex::new(VecDeque::new()),
        }
    }

    /// Register a gate for the next call.
    pub fn gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait::async_trait]
impl Transport for GatedTransport {
    fn name(&self) -> &str {
        "gated"
    }

    async fn post(&self, _endpoint: &str, _request: &AssistanceRequest) -> Reply {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .pop_front()
            .expect("GatedTransport: no gate registered");
        gate.await
            .unwrap_or_else(|_| Err(AssistError::Network("gate dropped".into())))
    }
}

/// `{"response": text}` as a reply body.
pub fn response_body(text: &str) -> Reply {
    Ok(serde_json::json!({ "response": text }).to_string())
}
