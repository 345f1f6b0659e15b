//! Test doubles shared by the unit test modules.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use crate::error::RelayError;
use crate::slack::{Forwarder, OutboundMessage};
use crate::workplace::NameResolver;

/// Resolver answering from a fixed map; unknown ids fail like a graph 404.
pub struct StubResolver {
    names: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StubResolver {
    pub fn new(names: &[(&str, &str)]) -> Self {
        Self {
            names: names
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameResolver for StubResolver {
    async fn resolve_name(&self, id: &str) -> Result<String, RelayError> {
        self.calls.lock().unwrap().push(id.to_string());
        self.names
            .get(id)
            .cloned()
            .ok_or_else(|| RelayError::downstream("graph", "status 404 Not Found"))
    }
}

/// Forwarder that records every message and can fail on the n-th call.
#[derive(Default)]
pub struct RecordingForwarder {
    sent: Mutex<Vec<OutboundMessage>>,
    attempts: AtomicUsize,
    fail_on_attempt: Option<usize>,
}

impl RecordingForwarder {
    /// Fails the `attempt`-th forward (1-based) with a downstream error.
    pub fn failing_on(attempt: usize) -> Self {
        Self {
            fail_on_attempt: Some(attempt),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    async fn forward(&self, message: &OutboundMessage) -> Result<(), RelayError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_attempt == Some(attempt) {
            return Err(RelayError::downstream("slack", "status 500 Internal Server Error"));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Build a one-change entry as JSON.
pub fn entry_json(group: &str, author: &str, verb: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "id": group,
        "time": 1700000000,
        "changes": [{
            "field": "posts",
            "value": {
                "created_time": "2023-11-14T22:13:20+0000",
                "community": {"id": "C"},
                "from": {"id": author},
                "message": message,
                "permalink_url": format!("https://x/{group}"),
                "post_id": format!("{group}_1"),
                "target_type": "group",
                "type": "status",
                "verb": verb
            }
        }]
    })
}

/// Wrap entries in an envelope.
pub fn envelope_json(entries: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({ "entry": entries, "object": "group" })
}
