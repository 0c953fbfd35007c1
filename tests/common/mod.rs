//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use crudsync::resource::Action;
use crudsync::store::Dispatch;
use crudsync::transport::{Outcome, Transport, TransportRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Config file declaring one resource per `(name, url)`.
pub fn resources_toml(resources: &[(&str, &str)]) -> String {
    let mut content = String::from("[transport]\ntimeout_seconds = 5\nconnect_timeout_seconds = 2\n\n");
    for (name, url) in resources {
        content.push_str(&format!("[[resources]]\nname = \"{}\"\nurl = \"{}\"\n\n", name, url));
    }
    content
}

// -- Transport stubs ----------------------------------------------------------

/// Transport replying from a queue of canned outcomes and recording requests.
#[derive(Default)]
pub struct StubTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl StubTransport {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: TransportRequest) -> Outcome {
        self.requests.lock().push(request);
        self.outcomes
            .lock()
            .pop_front()
            .expect("StubTransport ran out of outcomes")
    }
}

/// Dispatcher recording every signal it receives.
#[derive(Default)]
pub struct Recorder(Mutex<Vec<Action>>);

impl Recorder {
    pub fn actions(&self) -> Vec<Action> {
        self.0.lock().clone()
    }

    pub fn kinds(&self) -> Vec<String> {
        self.0
            .lock()
            .iter()
            .map(|a| a.kind().unwrap_or_default().to_string())
            .collect()
    }
}

impl Dispatch for Recorder {
    fn dispatch(&self, action: Action) {
        self.0.lock().push(action);
    }
}
