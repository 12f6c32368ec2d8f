//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use galera_check::health::{NodeProbe, ProbeError, ReplicationState, TransferMethod};

/// Scripted probe that records which observations were requested.
pub struct FakeProbe {
    running: bool,
    state: Mutex<Option<Result<ReplicationState, ProbeError>>>,
    method: Option<String>,
    read_only: Option<bool>,
    pub calls: Calls,
}

#[derive(Default)]
pub struct Calls {
    pub is_running: AtomicUsize,
    pub replication_state: AtomicUsize,
    pub transfer_method: AtomicUsize,
    pub read_only: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[allow(dead_code)]
impl FakeProbe {
    pub fn not_running() -> Self {
        Self {
            running: false,
            state: Mutex::new(None),
            method: None,
            read_only: None,
            calls: Calls::default(),
        }
    }

    pub fn running(state: &str) -> Self {
        Self {
            running: true,
            state: Mutex::new(Some(Ok(ReplicationState::parse(state)))),
            method: None,
            read_only: Some(false),
            calls: Calls::default(),
        }
    }

    pub fn failing_state(error: ProbeError) -> Self {
        Self {
            running: true,
            state: Mutex::new(Some(Err(error))),
            method: None,
            read_only: Some(false),
            calls: Calls::default(),
        }
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    /// The read_only query fails instead of returning a value.
    pub fn with_read_only_missing(mut self) -> Self {
        self.read_only = None;
        self
    }
}

#[async_trait]
impl NodeProbe for FakeProbe {
    async fn is_running(&self) -> Result<bool, ProbeError> {
        self.calls.is_running.fetch_add(1, Ordering::SeqCst);
        Ok(self.running)
    }

    async fn replication_state(&self) -> Result<ReplicationState, ProbeError> {
        self.calls.replication_state.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(ProbeError::MissingValue("wsrep_local_state_comment")))
    }

    async fn transfer_method(&self) -> Result<TransferMethod, ProbeError> {
        self.calls.transfer_method.fetch_add(1, Ordering::SeqCst);
        self.method
            .as_deref()
            .map(TransferMethod::new)
            .ok_or(ProbeError::MissingValue("wsrep_sst_method"))
    }

    async fn read_only(&self) -> Result<bool, ProbeError> {
        self.calls.read_only.fetch_add(1, Ordering::SeqCst);
        self.read_only.ok_or(ProbeError::MissingValue("read_only"))
    }
}

/// Split a rendered response into (status line, headers, body).
#[allow(dead_code)]
pub fn parse_response(bytes: &[u8]) -> (String, Vec<(String, String)>, String) {
    let text = String::from_utf8(bytes.to_vec()).expect("response is UTF-8");
    let (head, body) = text.split_once("\r\n\r\n").expect("blank line separator");
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default().to_string();
    let headers = lines
        .filter_map(|l| l.split_once(": "))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    (status_line, headers, body.to_string())
}

#[allow(dead_code)]
pub fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
