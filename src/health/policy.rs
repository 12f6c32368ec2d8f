//! Admission policy: observation → routing verdict.
//!
//! # Decision Table (first match wins)
//! ```text
//! not running                          → REJECT "instance not running"
//! Synced, read_only = false            → ADMIT  "status is Synced"
//! Synced, read_only = true             → REJECT "status is Synced; instance is read-only"
//! Synced, read_only not observed       → REJECT "status is Synced; read-only flag unknown"
//! Donor*, method in allow-list         → ADMIT  "status is Donor; non-blocking transfer"
//! Donor*, any other or missing method  → REJECT "status is Donor; blocking transfer"
//! anything else                        → REJECT "status is <state>"
//! ```
//!
//! # Design Decisions
//! - Pure and deterministic; no I/O and no state between calls
//! - Unknown transfer methods are blocking
//! - read_only only gates the Synced branch; a donor's flag is not consulted

use crate::config::PolicyConfig;

use super::probe::ProbeError;
use super::state::{Observation, ReplicationState, TransferMethod};

/// Binary routing decision with the reason reported to the load balancer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub admit: bool,
    pub reason: String,
}

impl Verdict {
    pub fn admit(reason: impl Into<String>) -> Self {
        Self {
            admit: true,
            reason: reason.into(),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            admit: false,
            reason: reason.into(),
        }
    }

    /// A probe that could not complete never admits.
    pub fn probe_failed(error: &ProbeError) -> Self {
        Self::reject(format!("probe failed: {}", error))
    }
}

/// Maps observations onto verdicts.
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    non_blocking_methods: Vec<TransferMethod>,
}

impl AdmissionPolicy {
    pub fn new(non_blocking_methods: impl IntoIterator<Item = TransferMethod>) -> Self {
        Self {
            non_blocking_methods: non_blocking_methods.into_iter().collect(),
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.non_blocking_methods.iter().map(TransferMethod::new))
    }

    /// Whether a donor using `method` can keep serving traffic.
    pub fn is_non_blocking(&self, method: &TransferMethod) -> bool {
        self.non_blocking_methods.iter().any(|m| m == method)
    }

    pub fn decide(&self, observation: &Observation) -> Verdict {
        let (state, transfer_method, read_only) = match observation {
            Observation::NotRunning => return Verdict::reject("instance not running"),
            Observation::Running {
                state,
                transfer_method,
                read_only,
            } => (state, transfer_method.as_ref(), *read_only),
        };

        match state {
            ReplicationState::Synced => match read_only {
                Some(false) => Verdict::admit("status is Synced"),
                Some(true) => Verdict::reject("status is Synced; instance is read-only"),
                None => Verdict::reject("status is Synced; read-only flag unknown"),
            },
            ReplicationState::Donor { .. } => match transfer_method {
                Some(method) if self.is_non_blocking(method) => {
                    Verdict::admit("status is Donor; non-blocking transfer")
                }
                _ => Verdict::reject("status is Donor; blocking transfer"),
            },
            ReplicationState::Other(_) => Verdict::reject(format!("status is {}", state)),
        }
    }
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}
