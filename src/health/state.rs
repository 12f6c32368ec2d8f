//! Replication state model for a single cluster node.
//!
//! # States
//! - Synced: fully caught up with the cluster
//! - Donor: streaming a snapshot to a joiner, optionally desynced
//! - Other: every other protocol state (Joining, Joined, Initialized, ...)
//!
//! # Design Decisions
//! - Raw engine strings are parsed once into a closed enum
//! - Donor matching is a category predicate, not substring search
//! - Unknown values are kept verbatim in `Other` so they can be reported

use std::fmt;

/// The node's position in the replication protocol, as reported by
/// `wsrep_local_state_comment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationState {
    Synced,
    /// Donating a snapshot. `desynced` is set for the compound `Donor/Desynced` form.
    Donor { desynced: bool },
    Other(String),
}

impl ReplicationState {
    /// Parse the engine's state comment.
    ///
    /// The first `/`-separated segment decides the category, so `Donor/Desynced`
    /// is a donor while `NotDonor` or `Donorless` are not.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut segments = raw.split('/').map(str::trim);
        let head = segments.next().unwrap_or_default();

        if head.eq_ignore_ascii_case("synced") && segments.next().is_none() {
            return ReplicationState::Synced;
        }

        if head.eq_ignore_ascii_case("donor") {
            let desynced = segments.any(|s| s.eq_ignore_ascii_case("desynced"));
            return ReplicationState::Donor { desynced };
        }

        ReplicationState::Other(raw.to_string())
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, ReplicationState::Synced)
    }

    /// True for any donor state, desynced or not.
    pub fn is_donor(&self) -> bool {
        matches!(self, ReplicationState::Donor { .. })
    }
}

impl fmt::Display for ReplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplicationState::Synced => write!(f, "Synced"),
            ReplicationState::Donor { desynced: true } => write!(f, "Donor/Desynced"),
            ReplicationState::Donor { desynced: false } => write!(f, "Donor"),
            ReplicationState::Other(raw) if raw.is_empty() => write!(f, "<empty>"),
            ReplicationState::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// State snapshot transfer method (`wsrep_sst_method`).
///
/// Stored trimmed; comparisons are ASCII case-insensitive.
#[derive(Debug, Clone, Eq)]
pub struct TransferMethod(String);

impl TransferMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for TransferMethod {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the probe learned about the node in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The engine process is absent; nothing else was queried.
    NotRunning,
    Running {
        state: ReplicationState,
        /// Only queried for donor states.
        transfer_method: Option<TransferMethod>,
        /// Only queried for the synced state.
        read_only: Option<bool>,
    },
}

impl Observation {
    pub fn is_running(&self) -> bool {
        matches!(self, Observation::Running { .. })
    }
}
