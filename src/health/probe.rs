//! Node state probing.
//!
//! # Responsibilities
//! - Define the seam between the check and the database engine
//! - Sequence the observations: liveness, then state, then the rest
//! - Surface query failures as errors, never as empty values
//!
//! # Design Decisions
//! - The transfer method is only queried for donor states
//! - read_only is only queried for synced states
//! - A negative liveness check short-circuits all queries
//! - Fakes implement `NodeProbe` so the pipeline runs without an engine

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::state::{Observation, ReplicationState, TransferMethod};

/// Errors that can occur while probing the node.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Could not establish a session with the engine (refused, auth, TLS).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The engine accepted the session but the query failed.
    #[error("query '{query}' failed: {reason}")]
    Query { query: &'static str, reason: String },

    /// A query or connection attempt exceeded its deadline.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// The query returned no row for the requested variable.
    #[error("no value reported for {0}")]
    MissingValue(&'static str),

    /// The engine reported a value that cannot be interpreted.
    #[error("unexpected value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },

    /// The process table could not be inspected.
    #[error("liveness check failed: {0}")]
    Liveness(#[from] std::io::Error),
}

/// Source of the raw observations the admission policy consumes.
#[async_trait]
pub trait NodeProbe: Send + Sync {
    /// Whether the engine process is present on this host.
    async fn is_running(&self) -> Result<bool, ProbeError>;

    async fn replication_state(&self) -> Result<ReplicationState, ProbeError>;

    /// Configured snapshot transfer method.
    async fn transfer_method(&self) -> Result<TransferMethod, ProbeError>;

    /// Only consulted for synced nodes.
    async fn read_only(&self) -> Result<bool, ProbeError>;
}

/// Run the probe in order and collect a typed observation.
pub async fn observe(probe: &dyn NodeProbe) -> Result<Observation, ProbeError> {
    if !probe.is_running().await? {
        tracing::debug!("Engine process not found, skipping queries");
        return Ok(Observation::NotRunning);
    }

    let state = probe.replication_state().await?;
    let transfer_method = if state.is_donor() {
        Some(probe.transfer_method().await?)
    } else {
        None
    };
    let read_only = if state.is_synced() {
        Some(probe.read_only().await?)
    } else {
        None
    };

    tracing::debug!(
        state = %state,
        transfer_method = ?transfer_method.as_ref().map(TransferMethod::as_str),
        read_only = ?read_only,
        "Node observed"
    );

    Ok(Observation::Running {
        state,
        transfer_method,
        read_only,
    })
}

/// Interpret a boolean server variable (`ON`/`OFF`/`1`/`0`).
pub fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ProbeError> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("on") || value == "1" || value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("off")
        || value == "0"
        || value.eq_ignore_ascii_case("false")
    {
        Ok(false)
    } else {
        Err(ProbeError::InvalidValue {
            name,
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("read_only", "ON").unwrap());
        assert!(parse_flag("read_only", "1").unwrap());
        assert!(!parse_flag("read_only", "OFF").unwrap());
        assert!(!parse_flag("read_only", " 0 ").unwrap());
    }

    #[test]
    fn test_parse_flag_rejects_empty() {
        match parse_flag("read_only", "") {
            Err(ProbeError::InvalidValue { name, value }) => {
                assert_eq!(name, "read_only");
                assert_eq!(value, "");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = ProbeError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "timeout after 5s");

        let err = ProbeError::Query {
            query: "SHOW GLOBAL VARIABLES LIKE 'read_only'",
            reason: "Access denied".into(),
        };
        assert!(err.to_string().contains("Access denied"));
    }
}
