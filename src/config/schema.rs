//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the check.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::http::DEFAULT_LINGER;

/// Root configuration for a single health check invocation.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Database connection parameters and credentials.
    pub connection: ConnectionConfig,

    /// Engine process liveness check.
    pub liveness: LivenessConfig,

    /// Admission policy knobs.
    pub policy: PolicyConfig,

    /// Response writer settings.
    pub responder: ResponderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Connection parameters for the local database engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Host name or address of the engine.
    pub host: String,

    /// TCP port of the engine.
    pub port: u16,

    /// User for the status queries. Needs no privileges beyond USAGE.
    pub user: String,

    /// Password for `user`.
    pub password: String,

    /// Per-query timeout in seconds (also bounds connection establishment).
    pub timeout_secs: u64,
}

impl ConnectionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Address in `host:port` form, for logging.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "clustercheckuser".to_string(),
            password: "clustercheckpassword!".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Engine process liveness check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// Look for the engine in the host process table before querying it.
    ///
    /// Disable when the check does not share a PID namespace with the engine.
    pub enabled: bool,

    /// Process names (as in `/proc/<pid>/comm`) that count as the engine.
    pub process_names: Vec<String>,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            process_names: vec!["mysqld".to_string(), "mariadbd".to_string()],
        }
    }
}

/// Admission policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Snapshot transfer methods that let a donor keep serving traffic.
    pub non_blocking_methods: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            non_blocking_methods: vec![
                "xtrabackup".to_string(),
                "xtrabackup-v2".to_string(),
                "mariabackup".to_string(),
            ],
        }
    }
}

/// Response writer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Delay after the response is flushed before the process exits, in milliseconds.
    pub linger_ms: u64,
}

impl ResponderConfig {
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            linger_ms: DEFAULT_LINGER.as_millis() as u64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}
