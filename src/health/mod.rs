//! Node health subsystem.
//!
//! # Data Flow
//! ```text
//! Probe (probe.rs):
//!     liveness.rs → process table lookup
//!     mysql.rs    → wsrep status / server variables
//!     → Observation (state.rs)
//!
//! Policy (policy.rs):
//!     Observation → Verdict (ADMIT / REJECT + reason)
//! ```
//!
//! # Design Decisions
//! - Probe failures are errors, distinct from unhealthy states
//! - The policy is a pure function over the observation
//! - Nothing is remembered between invocations

pub mod liveness;
pub mod mysql;
pub mod policy;
pub mod probe;
pub mod state;

pub use mysql::MysqlProbe;
pub use policy::{AdmissionPolicy, Verdict};
pub use probe::{observe, NodeProbe, ProbeError};
pub use state::{Observation, ReplicationState, TransferMethod};
