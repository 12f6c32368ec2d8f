//! Galera node health check for load balancers.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::CheckConfig;
pub use health::{AdmissionPolicy, MysqlProbe, NodeProbe, Verdict};
pub use lifecycle::{run_check, CheckOutcome};
