//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stderr)
//!
//! Consumers:
//!     → the supervisor's stderr capture (xinetd log, journald, HAProxy)
//! ```
//!
//! # Design Decisions
//! - Structured `tracing` fields, not formatted strings
//! - stdout is reserved for the HTTP response; logs never go there

pub mod logging;
