//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     config file → command-line overrides → validate → CheckConfig
//!
//! Check (check.rs):
//!     observe → decide → respond → exit status
//! ```
//!
//! # Design Decisions
//! - One check per process; no loop, no listener
//! - Fail fast on configuration errors, before touching the engine
//! - The exit status distinguishes a missing engine from an ordinary REJECT

pub mod check;
pub mod startup;

pub use check::{evaluate, run_check, CheckOutcome};
pub use startup::{resolve_config, Overrides};
