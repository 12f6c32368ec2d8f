//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Verdict
//!     → response.rs (render status line, headers, body)
//!     → write to the check channel (stdout under xinetd / HAProxy external check)
//!     → linger, then return
//! ```

pub mod response;

pub use response::{render, respond, HealthResponse, DEFAULT_LINGER};
