//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (lifecycle/startup.rs)
//!     → validation.rs (semantic checks)
//!     → CheckConfig (validated, immutable)
//!     → passed by reference to the probe, policy and responder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; there is no process-wide state
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{read_config, ConfigError};
pub use schema::CheckConfig;
pub use schema::ConnectionConfig;
pub use schema::LivenessConfig;
pub use schema::PolicyConfig;
pub use schema::ResponderConfig;
pub use validation::{validate_config, ValidationError};
