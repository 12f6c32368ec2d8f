//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Reject lists that would silently disable a check
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CheckConfig → Result<(), Vec<ValidationError>>
//! - Runs before any probing happens

use thiserror::Error;

use crate::config::schema::CheckConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("connection.host must not be empty")]
    EmptyHost,

    #[error("connection.port must be non-zero")]
    ZeroPort,

    #[error("connection.user must not be empty")]
    EmptyUser,

    #[error("connection.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("liveness.process_names must not be empty while liveness is enabled")]
    NoProcessNames,

    #[error("policy.non_blocking_methods contains an empty entry")]
    EmptyMethod,

    #[error("observability.log_level '{0}' is not a valid level")]
    InvalidLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &CheckConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let connection = &config.connection;
    if connection.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if connection.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if connection.user.trim().is_empty() {
        errors.push(ValidationError::EmptyUser);
    }
    if connection.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.liveness.enabled
        && config
            .liveness
            .process_names
            .iter()
            .all(|name| name.trim().is_empty())
    {
        errors.push(ValidationError::NoProcessNames);
    }

    if config
        .policy
        .non_blocking_methods
        .iter()
        .any(|method| method.trim().is_empty())
    {
        errors.push(ValidationError::EmptyMethod);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
