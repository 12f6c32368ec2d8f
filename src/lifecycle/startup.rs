//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the optional configuration file
//! - Apply command-line overrides on top of it
//! - Validate the merged result
//!
//! # Design Decisions
//! - Precedence: command line > file > defaults
//! - Validation runs once, on the merged config

use std::path::PathBuf;

use crate::config::{read_config, validate_config, CheckConfig, ConfigError};

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub linger_ms: Option<u64>,
    pub no_liveness: bool,
    pub log_level: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut CheckConfig) {
        let connection = &mut config.connection;
        if let Some(host) = &self.host {
            connection.host = host.clone();
        }
        if let Some(port) = self.port {
            connection.port = port;
        }
        if let Some(user) = &self.user {
            connection.user = user.clone();
        }
        if let Some(password) = &self.password {
            connection.password = password.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            connection.timeout_secs = timeout_secs;
        }
        if let Some(linger_ms) = self.linger_ms {
            config.responder.linger_ms = linger_ms;
        }
        if self.no_liveness {
            config.liveness.enabled = false;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Build the effective configuration for this invocation.
pub fn resolve_config(overrides: &Overrides) -> Result<CheckConfig, ConfigError> {
    let mut config = match &overrides.config_path {
        Some(path) => read_config(path)?,
        None => CheckConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(&Overrides::default()).unwrap();
        assert_eq!(config.connection.address(), "127.0.0.1:3306");
        assert!(config.liveness.enabled);
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[connection]\nhost = \"db2\"\nuser = \"from_file\"\npassword = \"file_pw\"\n\n[responder]\nlinger_ms = 250"
        )
        .unwrap();

        let overrides = Overrides {
            config_path: Some(file.path().to_path_buf()),
            user: Some("from_cli".into()),
            linger_ms: Some(0),
            no_liveness: true,
            ..Overrides::default()
        };
        let config = resolve_config(&overrides).unwrap();

        assert_eq!(config.connection.host, "db2");
        assert_eq!(config.connection.user, "from_cli");
        assert_eq!(config.connection.password, "file_pw");
        assert_eq!(config.responder.linger_ms, 0);
        assert!(!config.liveness.enabled);
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = Overrides {
            port: Some(0),
            ..Overrides::default()
        };
        assert!(matches!(
            resolve_config(&overrides),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_file_values_are_validated() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[connection]\nport = 0\ntimeout_secs = 0").unwrap();

        let overrides = Overrides {
            config_path: Some(file.path().to_path_buf()),
            ..Overrides::default()
        };
        let err = resolve_config(&overrides).unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(err.to_string().contains("connection.port must be non-zero"));
    }

    #[test]
    fn test_file_errors_propagate() {
        let overrides = Overrides {
            config_path: Some(PathBuf::from("/nonexistent/galera-check.toml")),
            ..Overrides::default()
        };
        assert!(matches!(resolve_config(&overrides), Err(ConfigError::Io(_))));
    }
}
