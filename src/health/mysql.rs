//! MySQL/MariaDB client probe.
//!
//! # Responsibilities
//! - Open a single lazily-connected session to the local engine
//! - Read wsrep status and server variables with read-only SHOW queries
//! - Enforce a per-query deadline
//! - Map client errors onto `ProbeError`
//!
//! # Design Decisions
//! - One connection at most; a health check never needs more
//! - `SHOW ... LIKE` rows are (name, value); only the value is used
//! - A missing row is an error, not an empty string

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;

use crate::config::CheckConfig;

use super::liveness::ProcessLiveness;
use super::probe::{parse_flag, NodeProbe, ProbeError};
use super::state::{ReplicationState, TransferMethod};

const STATE_QUERY: &str = "SHOW GLOBAL STATUS LIKE 'wsrep_local_state_comment'";
const SST_METHOD_QUERY: &str = "SHOW GLOBAL VARIABLES LIKE 'wsrep_sst_method'";
const READ_ONLY_QUERY: &str = "SHOW GLOBAL VARIABLES LIKE 'read_only'";

/// SQLSTATE for "invalid authorization specification".
const SQLSTATE_ACCESS_DENIED: &str = "28000";

/// Probe backed by a live MySQL-protocol connection.
pub struct MysqlProbe {
    pool: MySqlPool,
    liveness: Option<ProcessLiveness>,
    timeout: Duration,
}

impl MysqlProbe {
    /// Build a probe from resolved configuration. No connection is opened yet.
    pub fn new(config: &CheckConfig) -> Self {
        let connection = &config.connection;
        let options = MySqlConnectOptions::new()
            .host(&connection.host)
            .port(connection.port)
            .username(&connection.user)
            .password(&connection.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(connection.timeout())
            .connect_lazy_with(options);

        let liveness = config
            .liveness
            .enabled
            .then(|| ProcessLiveness::new(&config.liveness));

        Self {
            pool,
            liveness,
            timeout: connection.timeout(),
        }
    }

    /// Close the session, if one was opened.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run a `SHOW ... LIKE` query and return the value column of its row.
    async fn show_value(&self, query: &'static str, name: &'static str) -> Result<String, ProbeError> {
        let fetch = sqlx::query(query).fetch_optional(&self.pool);
        let row = match tokio::time::timeout(self.timeout, fetch).await {
            Ok(result) => result.map_err(|e| map_sqlx_error(query, e, self.timeout))?,
            Err(_) => return Err(ProbeError::Timeout(self.timeout)),
        };

        let row = row.ok_or(ProbeError::MissingValue(name))?;
        let value = value_column(&row).map_err(|e| ProbeError::Query {
            query,
            reason: e.to_string(),
        })?;

        tracing::trace!(variable = name, value = %value, "Variable read");
        Ok(value)
    }
}

/// Server versions disagree on whether the value column is text or binary.
fn value_column(row: &MySqlRow) -> Result<String, sqlx::Error> {
    match row.try_get::<String, _>(1) {
        Ok(value) => Ok(value),
        Err(_) => {
            let bytes: Vec<u8> = row.try_get(1)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn map_sqlx_error(query: &'static str, error: sqlx::Error, timeout: Duration) -> ProbeError {
    match error {
        sqlx::Error::PoolTimedOut => ProbeError::Timeout(timeout),
        sqlx::Error::Io(e) => ProbeError::Connect(e.to_string()),
        sqlx::Error::Tls(e) => ProbeError::Connect(e.to_string()),
        sqlx::Error::Configuration(e) => ProbeError::Connect(e.to_string()),
        sqlx::Error::PoolClosed => ProbeError::Connect("connection pool closed".to_string()),
        sqlx::Error::Database(db)
            if db.code().as_deref() == Some(SQLSTATE_ACCESS_DENIED) =>
        {
            ProbeError::Connect(db.message().to_string())
        }
        other => ProbeError::Query {
            query,
            reason: other.to_string(),
        },
    }
}

#[async_trait]
impl NodeProbe for MysqlProbe {
    async fn is_running(&self) -> Result<bool, ProbeError> {
        match &self.liveness {
            Some(liveness) => liveness.is_running().await,
            None => Ok(true),
        }
    }

    async fn replication_state(&self) -> Result<ReplicationState, ProbeError> {
        let raw = self.show_value(STATE_QUERY, "wsrep_local_state_comment").await?;
        Ok(ReplicationState::parse(&raw))
    }

    async fn transfer_method(&self) -> Result<TransferMethod, ProbeError> {
        let raw = self.show_value(SST_METHOD_QUERY, "wsrep_sst_method").await?;
        Ok(TransferMethod::new(raw))
    }

    async fn read_only(&self) -> Result<bool, ProbeError> {
        let raw = self.show_value(READ_ONLY_QUERY, "read_only").await?;
        parse_flag("read_only", &raw)
    }
}
