//! Engine process liveness check against the host process table.

use std::path::PathBuf;

use crate::config::LivenessConfig;

use super::probe::ProbeError;

/// Looks for the engine process by name under `/proc`.
#[derive(Debug, Clone)]
pub struct ProcessLiveness {
    proc_root: PathBuf,
    process_names: Vec<String>,
}

impl ProcessLiveness {
    pub fn new(config: &LivenessConfig) -> Self {
        Self::with_proc_root("/proc", config.process_names.clone())
    }

    /// Scan an alternative process table root (used by tests).
    pub fn with_proc_root(proc_root: impl Into<PathBuf>, process_names: Vec<String>) -> Self {
        Self {
            proc_root: proc_root.into(),
            process_names: process_names
                .into_iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// True if any process's `comm` matches a configured name.
    ///
    /// Processes that exit mid-scan are skipped; failing to list the
    /// process table itself is an error.
    pub async fn is_running(&self) -> Result<bool, ProbeError> {
        let mut entries = tokio::fs::read_dir(&self.proc_root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(pid) = file_name.to_str() else {
                continue;
            };
            if pid.is_empty() || !pid.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }

            let comm = match tokio::fs::read_to_string(entry.path().join("comm")).await {
                Ok(comm) => comm,
                Err(_) => continue,
            };
            let comm = comm.trim();
            if self.process_names.iter().any(|name| name == comm) {
                tracing::debug!(pid = %pid, process = %comm, "Engine process found");
                return Ok(true);
            }
        }

        Ok(false)
    }
}
