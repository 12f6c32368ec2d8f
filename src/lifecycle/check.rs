//! A single health check invocation.

use std::time::Duration;

use tokio::io::AsyncWrite;

use crate::health::{observe, AdmissionPolicy, NodeProbe, Verdict};
use crate::http::respond;

/// Engine running; the verdict itself is in the response.
pub const EXIT_OK: u8 = 0;
/// Engine process not found.
pub const EXIT_NOT_RUNNING: u8 = 1;
/// Configuration or usage error; nothing was probed.
pub const EXIT_CONFIG: u8 = 2;
/// The response could not be written.
pub const EXIT_OUTPUT: u8 = 3;

/// Result of one check: what was reported and how the process should exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub verdict: Verdict,
    /// False only when the liveness check positively found no engine process.
    pub engine_running: bool,
}

impl CheckOutcome {
    pub fn exit_code(&self) -> u8 {
        if self.engine_running {
            EXIT_OK
        } else {
            EXIT_NOT_RUNNING
        }
    }
}

/// Probe the node and decide. Probe failures become a REJECT, never an error.
pub async fn evaluate(probe: &dyn NodeProbe, policy: &AdmissionPolicy) -> CheckOutcome {
    match observe(probe).await {
        Ok(observation) => {
            let verdict = policy.decide(&observation);
            tracing::info!(
                admit = verdict.admit,
                reason = %verdict.reason,
                "Verdict"
            );
            CheckOutcome {
                verdict,
                engine_running: observation.is_running(),
            }
        }
        Err(error) => {
            tracing::warn!(error = %error, "Probe failed");
            CheckOutcome {
                verdict: Verdict::probe_failed(&error),
                engine_running: true,
            }
        }
    }
}

/// Full pipeline: probe, decide, write the response, linger.
pub async fn run_check<W>(
    probe: &dyn NodeProbe,
    policy: &AdmissionPolicy,
    writer: &mut W,
    linger: Duration,
) -> std::io::Result<CheckOutcome>
where
    W: AsyncWrite + Unpin,
{
    let outcome = evaluate(probe, policy).await;
    respond(writer, &outcome.verdict, linger).await?;
    Ok(outcome)
}
