//! Galera cluster node health check.
//!
//! Reports whether this node should receive traffic, as an HTTP response on
//! stdout. Meant to be spawned per check by xinetd/systemd socket activation
//! or used as an HAProxy external check.
//!
//! # Architecture Overview
//!
//! ```text
//!     supervisor spawns process
//!         │
//!         ▼
//!     ┌──────────┐    ┌──────────────┐    ┌──────────────┐    ┌─────────────┐
//!     │ startup  │───▶│ health probe │───▶│   admission  │───▶│  responder  │──▶ stdout
//!     │ cli+toml │    │ /proc + SQL  │    │    policy    │    │ 200 / 503   │
//!     └──────────┘    └──────────────┘    └──────────────┘    └─────────────┘
//!                                                                    │
//!                                                                    ▼
//!                                                          exit 0 / 1 (not running)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use galera_check::health::{AdmissionPolicy, MysqlProbe, Verdict};
use galera_check::http::{respond, DEFAULT_LINGER};
use galera_check::lifecycle::check::{EXIT_CONFIG, EXIT_OUTPUT};
use galera_check::lifecycle::{resolve_config, run_check, Overrides};
use galera_check::observability::logging;

#[derive(Parser)]
#[command(name = "galera-check")]
#[command(about = "Report whether this Galera node should receive load balancer traffic", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "GALERA_CHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Database host
    #[arg(long)]
    host: Option<String>,

    /// Database port
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// User for the status queries
    #[arg(short, long, env = "GALERA_CHECK_USER")]
    user: Option<String>,

    /// Password for the status queries
    #[arg(short, long, env = "GALERA_CHECK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Per-query timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Delay after writing the response, in milliseconds
    #[arg(long)]
    linger_ms: Option<u64>,

    /// Skip the engine process lookup and rely on the queries alone
    #[arg(long)]
    no_liveness: bool,

    /// Log level for stderr diagnostics
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            host: cli.host,
            port: cli.port,
            user: cli.user,
            password: cli.password,
            timeout_secs: cli.timeout_secs,
            linger_ms: cli.linger_ms,
            no_liveness: cli.no_liveness,
            log_level: cli.log_level,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let overrides = Overrides::from(Cli::parse());

    let config = match resolve_config(&overrides) {
        Ok(config) => config,
        Err(e) => {
            logging::init("warn");
            tracing::error!(error = %e, "Invalid configuration");

            // Config failures still answer with a 503.
            let verdict = Verdict::reject(format!("configuration error: {e}"));
            if let Err(e) = respond(&mut tokio::io::stdout(), &verdict, DEFAULT_LINGER).await {
                tracing::error!(error = %e, "Failed to write response");
                return ExitCode::from(EXIT_OUTPUT);
            }
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    logging::init(&config.observability.log_level);

    tracing::debug!(
        address = %config.connection.address(),
        user = %config.connection.user,
        liveness = config.liveness.enabled,
        timeout_secs = config.connection.timeout_secs,
        "Configuration loaded"
    );

    let probe = MysqlProbe::new(&config);
    let policy = AdmissionPolicy::from_config(&config.policy);
    let mut stdout = tokio::io::stdout();

    let result = run_check(&probe, &policy, &mut stdout, config.responder.linger()).await;
    probe.close().await;

    match result {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to write response");
            ExitCode::from(EXIT_OUTPUT)
        }
    }
}
