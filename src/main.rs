//! lastadmind - replay host for the last-admin succession policy.
//!
//! Reads newline-delimited JSON records `{"event": ..., "state": [...]}`,
//! runs each through the policy and prints every power levels update it
//! sends as one JSON line on stdout. Logs go to stderr.

use anyhow::Context;
use async_trait::async_trait;
use lastadmin_proto::{RoomState, StateEvent};
use manage_last_admin::config::{self, Config};
use manage_last_admin::{ManageLastAdmin, StateUpdate, StateUpdateSubmitter, SubmitError, metrics};
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// One event to check, with the room state it is checked against.
#[derive(Debug, Deserialize)]
struct ReplayRecord {
    event: StateEvent,
    state: RoomState,
}

/// Writes each update as a JSON line to stdout.
struct JsonLinesSubmitter {
    out: Mutex<tokio::io::Stdout>,
}

#[async_trait]
impl StateUpdateSubmitter for JsonLinesSubmitter {
    async fn submit(&self, update: StateUpdate) -> Result<(), SubmitError> {
        let mut line = serde_json::to_vec(&update)?;
        line.push(b'\n');
        let mut out = self.out.lock().await;
        out.write_all(&line).await?;
        out.flush().await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        server = %config.server.name,
        promote_moderators = config.policy.promote_moderators,
        forbidden_domains = config.policy.domains_forbidden_when_restricted.len(),
        "Starting lastadmind"
    );

    if config.metrics.enabled {
        metrics::init();
        info!("Metrics initialized");
    }

    let submitter = Arc::new(JsonLinesSubmitter {
        out: Mutex::new(tokio::io::stdout()),
    });
    let module = ManageLastAdmin::new(config.policy.clone(), config.server.name.clone(), submitter);

    let replayed = match std::env::args().nth(2) {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("failed to open {path}"))?;
            replay(&module, file).await?
        }
        None => replay(&module, tokio::io::stdin()).await?,
    };

    info!(events = replayed, "Replay finished");

    if config.metrics.enabled {
        eprint!("{}", metrics::gather_metrics());
    }

    Ok(())
}

/// Feed every record from `input` through the policy, in order.
async fn replay<R: AsyncRead + Unpin>(module: &ManageLastAdmin, input: R) -> anyhow::Result<usize> {
    let mut lines = BufReader::new(input).lines();
    let mut count = 0;
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let record: ReplayRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed record");
                continue;
            }
        };

        // The event is allowed either way; a failed update is only reported.
        if let Err(e) = module.check_event_allowed(&record.event, &record.state).await {
            warn!(line = line_no, error = %e, code = e.error_code(), "Succession update failed");
        }
        count += 1;
    }

    Ok(count)
}
