// Golf draft entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the ranked golfers and cut them into tiers
// 4. Set up the configured draft
// 5. Create mpsc channels and spawn the app task
// 6. Run the TUI until the user quits

use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use golfdraft_app::AppState;
use golfdraft_core::config;
use golfdraft_core::pool::{self, CandidatePool};
use golfdraft_core::protocol::PoolStatus;
use golfdraft_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Golf draft starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} teams, {} tiers of {}, {:?} source",
        config.draft.num_teams, config.pool.tier_count, config.pool.tier_size, config.pool.source
    );

    // A failed load still opens the UI so the error can be shown there.
    let source_name = pool::source_from_config(&config)
        .map(|s| s.describe())
        .unwrap_or_else(|_| "rankings".to_string());
    let (candidate_pool, pool_status) = match pool::load_pool(&config).await {
        Ok(loaded) => (loaded, PoolStatus::Ready { source: source_name }),
        Err(e) => {
            error!("Failed to load golfers: {e}");
            (CandidatePool::default(), PoolStatus::Failed(e.to_string()))
        }
    };

    let num_teams = config.draft.num_teams;
    let has_golfers = !candidate_pool.is_empty();
    let mut app_state = AppState::new(config, candidate_pool, pool_status);
    if has_golfers {
        if let Err(e) = app_state.setup_draft(num_teams) {
            warn!("Initial draft setup failed: {e:#}");
        }
    }

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = golfdraft_app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {e:#}");
        }
    });

    // Blocks until the user confirms quit or presses Ctrl+C.
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {e:#}");
    }

    if tokio::time::timeout(Duration::from_secs(5), app_handle)
        .await
        .is_err()
    {
        warn!("App task did not stop within 5s");
    }

    info!("Golf draft shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("golfdraft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("golfdraft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
