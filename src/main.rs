//! DEBTSIM — 30-day debt repayment simulator
//!
//! Entry point. Loads configuration, initialises structured logging,
//! optionally restores the last saved document, and serves the form
//! dashboard until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use debtsim::chart::format_balance;
use debtsim::config;
use debtsim::dashboard;
use debtsim::dashboard::routes::DashboardState;
use debtsim::form::FormState;
use debtsim::storage;
use debtsim::DebtSimError;

const BANNER: &str = r#"
 ___  ___ ___ _____ ___ ___ __  __
|   \| __| _ )_   _/ __|_ _|  \/  |
| |) | _|| _ \ | | \__ \| || |\/| |
|___/|___|___/ |_| |___/___|_|  |_|

  30-day debt repayment simulator
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg_path = config::AppConfig::path_from_env();
    let cfg = config::AppConfig::load_or_default(&cfg_path)?;

    init_logging();

    println!("{BANNER}");
    info!(
        app_name = %cfg.app.name,
        config = %cfg_path,
        document = %cfg.storage.document_path,
        "DEBTSIM starting up"
    );

    // -- Restore or create form state -------------------------------------

    let mut form = FormState::new(chrono::Local::now().date_naive());
    if cfg.storage.load_on_start {
        match storage::load_document(Some(&cfg.storage.document_path)) {
            Ok(doc) => {
                form.apply_document(doc);
                info!(debts = form.debts.len(), "Resumed from saved document");
            }
            Err(DebtSimError::MalformedPersistedState { reason, .. }) => {
                warn!(reason = %reason, "Saved document unusable, starting with an empty form");
            }
            Err(e @ DebtSimError::InvalidInput { .. }) => {
                warn!(error = %e, "Saved document has an invalid debt, starting with an empty form");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if form.can_simulate() {
        match form.simulate() {
            Ok(series) => info!(
                final_balance = %format_balance(series.final_balance()),
                "Initial projection"
            ),
            Err(e) => warn!(error = %e, "Restored form does not simulate"),
        }
    }

    // -- Serve ------------------------------------------------------------

    let state = Arc::new(
        DashboardState::new(form, cfg.storage.document_path.clone()).with_chart(cfg.chart.clone()),
    );
    dashboard::serve(state, &cfg.bind_addr()).await?;

    info!("DEBTSIM shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debtsim=info"));

    let json_logging = std::env::var("DEBTSIM_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
