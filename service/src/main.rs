use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use carddrop_engine::Engine;
use carddrop_service::{load_catalog, router, run_reset_loop, AppState, SqliteStore};
use carddrop_types::{
    EngineConfig, DEFAULT_ATTEMPT_CAP, DEFAULT_COOLDOWN_SECS, DEFAULT_RESET_HOUR_UTC,
};
use clap::Parser;
use tokio::sync::watch;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host interface to bind (default: localhost).
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Path to the catalog JSON file (ordered array of cards).
    #[arg(long, default_value = "catalog.json")]
    catalog: PathBuf,

    /// Path to the SQLite account database.
    #[arg(long, default_value = "carddrop.db")]
    database: PathBuf,

    /// Draw cooldown in seconds.
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_SECS)]
    cooldown_secs: u64,

    /// Daily mini-game attempt budget.
    #[arg(long, default_value_t = DEFAULT_ATTEMPT_CAP)]
    attempt_cap: u32,

    /// Hour of day (UTC, 0-23) at which attempts are restored.
    #[arg(long, default_value_t = DEFAULT_RESET_HOUR_UTC)]
    reset_hour_utc: u8,

    /// Default leaderboard page size.
    #[arg(long, default_value_t = 10)]
    leaderboard_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let catalog = load_catalog(&args.catalog)?;
    if catalog.is_empty() {
        bail!(
            "catalog {} is empty; refusing to serve draws",
            args.catalog.display()
        );
    }

    let store = SqliteStore::open(&args.database)?;
    let config = EngineConfig::new(args.cooldown_secs, args.attempt_cap, args.reset_hour_utc);
    let engine = Arc::new(
        Engine::new(config, Arc::new(catalog), store)
            .map_err(|reason| anyhow::anyhow!("invalid engine config: {reason}"))?,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reset_task = tokio::spawn(run_reset_loop(engine.clone(), shutdown_rx));

    let state = AppState {
        engine: engine.clone(),
        page_size: args.leaderboard_size,
    };
    let app = router(state);

    let addr = SocketAddr::new(args.host, args.port);
    info!(
        %addr,
        cards = engine.catalog().len(),
        cooldown_secs = config.cooldown_secs,
        attempt_cap = config.attempt_cap,
        reset_hour_utc = config.reset_hour_utc,
        "carddrop service listening"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind listen addr")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    // Stop the scheduler between firings; the bulk reset itself is a single
    // statement and cannot be left half-applied.
    shutdown_tx.send(true).ok();
    reset_task.await.ok();

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
