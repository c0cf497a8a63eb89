//! Daily reset scheduler.
//!
//! A perpetual background task: sleep until the next configured hour-of-day
//! (UTC), restore every account's attempt budget in one bulk update, sleep
//! again. A storage failure is logged and the cycle skipped; there is no
//! busy retry and no backfill of missed resets.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use carddrop_engine::{AccountStore, Engine};
use tokio::sync::watch;
use tokio::time;
use tracing::{info, warn};

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Run the reset loop until `shutdown` fires.
///
/// The sleep between firings is the only long-lived suspension and is
/// cancellable at any point; the bulk update itself is a single statement,
/// so shutdown never leaves a half-applied reset behind.
pub async fn run_reset_loop<S: AccountStore>(
    engine: Arc<Engine<S>>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let now = unix_now();
        let next = engine.next_reset_at(now);
        let sleep_secs = next.saturating_sub(now);
        info!(next_reset_at = next, sleep_secs, "reset scheduler sleeping");

        tokio::select! {
            _ = shutdown.changed() => {
                info!("reset scheduler stopping");
                return;
            }
            _ = time::sleep(Duration::from_secs(sleep_secs)) => {}
        }

        match engine.reset_all_attempts() {
            Ok(accounts) => info!(accounts, "daily attempts restored"),
            Err(err) => warn!(%err, "daily reset failed; skipping to next cycle"),
        }
    }
}
