//! Reset scheduler loop behavior.

use std::sync::Arc;
use std::time::Duration;

use carddrop_engine::{AccountStore, Engine, EngineError};
use carddrop_service::{run_reset_loop, SqliteStore};
use carddrop_types::{Catalog, CatalogEntry, EngineConfig};
use tokio::sync::watch;
use tokio::time::timeout;

fn test_engine(dir: &tempfile::TempDir) -> Arc<Engine<SqliteStore>> {
    let store = SqliteStore::open(&dir.path().join("accounts.db")).unwrap();
    let catalog = Catalog::new(vec![CatalogEntry {
        id: "a".to_string(),
        title: "A".to_string(),
        description: String::new(),
    }])
    .unwrap();
    Arc::new(Engine::new(EngineConfig::default(), Arc::new(catalog), store).unwrap())
}

#[tokio::test]
async fn shutdown_cancels_the_sleep() {
    let dir = tempfile::tempdir().unwrap();
    let engine = test_engine(&dir);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(run_reset_loop(engine, shutdown_rx));

    shutdown_tx.send(true).unwrap();
    timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop must stop promptly on shutdown")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn firing_restores_the_attempt_budget() {
    let dir = tempfile::tempdir().unwrap();
    let engine = test_engine(&dir);

    // Drain one account's budget.
    engine.get_or_create(10, "alice").unwrap();
    engine
        .store()
        .update(10, 3, |account| {
            account.attempts_remaining = 0;
            Ok::<_, EngineError>(())
        })
        .unwrap();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(run_reset_loop(engine.clone(), shutdown_rx));

    // With a paused clock tokio fast-forwards through the scheduler's sleep;
    // poll until the firing lands.
    let mut restored = false;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_secs(3_600)).await;
        let account = engine.store().account(10).unwrap().unwrap();
        if account.attempts_remaining == 3 {
            restored = true;
            break;
        }
    }
    assert!(restored, "scheduler never restored the budget");

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}
