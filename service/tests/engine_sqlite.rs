//! End-to-end engine scenarios over the SQLite store.

use std::path::Path;
use std::sync::Arc;

use carddrop_engine::{AccountStore, Engine, EngineError};
use carddrop_service::SqliteStore;
use carddrop_types::{Catalog, CatalogEntry, EngineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn catalog(ids: &[&str]) -> Catalog {
    Catalog::new(
        ids.iter()
            .map(|id| CatalogEntry {
                id: id.to_string(),
                title: format!("title-{id}"),
                description: format!("description-{id}"),
            })
            .collect(),
    )
    .unwrap()
}

fn engine_at(path: &Path, ids: &[&str]) -> Engine<SqliteStore> {
    let store = SqliteStore::open(path).unwrap();
    Engine::new(EngineConfig::default(), Arc::new(catalog(ids)), store).unwrap()
}

#[test]
fn draw_cooldown_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(&dir.path().join("accounts.db"), &["A", "B"]);
    let mut rng = StdRng::seed_from_u64(1);

    let first = engine.draw(10, 0, &mut rng).unwrap();
    assert_eq!(first.points, 1);

    let err = engine.draw(10, 1_800, &mut rng).unwrap_err();
    assert_eq!(err, EngineError::CooldownActive { remaining_secs: 1_800 });
    let account = engine.store().account(10).unwrap().unwrap();
    assert_eq!(account.points, 1, "failed draw must not mutate");
    assert_eq!(account.last_draw_at, Some(0));

    let second = engine.draw(10, 3_600, &mut rng).unwrap();
    assert_eq!(second.points, 2);
}

#[test]
fn attempts_drain_and_reset_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(&dir.path().join("accounts.db"), &["A"]);
    let mut rng = StdRng::seed_from_u64(2);

    engine.get_or_create(10, "alice").unwrap();
    loop {
        match engine.play_game(10, &mut rng) {
            Ok(receipt) => assert!(receipt.attempts_remaining <= 3),
            Err(EngineError::NoAttemptsLeft) => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    assert_eq!(
        engine.store().account(10).unwrap().unwrap().attempts_remaining,
        0
    );

    let before = engine.store().account(10).unwrap().unwrap();
    engine.reset_all_attempts().unwrap();
    let after = engine.store().account(10).unwrap().unwrap();
    assert_eq!(after.attempts_remaining, 3);
    assert_eq!(after.points, before.points);
    assert_eq!(after.owned_cards, before.owned_cards);
    assert_eq!(after.last_draw_at, before.last_draw_at);
}

#[test]
fn accounts_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.db");
    let mut rng = StdRng::seed_from_u64(3);

    {
        let engine = engine_at(&path, &["A", "B"]);
        engine.get_or_create(10, "alice").unwrap();
        engine.draw(10, 0, &mut rng).unwrap();
        engine.play_game(10, &mut rng).unwrap();
    }

    let engine = engine_at(&path, &["A", "B"]);
    let account = engine.store().account(10).unwrap().unwrap();
    assert_eq!(account.display_name, "alice");
    assert!(account.points >= 1);
    assert_eq!(account.owned_cards.len(), 1);
}

#[test]
fn failed_decisions_roll_back_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("accounts.db")).unwrap();
    store.get_or_create(10, "alice", 3).unwrap();

    let err = store
        .update(10, 3, |account| {
            account.points = 99;
            account.owned_cards.insert("phantom".to_string());
            Err::<(), _>(EngineError::NoAttemptsLeft)
        })
        .unwrap_err();
    assert_eq!(err, EngineError::NoAttemptsLeft);

    let account = store.account(10).unwrap().unwrap();
    assert_eq!(account.points, 0);
    assert!(account.owned_cards.is_empty());
}

#[test]
fn lazy_creation_rolls_back_with_the_decision() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("accounts.db")).unwrap();

    let _ = store.update(77, 3, |_| Err::<(), _>(EngineError::CatalogEmpty));
    assert_eq!(store.account(77).unwrap(), None);
}

#[test]
fn membership_rows_stay_unique_per_pair() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(&dir.path().join("accounts.db"), &["only"]);
    let mut rng = StdRng::seed_from_u64(4);

    for round in 0..3u64 {
        let receipt = engine.draw(10, round * 3_600, &mut rng).unwrap();
        assert_eq!(receipt.already_owned, round > 0);
    }

    let account = engine.store().account(10).unwrap().unwrap();
    assert_eq!(account.owned_cards.len(), 1);
    assert_eq!(account.points, 3, "duplicates still award points");
}

#[test]
fn leaderboard_orders_ties_by_creation() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(&dir.path().join("accounts.db"), &["A"]);

    for (user_id, name, points) in [(1i64, "first", 2u64), (2, "second", 5), (3, "third", 2)] {
        engine.get_or_create(user_id, name).unwrap();
        engine
            .store()
            .update(user_id, 3, |account| {
                account.points = points;
                Ok::<_, EngineError>(())
            })
            .unwrap();
    }

    let top = engine.top_n(10).unwrap();
    let names: Vec<&str> = top.iter().map(|e| e.display_name.as_str()).collect();
    assert_eq!(names, vec!["second", "first", "third"]);

    assert_eq!(engine.rank_of(2).unwrap(), 1);
    assert_eq!(engine.rank_of(1).unwrap(), 2);
    assert_eq!(engine.rank_of(3).unwrap(), 2, "equal points share a rank");
    assert_eq!(engine.rank_of(999).unwrap(), 4, "unknown user ranks as zero points");
}

#[test]
fn collection_report_matches_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(&dir.path().join("accounts.db"), &["z", "m", "a"]);
    let mut rng = StdRng::seed_from_u64(5);

    engine.draw(10, 0, &mut rng).unwrap();
    let report = engine.collection_report(10).unwrap();
    assert_eq!(report.len(), 3);
    let ids: Vec<&str> = report.iter().map(|item| item.card_id.as_str()).collect();
    assert_eq!(ids, vec!["z", "m", "a"]);
    assert_eq!(report.iter().filter(|item| item.owned).count(), 1);

    let untouched = engine.collection_report(999).unwrap();
    assert_eq!(untouched.len(), 3);
    assert!(untouched.iter().all(|item| !item.owned));
}

#[test]
fn bulk_reset_touches_every_account() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_at(&dir.path().join("accounts.db"), &["A"]);
    let mut rng = StdRng::seed_from_u64(6);

    for user_id in 1i64..=4 {
        engine.get_or_create(user_id, "player").unwrap();
        let _ = engine.play_game(user_id, &mut rng);
    }

    let touched = engine.reset_all_attempts().unwrap();
    assert_eq!(touched, 4);
    for user_id in 1i64..=4 {
        let account = engine.store().account(user_id).unwrap().unwrap();
        assert_eq!(account.attempts_remaining, 3);
    }
}
