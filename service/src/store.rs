//! SQLite-backed account store.
//!
//! One `users` row per account plus one `user_cards` row per
//! (`user_id`, `card_id`) pair, unique per pair. Every read-decide-mutate
//! runs inside an immediate transaction behind a single connection, which
//! serializes concurrent operations on the same account; the bulk reset is a
//! single `UPDATE` statement and therefore applies entirely or not at all.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use carddrop_engine::{AccountStore, EngineError, StoreError};
use carddrop_types::{Account, LeaderboardEntry, UserId};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialize the schema.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("open account store db")?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("sqlite connection lock poisoned")
    }
}

fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;
         PRAGMA foreign_keys=ON;
         CREATE TABLE IF NOT EXISTS users (
             user_id INTEGER PRIMARY KEY,
             display_name TEXT NOT NULL DEFAULT '',
             points INTEGER NOT NULL DEFAULT 0,
             last_draw_at INTEGER,
             attempts_remaining INTEGER NOT NULL,
             created_seq INTEGER NOT NULL
         );
         CREATE TABLE IF NOT EXISTS user_cards (
             user_id INTEGER NOT NULL,
             card_id TEXT NOT NULL,
             PRIMARY KEY (user_id, card_id),
             FOREIGN KEY (user_id) REFERENCES users(user_id)
         );
         CREATE INDEX IF NOT EXISTS users_points ON users(points);",
    )
    .context("init account store schema")?;
    Ok(())
}

fn store_err(err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn load_account(tx: &Transaction<'_>, user_id: UserId) -> Result<Option<Account>, rusqlite::Error> {
    let row = tx
        .query_row(
            "SELECT display_name, points, last_draw_at, attempts_remaining
             FROM users WHERE user_id = ?1",
            params![user_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, Option<u64>>(2)?,
                    row.get::<_, u32>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((display_name, points, last_draw_at, attempts_remaining)) = row else {
        return Ok(None);
    };

    let mut owned_cards = BTreeSet::new();
    let mut stmt = tx.prepare("SELECT card_id FROM user_cards WHERE user_id = ?1")?;
    let mut rows = stmt.query(params![user_id])?;
    while let Some(row) = rows.next()? {
        owned_cards.insert(row.get::<_, String>(0)?);
    }

    Ok(Some(Account {
        user_id,
        display_name,
        points,
        last_draw_at,
        attempts_remaining,
        owned_cards,
    }))
}

fn insert_account(tx: &Transaction<'_>, account: &Account) -> Result<(), rusqlite::Error> {
    tx.execute(
        "INSERT INTO users (user_id, display_name, points, last_draw_at, attempts_remaining, created_seq)
         VALUES (?1, ?2, ?3, ?4, ?5, (SELECT COALESCE(MAX(created_seq), 0) + 1 FROM users))",
        params![
            account.user_id,
            account.display_name,
            account.points,
            account.last_draw_at,
            account.attempts_remaining,
        ],
    )?;
    Ok(())
}

fn write_account(tx: &Transaction<'_>, account: &Account) -> Result<(), rusqlite::Error> {
    tx.execute(
        "UPDATE users
         SET display_name = ?2, points = ?3, last_draw_at = ?4, attempts_remaining = ?5
         WHERE user_id = ?1",
        params![
            account.user_id,
            account.display_name,
            account.points,
            account.last_draw_at,
            account.attempts_remaining,
        ],
    )?;
    // Memberships only ever grow; duplicates collapse on the primary key.
    let mut stmt =
        tx.prepare("INSERT OR IGNORE INTO user_cards (user_id, card_id) VALUES (?1, ?2)")?;
    for card_id in &account.owned_cards {
        stmt.execute(params![account.user_id, card_id])?;
    }
    Ok(())
}

impl AccountStore for SqliteStore {
    fn get_or_create(
        &self,
        user_id: UserId,
        display_name: &str,
        attempt_cap: u32,
    ) -> Result<Account, StoreError> {
        let mut conn = self.lock();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(store_err)?;

        let mut account = match load_account(&tx, user_id).map_err(store_err)? {
            Some(account) => account,
            None => {
                let account = Account::new(user_id, display_name, attempt_cap);
                insert_account(&tx, &account).map_err(store_err)?;
                account
            }
        };
        if !display_name.is_empty() && account.display_name != display_name {
            account.display_name = display_name.to_string();
            tx.execute(
                "UPDATE users SET display_name = ?2 WHERE user_id = ?1",
                params![user_id, display_name],
            )
            .map_err(store_err)?;
        }

        tx.commit().map_err(store_err)?;
        Ok(account)
    }

    fn account(&self, user_id: UserId) -> Result<Option<Account>, StoreError> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(store_err)?;
        let account = load_account(&tx, user_id).map_err(store_err)?;
        tx.commit().map_err(store_err)?;
        Ok(account)
    }

    fn update<T>(
        &self,
        user_id: UserId,
        attempt_cap: u32,
        decide: impl FnOnce(&mut Account) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut conn = self.lock();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(store_err)?;

        let existing = load_account(&tx, user_id).map_err(store_err)?;
        let existed = existing.is_some();
        let mut account = existing.unwrap_or_else(|| Account::new(user_id, "", attempt_cap));

        // A decision error drops the transaction: nothing persists, not even
        // the lazy creation.
        let value = decide(&mut account)?;

        if !existed {
            insert_account(&tx, &account).map_err(store_err)?;
        }
        write_account(&tx, &account).map_err(store_err)?;
        tx.commit().map_err(store_err)?;
        Ok(value)
    }

    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare(
                "SELECT display_name, points FROM users
                 ORDER BY points DESC, created_seq ASC LIMIT ?1",
            )
            .map_err(store_err)?;
        let rows = stmt
            .query_map(params![n as i64], |row| {
                Ok(LeaderboardEntry {
                    display_name: row.get(0)?,
                    points: row.get(1)?,
                })
            })
            .map_err(store_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(store_err)
    }

    fn rank_of(&self, user_id: UserId) -> Result<u64, StoreError> {
        let conn = self.lock();
        let points: u64 = conn
            .query_row(
                "SELECT points FROM users WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(store_err)?
            .unwrap_or(0);
        let higher: u64 = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE points > ?1",
                params![points],
                |row| row.get(0),
            )
            .map_err(store_err)?;
        Ok(higher + 1)
    }

    fn reset_all_attempts(&self, attempt_cap: u32) -> Result<u64, StoreError> {
        let conn = self.lock();
        let touched = conn
            .execute(
                "UPDATE users SET attempts_remaining = ?1",
                params![attempt_cap],
            )
            .map_err(store_err)?;
        Ok(touched as u64)
    }
}
