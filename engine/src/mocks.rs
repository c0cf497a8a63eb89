//! In-memory account store for tests.
//!
//! Mirrors the durable store contract: per-account atomic updates, creation
//! order retained for leaderboard tie-breaking, and a switchable outage mode
//! for exercising transient-failure paths.

use std::collections::HashMap;
use std::sync::Mutex;

use carddrop_types::{Account, LeaderboardEntry, UserId};

use crate::error::{EngineError, StoreError};
use crate::leaderboard;
use crate::store::AccountStore;

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<UserId, Account>,
    /// Creation order, for leaderboard tie-breaking.
    order: Vec<UserId>,
    unavailable: bool,
}

#[derive(Debug, Default)]
pub struct Memory {
    inner: Mutex<Inner>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a storage outage: every operation fails until cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock poisoned")
    }
}

impl Inner {
    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }

    fn loaded(&self, user_id: UserId, attempt_cap: u32) -> Account {
        self.accounts
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| Account::new(user_id, "", attempt_cap))
    }

    fn persist(&mut self, account: Account) {
        if !self.accounts.contains_key(&account.user_id) {
            self.order.push(account.user_id);
        }
        self.accounts.insert(account.user_id, account);
    }
}

impl AccountStore for Memory {
    fn get_or_create(
        &self,
        user_id: UserId,
        display_name: &str,
        attempt_cap: u32,
    ) -> Result<Account, StoreError> {
        let mut inner = self.lock();
        inner.check_available()?;
        let mut account = inner.loaded(user_id, attempt_cap);
        if !display_name.is_empty() && account.display_name != display_name {
            account.display_name = display_name.to_string();
        }
        inner.persist(account.clone());
        Ok(account)
    }

    fn account(&self, user_id: UserId) -> Result<Option<Account>, StoreError> {
        let inner = self.lock();
        inner.check_available()?;
        Ok(inner.accounts.get(&user_id).cloned())
    }

    fn update<T>(
        &self,
        user_id: UserId,
        attempt_cap: u32,
        decide: impl FnOnce(&mut Account) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut inner = self.lock();
        inner.check_available()?;
        let mut account = inner.loaded(user_id, attempt_cap);
        let value = decide(&mut account)?;
        inner.persist(account);
        Ok(value)
    }

    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let inner = self.lock();
        inner.check_available()?;
        let mut snapshot: Vec<(u64, LeaderboardEntry)> = inner
            .order
            .iter()
            .enumerate()
            .filter_map(|(seq, user_id)| {
                inner.accounts.get(user_id).map(|account| {
                    (
                        seq as u64,
                        LeaderboardEntry {
                            display_name: account.display_name.clone(),
                            points: account.points,
                        },
                    )
                })
            })
            .collect();
        leaderboard::order_snapshot(&mut snapshot);
        snapshot.truncate(n);
        Ok(snapshot.into_iter().map(|(_, entry)| entry).collect())
    }

    fn rank_of(&self, user_id: UserId) -> Result<u64, StoreError> {
        let inner = self.lock();
        inner.check_available()?;
        let points = inner
            .accounts
            .get(&user_id)
            .map(|account| account.points)
            .unwrap_or(0);
        Ok(leaderboard::rank_for(
            points,
            inner.accounts.values().map(|account| account.points),
        ))
    }

    fn reset_all_attempts(&self, attempt_cap: u32) -> Result<u64, StoreError> {
        let mut inner = self.lock();
        inner.check_available()?;
        let mut touched = 0u64;
        for account in inner.accounts.values_mut() {
            account.attempts_remaining = attempt_cap;
            touched += 1;
        }
        Ok(touched)
    }
}
