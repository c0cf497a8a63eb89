use std::sync::Arc;

use carddrop_types::{
    Account, Catalog, CatalogEntry, CollectionItem, DrawReceipt, EngineConfig, GameReceipt,
    LeaderboardEntry, UserId,
};
use rand::Rng;
use tracing::debug;

use crate::collection::{self, BrowseCursors};
use crate::draw;
use crate::error::{EngineError, StoreError};
use crate::minigame;
use crate::reset;
use crate::store::AccountStore;

/// The reward engine: one method per operation the transport adapter calls.
///
/// Holds the immutable catalog, the engine configuration, the account store,
/// and the ephemeral browse cursors. Randomness and the current time come in
/// per call.
pub struct Engine<S> {
    config: EngineConfig,
    catalog: Arc<Catalog>,
    store: S,
    cursors: BrowseCursors,
}

impl<S: AccountStore> Engine<S> {
    pub fn new(
        config: EngineConfig,
        catalog: Arc<Catalog>,
        store: S,
    ) -> Result<Self, &'static str> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            store,
            cursors: BrowseCursors::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the account, creating it lazily with default values.
    pub fn get_or_create(
        &self,
        user_id: UserId,
        display_name: &str,
    ) -> Result<Account, StoreError> {
        self.store
            .get_or_create(user_id, display_name, self.config.attempt_cap)
    }

    /// Draw one random card, gated by the cooldown.
    pub fn draw(
        &self,
        user_id: UserId,
        now: u64,
        rng: &mut impl Rng,
    ) -> Result<DrawReceipt, EngineError> {
        let receipt = self.store.update(user_id, self.config.attempt_cap, |account| {
            draw::apply_draw(account, &self.catalog, now, self.config.cooldown_secs, rng)
        })?;
        debug!(
            user_id,
            card = %receipt.card.id,
            already_owned = receipt.already_owned,
            points = receipt.points,
            "draw succeeded"
        );
        Ok(receipt)
    }

    /// Play one mini-game attempt.
    pub fn play_game(
        &self,
        user_id: UserId,
        rng: &mut impl Rng,
    ) -> Result<GameReceipt, EngineError> {
        let roll = minigame::roll_die(rng);
        let receipt = self
            .store
            .update(user_id, self.config.attempt_cap, |account| {
                minigame::apply_game(account, roll)
            })?;
        debug!(
            user_id,
            roll = receipt.roll,
            outcome = ?receipt.outcome,
            attempts_remaining = receipt.attempts_remaining,
            "mini-game resolved"
        );
        Ok(receipt)
    }

    /// Top accounts by points, descending, creation-order ties.
    pub fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.store.top_n(n)
    }

    /// 1-based rank; equal points share a rank value.
    pub fn rank_of(&self, user_id: UserId) -> Result<u64, StoreError> {
        self.store.rank_of(user_id)
    }

    /// Catalog-ordered membership report over the entire catalog.
    pub fn collection_report(&self, user_id: UserId) -> Result<Vec<CollectionItem>, StoreError> {
        let account = self.store.account(user_id)?;
        Ok(collection::collection_report(&self.catalog, account.as_ref()))
    }

    /// Advance the user's browse cursor over their owned cards.
    pub fn browse_next(&self, user_id: UserId) -> Result<Option<CatalogEntry>, StoreError> {
        let owned = self.owned_for(user_id)?;
        Ok(self.cursors.next(user_id, &owned))
    }

    /// Step the user's browse cursor backward.
    pub fn browse_prev(&self, user_id: UserId) -> Result<Option<CatalogEntry>, StoreError> {
        let owned = self.owned_for(user_id)?;
        Ok(self.cursors.prev(user_id, &owned))
    }

    /// Drop the user's browse cursor.
    pub fn browse_reset(&self, user_id: UserId) {
        self.cursors.reset(user_id);
    }

    /// Bulk-restore every account's attempt budget to the configured cap.
    pub fn reset_all_attempts(&self) -> Result<u64, StoreError> {
        self.store.reset_all_attempts(self.config.attempt_cap)
    }

    /// Unix seconds of the next daily reset strictly after `now`.
    pub fn next_reset_at(&self, now: u64) -> u64 {
        reset::next_reset_at(now, self.config.reset_hour_utc)
    }

    fn owned_for(&self, user_id: UserId) -> Result<Vec<CatalogEntry>, StoreError> {
        let account = self.store.account(user_id)?;
        Ok(account
            .map(|a| collection::owned_in_catalog_order(&self.catalog, &a))
            .unwrap_or_default())
    }
}
