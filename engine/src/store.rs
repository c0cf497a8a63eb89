use carddrop_types::{Account, LeaderboardEntry, UserId};

use crate::error::{EngineError, StoreError};

/// Durable account storage.
///
/// Implementations must make [`AccountStore::update`] atomic per `user_id`:
/// the load, the decision closure, and the write-back are indivisible with
/// respect to concurrent operations on the same account. Cross-account
/// ordering is not required. [`AccountStore::reset_all_attempts`] must apply
/// as a single bulk operation (all accounts or none).
pub trait AccountStore {
    /// Load the account, creating it with default values when missing.
    ///
    /// A non-empty `display_name` that differs from the stored one refreshes
    /// it; the field is informational and carries no invariant.
    fn get_or_create(
        &self,
        user_id: UserId,
        display_name: &str,
        attempt_cap: u32,
    ) -> Result<Account, StoreError>;

    /// Read-only fetch; `None` when the user has never interacted.
    fn account(&self, user_id: UserId) -> Result<Option<Account>, StoreError>;

    /// Atomic read-decide-mutate for one account.
    ///
    /// Loads the account (creating it with defaults when missing), runs
    /// `decide` on it, and persists the mutated account only when the closure
    /// returns `Ok`. On `Err` every change the closure made is discarded.
    fn update<T>(
        &self,
        user_id: UserId,
        attempt_cap: u32,
        decide: impl FnOnce(&mut Account) -> Result<T, EngineError>,
    ) -> Result<T, EngineError>;

    /// Top accounts by points, descending, ties broken by creation order.
    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError>;

    /// 1-based rank: `1 + count(accounts with strictly greater points)`.
    /// A user with no account ranks as a zero-point account.
    fn rank_of(&self, user_id: UserId) -> Result<u64, StoreError>;

    /// Bulk-restore every account's attempt budget to `attempt_cap`.
    /// Returns the number of accounts touched.
    fn reset_all_attempts(&self, attempt_cap: u32) -> Result<u64, StoreError>;
}
