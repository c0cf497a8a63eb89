//! Collection views: full-catalog membership reports and per-user browse
//! cursors.
//!
//! Cursors are ephemeral, process-local state keyed by `user_id`. They are
//! never persisted and never shared across users; a restart simply starts
//! browsing from the first owned card again.

use std::collections::HashMap;
use std::sync::Mutex;

use carddrop_types::{Account, Catalog, CatalogEntry, CollectionItem, UserId};

/// Catalog-ordered membership report for one user.
///
/// Always enumerates the entire catalog; `account = None` (user never
/// interacted) yields an all-unowned report of full length.
pub fn collection_report(catalog: &Catalog, account: Option<&Account>) -> Vec<CollectionItem> {
    catalog
        .entries()
        .iter()
        .map(|entry| CollectionItem {
            card_id: entry.id.clone(),
            owned: account.is_some_and(|a| a.owns(&entry.id)),
        })
        .collect()
}

/// The user's owned cards in catalog definition order.
pub fn owned_in_catalog_order(catalog: &Catalog, account: &Account) -> Vec<CatalogEntry> {
    catalog
        .entries()
        .iter()
        .filter(|entry| account.owns(&entry.id))
        .cloned()
        .collect()
}

/// Per-user wrap-around cursors over owned cards.
#[derive(Debug, Default)]
pub struct BrowseCursors {
    cursors: Mutex<HashMap<UserId, usize>>,
}

impl BrowseCursors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the user's cursor and return the card under it.
    ///
    /// The first call lands on the first owned card; subsequent calls move
    /// forward and wrap. `None` when the user owns nothing.
    pub fn next(&self, user_id: UserId, owned: &[CatalogEntry]) -> Option<CatalogEntry> {
        if owned.is_empty() {
            return None;
        }
        let mut cursors = self.cursors.lock().expect("cursor lock poisoned");
        let idx = match cursors.get(&user_id) {
            None => 0,
            // Modulo also re-clamps a stale cursor after the collection grew.
            Some(current) => (current.wrapping_add(1)) % owned.len(),
        };
        cursors.insert(user_id, idx);
        Some(owned[idx].clone())
    }

    /// Move the user's cursor backward and return the card under it.
    pub fn prev(&self, user_id: UserId, owned: &[CatalogEntry]) -> Option<CatalogEntry> {
        if owned.is_empty() {
            return None;
        }
        let mut cursors = self.cursors.lock().expect("cursor lock poisoned");
        let idx = match cursors.get(&user_id) {
            None => owned.len() - 1,
            Some(current) => {
                let current = *current % owned.len();
                if current == 0 {
                    owned.len() - 1
                } else {
                    current - 1
                }
            }
        };
        cursors.insert(user_id, idx);
        Some(owned[idx].clone())
    }

    /// Drop the user's cursor (back to the menu).
    pub fn reset(&self, user_id: UserId) {
        self.cursors
            .lock()
            .expect("cursor lock poisoned")
            .remove(&user_id);
    }
}
