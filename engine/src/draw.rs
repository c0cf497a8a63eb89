//! Draw engine: cooldown gate plus uniform card selection.
//!
//! Selection is independent of ownership; duplicates are possible and
//! expected. A repeat draw of an owned card still counts as a successful
//! draw: it refreshes the cooldown and awards the point.

use carddrop_types::{Account, Catalog, DrawReceipt};
use rand::Rng;

use crate::error::EngineError;

/// Seconds left on the cooldown; 0 means the gate is open.
///
/// `last_draw_at = None` always passes the gate.
pub fn cooldown_remaining(last_draw_at: Option<u64>, now: u64, cooldown_secs: u64) -> u64 {
    match last_draw_at {
        None => 0,
        Some(last) => cooldown_secs.saturating_sub(now.saturating_sub(last)),
    }
}

/// Apply one draw to the account.
///
/// On success the three side effects land together: the card joins
/// `owned_cards` (no-op on duplicate), `last_draw_at` moves to `now`, and
/// `points` grows by exactly 1. On error the account must be discarded by the
/// caller ([`crate::AccountStore::update`] does this).
pub fn apply_draw(
    account: &mut Account,
    catalog: &Catalog,
    now: u64,
    cooldown_secs: u64,
    rng: &mut impl Rng,
) -> Result<DrawReceipt, EngineError> {
    if catalog.is_empty() {
        return Err(EngineError::CatalogEmpty);
    }

    let remaining_secs = cooldown_remaining(account.last_draw_at, now, cooldown_secs);
    if remaining_secs > 0 {
        return Err(EngineError::CooldownActive { remaining_secs });
    }

    let entry = &catalog.entries()[rng.gen_range(0..catalog.len())];
    let already_owned = !account.owned_cards.insert(entry.id.clone());
    account.last_draw_at = Some(now);
    account.points = account.points.saturating_add(1);

    Ok(DrawReceipt {
        card: entry.clone(),
        already_owned,
        points: account.points,
    })
}
