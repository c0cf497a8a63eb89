//! Mini-game engine: one die roll per attempt.
//!
//! Faces {4, 5} win (p = 1/3). A win is "free": the point award comes with an
//! offsetting attempt, so only losses drain the daily budget.

use carddrop_types::{Account, GameOutcome, GameReceipt};
use rand::Rng;

use crate::error::EngineError;

/// Number of die faces.
pub const DIE_FACES: u8 = 6;

/// Faces that resolve to a win.
pub const WINNING_FACES: [u8; 2] = [4, 5];

/// Roll a uniform die face in 1..=[`DIE_FACES`].
pub fn roll_die(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=DIE_FACES)
}

/// Apply one mini-game attempt to the account.
///
/// The attempt decrement always applies; on a win the offsetting increment
/// is applied on top, never collapsed into a net-zero no-op. Intermediate
/// observation order is irrelevant because the whole mutation commits as one
/// unit through [`crate::AccountStore::update`].
pub fn apply_game(account: &mut Account, roll: u8) -> Result<GameReceipt, EngineError> {
    if account.attempts_remaining == 0 {
        return Err(EngineError::NoAttemptsLeft);
    }

    account.attempts_remaining = account.attempts_remaining.saturating_sub(1);

    let outcome = if WINNING_FACES.contains(&roll) {
        account.points = account.points.saturating_add(1);
        account.attempts_remaining = account.attempts_remaining.saturating_add(1);
        GameOutcome::Win
    } else {
        GameOutcome::Lose
    };

    Ok(GameReceipt {
        outcome,
        roll,
        points: account.points,
        attempts_remaining: account.attempts_remaining,
    })
}
