use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

use crate::{CardId, UserId};

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum AccountInvariantError {
    #[error("attempts_remaining out of range (got={got}, cap={cap})")]
    AttemptsOutOfRange { got: u32, cap: u32 },
}

/// Durable per-user record.
///
/// Created lazily on first interaction, never deleted, and mutated only
/// through engine operations. `owned_cards` is a set: a repeat draw of an
/// already-owned card does not add a new entry but still counts as a
/// successful draw for cooldown and point purposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: UserId,
    /// Free-text label, mutable, informational only.
    pub display_name: String,
    pub points: u64,
    /// Unix seconds of the most recent successful draw; `None` = never.
    pub last_draw_at: Option<u64>,
    pub attempts_remaining: u32,
    pub owned_cards: BTreeSet<CardId>,
}

impl Account {
    /// Fresh account with default values for the given attempt cap.
    pub fn new(user_id: UserId, display_name: impl Into<String>, attempt_cap: u32) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            points: 0,
            last_draw_at: None,
            attempts_remaining: attempt_cap,
            owned_cards: BTreeSet::new(),
        }
    }

    pub fn validate(&self, attempt_cap: u32) -> Result<(), AccountInvariantError> {
        if self.attempts_remaining > attempt_cap {
            return Err(AccountInvariantError::AttemptsOutOfRange {
                got: self.attempts_remaining,
                cap: attempt_cap,
            });
        }
        Ok(())
    }

    pub fn owns(&self, card_id: &str) -> bool {
        self.owned_cards.contains(card_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_has_defaults() {
        let account = Account::new(7, "alice", 3);
        assert_eq!(account.points, 0);
        assert_eq!(account.attempts_remaining, 3);
        assert_eq!(account.last_draw_at, None);
        assert!(account.owned_cards.is_empty());
        assert!(account.validate(3).is_ok());
    }

    #[test]
    fn validate_rejects_attempts_above_cap() {
        let mut account = Account::new(7, "alice", 3);
        account.attempts_remaining = 4;
        assert_eq!(
            account.validate(3),
            Err(AccountInvariantError::AttemptsOutOfRange { got: 4, cap: 3 })
        );
    }
}
