//! Result shapes returned by engine operations to the transport adapter.
//!
//! These are plain data: the adapter decides how to render them.

use serde::{Deserialize, Serialize};

use crate::{CardId, CatalogEntry};

/// Outcome of a successful draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReceipt {
    pub card: CatalogEntry,
    /// Presentation-only: the point award does not depend on this flag.
    pub already_owned: bool,
    /// Point balance after the draw.
    pub points: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Win,
    Lose,
}

/// Outcome of one mini-game attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReceipt {
    pub outcome: GameOutcome,
    /// The die face rolled (1-6).
    pub roll: u8,
    /// Point balance after the attempt.
    pub points: u64,
    /// Attempt budget after the attempt.
    pub attempts_remaining: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub display_name: String,
    pub points: u64,
}

/// One row of a collection report: the full catalog is always enumerated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub card_id: CardId,
    pub owned: bool,
}
