//! Carddrop reward engine.
//!
//! This crate contains the deterministic reward logic: the draw engine, the
//! mini-game, leaderboard ranking, collection views, and reset-time
//! arithmetic. Storage backends implement [`AccountStore`]; the engine never
//! touches I/O directly.
//!
//! ## Determinism requirements
//! - Do not read wall-clock time inside engine operations; callers pass `now`.
//! - Do not use ambient randomness; callers pass a `rand::Rng`.
//! - Avoid iteration order of hash-based collections influencing outputs.
//!
//! ## Atomicity
//! Every read-decide-mutate sequence runs inside a single
//! [`AccountStore::update`] call. A decision error leaves the account
//! untouched; there is no partially applied draw or game result.
//!
//! The primary entrypoint is [`Engine`].

pub mod collection;
pub mod draw;
pub mod leaderboard;
pub mod minigame;
pub mod reset;

mod engine;
mod error;
mod store;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use engine::Engine;
pub use error::{EngineError, StoreError};
pub use store::AccountStore;

pub use collection::{collection_report, owned_in_catalog_order, BrowseCursors};
pub use draw::{apply_draw, cooldown_remaining};
pub use leaderboard::rank_for;
pub use minigame::{apply_game, roll_die, DIE_FACES, WINNING_FACES};
pub use reset::{next_reset_at, SECS_PER_DAY, SECS_PER_HOUR};

#[cfg(any(test, feature = "mocks"))]
pub use mocks::Memory;
