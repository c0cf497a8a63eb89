//! Common types used throughout carddrop.
//!
//! This crate defines the shared data model (accounts, the card catalog,
//! engine configuration) and the result shapes returned by engine operations.
//! It performs no I/O; invariants are validated where the types are
//! constructed.

pub mod account;
pub mod api;
pub mod catalog;
pub mod config;

/// Stable external identity supplied by the transport adapter.
pub type UserId = i64;

/// Identifier of a catalog card; the join key between draws and collections.
pub type CardId = String;

pub use account::{Account, AccountInvariantError};
pub use api::{CollectionItem, DrawReceipt, GameOutcome, GameReceipt, LeaderboardEntry};
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use config::{
    EngineConfig, DEFAULT_ATTEMPT_CAP, DEFAULT_COOLDOWN_SECS, DEFAULT_RESET_HOUR_UTC,
};
