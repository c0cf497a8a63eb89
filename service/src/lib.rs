//! Durable backend for the carddrop reward engine.
//!
//! Provides the SQLite [`AccountStore`](carddrop_engine::AccountStore)
//! implementation, the JSON catalog loader, the daily reset-scheduler loop,
//! and a thin axum adapter exposing engine operations as plain JSON. The chat
//! transport is an external collaborator of this service; nothing here
//! renders UI.

pub mod api;
pub mod catalog;
pub mod reset;
pub mod store;

pub use api::{router, AppState};
pub use catalog::load_catalog;
pub use reset::{run_reset_loop, unix_now};
pub use store::SqliteStore;
