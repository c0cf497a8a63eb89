use thiserror::Error as ThisError;

/// Account store failure. Transient from the caller's perspective: the
/// operation that hit it mutated nothing and may be retried.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum StoreError {
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by engine operations.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum EngineError {
    /// Expected, recoverable: the draw cooldown has not elapsed.
    #[error("cooldown active ({remaining_secs}s remaining)")]
    CooldownActive { remaining_secs: u64 },

    /// Expected, recoverable: the daily attempt budget is spent.
    #[error("no attempts left")]
    NoAttemptsLeft,

    /// Startup-fatal: the process must not accept draws without a catalog.
    #[error("catalog is empty")]
    CatalogEmpty,

    #[error(transparent)]
    Store(#[from] StoreError),
}
