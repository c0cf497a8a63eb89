use serde::{Deserialize, Serialize};

/// Minimum elapsed time between two successful draws for one account.
pub const DEFAULT_COOLDOWN_SECS: u64 = 3_600;

/// Daily mini-game attempt budget.
pub const DEFAULT_ATTEMPT_CAP: u32 = 3;

/// Hour of day (UTC) at which the attempt budget is restored.
pub const DEFAULT_RESET_HOUR_UTC: u8 = 0;

/// Engine configuration shared by all operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Draw cooldown in seconds.
    pub cooldown_secs: u64,
    /// Upper bound for `attempts_remaining`.
    pub attempt_cap: u32,
    /// Hour of day (UTC, 0-23) for the daily attempt reset.
    pub reset_hour_utc: u8,
}

impl EngineConfig {
    pub fn new(cooldown_secs: u64, attempt_cap: u32, reset_hour_utc: u8) -> Self {
        Self {
            cooldown_secs,
            attempt_cap,
            reset_hour_utc,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.attempt_cap == 0 {
            return Err("attempt_cap must be greater than zero");
        }
        if self.reset_hour_utc > 23 {
            return Err("reset_hour_utc must be in 0..=23");
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            attempt_cap: DEFAULT_ATTEMPT_CAP,
            reset_hour_utc: DEFAULT_RESET_HOUR_UTC,
        }
    }
}
