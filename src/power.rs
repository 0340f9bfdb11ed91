//! Sensor power mode and warmup tracking.
//!
//! After being woken from low-power mode the laser and fan need
//! [`WARMUP_PERIOD_MS`] to stabilize before readings are trustworthy. Time is
//! caller-supplied in milliseconds so the crate needs no clock of its own and
//! tests can run on simulated time.

/// Minimum active time before readings are considered reliable.
pub const WARMUP_PERIOD_MS: u64 = 30_000;

/// Power mode of the sensor as last commanded by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerMode {
    Sleeping,
    Active,
}

/// Driver-owned state machine tracking power mode and time of last wake.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PowerState {
    mode: PowerMode,
    last_wake_ms: Option<u64>,
}

impl PowerState {
    pub(crate) const fn new() -> Self {
        PowerState {
            mode: PowerMode::Sleeping,
            last_wake_ms: None,
        }
    }

    /// Records a wake. Idempotent: waking while already active does not
    /// restart the warmup timer.
    pub(crate) fn wake(&mut self, now_ms: u64) {
        if self.mode == PowerMode::Sleeping {
            self.last_wake_ms = Some(now_ms);
        }
        self.mode = PowerMode::Active;
    }

    /// Records a transition to low-power mode. The wake timestamp is cleared:
    /// a reading taken after a re-wake must satisfy the warmup period again.
    pub(crate) fn sleep(&mut self) {
        self.mode = PowerMode::Sleeping;
        self.last_wake_ms = None;
    }

    pub(crate) fn mode(&self) -> PowerMode {
        self.mode
    }

    pub(crate) fn is_warmed_up(&self, now_ms: u64) -> bool {
        self.mode == PowerMode::Active
            && self
                .last_wake_ms
                .is_some_and(|wake| now_ms.saturating_sub(wake) >= WARMUP_PERIOD_MS)
    }

    /// Milliseconds of warmup left, or `None` while sleeping.
    pub(crate) fn warmup_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        match (self.mode, self.last_wake_ms) {
            (PowerMode::Active, Some(wake)) => {
                Some(WARMUP_PERIOD_MS.saturating_sub(now_ms.saturating_sub(wake)))
            }
            _ => None,
        }
    }
}
