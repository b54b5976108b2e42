//! Safety checks that end the control session.
//!
//! Three conditions force `EmergencyStop` no matter what else happened in
//! the cycle:
//!
//! 1. `STOP` on [`STOP_CYCLES_TO_HALT`] consecutive cycles ([`StopDebouncer`]).
//! 2. A level reading outside the hard limits ([`check_level_limits`]).
//! 3. Steam flowing, or an impossible level, while the boiler is still
//!    initialising ([`check_initialisation_readings`]).
//!
//! Each check returns a [`SafetyFault`]; the controller turns it into a
//! mode transition.

use log::{error, warn};

use crate::config::BoilerCharacteristics;
use crate::error::SafetyFault;

/// Consecutive stop cycles that halt the boiler.
pub const STOP_CYCLES_TO_HALT: u32 = 3;

/// Counts consecutive cycles carrying a stop signal.
#[derive(Debug, Clone, Default)]
pub struct StopDebouncer {
    count: u32,
}

impl StopDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether this cycle carried a stop signal.
    ///
    /// Any cycle without one resets the count.  Once the count reaches the
    /// threshold every further stop cycle keeps reporting the fault.
    pub fn observe(&mut self, stop: bool) -> Result<(), SafetyFault> {
        if !stop {
            if self.count > 0 {
                warn!("stop signal withdrawn after {} cycle(s)", self.count);
            }
            self.count = 0;
            return Ok(());
        }

        self.count = self.count.saturating_add(1);
        if self.count >= STOP_CYCLES_TO_HALT {
            error!("SAFETY FAULT: stop requested on {} consecutive cycles", self.count);
            Err(SafetyFault::StopRequested)
        } else {
            warn!("stop signal {}/{}", self.count, STOP_CYCLES_TO_HALT);
            Ok(())
        }
    }

    /// Consecutive stop cycles seen so far.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Fail if `level` lies outside `[minimal_limit_level, maximal_limit_level]`.
pub fn check_level_limits(
    config: &BoilerCharacteristics,
    level: f64,
) -> Result<(), SafetyFault> {
    if level < config.minimal_limit_level || level > config.maximal_limit_level {
        error!(
            "SAFETY FAULT: level {level} outside limits [{}, {}]",
            config.minimal_limit_level, config.maximal_limit_level
        );
        return Err(SafetyFault::LevelBeyondLimits);
    }
    Ok(())
}

/// Fail if steam is missing or flowing, or the level does not fit in the
/// tank, while the boiler is initialising.
pub fn check_initialisation_readings(
    config: &BoilerCharacteristics,
    level: f64,
    steam: Option<f64>,
) -> Result<(), SafetyFault> {
    let steam_ok = steam == Some(0.0);
    let level_ok = (0.0..=config.capacity).contains(&level);
    if steam_ok && level_ok {
        return Ok(());
    }
    error!("SAFETY FAULT: initialisation readings level={level} steam={steam:?}");
    Err(SafetyFault::InitialisationReadings)
}
