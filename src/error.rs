//! Unified error types for the boiler controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! cycle dispatcher's fault handling uniform.  All variants are `Copy` so
//! detectors can hand them back to the controller without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Mandatory per-cycle reports were missing or inconsistent.
    Transmission(TransmissionFault),
    /// A safety condition forced the terminal mode.
    Safety(SafetyFault),
    /// Boiler characteristics are invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transmission(e) => write!(f, "transmission: {e}"),
            Self::Safety(e) => write!(f, "safety: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transmission faults
// ---------------------------------------------------------------------------

/// Structural problems with one cycle's inbound batch.
///
/// Any of these is fatal for the cycle: the controller cannot trust a batch
/// that lacks a reading or disagrees with itself about the pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionFault {
    /// No unique `LEVEL_v` reading.
    MissingLevel,
    /// No unique `STEAM_v` reading.
    MissingSteam,
    /// Number of `PUMP_STATE_n_b` reports differs from the pump count.
    PumpStateCount { expected: usize, found: usize },
    /// Number of `PUMP_CONTROL_STATE_n_b` reports differs from the pump count.
    PumpControlStateCount { expected: usize, found: usize },
    /// A pump state report names an unknown pump or repeats one.
    PumpStateIndex { pump: usize },
    /// A pump controller report names an unknown pump or repeats one.
    PumpControlStateIndex { pump: usize },
}

impl fmt::Display for TransmissionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLevel => write!(f, "level reading missing or ambiguous"),
            Self::MissingSteam => write!(f, "steam reading missing or ambiguous"),
            Self::PumpStateCount { expected, found } => {
                write!(f, "expected {expected} pump state reports, got {found}")
            }
            Self::PumpControlStateCount { expected, found } => {
                write!(f, "expected {expected} pump control reports, got {found}")
            }
            Self::PumpStateIndex { pump } => {
                write!(f, "pump state report for unknown or repeated pump {pump}")
            }
            Self::PumpControlStateIndex { pump } => {
                write!(f, "pump control report for unknown or repeated pump {pump}")
            }
        }
    }
}

impl From<TransmissionFault> for Error {
    fn from(e: TransmissionFault) -> Self {
        Self::Transmission(e)
    }
}

// ---------------------------------------------------------------------------
// Safety faults
// ---------------------------------------------------------------------------

/// Conditions that end the control session.  Each one drives the mode
/// machine into `EmergencyStop`, which nothing leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyFault {
    /// The operator sent `STOP` on enough consecutive cycles.
    StopRequested,
    /// Water level is outside the hard physical limits.
    LevelBeyondLimits,
    /// Steam was flowing, or the level was impossible, during initialisation.
    InitialisationReadings,
}

impl fmt::Display for SafetyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopRequested => write!(f, "stop requested"),
            Self::LevelBeyondLimits => write!(f, "water level beyond safety limits"),
            Self::InitialisationReadings => write!(f, "invalid readings during initialisation"),
        }
    }
}

impl From<SafetyFault> for Error {
    fn from(e: SafetyFault) -> Self {
        Self::Safety(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
