//! Transition guards for the operating-mode machine.
//!
//! Every edge the controller may take lives in [`next_mode`].  Detectors
//! never assign a mode directly; they report a [`Trigger`] and this table
//! decides.
//!
//! ```text
//!  WAITING ──[units ready, level normal]──▶ READY ──[next cycle]──▶ NORMAL
//!
//!  NORMAL | DEGRADED | RESCUE ──[equipment ok]──────▶ NORMAL
//!  NORMAL | DEGRADED | RESCUE ──[equipment fault]───▶ DEGRADED
//!  NORMAL | DEGRADED | RESCUE ──[level out of band]─▶ RESCUE
//!
//!  Any mode ──[stop ×3 | transmission | limits | init readings]──▶ EMERGENCY_STOP
//!  EMERGENCY_STOP absorbs every trigger.
//! ```

use super::Mode;

/// Detector outcome presented to the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Stop signal seen on enough consecutive cycles.
    StopDebounced,
    /// Inbound batch failed the integrity check.
    TransmissionFailure,
    /// Steam flowing or level impossible while initialising.
    InitialisationFault,
    /// Physical units ready and level inside the normal band.
    UnitsReady,
    /// First cycle after `Ready`.
    Started,
    /// Degradation detector finished; `degraded` if any fault was found.
    EquipmentAssessed { degraded: bool },
    /// Level reading outside the predicted band.
    LevelOutOfBand,
    /// Level reading outside the hard safety limits.
    LimitViolation,
}

/// Decide the next mode.  Triggers that make no sense in `current` leave
/// it unchanged.
pub fn next_mode(current: Mode, trigger: Trigger) -> Mode {
    use Mode::{Degraded, EmergencyStop, Normal, Ready, Rescue, Waiting};

    match (current, trigger) {
        (EmergencyStop, _) => EmergencyStop,

        (
            _,
            Trigger::StopDebounced
            | Trigger::TransmissionFailure
            | Trigger::InitialisationFault
            | Trigger::LimitViolation,
        ) => EmergencyStop,

        (Waiting, Trigger::UnitsReady) => Ready,
        (Ready, Trigger::Started) => Normal,

        (Normal | Degraded | Rescue, Trigger::EquipmentAssessed { degraded }) => {
            if degraded {
                Degraded
            } else {
                Normal
            }
        }
        (Normal | Degraded | Rescue, Trigger::LevelOutOfBand) => Rescue,

        (mode, _) => mode,
    }
}
