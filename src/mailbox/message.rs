//! The physical-unit message catalogue.
//!
//! Every message exchanged between the controller and the physical units
//! is a [`Message`].  Each variant carries at most one parameter: a pump
//! index, a floating-point reading, a pump index plus a state flag, or a
//! mode announcement.  [`MessageKind`] is the parameter-free tag used for
//! classification.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Mode values carried by an outbound `MODE_m` message.
///
/// There is no `Ready` announcement; readiness is signalled with
/// [`Message::ProgramReady`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeAnnouncement {
    Initialisation,
    Normal,
    Degraded,
    Rescue,
    EmergencyStop,
}

/// One message in a cycle's inbound or outbound batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Message {
    // ── Physical units → controller ──────────────────────────
    /// Operator requested a stop.
    Stop,
    /// Boiler is waiting for the controller to initialise.
    SteamBoilerWaiting,
    /// Physical units have acknowledged `PROGRAM_READY`.
    PhysicalUnitsReady,
    /// Water level reading (litres).
    Level(f64),
    /// Steam output reading (litres/sec).
    Steam(f64),
    /// Whether pump `pump` is currently open.
    PumpState { pump: usize, open: bool },
    /// Whether pump controller `pump` currently detects flow.
    PumpControlState { pump: usize, flowing: bool },
    PumpRepaired(usize),
    PumpControlRepaired(usize),
    LevelRepaired,
    SteamRepaired,
    PumpFailureAcknowledgement(usize),
    PumpControlFailureAcknowledgement(usize),
    LevelFailureAcknowledgement,
    SteamOutcomeFailureAcknowledgement,

    // ── Controller → physical units ──────────────────────────
    Mode(ModeAnnouncement),
    ProgramReady,
    /// Open the evacuation valve.
    Valve,
    OpenPump(usize),
    ClosePump(usize),
    PumpFailureDetection(usize),
    PumpControlFailureDetection(usize),
    LevelFailureDetection,
    SteamFailureDetection,
    PumpRepairedAcknowledgement(usize),
    PumpControlRepairedAcknowledgement(usize),
    LevelRepairedAcknowledgement,
    SteamRepairedAcknowledgement,
}

/// Parameter-free tag of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Stop,
    SteamBoilerWaiting,
    PhysicalUnitsReady,
    Level,
    Steam,
    PumpState,
    PumpControlState,
    PumpRepaired,
    PumpControlRepaired,
    LevelRepaired,
    SteamRepaired,
    PumpFailureAcknowledgement,
    PumpControlFailureAcknowledgement,
    LevelFailureAcknowledgement,
    SteamOutcomeFailureAcknowledgement,
    Mode,
    ProgramReady,
    Valve,
    OpenPump,
    ClosePump,
    PumpFailureDetection,
    PumpControlFailureDetection,
    LevelFailureDetection,
    SteamFailureDetection,
    PumpRepairedAcknowledgement,
    PumpControlRepairedAcknowledgement,
    LevelRepairedAcknowledgement,
    SteamRepairedAcknowledgement,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Stop => MessageKind::Stop,
            Self::SteamBoilerWaiting => MessageKind::SteamBoilerWaiting,
            Self::PhysicalUnitsReady => MessageKind::PhysicalUnitsReady,
            Self::Level(_) => MessageKind::Level,
            Self::Steam(_) => MessageKind::Steam,
            Self::PumpState { .. } => MessageKind::PumpState,
            Self::PumpControlState { .. } => MessageKind::PumpControlState,
            Self::PumpRepaired(_) => MessageKind::PumpRepaired,
            Self::PumpControlRepaired(_) => MessageKind::PumpControlRepaired,
            Self::LevelRepaired => MessageKind::LevelRepaired,
            Self::SteamRepaired => MessageKind::SteamRepaired,
            Self::PumpFailureAcknowledgement(_) => MessageKind::PumpFailureAcknowledgement,
            Self::PumpControlFailureAcknowledgement(_) => {
                MessageKind::PumpControlFailureAcknowledgement
            }
            Self::LevelFailureAcknowledgement => MessageKind::LevelFailureAcknowledgement,
            Self::SteamOutcomeFailureAcknowledgement => {
                MessageKind::SteamOutcomeFailureAcknowledgement
            }
            Self::Mode(_) => MessageKind::Mode,
            Self::ProgramReady => MessageKind::ProgramReady,
            Self::Valve => MessageKind::Valve,
            Self::OpenPump(_) => MessageKind::OpenPump,
            Self::ClosePump(_) => MessageKind::ClosePump,
            Self::PumpFailureDetection(_) => MessageKind::PumpFailureDetection,
            Self::PumpControlFailureDetection(_) => MessageKind::PumpControlFailureDetection,
            Self::LevelFailureDetection => MessageKind::LevelFailureDetection,
            Self::SteamFailureDetection => MessageKind::SteamFailureDetection,
            Self::PumpRepairedAcknowledgement(_) => MessageKind::PumpRepairedAcknowledgement,
            Self::PumpControlRepairedAcknowledgement(_) => {
                MessageKind::PumpControlRepairedAcknowledgement
            }
            Self::LevelRepairedAcknowledgement => MessageKind::LevelRepairedAcknowledgement,
            Self::SteamRepairedAcknowledgement => MessageKind::SteamRepairedAcknowledgement,
        }
    }

    /// Pump index carried by this message, if any.
    pub fn pump(&self) -> Option<usize> {
        match *self {
            Self::PumpState { pump, .. }
            | Self::PumpControlState { pump, .. }
            | Self::PumpRepaired(pump)
            | Self::PumpControlRepaired(pump)
            | Self::PumpFailureAcknowledgement(pump)
            | Self::PumpControlFailureAcknowledgement(pump)
            | Self::OpenPump(pump)
            | Self::ClosePump(pump)
            | Self::PumpFailureDetection(pump)
            | Self::PumpControlFailureDetection(pump)
            | Self::PumpRepairedAcknowledgement(pump)
            | Self::PumpControlRepairedAcknowledgement(pump) => Some(pump),
            _ => None,
        }
    }

    /// Floating-point reading carried by this message, if any.
    pub fn reading(&self) -> Option<f64> {
        match *self {
            Self::Level(v) | Self::Steam(v) => Some(v),
            _ => None,
        }
    }

    /// State flag carried by a per-pump report, if any.
    pub fn flag(&self) -> Option<bool> {
        match *self {
            Self::PumpState { open, .. } => Some(open),
            Self::PumpControlState { flowing, .. } => Some(flowing),
            _ => None,
        }
    }
}

impl MessageKind {
    /// Wire-style name of the kind, as used in the physical-unit protocol.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "STOP",
            Self::SteamBoilerWaiting => "STEAM_BOILER_WAITING",
            Self::PhysicalUnitsReady => "PHYSICAL_UNITS_READY",
            Self::Level => "LEVEL_v",
            Self::Steam => "STEAM_v",
            Self::PumpState => "PUMP_STATE_n_b",
            Self::PumpControlState => "PUMP_CONTROL_STATE_n_b",
            Self::PumpRepaired => "PUMP_REPAIRED_n",
            Self::PumpControlRepaired => "PUMP_CONTROL_REPAIRED_n",
            Self::LevelRepaired => "LEVEL_REPAIRED",
            Self::SteamRepaired => "STEAM_REPAIRED",
            Self::PumpFailureAcknowledgement => "PUMP_FAILURE_ACKNOWLEDGEMENT_n",
            Self::PumpControlFailureAcknowledgement => "PUMP_CONTROL_FAILURE_ACKNOWLEDGEMENT_n",
            Self::LevelFailureAcknowledgement => "LEVEL_FAILURE_ACKNOWLEDGEMENT",
            Self::SteamOutcomeFailureAcknowledgement => "STEAM_OUTCOME_FAILURE_ACKNOWLEDGEMENT",
            Self::Mode => "MODE_m",
            Self::ProgramReady => "PROGRAM_READY",
            Self::Valve => "VALVE",
            Self::OpenPump => "OPEN_PUMP_n",
            Self::ClosePump => "CLOSE_PUMP_n",
            Self::PumpFailureDetection => "PUMP_FAILURE_DETECTION_n",
            Self::PumpControlFailureDetection => "PUMP_CONTROL_FAILURE_DETECTION_n",
            Self::LevelFailureDetection => "LEVEL_FAILURE_DETECTION",
            Self::SteamFailureDetection => "STEAM_FAILURE_DETECTION",
            Self::PumpRepairedAcknowledgement => "PUMP_REPAIRED_ACKNOWLEDGEMENT_n",
            Self::PumpControlRepairedAcknowledgement => "PUMP_CONTROL_REPAIRED_ACKNOWLEDGEMENT_n",
            Self::LevelRepairedAcknowledgement => "LEVEL_REPAIRED_ACKNOWLEDGEMENT",
            Self::SteamRepairedAcknowledgement => "STEAM_REPAIRED_ACKNOWLEDGEMENT",
        }
    }

    /// True for kinds the physical units send to the controller.
    pub const fn is_inbound(self) -> bool {
        matches!(
            self,
            Self::Stop
                | Self::SteamBoilerWaiting
                | Self::PhysicalUnitsReady
                | Self::Level
                | Self::Steam
                | Self::PumpState
                | Self::PumpControlState
                | Self::PumpRepaired
                | Self::PumpControlRepaired
                | Self::LevelRepaired
                | Self::SteamRepaired
                | Self::PumpFailureAcknowledgement
                | Self::PumpControlFailureAcknowledgement
                | Self::LevelFailureAcknowledgement
                | Self::SteamOutcomeFailureAcknowledgement
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match *self {
            Self::Level(v) | Self::Steam(v) => write!(f, "{kind}({v})"),
            Self::PumpState { pump, open: b } | Self::PumpControlState { pump, flowing: b } => {
                write!(f, "{kind}({pump}, {b})")
            }
            Self::Mode(m) => write!(f, "{kind}({m:?})"),
            _ => match self.pump() {
                Some(pump) => write!(f, "{kind}({pump})"),
                None => write!(f, "{kind}"),
            },
        }
    }
}
