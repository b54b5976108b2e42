//! Operating-mode state machine.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  Fsm                                                      │
//! │   current: Mode ──┐                                       │
//! │                   ├──▶ next_mode(current, trigger) ──▶ Mode│
//! │   trigger ────────┘         (transitions.rs)              │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine owns the current [`Mode`] and a cycle counter.  Each
//! detector outcome is fed in as a [`Trigger`]; the pure transition
//! function in [`transitions`] decides the next mode, and the engine logs
//! and records the move.  `EmergencyStop` is absorbing.

pub mod context;
pub mod transitions;

use core::fmt;

use log::info;

use crate::mailbox::ModeAnnouncement;
pub use transitions::{next_mode, Trigger};

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Every operating mode of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Waiting = 0,
    Ready = 1,
    Normal = 2,
    Degraded = 3,
    Rescue = 4,
    EmergencyStop = 5,
}

impl Mode {
    /// Total number of modes.
    pub const COUNT: usize = 6;

    pub const ALL: [Mode; Mode::COUNT] = [
        Mode::Waiting,
        Mode::Ready,
        Mode::Normal,
        Mode::Degraded,
        Mode::Rescue,
        Mode::EmergencyStop,
    ];

    /// Display name, used for the status line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Ready => "Ready",
            Self::Normal => "Normal",
            Self::Degraded => "Degraded",
            Self::Rescue => "Rescue",
            Self::EmergencyStop => "EmergencyStop",
        }
    }

    /// Value announced in `MODE_m` while in this mode.  `Ready` has none;
    /// it is signalled by `PROGRAM_READY`.
    pub const fn announcement(self) -> Option<ModeAnnouncement> {
        match self {
            Self::Waiting => Some(ModeAnnouncement::Initialisation),
            Self::Ready => None,
            Self::Normal => Some(ModeAnnouncement::Normal),
            Self::Degraded => Some(ModeAnnouncement::Degraded),
            Self::Rescue => Some(ModeAnnouncement::Rescue),
            Self::EmergencyStop => Some(ModeAnnouncement::EmergencyStop),
        }
    }

    /// Normal, Degraded or Rescue: the modes that run the detectors.
    pub const fn is_operating(self) -> bool {
        matches!(self, Self::Normal | Self::Degraded | Self::Rescue)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::EmergencyStop)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The mode machine engine.
#[derive(Debug, Clone)]
pub struct Fsm {
    current: Mode,
    /// Monotonically increasing cycle counter.
    cycle_count: u64,
    /// Cycle at which the current mode was entered.
    mode_entry_cycle: u64,
}

impl Default for Fsm {
    fn default() -> Self {
        Self::new()
    }
}

impl Fsm {
    /// A machine in `Waiting`, before any cycle.
    pub fn new() -> Self {
        Self {
            current: Mode::Waiting,
            cycle_count: 0,
            mode_entry_cycle: 0,
        }
    }

    /// Mark the start of a new cycle.
    pub fn begin_cycle(&mut self) {
        self.cycle_count += 1;
    }

    /// Feed a trigger through [`next_mode`] and return the resulting mode.
    pub fn apply(&mut self, trigger: Trigger) -> Mode {
        let next = next_mode(self.current, trigger);
        if next != self.current {
            info!("FSM transition: {} -> {} ({:?})", self.current, next, trigger);
            self.current = next;
            self.mode_entry_cycle = self.cycle_count;
        }
        self.current
    }

    /// The current mode.
    pub fn current_mode(&self) -> Mode {
        self.current
    }

    /// Cycles begun since construction.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// How many cycles the machine has been in the current mode.
    pub fn cycles_in_current_mode(&self) -> u64 {
        self.cycle_count - self.mode_entry_cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_waiting() {
        let fsm = Fsm::new();
        assert_eq!(fsm.current_mode(), Mode::Waiting);
        assert_eq!(fsm.cycle_count(), 0);
    }

    #[test]
    fn apply_follows_transition_function() {
        let mut fsm = Fsm::new();
        fsm.begin_cycle();
        assert_eq!(fsm.apply(Trigger::UnitsReady), Mode::Ready);
        fsm.begin_cycle();
        assert_eq!(fsm.apply(Trigger::Started), Mode::Normal);
        assert_eq!(fsm.apply(Trigger::LimitViolation), Mode::EmergencyStop);
        assert_eq!(fsm.apply(Trigger::Started), Mode::EmergencyStop);
    }

    #[test]
    fn counts_cycles_in_mode() {
        let mut fsm = Fsm::new();
        fsm.begin_cycle();
        fsm.apply(Trigger::UnitsReady);
        assert_eq!(fsm.cycles_in_current_mode(), 0);
        fsm.begin_cycle();
        fsm.begin_cycle();
        assert_eq!(fsm.cycles_in_current_mode(), 2);
        assert_eq!(fsm.cycle_count(), 3);
    }

    #[test]
    fn self_transition_keeps_entry_cycle() {
        let mut fsm = Fsm::new();
        fsm.begin_cycle();
        fsm.apply(Trigger::UnitsReady);
        fsm.begin_cycle();
        fsm.apply(Trigger::UnitsReady);
        assert_eq!(fsm.cycles_in_current_mode(), 1);
    }

    #[test]
    fn announcements() {
        assert_eq!(Mode::Ready.announcement(), None);
        assert_eq!(
            Mode::Waiting.announcement(),
            Some(ModeAnnouncement::Initialisation)
        );
        assert_eq!(
            Mode::EmergencyStop.announcement(),
            Some(ModeAnnouncement::EmergencyStop)
        );
        assert!(Mode::Rescue.is_operating());
        assert!(!Mode::Ready.is_operating());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_trigger() -> impl Strategy<Value = Trigger> {
        prop_oneof![
            Just(Trigger::StopDebounced),
            Just(Trigger::TransmissionFailure),
            Just(Trigger::InitialisationFault),
            Just(Trigger::UnitsReady),
            Just(Trigger::Started),
            any::<bool>().prop_map(|degraded| Trigger::EquipmentAssessed { degraded }),
            Just(Trigger::LevelOutOfBand),
            Just(Trigger::LimitViolation),
        ]
    }

    proptest! {
        #[test]
        fn emergency_stop_is_never_left(triggers in proptest::collection::vec(arb_trigger(), 1..100)) {
            let mut fsm = Fsm::new();
            let mut stopped = false;
            for t in triggers {
                fsm.begin_cycle();
                let mode = fsm.apply(t);
                if stopped {
                    prop_assert_eq!(mode, Mode::EmergencyStop);
                }
                stopped |= mode.is_terminal();
            }
        }

        #[test]
        fn ready_only_reached_from_waiting(triggers in proptest::collection::vec(arb_trigger(), 1..100)) {
            let mut fsm = Fsm::new();
            for t in triggers {
                let before = fsm.current_mode();
                let after = fsm.apply(t);
                if after == Mode::Ready && before != Mode::Ready {
                    prop_assert_eq!(before, Mode::Waiting);
                }
            }
        }
    }
}
