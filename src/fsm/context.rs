//! Per-cycle inputs and the controller's own expectations.
//!
//! [`CycleReports`] is the classified view of one inbound batch (the
//! equivalent of a sensor snapshot).  [`ControlContext`] holds what the
//! controller itself last commanded and what it predicts for the next
//! reading; every detector compares one against the other.

use log::warn;

use crate::config::{BoilerCharacteristics, MAX_PUMPS};
use crate::mailbox::classify::{classify, extract_all_matches, MatchOutcome};
use crate::mailbox::{Mailbox, Message, MessageKind};

/// One boolean per pump, indexed by pump number.
pub type PumpFlags = heapless::Vec<bool, MAX_PUMPS>;

// ---------------------------------------------------------------------------
// Cycle reports (read-only to detectors; built from the inbox)
// ---------------------------------------------------------------------------

/// Classified contents of one inbound batch, before integrity checking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReports {
    /// Unique finite `LEVEL_v` reading.
    pub level: Option<f64>,
    /// Unique finite `STEAM_v` reading.
    pub steam: Option<f64>,
    /// `(pump, open)` for every `PUMP_STATE_n_b`, in inbox order.
    pub pump_states: Vec<(usize, bool)>,
    /// `(pump, flowing)` for every `PUMP_CONTROL_STATE_n_b`, in inbox order.
    pub pump_control_states: Vec<(usize, bool)>,
    /// At least one `STOP` arrived.
    pub stop: bool,
    /// At least one `STEAM_BOILER_WAITING` arrived.
    pub units_waiting: bool,
}

impl CycleReports {
    /// Classify an inbound batch.
    pub fn classify(inbox: &Mailbox) -> Self {
        Self {
            level: unique_reading(MessageKind::Level, inbox),
            steam: unique_reading(MessageKind::Steam, inbox),
            pump_states: pump_reports(MessageKind::PumpState, inbox),
            pump_control_states: pump_reports(MessageKind::PumpControlState, inbox),
            stop: classify(MessageKind::Stop, inbox).is_present(),
            units_waiting: classify(MessageKind::SteamBoilerWaiting, inbox).is_present(),
        }
    }
}

fn unique_reading(kind: MessageKind, inbox: &Mailbox) -> Option<f64> {
    match classify(kind, inbox) {
        MatchOutcome::Unique(msg) => msg.reading().filter(|v| v.is_finite()),
        MatchOutcome::Ambiguous(n) => {
            warn!("{n} {kind} readings in one cycle, none usable");
            None
        }
        MatchOutcome::Absent => None,
    }
}

fn pump_reports(kind: MessageKind, inbox: &Mailbox) -> Vec<(usize, bool)> {
    extract_all_matches(kind, inbox)
        .into_iter()
        .filter_map(|m: &Message| Some((m.pump()?, m.flag()?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Predicted level band
// ---------------------------------------------------------------------------

/// Range the next level reading is expected to fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBand {
    pub minimum: f64,
    pub maximum: f64,
}

impl LevelBand {
    pub fn contains(&self, level: f64) -> bool {
        self.minimum <= level && level <= self.maximum
    }
}

// ---------------------------------------------------------------------------
// ControlContext
// ---------------------------------------------------------------------------

/// What the controller commanded last cycle and what it therefore expects.
///
/// Both flag vectors always hold exactly one entry per pump.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlContext {
    expected_pump_open: PumpFlags,
    expected_pump_control: PumpFlags,
    band: LevelBand,
}

impl ControlContext {
    /// Fresh context: every pump expected closed, any level in the tank
    /// considered plausible.
    pub fn new(config: &BoilerCharacteristics) -> Self {
        let mut closed = PumpFlags::new();
        for _ in 0..config.number_of_pumps() {
            // Cannot overflow: the characteristics hold at most MAX_PUMPS pumps.
            let _ = closed.push(false);
        }
        Self {
            expected_pump_open: closed.clone(),
            expected_pump_control: closed,
            band: LevelBand {
                minimum: 0.0,
                maximum: config.capacity,
            },
        }
    }

    pub fn pump_count(&self) -> usize {
        self.expected_pump_open.len()
    }

    pub fn expected_pump_open(&self) -> &[bool] {
        &self.expected_pump_open
    }

    pub fn expected_pump_control(&self) -> &[bool] {
        &self.expected_pump_control
    }

    pub fn band(&self) -> LevelBand {
        self.band
    }

    /// Expect every pump closed and every controller idle.
    pub fn clear_expectations(&mut self) {
        self.expected_pump_open.iter_mut().for_each(|f| *f = false);
        self.expected_pump_control.iter_mut().for_each(|f| *f = false);
    }

    /// Expect `pump` open and its controller reporting flow.
    pub fn expect_open(&mut self, pump: usize) {
        if let (Some(open), Some(control)) = (
            self.expected_pump_open.get_mut(pump),
            self.expected_pump_control.get_mut(pump),
        ) {
            *open = true;
            *control = true;
        }
    }

    /// Recompute the predicted band from the level just read and the
    /// pumpage just commanded.
    ///
    /// The top of the band assumes no steam leaves; the bottom assumes steam
    /// leaves at the maximal rate for the whole cycle.
    pub fn predict(&mut self, config: &BoilerCharacteristics, level: f64, pumpage: f64) {
        let cycle = config.cycle_duration_secs;
        let maximum = level + pumpage * cycle;
        self.band = LevelBand {
            minimum: maximum - config.maximal_steam_rate * cycle,
            maximum,
        };
    }
}
