//! Failure detectors for the operating modes.
//!
//! Both detectors are free functions over explicit inputs: the boiler
//! characteristics, the controller's expectations, this cycle's verified
//! readings and the repair signals collected below.
//!
//! - [`degradation`]: equipment and steam sensor vs. what was commanded.
//! - [`rescue`]: level sensor vs. the band predicted last cycle.

pub mod degradation;
pub mod rescue;

use log::{info, warn};

use crate::fsm::context::PumpFlags;
use crate::mailbox::classify::{classify, extract_all_matches};
use crate::mailbox::{Mailbox, Message, MessageKind};

/// Repair notices received from the physical units this cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairSignals {
    pumps: PumpFlags,
    pump_controls: PumpFlags,
    pub steam: bool,
    pub level: bool,
}

impl RepairSignals {
    /// Collect repair notices from `inbox`.  Notices naming a pump that
    /// does not exist are logged and dropped.
    pub fn collect(inbox: &Mailbox, pump_count: usize) -> Self {
        Self {
            pumps: per_pump(MessageKind::PumpRepaired, inbox, pump_count),
            pump_controls: per_pump(MessageKind::PumpControlRepaired, inbox, pump_count),
            steam: classify(MessageKind::SteamRepaired, inbox).is_present(),
            level: classify(MessageKind::LevelRepaired, inbox).is_present(),
        }
    }

    pub fn pump_repaired(&self, pump: usize) -> bool {
        self.pumps.get(pump).copied().unwrap_or(false)
    }

    pub fn pump_control_repaired(&self, pump: usize) -> bool {
        self.pump_controls.get(pump).copied().unwrap_or(false)
    }
}

fn per_pump(kind: MessageKind, inbox: &Mailbox, pump_count: usize) -> PumpFlags {
    let mut flags = PumpFlags::new();
    for _ in 0..pump_count {
        if flags.push(false).is_err() {
            break;
        }
    }
    for pump in extract_all_matches(kind, inbox).into_iter().filter_map(Message::pump) {
        match flags.get_mut(pump) {
            Some(f) => *f = true,
            None => warn!("{kind} for unknown pump {pump}, ignored"),
        }
    }
    flags
}

/// Log failure acknowledgements sent back by the physical units.  They
/// confirm a detection the controller already made and change nothing.
pub fn note_unit_acknowledgements(inbox: &Mailbox) {
    for msg in inbox.iter() {
        match msg.kind() {
            MessageKind::PumpFailureAcknowledgement
            | MessageKind::PumpControlFailureAcknowledgement
            | MessageKind::LevelFailureAcknowledgement
            | MessageKind::SteamOutcomeFailureAcknowledgement
            | MessageKind::PhysicalUnitsReady => info!("UNITS | {msg}"),
            _ => {}
        }
    }
}
