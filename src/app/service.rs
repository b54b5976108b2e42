//! The boiler controller, one instance per boiler.
//!
//! [`BoilerController`] owns the mode machine, the stop debouncer and the
//! controller's expectations.  Each [`clock`](BoilerController::clock)
//! runs one complete cycle synchronously: classify the inbound batch, run
//! the safety and integrity checks, dispatch on the current mode, and emit
//! every resulting command through the outbound sink.
//!
//! ```text
//!  Mailbox ──▶ ┌────────────────────────────────────────────┐ ──▶ MessageSink
//!              │ BoilerController                           │
//!              │   stop debounce · integrity                │
//!              │   Waiting: initialisation                  │
//!              │   Operating: degradation · rescue · limits │
//!              │              · allocation                  │
//!              └────────────────────────────────────────────┘
//! ```

use log::{error, info};

use crate::config::BoilerCharacteristics;
use crate::control::allocation;
use crate::control::initialisation::{self, InitStep};
use crate::detectors::rescue::LevelVerdict;
use crate::detectors::{degradation, note_unit_acknowledgements, rescue, RepairSignals};
use crate::error::{Error, Result};
use crate::fsm::context::{ControlContext, CycleReports, LevelBand};
use crate::fsm::{Fsm, Mode, Trigger};
use crate::mailbox::{Mailbox, Message};
use crate::safety::{self, StopDebouncer};
use crate::transmission::{self, VerifiedReadings};

use super::ports::{MessageSink, SteamBoilerController};

// ───────────────────────────────────────────────────────────────
// BoilerController
// ───────────────────────────────────────────────────────────────

/// Decision core for one steam boiler.
#[derive(Debug, Clone)]
pub struct BoilerController {
    config: BoilerCharacteristics,
    fsm: Fsm,
    ctx: ControlContext,
    stop: StopDebouncer,
}

impl BoilerController {
    /// Build a controller in `Waiting` mode.  Fails if the characteristics
    /// are invalid.
    pub fn new(config: BoilerCharacteristics) -> Result<Self> {
        config.validate()?;
        let ctx = ControlContext::new(&config);
        info!(
            "BoilerController created: {} pumps, normal band [{}, {}]",
            config.number_of_pumps(),
            config.minimal_normal_level,
            config.maximal_normal_level
        );
        Ok(Self {
            config,
            fsm: Fsm::new(),
            ctx,
            stop: StopDebouncer::new(),
        })
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle.
    pub fn clock(&mut self, incoming: &Mailbox, outgoing: &mut dyn MessageSink) {
        self.fsm.begin_cycle();

        // 1. Classify the inbound batch
        let reports = CycleReports::classify(incoming);
        note_unit_acknowledgements(incoming);

        // 2. Stop debounce
        if let Err(fault) = self.stop.observe(reports.stop) {
            self.halt(Trigger::StopDebounced, fault.into(), outgoing);
        }

        // 3. Transmission integrity
        let readings = match transmission::verify(&reports, self.ctx.pump_count()) {
            Ok(readings) => readings,
            Err(fault) => {
                self.halt(Trigger::TransmissionFailure, fault.into(), outgoing);
                return;
            }
        };

        // 4. Mode dispatch
        match self.fsm.current_mode() {
            Mode::Waiting => self.initialise(&readings, reports.units_waiting, outgoing),
            Mode::Ready => {
                self.fsm.apply(Trigger::Started);
                self.announce(outgoing);
            }
            Mode::Normal | Mode::Degraded | Mode::Rescue => {
                self.operate(incoming, &readings, outgoing);
            }
            Mode::EmergencyStop => {}
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Display name of the current mode.
    pub fn status_message(&self) -> &'static str {
        self.fsm.current_mode().name()
    }

    pub fn mode(&self) -> Mode {
        self.fsm.current_mode()
    }

    /// Cycles processed since construction.
    pub fn cycle_count(&self) -> u64 {
        self.fsm.cycle_count()
    }

    /// Consecutive cycles that carried a stop signal.
    pub fn stop_count(&self) -> u32 {
        self.stop.count()
    }

    /// Band the next level reading is expected to fall in.
    pub fn expected_band(&self) -> LevelBand {
        self.ctx.band()
    }

    /// Pumps the controller last commanded open.
    pub fn expected_pump_open(&self) -> &[bool] {
        self.ctx.expected_pump_open()
    }

    pub fn characteristics(&self) -> &BoilerCharacteristics {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Waiting: drive the level into the normal band, then verify that the
    /// boiler is really at rest.
    fn initialise(
        &mut self,
        readings: &VerifiedReadings,
        units_waiting: bool,
        outgoing: &mut dyn MessageSink,
    ) {
        let step = initialisation::sequence(&self.config, readings.level, units_waiting, outgoing);
        if step == InitStep::Ready {
            self.fsm.apply(Trigger::UnitsReady);
        }

        if let Err(fault) = safety::check_initialisation_readings(
            &self.config,
            readings.level,
            Some(readings.steam),
        ) {
            self.halt(Trigger::InitialisationFault, fault.into(), outgoing);
        }
    }

    /// Normal, Degraded or Rescue: detectors in fixed order, then pumps.
    fn operate(
        &mut self,
        incoming: &Mailbox,
        readings: &VerifiedReadings,
        outgoing: &mut dyn MessageSink,
    ) {
        let repairs = RepairSignals::collect(incoming, self.ctx.pump_count());

        // ── Degradation ───────────────────────────────────────
        let degraded = degradation::assess(&self.config, &self.ctx, readings, &repairs, outgoing);
        self.fsm.apply(Trigger::EquipmentAssessed { degraded });
        self.announce(outgoing);

        // ── Rescue (against last cycle's band) ────────────────
        match rescue::assess(self.ctx.band(), readings.level, repairs.level) {
            LevelVerdict::OutOfBand => {
                self.fsm.apply(Trigger::LevelOutOfBand);
                self.announce(outgoing);
                outgoing.send(Message::LevelFailureDetection);
            }
            LevelVerdict::Repaired => outgoing.send(Message::LevelRepairedAcknowledgement),
            LevelVerdict::Consistent => {}
        }

        // ── Hard limits ───────────────────────────────────────
        if let Err(fault) = safety::check_level_limits(&self.config, readings.level) {
            self.halt(Trigger::LimitViolation, fault.into(), outgoing);
        }

        // ── Pump allocation and next band ─────────────────────
        let subset = allocation::allocate(&self.config, &mut self.ctx, readings.level, outgoing);
        self.ctx
            .predict(&self.config, readings.level, subset.pumpage());
    }

    /// Force `EmergencyStop` and announce it.
    fn halt(&mut self, trigger: Trigger, cause: Error, outgoing: &mut dyn MessageSink) {
        error!("EMERGENCY STOP: {cause}");
        self.fsm.apply(trigger);
        self.announce(outgoing);
    }

    /// Announce the current mode, if it has an announcement.
    fn announce(&self, outgoing: &mut dyn MessageSink) {
        if let Some(mode) = self.fsm.current_mode().announcement() {
            outgoing.send(Message::Mode(mode));
        }
    }
}

impl SteamBoilerController for BoilerController {
    fn clock(&mut self, incoming: &Mailbox, outgoing: &mut dyn MessageSink) {
        Self::clock(self, incoming, outgoing);
    }

    fn status_message(&self) -> &str {
        Self::status_message(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::ModeAnnouncement;

    fn controller() -> BoilerController {
        let mut c = BoilerCharacteristics::with_pumps(&[4.0, 4.0]).unwrap();
        c.minimal_normal_level = 100.0;
        c.maximal_normal_level = 200.0;
        c.minimal_limit_level = 20.0;
        c.maximal_limit_level = 280.0;
        c.capacity = 300.0;
        BoilerController::new(c).unwrap()
    }

    fn batch(level: f64, steam: f64, pumps: [bool; 2], extra: &[Message]) -> Mailbox {
        let mut mb = Mailbox::new();
        mb.send(Message::Level(level));
        mb.send(Message::Steam(steam));
        for (pump, open) in pumps.into_iter().enumerate() {
            mb.send(Message::PumpState { pump, open });
            mb.send(Message::PumpControlState { pump, flowing: open });
        }
        for m in extra {
            mb.send(*m);
        }
        mb
    }

    #[test]
    fn rejects_invalid_characteristics() {
        let mut c = BoilerCharacteristics::default();
        c.maximal_steam_rate = 0.0;
        assert!(BoilerController::new(c).is_err());
    }

    #[test]
    fn starts_waiting() {
        let ctl = controller();
        assert_eq!(ctl.mode(), Mode::Waiting);
        assert_eq!(ctl.status_message(), "Waiting");
        assert_eq!(ctl.expected_band(), LevelBand { minimum: 0.0, maximum: 300.0 });
    }

    #[test]
    fn ready_is_promoted_to_normal_next_cycle() {
        let mut ctl = controller();
        let mut out = Mailbox::new();
        ctl.clock(&batch(150.0, 0.0, [false; 2], &[Message::SteamBoilerWaiting]), &mut out);
        assert_eq!(ctl.mode(), Mode::Ready);

        let mut out = Mailbox::new();
        ctl.clock(&batch(150.0, 0.0, [false; 2], &[]), &mut out);
        assert_eq!(ctl.mode(), Mode::Normal);
        assert_eq!(out.as_slice(), &[Message::Mode(ModeAnnouncement::Normal)]);
    }

    #[test]
    fn steam_during_initialisation_is_fatal() {
        let mut ctl = controller();
        let mut out = Mailbox::new();
        ctl.clock(&batch(150.0, 2.0, [false; 2], &[Message::SteamBoilerWaiting]), &mut out);
        assert_eq!(ctl.mode(), Mode::EmergencyStop);
        assert_eq!(
            out.as_slice().last(),
            Some(&Message::Mode(ModeAnnouncement::EmergencyStop))
        );
    }

    #[test]
    fn emergency_stop_cycles_are_silent_when_healthy() {
        let mut ctl = controller();
        let mut out = Mailbox::new();
        ctl.clock(&batch(150.0, 2.0, [false; 2], &[Message::SteamBoilerWaiting]), &mut out);
        assert_eq!(ctl.mode(), Mode::EmergencyStop);

        let mut out = Mailbox::new();
        ctl.clock(&batch(150.0, 0.0, [false; 2], &[]), &mut out);
        assert_eq!(ctl.mode(), Mode::EmergencyStop);
        assert!(out.is_empty());
    }

    #[test]
    fn usable_through_the_port_trait() {
        let mut ctl: Box<dyn SteamBoilerController> = Box::new(controller());
        let mut out = Mailbox::new();
        ctl.clock(&Mailbox::new(), &mut out);
        assert_eq!(ctl.status_message(), "EmergencyStop");
    }
}
