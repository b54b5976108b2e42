//! Degradation detector.
//!
//! Compares what the controller commanded last cycle with what the pumps
//! and pump controllers now report, and checks the steam sensor against
//! its physical range.  The verdict is recomputed from scratch every cycle:
//! a pump that was faulty stays faulty only while it keeps disagreeing.
//!
//! ## Repair protocol
//!
//! A failure is announced with a `*_FAILURE_DETECTION` message.  When the
//! physical units later send `*_REPAIRED` and the equipment once again
//! behaves as commanded, the controller answers with
//! `*_REPAIRED_ACKNOWLEDGEMENT`.

use log::{error, info};

use crate::app::ports::MessageSink;
use crate::config::BoilerCharacteristics;
use crate::fsm::context::ControlContext;
use crate::mailbox::Message;
use crate::transmission::VerifiedReadings;

use super::RepairSignals;

/// Run the degradation checks, emitting detections and acknowledgements.
/// Returns `true` if any equipment is degraded this cycle.
pub fn assess(
    config: &BoilerCharacteristics,
    ctx: &ControlContext,
    readings: &VerifiedReadings,
    repairs: &RepairSignals,
    sink: &mut dyn MessageSink,
) -> bool {
    let mut degraded = check_steam(config, readings.steam, repairs.steam, sink);

    let expected = ctx
        .expected_pump_open()
        .iter()
        .zip(ctx.expected_pump_control());
    let reported = readings.pump_open.iter().zip(readings.pump_control.iter());

    for (pump, ((&expected_open, &expected_control), (&open, &control))) in
        expected.zip(reported).enumerate()
    {
        // ── Pump controller ──────────────────────────────────
        if expected_control != control && control != open {
            error!("DEGRADED: pump controller {pump} reports {control}, pump reports {open}");
            sink.send(Message::PumpControlFailureDetection(pump));
            degraded = true;
        } else if expected_control == control
            && repairs.pump_control_repaired(pump)
            && control == open
        {
            info!("REPAIR: pump controller {pump} acknowledged");
            sink.send(Message::PumpControlRepairedAcknowledgement(pump));
        }

        // ── Pump ─────────────────────────────────────────────
        if expected_open != open {
            error!("DEGRADED: pump {pump} expected open={expected_open}, reports {open}");
            sink.send(Message::PumpFailureDetection(pump));
            degraded = true;
        } else if repairs.pump_repaired(pump) {
            info!("REPAIR: pump {pump} acknowledged");
            sink.send(Message::PumpRepairedAcknowledgement(pump));
        }
    }

    degraded
}

/// Steam must lie in `[0, maximal_steam_rate]`.
fn check_steam(
    config: &BoilerCharacteristics,
    steam: f64,
    repaired: bool,
    sink: &mut dyn MessageSink,
) -> bool {
    if (0.0..=config.maximal_steam_rate).contains(&steam) {
        if repaired {
            info!("REPAIR: steam sensor acknowledged");
            sink.send(Message::SteamRepairedAcknowledgement);
        }
        false
    } else {
        error!(
            "DEGRADED: steam {steam} outside [0, {}]",
            config.maximal_steam_rate
        );
        sink.send(Message::SteamFailureDetection);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::context::PumpFlags;
    use crate::mailbox::Mailbox;

    fn config() -> BoilerCharacteristics {
        BoilerCharacteristics::with_pumps(&[4.0, 4.0]).unwrap()
    }

    fn flags(v: &[bool]) -> PumpFlags {
        PumpFlags::from_slice(v).unwrap()
    }

    fn readings(open: &[bool], control: &[bool], steam: f64) -> VerifiedReadings {
        VerifiedReadings {
            level: 500.0,
            steam,
            pump_open: flags(open),
            pump_control: flags(control),
        }
    }

    fn repairs(inbox: &[Message]) -> RepairSignals {
        let ib: Mailbox = inbox.iter().copied().collect();
        RepairSignals::collect(&ib, 2)
    }

    #[test]
    fn agreement_is_healthy_and_silent() {
        let c = config();
        let ctx = ControlContext::new(&c);
        let mut out = Mailbox::new();
        let degraded = assess(
            &c,
            &ctx,
            &readings(&[false, false], &[false, false], 5.0),
            &repairs(&[]),
            &mut out,
        );
        assert!(!degraded);
        assert!(out.is_empty());
    }

    #[test]
    fn steam_out_of_range() {
        let c = config();
        let ctx = ControlContext::new(&c);
        for steam in [-0.5, c.maximal_steam_rate + 0.5] {
            let mut out = Mailbox::new();
            assert!(assess(
                &c,
                &ctx,
                &readings(&[false, false], &[false, false], steam),
                &repairs(&[Message::SteamRepaired]),
                &mut out,
            ));
            assert_eq!(out.as_slice(), &[Message::SteamFailureDetection]);
        }
    }

    #[test]
    fn steam_repair_acknowledged_only_in_range() {
        let c = config();
        let ctx = ControlContext::new(&c);
        let mut out = Mailbox::new();
        assess(
            &c,
            &ctx,
            &readings(&[false, false], &[false, false], c.maximal_steam_rate),
            &repairs(&[Message::SteamRepaired]),
            &mut out,
        );
        assert_eq!(out.as_slice(), &[Message::SteamRepairedAcknowledgement]);
    }

    #[test]
    fn pump_disagreement_is_detected() {
        let c = config();
        let mut ctx = ControlContext::new(&c);
        ctx.expect_open(1);
        let mut out = Mailbox::new();
        // Pump 1 stayed closed; its controller agrees with the pump.
        let degraded = assess(
            &c,
            &ctx,
            &readings(&[false, false], &[false, false], 0.0),
            &repairs(&[]),
            &mut out,
        );
        assert!(degraded);
        assert_eq!(out.as_slice(), &[Message::PumpFailureDetection(1)]);
    }

    #[test]
    fn controller_disagreeing_with_pump_and_command() {
        let c = config();
        let mut ctx = ControlContext::new(&c);
        ctx.expect_open(0);
        let mut out = Mailbox::new();
        // Pump 0 opened, but its controller reports no flow.
        let degraded = assess(
            &c,
            &ctx,
            &readings(&[true, false], &[false, false], 0.0),
            &repairs(&[]),
            &mut out,
        );
        assert!(degraded);
        assert_eq!(out.as_slice(), &[Message::PumpControlFailureDetection(0)]);
    }

    #[test]
    fn repaired_pump_acknowledged_once_it_agrees() {
        let c = config();
        let mut ctx = ControlContext::new(&c);
        ctx.expect_open(0);
        let mut out = Mailbox::new();
        let degraded = assess(
            &c,
            &ctx,
            &readings(&[true, false], &[true, false], 0.0),
            &repairs(&[Message::PumpRepaired(0), Message::PumpControlRepaired(0)]),
            &mut out,
        );
        assert!(!degraded);
        assert_eq!(
            out.as_slice(),
            &[
                Message::PumpControlRepairedAcknowledgement(0),
                Message::PumpRepairedAcknowledgement(0),
            ]
        );
    }

    #[test]
    fn repair_notice_for_still_faulty_pump_is_not_acknowledged() {
        let c = config();
        let mut ctx = ControlContext::new(&c);
        ctx.expect_open(1);
        let mut out = Mailbox::new();
        assess(
            &c,
            &ctx,
            &readings(&[false, false], &[false, true], 0.0),
            &repairs(&[Message::PumpRepaired(1)]),
            &mut out,
        );
        assert_eq!(out.as_slice(), &[Message::PumpFailureDetection(1)]);
    }
}
