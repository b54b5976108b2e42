//! Fuzz target: `BoilerController::clock`
//!
//! Decodes arbitrary bytes into a sequence of inbound mailboxes and runs
//! them through a three-pump controller, asserting that it never panics,
//! never leaves `EmergencyStop` once entered, and never commands a pump
//! that does not exist.
//!
//! cargo fuzz run fuzz_clock

#![no_main]

use boilerctl::{BoilerCharacteristics, BoilerController, Mailbox, Message, Mode};
use libfuzzer_sys::fuzz_target;

const PUMPS: usize = 3;

/// Three bytes per message: tag, argument, value.  A zero tag ends the
/// current cycle.
fn decode(chunk: &[u8]) -> Option<Message> {
    let (tag, arg, val) = (chunk[0], chunk[1], chunk[2]);
    let pump = usize::from(arg % 5);
    let reading = f64::from(i16::from_le_bytes([arg, val]));
    Some(match tag % 16 {
        0 => return None,
        1 => Message::Stop,
        2 => Message::SteamBoilerWaiting,
        3 => Message::PhysicalUnitsReady,
        4 => Message::Level(reading),
        5 => Message::Steam(reading / 100.0),
        6 => Message::PumpState {
            pump,
            open: val & 1 == 1,
        },
        7 => Message::PumpControlState {
            pump,
            flowing: val & 1 == 1,
        },
        8 => Message::PumpRepaired(pump),
        9 => Message::PumpControlRepaired(pump),
        10 => Message::LevelRepaired,
        11 => Message::SteamRepaired,
        12 => Message::PumpFailureAcknowledgement(pump),
        13 => Message::PumpControlFailureAcknowledgement(pump),
        14 => Message::LevelFailureAcknowledgement,
        _ => Message::SteamOutcomeFailureAcknowledgement,
    })
}

fuzz_target!(|data: &[u8]| {
    let Ok(config) = BoilerCharacteristics::with_pumps(&[5.0, 7.5, 10.0]) else {
        return;
    };
    let Ok(mut ctl) = BoilerController::new(config) else {
        return;
    };

    let mut cycles = Vec::new();
    let mut inbox = Mailbox::new();
    for chunk in data.chunks_exact(3) {
        match decode(chunk) {
            Some(msg) => inbox.send(msg),
            None => cycles.push(std::mem::take(&mut inbox)),
        }
    }
    cycles.push(inbox);

    let mut halted = false;
    for inbox in &cycles {
        let mut out = Mailbox::new();
        ctl.clock(inbox, &mut out);

        if halted {
            assert_eq!(ctl.mode(), Mode::EmergencyStop, "left EmergencyStop");
        }
        halted = ctl.mode() == Mode::EmergencyStop;

        for msg in out.iter() {
            assert!(!msg.kind().is_inbound(), "controller sent {msg}");
            if let Some(pump) = msg.pump() {
                assert!(pump < PUMPS, "command for unknown pump {pump}");
            }
        }
    }
});
