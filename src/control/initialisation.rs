//! Initialisation sequencing.
//!
//! While the boiler is `Waiting`, each cycle with a level reading nudges
//! the water toward the normal band: drain through the valve when too
//! full, open every pump when too empty, and declare the program ready
//! once the level sits inside the band.

use log::{debug, info};

use crate::app::ports::MessageSink;
use crate::config::BoilerCharacteristics;
use crate::mailbox::{Message, ModeAnnouncement};

/// What the sequencer did this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Physical units have not reported waiting yet; nothing commanded.
    AwaitingUnits,
    /// Level above the normal band; valve opened.
    Draining,
    /// Level below the normal band; every pump opened.
    Filling,
    /// Level inside the normal band; program ready, pumps closed.
    Ready,
}

/// Run one initialisation step.  Always announces `Initialisation` first.
pub fn sequence(
    config: &BoilerCharacteristics,
    level: f64,
    units_waiting: bool,
    sink: &mut dyn MessageSink,
) -> InitStep {
    sink.send(Message::Mode(ModeAnnouncement::Initialisation));

    if !units_waiting {
        debug!("INIT: physical units not waiting yet");
        return InitStep::AwaitingUnits;
    }

    let pumps = config.number_of_pumps();
    if level > config.maximal_normal_level {
        debug!("INIT: level {level} above normal band, draining");
        sink.send(Message::Valve);
        InitStep::Draining
    } else if level < config.minimal_normal_level {
        debug!("INIT: level {level} below normal band, filling");
        for pump in 0..pumps {
            sink.send(Message::OpenPump(pump));
        }
        InitStep::Filling
    } else {
        info!("INIT: level {level} inside normal band, program ready");
        sink.send(Message::ProgramReady);
        for pump in 0..pumps {
            sink.send(Message::ClosePump(pump));
        }
        InitStep::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::Mailbox;

    fn config() -> BoilerCharacteristics {
        let mut c = BoilerCharacteristics::with_pumps(&[4.0, 4.0]).unwrap();
        c.minimal_normal_level = 100.0;
        c.maximal_normal_level = 200.0;
        c
    }

    #[test]
    fn inside_band_declares_ready() {
        let mut out = Mailbox::new();
        assert_eq!(sequence(&config(), 150.0, true, &mut out), InitStep::Ready);
        assert_eq!(
            out.as_slice(),
            &[
                Message::Mode(ModeAnnouncement::Initialisation),
                Message::ProgramReady,
                Message::ClosePump(0),
                Message::ClosePump(1),
            ]
        );
    }

    #[test]
    fn above_band_opens_valve() {
        let mut out = Mailbox::new();
        assert_eq!(sequence(&config(), 250.0, true, &mut out), InitStep::Draining);
        assert_eq!(
            out.as_slice(),
            &[Message::Mode(ModeAnnouncement::Initialisation), Message::Valve]
        );
    }

    #[test]
    fn below_band_opens_every_pump() {
        let mut out = Mailbox::new();
        assert_eq!(sequence(&config(), 50.0, true, &mut out), InitStep::Filling);
        assert_eq!(
            out.as_slice(),
            &[
                Message::Mode(ModeAnnouncement::Initialisation),
                Message::OpenPump(0),
                Message::OpenPump(1),
            ]
        );
    }

    #[test]
    fn band_edges_count_as_inside() {
        let mut out = Mailbox::new();
        assert_eq!(sequence(&config(), 100.0, true, &mut out), InitStep::Ready);
        assert_eq!(sequence(&config(), 200.0, true, &mut out), InitStep::Ready);
    }

    #[test]
    fn waits_for_units() {
        let mut out = Mailbox::new();
        assert_eq!(
            sequence(&config(), 150.0, false, &mut out),
            InitStep::AwaitingUnits
        );
        assert_eq!(
            out.as_slice(),
            &[Message::Mode(ModeAnnouncement::Initialisation)]
        );
    }
}
