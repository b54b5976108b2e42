//! Transmission integrity check.
//!
//! Runs every cycle, whatever the mode.  A batch passes only if it carries
//! exactly one level reading, exactly one steam reading, and exactly one
//! state report plus one controller report for every pump.  The result is a
//! [`VerifiedReadings`] keyed by pump index, so no detector ever indexes an
//! unchecked list.

use crate::error::TransmissionFault;
use crate::fsm::context::{CycleReports, PumpFlags};

/// Readings that passed the integrity check.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedReadings {
    pub level: f64,
    pub steam: f64,
    /// Reported pump states, indexed by pump.
    pub pump_open: PumpFlags,
    /// Reported pump controller states, indexed by pump.
    pub pump_control: PumpFlags,
}

/// Validate one cycle's reports against the configured pump count.
pub fn verify(
    reports: &CycleReports,
    pump_count: usize,
) -> Result<VerifiedReadings, TransmissionFault> {
    let level = reports.level.ok_or(TransmissionFault::MissingLevel)?;
    let steam = reports.steam.ok_or(TransmissionFault::MissingSteam)?;

    let pump_open = keyed_by_pump(
        &reports.pump_states,
        pump_count,
        |found| TransmissionFault::PumpStateCount {
            expected: pump_count,
            found,
        },
        |pump| TransmissionFault::PumpStateIndex { pump },
    )?;
    let pump_control = keyed_by_pump(
        &reports.pump_control_states,
        pump_count,
        |found| TransmissionFault::PumpControlStateCount {
            expected: pump_count,
            found,
        },
        |pump| TransmissionFault::PumpControlStateIndex { pump },
    )?;

    Ok(VerifiedReadings {
        level,
        steam,
        pump_open,
        pump_control,
    })
}

/// Arrange per-pump reports by pump index.  Exactly one report per pump.
fn keyed_by_pump(
    reports: &[(usize, bool)],
    pump_count: usize,
    count_fault: impl Fn(usize) -> TransmissionFault,
    index_fault: impl Fn(usize) -> TransmissionFault,
) -> Result<PumpFlags, TransmissionFault> {
    if reports.len() != pump_count {
        return Err(count_fault(reports.len()));
    }

    let mut flags = PumpFlags::new();
    flags
        .resize(pump_count, false)
        .map_err(|()| count_fault(reports.len()))?;
    let mut seen = PumpFlags::new();
    seen.resize(pump_count, false)
        .map_err(|()| count_fault(reports.len()))?;

    for &(pump, flag) in reports {
        match seen.get_mut(pump) {
            Some(s) if !*s => {
                *s = true;
                flags[pump] = flag;
            }
            _ => return Err(index_fault(pump)),
        }
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reports(pumps: usize) -> CycleReports {
        CycleReports {
            level: Some(500.0),
            steam: Some(0.0),
            pump_states: (0..pumps).map(|i| (i, i % 2 == 0)).collect(),
            pump_control_states: (0..pumps).map(|i| (i, false)).collect(),
            ..CycleReports::default()
        }
    }

    #[test]
    fn complete_batch_passes() {
        let v = verify(&reports(4), 4).unwrap();
        assert_eq!(v.level, 500.0);
        assert_eq!(v.pump_open.as_slice(), &[true, false, true, false]);
        assert_eq!(v.pump_control.as_slice(), &[false; 4]);
    }

    #[test]
    fn reports_are_keyed_by_pump_not_position() {
        let mut r = reports(2);
        r.pump_states = vec![(1, true), (0, false)];
        let v = verify(&r, 2).unwrap();
        assert_eq!(v.pump_open.as_slice(), &[false, true]);
    }

    #[test]
    fn missing_level() {
        let mut r = reports(4);
        r.level = None;
        assert_eq!(verify(&r, 4), Err(TransmissionFault::MissingLevel));
    }

    #[test]
    fn missing_steam() {
        let mut r = reports(4);
        r.steam = None;
        assert_eq!(verify(&r, 4), Err(TransmissionFault::MissingSteam));
    }

    #[test]
    fn wrong_pump_state_count() {
        let mut r = reports(4);
        r.pump_states.pop();
        assert_eq!(
            verify(&r, 4),
            Err(TransmissionFault::PumpStateCount { expected: 4, found: 3 })
        );
    }

    #[test]
    fn wrong_pump_control_count() {
        let mut r = reports(4);
        r.pump_control_states.push((0, true));
        assert_eq!(
            verify(&r, 4),
            Err(TransmissionFault::PumpControlStateCount { expected: 4, found: 5 })
        );
    }

    #[test]
    fn repeated_pump_is_rejected() {
        let mut r = reports(2);
        r.pump_states = vec![(0, true), (0, false)];
        assert_eq!(verify(&r, 2), Err(TransmissionFault::PumpStateIndex { pump: 0 }));
    }

    #[test]
    fn unknown_pump_is_rejected() {
        let mut r = reports(2);
        r.pump_control_states = vec![(0, true), (7, false)];
        assert_eq!(
            verify(&r, 2),
            Err(TransmissionFault::PumpControlStateIndex { pump: 7 })
        );
    }
}
