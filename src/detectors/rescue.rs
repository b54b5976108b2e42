//! Rescue detector: is the level sensor believable?
//!
//! Last cycle's allocation predicted a band for this cycle's level
//! reading.  A reading outside it means the level sensor cannot be
//! trusted, and the controller falls back to rescue mode.  Must run
//! before allocation replaces the band.

use log::{error, info};

use crate::fsm::context::LevelBand;

/// Outcome of comparing a level reading with the predicted band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelVerdict {
    /// Reading inside the band, no repair pending.
    Consistent,
    /// Reading inside the band and the sensor was reported repaired.
    Repaired,
    /// Reading outside the band.
    OutOfBand,
}

pub fn assess(band: LevelBand, level: f64, repaired: bool) -> LevelVerdict {
    if !band.contains(level) {
        error!(
            "RESCUE: level {level} outside predicted [{}, {}]",
            band.minimum, band.maximum
        );
        LevelVerdict::OutOfBand
    } else if repaired {
        info!("REPAIR: level sensor acknowledged");
        LevelVerdict::Repaired
    } else {
        LevelVerdict::Consistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: LevelBand = LevelBand {
        minimum: 480.0,
        maximum: 520.0,
    };

    #[test]
    fn inside_band() {
        assert_eq!(assess(BAND, 500.0, false), LevelVerdict::Consistent);
        assert_eq!(assess(BAND, 480.0, false), LevelVerdict::Consistent);
        assert_eq!(assess(BAND, 520.0, false), LevelVerdict::Consistent);
    }

    #[test]
    fn outside_band_wins_over_repair() {
        assert_eq!(assess(BAND, 470.0, true), LevelVerdict::OutOfBand);
        assert_eq!(assess(BAND, 530.0, false), LevelVerdict::OutOfBand);
    }

    #[test]
    fn repair_inside_band() {
        assert_eq!(assess(BAND, 500.0, true), LevelVerdict::Repaired);
    }
}
