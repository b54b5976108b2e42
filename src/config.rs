//! Boiler characteristics
//!
//! Static physical parameters of the boiler under control.  Supplied once
//! when the controller is built and never changed afterwards.  The values
//! normally come from the external characteristics loader through
//! [`ConfigPort`](crate::app::ports::ConfigPort).

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on the number of pumps.  Pump allocation enumerates every
/// subset, so the search costs `2^pumps` sums per cycle.
pub const MAX_PUMPS: usize = 16;

/// Per-pump capacities, indexed by pump number.
pub type PumpCapacities = Vec<f64, MAX_PUMPS>;

/// Physical characteristics of one steam boiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoilerCharacteristics {
    // --- Tank ---
    /// Total water capacity of the tank (litres).
    pub capacity: f64,
    /// Below this level the boiler is unsafe (litres).
    pub minimal_limit_level: f64,
    /// Above this level the boiler is unsafe (litres).
    pub maximal_limit_level: f64,
    /// Lower edge of the normal operating band (litres).
    pub minimal_normal_level: f64,
    /// Upper edge of the normal operating band (litres).
    pub maximal_normal_level: f64,

    // --- Steam ---
    /// Maximum rate at which steam can leave the boiler (litres/sec).
    pub maximal_steam_rate: f64,

    // --- Pumps ---
    /// Capacity of each pump (litres/sec).  The pump count is the length.
    pub pump_capacities: PumpCapacities,

    // --- Timing ---
    /// Length of one control cycle (seconds).
    pub cycle_duration_secs: f64,
}

impl Default for BoilerCharacteristics {
    fn default() -> Self {
        let mut pump_capacities = PumpCapacities::new();
        for _ in 0..4 {
            // Cannot fail: 4 < MAX_PUMPS.
            let _ = pump_capacities.push(4.0);
        }

        Self {
            // Tank
            capacity: 1000.0,
            minimal_limit_level: 50.0,
            maximal_limit_level: 950.0,
            minimal_normal_level: 300.0,
            maximal_normal_level: 700.0,

            // Steam
            maximal_steam_rate: 10.0,

            // Pumps
            pump_capacities,

            // Timing
            cycle_duration_secs: 5.0,
        }
    }
}

impl BoilerCharacteristics {
    /// Build characteristics for an arbitrary pump set, keeping every other
    /// parameter at its default.
    pub fn with_pumps(capacities: &[f64]) -> Result<Self> {
        let pump_capacities = PumpCapacities::from_slice(capacities)
            .map_err(|()| Error::Config("too many pumps"))?;
        Ok(Self {
            pump_capacities,
            ..Self::default()
        })
    }

    /// Number of pumps fitted to the boiler.
    pub fn number_of_pumps(&self) -> usize {
        self.pump_capacities.len()
    }

    /// Capacity of pump `pump`, or `None` if there is no such pump.
    pub fn pump_capacity(&self, pump: usize) -> Option<f64> {
        self.pump_capacities.get(pump).copied()
    }

    /// Level the controller steers toward: the middle of the normal band.
    pub fn target_level(&self) -> f64 {
        (self.minimal_normal_level + self.maximal_normal_level) / 2.0
    }

    /// Check that the characteristics describe a physically sensible boiler.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.capacity,
            self.minimal_limit_level,
            self.maximal_limit_level,
            self.minimal_normal_level,
            self.maximal_normal_level,
            self.maximal_steam_rate,
            self.cycle_duration_secs,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(Error::Config("non-finite characteristic"));
        }
        if self.pump_capacities.is_empty() {
            return Err(Error::Config("boiler has no pumps"));
        }
        if self
            .pump_capacities
            .iter()
            .any(|c| !c.is_finite() || *c < 0.0)
        {
            return Err(Error::Config("pump capacity must be finite and non-negative"));
        }
        if self.capacity <= 0.0 {
            return Err(Error::Config("tank capacity must be positive"));
        }
        let ordered = 0.0 <= self.minimal_limit_level
            && self.minimal_limit_level <= self.minimal_normal_level
            && self.minimal_normal_level <= self.maximal_normal_level
            && self.maximal_normal_level <= self.maximal_limit_level
            && self.maximal_limit_level <= self.capacity;
        if !ordered {
            return Err(Error::Config(
                "levels must satisfy 0 <= min limit <= min normal <= max normal <= max limit <= capacity",
            ));
        }
        if self.maximal_steam_rate <= 0.0 {
            return Err(Error::Config("maximal steam rate must be positive"));
        }
        if self.cycle_duration_secs <= 0.0 {
            return Err(Error::Config("cycle duration must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = BoilerCharacteristics::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.number_of_pumps(), 4);
        assert!(c.minimal_normal_level < c.target_level());
        assert!(c.target_level() < c.maximal_normal_level);
    }

    #[test]
    fn serde_roundtrip() {
        let c = BoilerCharacteristics::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: BoilerCharacteristics = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn rejects_empty_pump_set() {
        let c = BoilerCharacteristics::with_pumps(&[]).unwrap();
        assert_eq!(c.validate(), Err(Error::Config("boiler has no pumps")));
    }

    #[test]
    fn rejects_too_many_pumps() {
        let caps = [1.0; MAX_PUMPS + 1];
        assert!(BoilerCharacteristics::with_pumps(&caps).is_err());
    }

    #[test]
    fn rejects_inverted_bands() {
        let mut c = BoilerCharacteristics::default();
        c.minimal_normal_level = 800.0;
        assert!(c.validate().is_err());

        let mut c = BoilerCharacteristics::default();
        c.maximal_limit_level = c.capacity + 1.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_negative_pump_capacity() {
        let c = BoilerCharacteristics::with_pumps(&[4.0, -1.0]).unwrap();
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_cycle() {
        let mut c = BoilerCharacteristics::default();
        c.cycle_duration_secs = 0.0;
        assert_eq!(c.validate(), Err(Error::Config("cycle duration must be positive")));
    }

    #[test]
    fn pump_capacity_out_of_range_is_none() {
        let c = BoilerCharacteristics::default();
        assert_eq!(c.pump_capacity(0), Some(4.0));
        assert_eq!(c.pump_capacity(4), None);
    }
}
