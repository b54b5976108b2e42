//! Pump allocation.
//!
//! Pumps are on/off devices, so the only way to approximate a required net
//! flow is to choose which subset to open.  With at most
//! [`MAX_PUMPS`](crate::config::MAX_PUMPS) pumps the full search is cheap:
//! every mask `0 ..= 2^n - 1` is tried, bit `i` standing for pump `i`, and
//! the subset whose combined capacity is closest to the requirement wins.
//! On equal deviation the lowest mask (the first one tried) is kept.

use log::debug;

use crate::app::ports::MessageSink;
use crate::config::{BoilerCharacteristics, MAX_PUMPS};
use crate::fsm::context::ControlContext;
use crate::mailbox::Message;

/// A set of pumps chosen to run together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpSubset {
    mask: u32,
    pumpage: f64,
}

impl PumpSubset {
    /// Bitmask of included pumps; bit `i` is pump `i`.
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Combined capacity of the included pumps.
    pub fn pumpage(&self) -> f64 {
        self.pumpage
    }

    pub fn contains(&self, pump: usize) -> bool {
        pump < MAX_PUMPS && self.mask & (1 << pump) != 0
    }

    /// Included pump indices in ascending order.
    pub fn pumps(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_PUMPS).filter(|&p| self.contains(p))
    }
}

/// Net inflow needed to bring `level` to the target within one cycle.
pub fn required_flow(config: &BoilerCharacteristics, level: f64) -> f64 {
    (config.target_level() - level) / config.cycle_duration_secs
}

/// Subset of `capacities` whose sum best approximates `required`.
pub fn best_subset(capacities: &[f64], required: f64) -> PumpSubset {
    debug_assert!(capacities.len() <= MAX_PUMPS);
    let n = capacities.len().min(MAX_PUMPS);

    let mut best = PumpSubset {
        mask: 0,
        pumpage: 0.0,
    };
    let mut best_deviation = required.abs();

    for mask in 1..(1u32 << n) {
        let pumpage: f64 = capacities[..n]
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| c)
            .sum();
        let deviation = (required - pumpage).abs();
        if deviation < best_deviation {
            best = PumpSubset { mask, pumpage };
            best_deviation = deviation;
        }
    }
    best
}

/// Command `subset`: close every pump, then open the chosen ones, keeping
/// the expectations in `ctx` in step with what was sent.
pub fn command(subset: PumpSubset, ctx: &mut ControlContext, sink: &mut dyn MessageSink) {
    let pump_count = ctx.pump_count();
    for pump in 0..pump_count {
        sink.send(Message::ClosePump(pump));
    }
    ctx.clear_expectations();

    for pump in subset.pumps().take_while(|&p| p < pump_count) {
        sink.send(Message::OpenPump(pump));
        ctx.expect_open(pump);
    }
}

/// Choose and command the pumps for a cycle that read `level`.
/// Returns the subset sent.
pub fn allocate(
    config: &BoilerCharacteristics,
    ctx: &mut ControlContext,
    level: f64,
    sink: &mut dyn MessageSink,
) -> PumpSubset {
    let required = required_flow(config, level);
    let subset = best_subset(&config.pump_capacities, required);
    debug!(
        "ALLOC: level={level} required={required:.3} mask=0b{:b} pumpage={}",
        subset.mask(),
        subset.pumpage()
    );
    command(subset, ctx, sink);
    subset
}
