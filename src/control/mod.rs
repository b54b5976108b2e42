//! Pump commands.
//!
//! - [`initialisation`]: fill or drain into the normal band before start.
//! - [`allocation`]: choose the pump subset that best meets the flow
//!   needed to reach the target level in one cycle.

pub mod allocation;
pub mod initialisation;
