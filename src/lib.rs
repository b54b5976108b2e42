//! Steam boiler controller core.
//!
//! A cyclic decision engine: once per cycle the driver hands the
//! controller a [`Mailbox`] of reports from the physical units, calls
//! [`BoilerController::clock`], and ships the commands written to the
//! outbound [`MessageSink`].  The controller keeps the water level inside
//! its safety limits, detects equipment and sensor failures, acknowledges
//! repairs, and falls back to an emergency stop when it can no longer act
//! safely.
//!
//! No transport, clock or logger is installed here.  Logging goes through
//! the `log` facade; the host picks the backend.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod detectors;
pub mod error;
pub mod fsm;
pub mod mailbox;
pub mod safety;
pub mod transmission;

pub use app::ports::{ConfigPort, MessageSink, SteamBoilerController};
pub use app::service::BoilerController;
pub use config::{BoilerCharacteristics, MAX_PUMPS};
pub use error::{Error, Result};
pub use fsm::Mode;
pub use mailbox::{Mailbox, Message, MessageKind, ModeAnnouncement};
