//! Port traits: the boundary between the controller core and its driver.
//!
//! ```text
//!   transport ──▶ Mailbox ──▶ SteamBoilerController ──▶ MessageSink ──▶ transport
//!   loader ──▶ ConfigPort ──▶ BoilerCharacteristics
//! ```
//!
//! The external driver owns cadence: it fills an inbound [`Mailbox`],
//! calls [`SteamBoilerController::clock`] once per cycle, then ships
//! whatever the controller sent to the [`MessageSink`].

use crate::config::BoilerCharacteristics;
use crate::mailbox::{Mailbox, Message};

// ───────────────────────────────────────────────────────────────
// Message sink (controller → physical units)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the controller emits every outbound message here,
/// in order.
pub trait MessageSink {
    fn send(&mut self, msg: Message);
}

// ───────────────────────────────────────────────────────────────
// Controller contract (driver → controller)
// ───────────────────────────────────────────────────────────────

/// What a cyclic driver needs from a boiler controller.
pub trait SteamBoilerController {
    /// Process one cycle: read `incoming`, write commands to `outgoing`.
    fn clock(&mut self, incoming: &Mailbox, outgoing: &mut dyn MessageSink);

    /// Short human-readable status for display.  Carries no meaning for
    /// any collaborator.
    fn status_message(&self) -> &str;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (characteristics loader ↔ controller)
// ───────────────────────────────────────────────────────────────

/// Loads and persists boiler characteristics.
///
/// Implementations must validate before persisting and reject invalid
/// values with [`ConfigError::ValidationFailed`] rather than clamping them.
pub trait ConfigPort {
    /// Load characteristics from storage.
    fn load(&self) -> Result<BoilerCharacteristics, ConfigError>;

    /// Validate and persist characteristics.
    fn save(&self, config: &BoilerCharacteristics) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No characteristics found in storage.
    NotFound,
    /// Stored characteristics could not be deserialised.
    Corrupted,
    /// A characteristic failed validation.
    /// The `&'static str` describes which one and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "characteristics not found"),
            Self::Corrupted => write!(f, "characteristics corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
