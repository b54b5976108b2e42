//! Application core: pure decision logic, zero I/O.
//!
//! This module holds the cycle orchestration for one boiler.  All
//! interaction with the physical units happens through the **port traits**
//! in [`ports`], so the controller is fully testable with an in-memory
//! [`Mailbox`](crate::mailbox::Mailbox) on both sides.

pub mod ports;
pub mod service;
