//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter       | Implements    | Connects to                 |
//! |---------------|---------------|-----------------------------|
//! | `json_config` | ConfigPort    | JSON characteristics file   |
//! | `log_sink`    | MessageSink   | `log` output + inner sink   |

pub mod json_config;
pub mod log_sink;
