//! Logging utilities.
//!
//! The engine only talks to the `log` facade; hosts that already install a
//! logger can skip this module. `init_logging` wires up `env_logger` for
//! binaries and tests.

mod init;

pub use init::{init_logging, LoggingConfig};
