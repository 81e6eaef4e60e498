//! Shared utilities for FairDice.

pub mod format;
pub mod logging;
pub mod time;

pub use format::{format_hash, shannon_entropy};
pub use logging::{init_logging, LogFormat};
pub use time::{format_timestamp, relative_time};
