//! HTTP JSON API for the FairDice engine.
//!
//! Provides endpoints for:
//! - Rolling the die (`POST /roll`)
//! - Verifying the current roll or an arbitrary round
//! - Roll history and counters
//! - Health checks

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::RpcServer;
