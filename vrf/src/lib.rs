//! Verifiable beacon randomness for fair dice.
//!
//! - [`convert`]: bias-free conversion of hex randomness into a die face.
//! - [`source`]: the latest beacon round, with a local fallback when the
//!   beacon is unreachable.
//! - [`verify`]: ordered authenticity checks with a remote-then-local strategy.
//! - [`beacon`]: the HTTP client shared by the two network-facing components.

pub mod beacon;
pub mod convert;
pub mod entropy;
pub mod error;
pub mod source;
pub mod verify;

pub use beacon::{BeaconClient, DEFAULT_BEACON_URL, DEFAULT_REQUEST_TIMEOUT};
pub use convert::{draw, draw_strict, face, DIE_SIDES, MAX_SIDES};
pub use entropy::OsEntropy;
pub use error::VrfError;
pub use source::{BeaconSource, RoundOrigin};
pub use verify::ProofVerifier;
