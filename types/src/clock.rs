//! Clock abstraction.
//!
//! Local fallback rounds are stamped with the current time. Production code
//! reads the system clock; tests plug in a `NullClock` from `fairdice-nullables`.

use crate::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The operating system's wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
