use jiff::Timestamp;

#[cfg(any(test, feature = "test-util"))]
pub use manual::ManualClock;

/// Source of creation timestamps.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(any(test, feature = "test-util"))]
mod manual {
    use super::Clock;
    use jiff::{SignedDuration, Timestamp};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// A clock that only moves when told to.
    ///
    /// Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<Timestamp>>,
    }

    impl ManualClock {
        pub fn new(now: Timestamp) -> Self {
            Self {
                now: Arc::new(Mutex::new(now)),
            }
        }

        /// Moves the clock forward (or backward, for a negative duration).
        pub fn advance(&self, by: SignedDuration) {
            let mut now = self.now.lock();
            *now = *now + by;
        }

        pub fn set(&self, to: Timestamp) {
            *self.now.lock() = to;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            *self.now.lock()
        }
    }
}
