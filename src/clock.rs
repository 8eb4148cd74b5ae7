// Clock abstraction so countdown waits can run without real sleeps in tests
use std::time::Duration;

/// Trait for abstracting sleeps in time-dependent code
pub trait Clock {
    /// Sleep for the given duration
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// System clock implementation using real time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
