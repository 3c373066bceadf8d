//! Platform watchdog hookup.

/// A watchdog that needs periodic attention.
///
/// A strobed transmission busy-waits for longer than one wake-up period, which on small MCUs can
/// exceed the watchdog timeout. The MAC kicks the watchdog once per strobe repetition so a send
/// never resets the node.
pub trait Watchdog {
    /// Signals that the system is still making progress.
    fn periodic(&mut self);
}

/// A `Watchdog` for platforms without one (or with one managed elsewhere).
pub struct NoWatchdog;

impl Watchdog for NoWatchdog {
    fn periodic(&mut self) {}
}
