//! Suppressing re-delivery of strobed frames.
//!
//! A strobed sender repeats the same frame many times, and a receiver that wakes early in the
//! strobe window will take several copies in. This filter remembers the last few delivered
//! frames by `(sender, sequence number)` so every copy after the first is dropped before it
//! reaches the upper MAC.

use crate::addr::NodeAddress;

/// A most-recently-seen table of `(sender, sequence number)` pairs.
///
/// Capacity `N` is small on purpose: duplicates arrive within one strobe window, so remembering
/// more than a handful of frames buys nothing.
pub struct ReplayFilter<const N: usize = 2> {
    entries: [(NodeAddress, u8); N],
}

impl<const N: usize> ReplayFilter<N> {
    /// Creates an empty filter.
    ///
    /// The table starts out filled with the null address, which no real sender uses.
    pub const fn new() -> Self {
        Self {
            entries: [(NodeAddress::BROADCAST, 0); N],
        }
    }

    /// Returns whether `(sender, seqno)` matches a remembered frame.
    pub fn seen(&self, sender: NodeAddress, seqno: u8) -> bool {
        self.entries.iter().any(|e| e.0 == sender && e.1 == seqno)
    }

    /// Remembers `(sender, seqno)` as the most recent frame, evicting the oldest entry.
    pub fn record(&mut self, sender: NodeAddress, seqno: u8) {
        for i in (1..N).rev() {
            self.entries[i] = self.entries[i - 1];
        }
        self.entries[0] = (sender, seqno);
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.entries = [(NodeAddress::BROADCAST, 0); N];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> NodeAddress {
        NodeAddress::new([n, 0])
    }

    #[test]
    fn remembers_most_recent() {
        let mut filter = ReplayFilter::<2>::new();
        filter.record(addr(1), 17);
        assert!(filter.seen(addr(1), 17));
        assert!(!filter.seen(addr(1), 18));
        assert!(!filter.seen(addr(2), 17));
        assert_eq!(filter.entries[0], (addr(1), 17));
    }

    #[test]
    fn evicts_oldest() {
        let mut filter = ReplayFilter::<2>::new();
        filter.record(addr(1), 1);
        filter.record(addr(2), 2);
        filter.record(addr(3), 3);

        assert!(!filter.seen(addr(1), 1));
        assert!(filter.seen(addr(2), 2));
        assert!(filter.seen(addr(3), 3));
        assert_eq!(filter.entries[0], (addr(3), 3));
    }

    #[test]
    fn clear_forgets() {
        let mut filter = ReplayFilter::<2>::new();
        filter.record(addr(1), 1);
        filter.clear();
        assert!(!filter.seen(addr(1), 1));
    }
}
