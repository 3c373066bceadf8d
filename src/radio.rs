//! The radio hardware abstraction consumed by the MAC.
//!
//! A radio driver already implements a few link-layer aspects on its own (CRC checking, address
//! recognition, sometimes automatic ACKs). This trait deliberately exposes only what the
//! duty-cycling logic needs: power control, staging and (re)transmitting a frame, a single-shot
//! CCA sample, and enough visibility into the receive pipeline to spot an ACK arriving between
//! two repetitions of a strobe.
//!
//! The radio is assumed to come back to receive mode by itself after transmitting or receiving;
//! the MAC turns it off explicitly whenever it wants silence.

/// Result of a (re)transmission attempt, as reported by the radio driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TxResult {
    /// The frame went out.
    Sent,

    /// The driver backed off because the channel was occupied.
    Collision,

    /// The driver waited for an automatic ACK and none arrived.
    ///
    /// Only drivers doing hardware or driver-level ACKs report this; the strobe loop keeps
    /// repeating on it, since a later repetition may still be acknowledged.
    NoAck,

    /// The transmission failed for another reason (FIFO underflow, radio fault, ...).
    Err,
}

/// Trait for radio drivers.
///
/// All methods take `&mut self`: even nominally read-only queries like [`channel_clear`] tend to
/// require bus traffic on SPI-attached radios.
///
/// [`channel_clear`]: #tymethod.channel_clear
pub trait Radio {
    /// Powers the radio up into receive mode.
    ///
    /// The MAC tracks the on/off state itself and will not call this redundantly, but the call
    /// must be harmless if it happens.
    fn on(&mut self);

    /// Powers the radio down.
    fn off(&mut self);

    /// Stages a complete frame into the transmit FIFO without sending it.
    ///
    /// The staged frame must remain valid for any number of subsequent [`transmit`] calls; the
    /// strobe loop retransmits the same staged frame repeatedly.
    ///
    /// [`transmit`]: #tymethod.transmit
    fn prepare(&mut self, frame: &[u8]);

    /// Transmits the staged frame of `len` bytes.
    fn transmit(&mut self, len: usize) -> TxResult;

    /// Performs a clear channel assessment: `true` if the channel is currently idle.
    fn channel_clear(&mut self) -> bool;

    /// Returns `true` while a frame is actively being received.
    fn receiving_packet(&mut self) -> bool;

    /// Returns `true` when a complete, unread frame sits in the receive FIFO.
    fn pending_packet(&mut self) -> bool;

    /// Copies the pending frame out of the receive FIFO into `buf`.
    ///
    /// Returns the number of bytes actually copied, which is 0 if nothing was pending and may be
    /// less than the frame's full length if `buf` is smaller.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Synchronously prepares and transmits `frame` in one call.
    ///
    /// Only used for the MAC's own ACK frames, which must go out with as little latency as
    /// possible and must not disturb a staged outgoing frame beyond what the driver requires.
    fn send(&mut self, frame: &[u8]) -> TxResult;
}
