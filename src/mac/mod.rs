//! The duty-cycling MAC.
//!
//! Every node keeps its radio off and wakes at a fixed rate, listening for traffic for a short
//! moment. To reach a neighbor, a node transmits the same frame over and over until either a
//! full wake-up period is covered or, for unicasts, the destination acknowledges and the sender
//! can stop early. The repetitions are timed so that at least one complete frame falls into any
//! receiver's sample window:
//!
//! ```notrust
//! | = on/tx    - = on/rx    _ = off
//!
//! idle listening:
//!
//!     ____________+--+____________+--+____________+--+____________
//!                      t_off      t_on
//!
//! transmitting:
//!
//!     ____________+--+______|_|_|_|_|_|_|_|_|_|___+--+____________
//!                                            ^ t_between
//!                           |------t_tx------|
//! ```
//!
//! ACKs can come from the radio hardware, from the radio driver, or from this MAC itself
//! ([`Config::SOFTWARE_ACK`]), in descending order of speed and efficiency. MAC-level ACKs exist
//! purely so a sender can finish early and save energy; there is no retransmission at this
//! layer, upper layers retry if they need reliability.
//!
//! Received frames are deduplicated with a small [`ReplayFilter`], since a receiver that wakes
//! early in a strobe will take in several copies of the same frame.
//!
//! # Driving the MAC
//!
//! The three entry points are called from the platform glue:
//!
//! * [`RdcLayer::cycle`] whenever the duty-cycle timer fires; re-arm the timer with the returned
//!   duration.
//! * [`RdcLayer::input`] after placing a received raw frame into the packet buffer.
//! * [`RdcLayer::send`] / [`RdcLayer::send_list`] from the upper MAC. Sends run to completion on
//!   the caller's context and busy-wait internally; on preemptive platforms all three entry
//!   points must be serialized by the integration.
//!
//! [`Config::SOFTWARE_ACK`]: ../config/trait.Config.html#associatedconstant.SOFTWARE_ACK
//! [`ReplayFilter`]: struct.ReplayFilter.html
//! [`RdcLayer::cycle`]: struct.RdcLayer.html#method.cycle
//! [`RdcLayer::input`]: struct.RdcLayer.html#method.input
//! [`RdcLayer::send`]: struct.RdcLayer.html#method.send
//! [`RdcLayer::send_list`]: struct.RdcLayer.html#method.send_list

mod cycle;
mod dedup;
mod gate;
mod header;
mod strobe;
#[cfg(test)]
pub(crate) mod testutil;
mod timing;

pub use self::cycle::{DefaultInspector, SampleInspector, SampleStatus};
pub use self::dedup::ReplayFilter;
pub use self::header::{StrobeHeader, STROBE_HDR_LEN};
pub use self::timing::{Timings, ACK_LEN};

use self::cycle::CyclePhase;
use self::gate::Gate;
use crate::addr::NodeAddress;
use crate::config::Config;
use crate::framer::Framer;
use crate::packetbuf::PacketBuf;
use crate::queue::QueuedFrame;
use crate::radio::Radio;
use crate::time::Duration;

/// Outcome of a transmission, reported to the upper MAC's completion callback.
///
/// Everything except [`ErrFatal`] may be retried by the upper MAC at its leisure; retrying a
/// fatal error will fail the same way again.
///
/// [`ErrFatal`]: #variant.ErrFatal
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// The strobe completed; for acknowledged unicasts this means the ACK was seen.
    Ok,

    /// Another transmitter was active: the channel was busy before the strobe, the radio
    /// reported a collision, or something other than the expected ACK arrived mid-strobe.
    Collision,

    /// The strobe window elapsed without an ACK for this unicast.
    NoAck,

    /// The transmission was deferred to a later time; no completion callback fires for it.
    Deferred,

    /// The radio reported a transmission error.
    Err,

    /// The transmission could not be attempted: the MAC is turned off, the packet buffer is
    /// empty, or the frame's headers don't fit.
    ErrFatal,
}

/// Implementation of the duty-cycling MAC logic.
///
/// Users of this struct must provide an interface to the platform's hardware by implementing
/// [`Config`].
///
/// `SEQNO_HISTORY` sets how many recently delivered frames the [`ReplayFilter`] remembers per
/// node. The default of 2 covers duplicates within a single strobe window; raise it on nodes
/// with many chatty neighbors.
///
/// [`Config`]: ../config/trait.Config.html
/// [`ReplayFilter`]: struct.ReplayFilter.html
pub struct RdcLayer<C: Config, const SEQNO_HISTORY: usize = 2> {
    node_addr: NodeAddress,
    radio: C::Radio,
    timer: C::Timer,
    watchdog: C::Watchdog,
    inspector: C::Inspector,
    framer: C::Framer,
    buf: PacketBuf,
    gate: Gate,
    seen: ReplayFilter<SEQNO_HISTORY>,
    tx_serial: u8,
    cycle_phase: CyclePhase,
    timings: Timings,
}

impl<C: Config, const SEQNO_HISTORY: usize> RdcLayer<C, SEQNO_HISTORY> {
    /// Creates a new MAC instance and enables duty cycling.
    ///
    /// The radio is assumed to be off. Duty cycling begins with the first [`cycle`] call, which
    /// the integration should schedule right away.
    ///
    /// # Parameters
    ///
    /// * **`node_addr`**: this node's link-layer address; must not be the null address.
    /// * **`radio`**, **`timer`**, **`framer`**, **`watchdog`**, **`inspector`**: the hardware
    ///   services from [`Config`].
    ///
    /// [`cycle`]: #method.cycle
    /// [`Config`]: ../config/trait.Config.html
    pub fn new(
        node_addr: NodeAddress,
        radio: C::Radio,
        timer: C::Timer,
        framer: C::Framer,
        watchdog: C::Watchdog,
        inspector: C::Inspector,
    ) -> Self {
        debug_assert!(!node_addr.is_broadcast());

        let mut gate = Gate::new();
        gate.enable();

        Self {
            node_addr,
            radio,
            timer,
            watchdog,
            inspector,
            framer,
            buf: PacketBuf::new(),
            gate,
            seen: ReplayFilter::new(),
            tx_serial: 1,
            cycle_phase: CyclePhase::Asleep,
            timings: Timings::derive(C::CHECK_RATE_HZ, C::SOFTWARE_ACK),
        }
    }

    /// Transmits the frame staged in the packet buffer.
    ///
    /// Blocks for up to one strobe window, then invokes `cb` with the outcome and the number of
    /// transmission attempts made at this layer (always 1; there are no retries here). The
    /// callback is skipped only for [`TxStatus::Deferred`].
    ///
    /// [`TxStatus::Deferred`]: enum.TxStatus.html#variant.Deferred
    pub fn send(&mut self, cb: impl FnOnce(TxStatus, u8)) {
        let ret = self.send_packet();
        rdc_log!(Trace, "send: {:?}", ret);
        if ret != TxStatus::Deferred {
            cb(ret, 1);
        }
    }

    /// Transmits a batch of queued frames back-to-back, stopping at the first failure.
    ///
    /// Each frame is restored into the packet buffer and sent like [`send`] does, with `cb`
    /// invoked per frame. While more frames follow, the pending attribute is set so receivers
    /// can tell another frame is right behind the current one.
    ///
    /// [`send`]: #method.send
    pub fn send_list(&mut self, mut cb: impl FnMut(TxStatus, u8), frames: &[QueuedFrame]) {
        let mut iter = frames.iter().peekable();
        while let Some(frame) = iter.next() {
            frame.restore_into(&mut self.buf);
            self.buf.set_pending(iter.peek().is_some());

            let ret = self.send_packet();
            if ret != TxStatus::Deferred {
                cb(ret, 1);
            }
            if ret != TxStatus::Ok {
                break;
            }
        }
    }

    /// Processes a received raw frame.
    ///
    /// Called by the radio glue after it copied a frame into the packet buffer (see
    /// [`packetbuf_mut`]). The frame is parsed, filtered by address, deduplicated, acknowledged
    /// if this MAC does the ACKs, and finally handed to `deliver`. Frames that fail any of these
    /// steps are dropped without a trace (save for a log line).
    ///
    /// [`packetbuf_mut`]: #method.packetbuf_mut
    pub fn input(&mut self, deliver: impl FnOnce(&PacketBuf)) {
        // The frame is in hand; no reason to keep listening.
        self.gate.radio_off(&mut self.radio);

        if self.buf.totlen() == 0 {
            rdc_log!(Debug, "input: empty buffer");
            return;
        }
        if self.framer.parse(&mut self.buf).is_err() {
            rdc_log!(Warn, "input: failed to parse ({} bytes)", self.buf.totlen());
            return;
        }

        let seqno = if C::SOFTWARE_ACK {
            let hdr = match StrobeHeader::parse(self.buf.payload()) {
                Ok(hdr) => hdr,
                Err(_) => {
                    rdc_log!(Debug, "input: frame too short for strobe header");
                    return;
                }
            };
            // parse checked the length, so this can't fail
            self.buf.hdrreduce(STROBE_HDR_LEN).unwrap();
            hdr.seqno
        } else {
            self.buf.seqno()
        };

        if self.buf.datalen() == 0 {
            rdc_log!(Debug, "input: no payload");
            return;
        }

        let receiver = self.buf.receiver();
        if receiver != self.node_addr && !receiver.is_broadcast() {
            rdc_log!(Trace, "input: frame for {:?}, not us", receiver);
            return;
        }

        let sender = self.buf.sender();
        if self.seen.seen(sender, seqno) {
            rdc_log!(Debug, "input: duplicate from {:?}, seq {}", sender, seqno);
            return;
        }
        self.seen.record(sender, seqno);

        if C::SOFTWARE_ACK && receiver == self.node_addr {
            // ACK right away so the sender can finish early.
            self.radio.send(&header::ack_frame(self.node_addr, seqno));
        }

        rdc_log!(Trace, "input: {} bytes from {:?}", self.buf.datalen(), sender);
        deliver(&self.buf);
    }

    /// Re-enables duty cycling after a [`turn_off`].
    ///
    /// [`turn_off`]: #method.turn_off
    pub fn turn_on(&mut self) {
        self.gate.enable();
    }

    /// Disables duty cycling.
    ///
    /// With `keep_radio_on`, the radio is powered up and pinned on (always-on receive, e.g.
    /// while a node acts as a temporary sink); otherwise the radio is powered down. Sending
    /// while turned off only works in the pinned-on state.
    pub fn turn_off(&mut self, keep_radio_on: bool) {
        self.gate.shut_down(&mut self.radio, keep_radio_on);
    }

    /// Returns the period between two receive checks.
    pub fn channel_check_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / C::CHECK_RATE_HZ)
    }

    /// Returns this node's link-layer address.
    pub fn node_addr(&self) -> NodeAddress {
        self.node_addr
    }

    /// Returns the derived timing set in use.
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Returns a reference to the timer instance used by the MAC.
    pub fn timer(&mut self) -> &mut C::Timer {
        &mut self.timer
    }

    /// Returns a reference to the radio, for the receive glue.
    pub fn radio_mut(&mut self) -> &mut C::Radio {
        &mut self.radio
    }

    /// Returns a reference to the sample inspector hook.
    pub fn inspector_mut(&mut self) -> &mut C::Inspector {
        &mut self.inspector
    }

    /// Returns the packet buffer.
    pub fn packetbuf(&self) -> &PacketBuf {
        &self.buf
    }

    /// Returns the packet buffer mutably; used to stage outgoing frames and to place received
    /// raw frames before calling [`input`].
    ///
    /// [`input`]: #method.input
    pub fn packetbuf_mut(&mut self) -> &mut PacketBuf {
        &mut self.buf
    }
}
