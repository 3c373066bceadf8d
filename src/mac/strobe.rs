//! The strobed transmitter.
//!
//! Sending means repeating the staged frame until one full wake-up period (plus margin) is
//! covered, so the frame is guaranteed to intersect the destination's sample window. For
//! unicasts the loop watches for an ACK between repetitions and stops early when it sees one;
//! for broadcasts there is nobody to answer, so the radio is turned off between repetitions
//! instead.
//!
//! The whole procedure runs to completion on the caller's context and busy-waits at its inner
//! deadlines; the platform watchdog is kicked once per repetition.

use crate::config::Config;
use crate::framer::Framer;
use crate::mac::header::{self, StrobeHeader, STROBE_HDR_LEN};
use crate::mac::timing::ACK_LEN;
use crate::mac::{RdcLayer, TxStatus};
use crate::radio::{Radio, TxResult};
use crate::time::{Duration, Timer};
use crate::watchdog::Watchdog;

impl<C: Config, const SEQNO_HISTORY: usize> RdcLayer<C, SEQNO_HISTORY> {
    /// Strobes the frame staged in the packet buffer; the engine behind the send entry points.
    pub(crate) fn send_packet(&mut self) -> TxStatus {
        // Both the MAC and the radio were explicitly turned off; nothing can go out.
        if !self.gate.is_enabled() && !self.gate.keeps_radio_on() {
            rdc_log!(Error, "send: turned off");
            return TxStatus::ErrFatal;
        }
        if self.buf.totlen() == 0 {
            rdc_log!(Error, "send: nothing staged");
            return TxStatus::ErrFatal;
        }

        self.buf.set_sender(self.node_addr);

        // One serial per transmission, shared across unicast and broadcast, wrapping.
        let serial = self.tx_serial;
        self.tx_serial = self.tx_serial.wrapping_add(1);
        self.buf.set_seqno(serial);

        if C::SOFTWARE_ACK {
            // Identification header so the peer's ACK can name this exact frame.
            if self.buf.hdralloc(STROBE_HDR_LEN).is_err() {
                rdc_log!(Error, "send: no room for the strobe header");
                return TxStatus::ErrFatal;
            }
            let hdr = StrobeHeader {
                receiver: self.buf.receiver(),
                seqno: serial,
            };
            hdr.write_to(&mut self.buf.hdr_mut()[..STROBE_HDR_LEN]);
        }

        if self.framer.create(&mut self.buf).is_err() {
            rdc_log!(Error, "send: framer failed, {} payload bytes", self.buf.datalen());
            if C::SOFTWARE_ACK {
                self.buf.hdr_remove(STROBE_HDR_LEN);
            }
            return TxStatus::ErrFatal;
        }

        // Let the radio copy the frame to its FIFO; every repetition sends this same image.
        self.radio.prepare(self.buf.frame());

        let is_broadcast = self.buf.receiver().is_broadcast();
        rdc_log!(
            Trace,
            "send: seq {} to {:?}{}",
            serial,
            self.buf.receiver(),
            if is_broadcast { " (broadcast)" } else { "" }
        );

        // A reception in progress, or an unread frame an ACK would overwrite: back off now.
        if self.radio.receiving_packet() || (!is_broadcast && self.radio.pending_packet()) {
            return TxStatus::Collision;
        }
        // Single CCA sample; no assessment burst.
        if !self.radio.channel_clear() {
            return TxStatus::Collision;
        }

        let start = self.timer.now();
        while self.timer.now().duration_since(start) <= self.timings.tx_period {
            self.watchdog.periodic();

            match self.radio.transmit(self.buf.totlen()) {
                TxResult::Collision => return TxStatus::Collision,
                TxResult::Err => return TxStatus::Err,
                // A driver-level ACK timeout still counts as a sent repetition; a later
                // repetition may be the one that lands in the sample window.
                TxResult::Sent | TxResult::NoAck => {}
            }

            if is_broadcast {
                // Nobody ACKs a broadcast; save the energy between repetitions.
                self.gate.radio_off(&mut self.radio);
            } else {
                self.gate.radio_on(&mut self.radio);
            }

            self.busy_wait(self.timings.between_tx);

            if !is_broadcast {
                if let Some(status) = self.check_for_ack(serial) {
                    return status;
                }
            }
        }

        self.gate.radio_off(&mut self.radio);

        // A completed broadcast strobe did all it set out to do. A unicast without an ACK is
        // only a failure when this MAC does the ACKs itself; with radio-level ACKs the driver
        // already reported NOACK per repetition and we have nothing to add.
        if !is_broadcast && C::SOFTWARE_ACK {
            TxStatus::NoAck
        } else {
            TxStatus::Ok
        }
    }

    /// Checks whether an ACK for `serial` arrived between two repetitions.
    ///
    /// Returns `None` to keep strobing, or the final status when the exchange is decided.
    fn check_for_ack(&mut self, serial: u8) -> Option<TxStatus> {
        if !self.radio.receiving_packet()
            && !self.radio.pending_packet()
            && self.radio.channel_clear()
        {
            return None;
        }

        if self.radio.receiving_packet() {
            // Something is on the air; give it a moment to finish.
            let t0 = self.timer.now();
            while self.radio.receiving_packet()
                && self.timer.now().duration_since(t0) < self.timings.ack_detect_wait
            {}
        }

        if self.radio.pending_packet() {
            let mut ack = [0; ACK_LEN];
            let len = self.radio.read(&mut ack);
            let matched = if C::SOFTWARE_ACK {
                len == ACK_LEN && header::ack_matches(&ack, self.buf.receiver(), serial)
            } else {
                len == ACK_LEN && ack[2] == serial
            };
            return Some(if matched {
                rdc_log!(Trace, "send: got ACK for seq {}", serial);
                TxStatus::Ok
            } else {
                // Not our ACK: somebody else is transmitting at the same time.
                TxStatus::Collision
            });
        }

        None
    }

    /// An unconditional timed spin.
    ///
    /// Deliberately not a yield: the strobe owns the node until it finishes, and the gap only
    /// exists to keep repetitions from running into each other.
    fn busy_wait(&mut self, d: Duration) {
        let t0 = self.timer.now();
        while self.timer.now().duration_since(t0) < d {}
    }
}
