//! The MAC's own wire formats: the strobe identification header and the ACK frame.
//!
//! Both only exist in software-ACK mode. The header rides in front of every outgoing frame
//! (inside the link-layer frame, after the framer's header) and names the intended receiver and
//! the frame's serial, so the receiver can produce an ACK the sender is able to match against
//! the strobe it is currently repeating.

use byteorder::{ByteOrder, LittleEndian};

use crate::addr::NodeAddress;
use crate::mac::timing::ACK_LEN;
use crate::Error;

/// Length of the strobe identification header in bytes.
pub const STROBE_HDR_LEN: usize = 3;

/// The per-frame identification header: `{receiver_lo, receiver_hi, seqno}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StrobeHeader {
    /// The intended link-layer receiver of the frame.
    pub receiver: NodeAddress,
    /// The frame's transmit serial.
    pub seqno: u8,
}

impl StrobeHeader {
    /// Writes the 3 header bytes to the front of `buf`.
    pub fn write_to(&self, buf: &mut [u8]) {
        LittleEndian::write_u16(&mut buf[0..2], self.receiver.to_u16());
        buf[2] = self.seqno;
    }

    /// Reads a header back from the front of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() < STROBE_HDR_LEN {
            return Err(Error::Truncated);
        }
        Ok(Self {
            receiver: NodeAddress::from_u16(LittleEndian::read_u16(&buf[0..2])),
            seqno: buf[2],
        })
    }
}

/// Builds the 3-byte ACK frame `{addr_lo, addr_hi, seqno}`.
///
/// `addr` is the address of the node *sending* the ACK (the original unicast receiver), and
/// `seqno` echoes the acknowledged frame's serial.
pub fn ack_frame(addr: NodeAddress, seqno: u8) -> [u8; ACK_LEN] {
    let mut ack = [0; ACK_LEN];
    LittleEndian::write_u16(&mut ack[0..2], addr.to_u16());
    ack[2] = seqno;
    ack
}

/// Returns whether `frame` is the ACK for serial `seqno` sent by `addr`.
///
/// All three bytes have to match; anything else on the channel at ACK time is some other
/// transmitter's traffic.
pub fn ack_matches(frame: &[u8], addr: NodeAddress, seqno: u8) -> bool {
    frame.len() == ACK_LEN && frame == ack_frame(addr, seqno)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trip() {
        let hdr = StrobeHeader {
            receiver: NodeAddress::new([4, 1]),
            seqno: 200,
        };
        let mut buf = [0; STROBE_HDR_LEN];
        hdr.write_to(&mut buf);
        assert_eq!(StrobeHeader::parse(&buf).unwrap(), hdr);
    }

    #[test]
    fn header_too_short() {
        assert_eq!(StrobeHeader::parse(&[1, 2]), Err(Error::Truncated));
    }

    #[test]
    fn ack_accepts_iff_all_bytes_match() {
        let addr = NodeAddress::new([4, 0]);
        let ack = ack_frame(addr, 17);
        assert_eq!(ack, [4, 0, 17]);

        assert!(ack_matches(&ack, addr, 17));
        assert!(!ack_matches(&ack, addr, 18));
        assert!(!ack_matches(&ack, NodeAddress::new([5, 0]), 17));
        assert!(!ack_matches(&ack[..2], addr, 17));
    }
}
