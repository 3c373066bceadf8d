//! Owned snapshots of outgoing frames, for sending several in a row.
//!
//! The packet buffer only holds one frame, so an upper MAC that wants to hand over a batch keeps
//! each staged frame as a [`QueuedFrame`] and lets [`RdcLayer::send_list`] restore them into the
//! packet buffer one by one.
//!
//! [`QueuedFrame`]: struct.QueuedFrame.html
//! [`RdcLayer::send_list`]: ../mac/struct.RdcLayer.html#method.send_list

use heapless::Vec;

use crate::addr::NodeAddress;
use crate::packetbuf::{PacketBuf, PAYLOAD_SIZE};

/// A stored copy of a staged frame: payload plus the attributes the send path needs.
pub struct QueuedFrame {
    receiver: NodeAddress,
    sender: NodeAddress,
    payload: Vec<u8, PAYLOAD_SIZE>,
}

impl QueuedFrame {
    /// Snapshots the frame currently staged in `buf`.
    ///
    /// Only the payload and addresses are captured; headers and the sequence number are produced
    /// fresh when the frame is eventually sent.
    pub fn from_packetbuf(buf: &PacketBuf) -> Self {
        Self {
            receiver: buf.receiver(),
            sender: buf.sender(),
            // The payload region and this Vec have the same capacity.
            payload: Vec::from_slice(buf.payload()).unwrap(),
        }
    }

    /// Restores this snapshot into `buf`, replacing its previous contents.
    pub fn restore_into(&self, buf: &mut PacketBuf) {
        buf.clear();
        buf.set_receiver(self.receiver);
        buf.set_sender(self.sender);
        // Cannot fail: the snapshot came out of a packet buffer of the same size.
        buf.copy_payload(&self.payload).unwrap();
    }

    /// Returns the snapshot's receiver address.
    pub fn receiver(&self) -> NodeAddress {
        self.receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_restore_round_trip() {
        let mut buf = PacketBuf::new();
        buf.copy_payload(b"abc").unwrap();
        buf.set_receiver(NodeAddress::new([9, 0]));
        buf.set_sender(NodeAddress::new([1, 0]));

        let snap = QueuedFrame::from_packetbuf(&buf);

        let mut other = PacketBuf::new();
        other.copy_payload(b"leftover garbage").unwrap();
        other.set_pending(true);
        snap.restore_into(&mut other);

        assert_eq!(other.payload(), b"abc");
        assert_eq!(other.receiver(), NodeAddress::new([9, 0]));
        assert_eq!(other.sender(), NodeAddress::new([1, 0]));
        assert!(!other.pending());
    }
}
