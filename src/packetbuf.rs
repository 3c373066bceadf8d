//! The packet buffer holding the frame currently being sent or received.
//!
//! The MAC operates on a single statically-sized buffer at a time. Its layout mirrors the usual
//! sensor-node convention: the payload lives at a fixed offset, and link-layer headers are
//! *prepended* into a reserved region in front of it, growing backwards. That way a payload can
//! be staged first and headers of initially unknown size added afterwards without moving any
//! bytes.
//!
//! On the receive side the same buffer is reused: the radio glue copies the raw frame into the
//! payload region, and each parsing step consumes its header from the front with
//! [`PacketBuf::hdrreduce`].
//!
//! Besides the bytes, the buffer carries the frame's link-layer attributes: sender and receiver
//! address, the MAC sequence number, and a small set of flags.
//!
//! [`PacketBuf::hdrreduce`]: struct.PacketBuf.html#method.hdrreduce

use crate::addr::NodeAddress;
use crate::Error;

/// Size of the payload region in bytes.
pub const PAYLOAD_SIZE: usize = 128;

/// Size of the header region in front of the payload, in bytes.
///
/// This bounds the total link-layer header space a frame can carry.
pub const HDR_SIZE: usize = 16;

bitflags::bitflags! {
    /// Per-frame attribute flags.
    pub struct Attributes: u8 {
        /// More frames follow immediately after this one; the receiver should keep its radio on.
        const PENDING = 0b0000_0001;
    }
}

/// A single-frame packet buffer with attributes.
pub struct PacketBuf {
    buf: [u8; HDR_SIZE + PAYLOAD_SIZE],
    /// Number of header bytes allocated in front of the payload.
    hdr_len: usize,
    /// Consumed prefix of the payload region (receive path).
    data_off: usize,
    /// Payload bytes following `data_off`.
    data_len: usize,
    sender: NodeAddress,
    receiver: NodeAddress,
    seqno: u8,
    attrs: Attributes,
}

impl PacketBuf {
    /// Creates an empty packet buffer.
    pub fn new() -> Self {
        Self {
            buf: [0; HDR_SIZE + PAYLOAD_SIZE],
            hdr_len: 0,
            data_off: 0,
            data_len: 0,
            sender: NodeAddress::BROADCAST,
            receiver: NodeAddress::BROADCAST,
            seqno: 0,
            attrs: Attributes::empty(),
        }
    }

    /// Resets lengths, offsets and attributes, readying the buffer for the next frame.
    pub fn clear(&mut self) {
        self.hdr_len = 0;
        self.data_off = 0;
        self.data_len = 0;
        self.sender = NodeAddress::BROADCAST;
        self.receiver = NodeAddress::BROADCAST;
        self.seqno = 0;
        self.attrs = Attributes::empty();
    }

    /// Returns the total frame length: allocated headers plus payload.
    pub fn totlen(&self) -> usize {
        self.hdr_len + self.data_len
    }

    /// Returns the payload length (not counting allocated headers).
    pub fn datalen(&self) -> usize {
        self.data_len
    }

    /// Copies `payload` into the payload region, replacing any previous payload.
    ///
    /// Also used by the radio glue to place a freshly received raw frame; parsing then consumes
    /// the headers from the front via [`hdrreduce`](#method.hdrreduce).
    pub fn copy_payload(&mut self, payload: &[u8]) -> Result<(), Error> {
        if payload.len() > PAYLOAD_SIZE {
            return Err(Error::Eof);
        }
        self.data_off = 0;
        self.data_len = payload.len();
        self.buf[HDR_SIZE..HDR_SIZE + payload.len()].copy_from_slice(payload);
        Ok(())
    }

    /// Returns the payload as currently parsed (headers consumed so far excluded).
    pub fn payload(&self) -> &[u8] {
        let start = HDR_SIZE + self.data_off;
        &self.buf[start..start + self.data_len]
    }

    /// Allocates `len` additional header bytes in front of everything allocated so far.
    pub fn hdralloc(&mut self, len: usize) -> Result<(), Error> {
        if self.hdr_len + len > HDR_SIZE {
            return Err(Error::HeaderSpaceExhausted);
        }
        self.hdr_len += len;
        Ok(())
    }

    /// Deallocates the `len` most recently allocated header bytes.
    ///
    /// Used to back out of a partially built frame when a later step fails.
    pub fn hdr_remove(&mut self, len: usize) {
        debug_assert!(len <= self.hdr_len);
        self.hdr_len = self.hdr_len.saturating_sub(len);
    }

    /// Consumes `len` bytes from the front of the payload (receive path).
    pub fn hdrreduce(&mut self, len: usize) -> Result<(), Error> {
        if len > self.data_len {
            return Err(Error::Truncated);
        }
        self.data_off += len;
        self.data_len -= len;
        Ok(())
    }

    /// Returns the allocated header region, most recently allocated bytes first.
    pub fn hdr(&self) -> &[u8] {
        &self.buf[HDR_SIZE - self.hdr_len..HDR_SIZE]
    }

    /// Mutable variant of [`hdr`](#method.hdr); writers fill in their freshly allocated bytes at
    /// the front.
    pub fn hdr_mut(&mut self) -> &mut [u8] {
        &mut self.buf[HDR_SIZE - self.hdr_len..HDR_SIZE]
    }

    /// Returns the complete on-air frame: allocated headers followed by the payload.
    pub fn frame(&self) -> &[u8] {
        let start = HDR_SIZE - self.hdr_len;
        let end = HDR_SIZE + self.data_off + self.data_len;
        &self.buf[start..end]
    }

    /// Returns the frame's sender address attribute.
    pub fn sender(&self) -> NodeAddress {
        self.sender
    }

    /// Sets the frame's sender address attribute.
    pub fn set_sender(&mut self, addr: NodeAddress) {
        self.sender = addr;
    }

    /// Returns the frame's receiver address attribute.
    pub fn receiver(&self) -> NodeAddress {
        self.receiver
    }

    /// Sets the frame's receiver address attribute.
    pub fn set_receiver(&mut self, addr: NodeAddress) {
        self.receiver = addr;
    }

    /// Returns the frame's MAC sequence number attribute.
    pub fn seqno(&self) -> u8 {
        self.seqno
    }

    /// Sets the frame's MAC sequence number attribute.
    pub fn set_seqno(&mut self, seqno: u8) {
        self.seqno = seqno;
    }

    /// Returns whether the pending flag is set.
    pub fn pending(&self) -> bool {
        self.attrs.contains(Attributes::PENDING)
    }

    /// Sets or clears the pending flag.
    pub fn set_pending(&mut self, pending: bool) {
        self.attrs.set(Attributes::PENDING, pending);
    }
}

impl Default for PacketBuf {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_prepend() {
        let mut buf = PacketBuf::new();
        buf.copy_payload(b"hello").unwrap();

        // Innermost header first, outermost last, like the send path allocates them.
        buf.hdralloc(2).unwrap();
        buf.hdr_mut()[..2].copy_from_slice(b"BB");
        buf.hdralloc(3).unwrap();
        buf.hdr_mut()[..3].copy_from_slice(b"AAA");

        assert_eq!(buf.totlen(), 10);
        assert_eq!(buf.frame(), b"AAABBhello");
    }

    #[test]
    fn hdr_remove_backs_out() {
        let mut buf = PacketBuf::new();
        buf.copy_payload(b"x").unwrap();
        buf.hdralloc(3).unwrap();
        buf.hdr_remove(3);
        assert_eq!(buf.totlen(), 1);
        assert_eq!(buf.frame(), b"x");
    }

    #[test]
    fn hdrreduce_consumes_front() {
        let mut buf = PacketBuf::new();
        buf.copy_payload(b"HHdata").unwrap();
        buf.hdrreduce(2).unwrap();
        assert_eq!(buf.payload(), b"data");
        assert_eq!(buf.datalen(), 4);

        assert_eq!(buf.hdrreduce(5), Err(Error::Truncated));
    }

    #[test]
    fn hdralloc_bounded() {
        let mut buf = PacketBuf::new();
        assert_eq!(buf.hdralloc(HDR_SIZE + 1), Err(Error::HeaderSpaceExhausted));
        buf.hdralloc(HDR_SIZE).unwrap();
        assert_eq!(buf.hdralloc(1), Err(Error::HeaderSpaceExhausted));
    }

    #[test]
    fn oversized_payload_rejected() {
        let mut buf = PacketBuf::new();
        assert_eq!(buf.copy_payload(&[0; PAYLOAD_SIZE + 1]), Err(Error::Eof));
    }
}
