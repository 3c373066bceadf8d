//! Link-layer node addresses.

use byteorder::{ByteOrder, LittleEndian};
use core::fmt;

/// A 2-byte link-layer node address.
///
/// The all-zero address is not assigned to any node; it doubles as the broadcast destination.
/// Frames addressed to [`NodeAddress::BROADCAST`] are picked up by every neighbor and are never
/// acknowledged.
///
/// [`NodeAddress::BROADCAST`]: #associatedconstant.BROADCAST
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct NodeAddress([u8; 2]);

impl NodeAddress {
    /// The null address, used as the receiver of broadcast frames.
    pub const BROADCAST: Self = NodeAddress([0, 0]);

    /// Creates a node address from its 2 raw Bytes (LSB first, as sent over the air).
    pub const fn new(bytes: [u8; 2]) -> Self {
        NodeAddress(bytes)
    }

    /// Creates a node address from a 16-bit integer.
    pub fn from_u16(addr: u16) -> Self {
        let mut bytes = [0; 2];
        LittleEndian::write_u16(&mut bytes, addr);
        NodeAddress(bytes)
    }

    /// Returns the address as a 16-bit integer.
    pub fn to_u16(self) -> u16 {
        LittleEndian::read_u16(&self.0)
    }

    /// Returns the raw bytes making up this address (LSB first).
    pub fn raw(&self) -> &[u8; 2] {
        &self.0
    }

    /// Returns whether this is the null/broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Debug for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Printed low byte first, the customary notation for these short addresses.
        write!(f, "{}.{}", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_is_null() {
        assert!(NodeAddress::new([0, 0]).is_broadcast());
        assert!(!NodeAddress::new([4, 0]).is_broadcast());
    }

    #[test]
    fn u16_round_trip() {
        let addr = NodeAddress::from_u16(0x0104);
        assert_eq!(addr.raw(), &[0x04, 0x01]);
        assert_eq!(addr.to_u16(), 0x0104);
    }

    #[test]
    fn debug_representation() {
        assert_eq!(format!("{:?}", NodeAddress::new([4, 1])), "4.1");
    }
}
