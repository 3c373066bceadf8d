//! MAC configuration trait.

use crate::framer::Framer;
use crate::mac::SampleInspector;
use crate::radio::Radio;
use crate::time::Timer;
use crate::watchdog::Watchdog;

/// Trait for duty-cycling MAC configurations.
///
/// This trait bundles the hardware service types the MAC needs and the compile-time tunables
/// controlling its behavior. Every integration defines one type implementing it and hands
/// instances of the service types to [`RdcLayer::new`].
///
/// Both tunables have defaults matching a 250 kbps SPI-attached radio sending small frames.
/// The third knob, the replay-history depth, is the `SEQNO_HISTORY` const parameter on
/// [`RdcLayer`] itself, next to the `Config` type argument.
///
/// [`RdcLayer::new`]: ../mac/struct.RdcLayer.html#method.new
/// [`RdcLayer`]: ../mac/struct.RdcLayer.html
pub trait Config {
    /// A time source with microsecond resolution.
    type Timer: Timer;

    /// The radio driver.
    type Radio: Radio;

    /// The link-layer header codec.
    type Framer: Framer;

    /// The platform watchdog, kicked during strobed transmissions.
    type Watchdog: Watchdog;

    /// Hook inspecting radio-internal receive state at the end of each sample window.
    type Inspector: SampleInspector;

    /// How often to wake up and check for traffic, in Hz.
    ///
    /// Must be a power of two, so that the wake-up period is exactly representable in the tick
    /// arithmetic of every supported platform and sender and receiver sample phases cannot
    /// alias.
    const CHECK_RATE_HZ: u32 = 8;

    /// Whether this MAC acknowledges unicasts itself.
    ///
    /// Set to `true` if neither the radio hardware nor its driver sends ACKs. The MAC then
    /// prepends a small identification header to every frame and answers unicasts with a 3-byte
    /// ACK, letting senders stop strobing early. A MAC-level ACK is slower than a radio-level
    /// one, so the strobe timings are relaxed in this mode.
    ///
    /// Set to `false` if the radio handles ACKs, or if you are unsure: without any ACKs a sender
    /// simply strobes for the full window, which works but wastes some energy.
    const SOFTWARE_ACK: bool = false;
}
