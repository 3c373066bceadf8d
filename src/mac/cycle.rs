//! The receive duty cycler: the periodic wake/sleep rhythm of the radio.

use crate::config::Config;
use crate::mac::RdcLayer;
use crate::time::Duration;

/// What the radio was doing when a sample window closed.
///
/// Reported by a [`SampleInspector`]; decides whether the cycler may turn the radio off.
///
/// [`SampleInspector`]: trait.SampleInspector.html
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleStatus {
    /// Nothing was heard, or a reception failed its CRC check. Safe to power down.
    Idle,

    /// A frame is still arriving or being pulled out of the radio's FIFO. Leave the radio
    /// alone; the reception will resolve on its own.
    MidFrame,

    /// A complete frame is sitting in the buffer. Leave the radio alone; the input path powers
    /// it down once the frame is taken.
    FramePresent,

    /// A transmission is in progress; the transmitter owns the radio.
    Sending,
}

/// Platform hook inspecting radio-internal state at the end of each sample window.
///
/// The cycler itself only knows how to flip the radio on and off. Whether the just-finished
/// sample window caught an ongoing reception is radio-specific, so platforms that can tell
/// (CRC status, FIFO fill, driver state) implement this hook. Platforms that can't use
/// [`DefaultInspector`].
///
/// [`DefaultInspector`]: struct.DefaultInspector.html
pub trait SampleInspector {
    /// Reports the radio's receive state right after a sample window.
    fn after_sample(&mut self) -> SampleStatus;
}

/// A `SampleInspector` that always reports an idle radio.
///
/// This is safe as a fallback: the radio will still deliver complete frames through the input
/// path, it just may get powered down mid-reception a bit more often, costing the occasional
/// strobed repetition.
pub struct DefaultInspector;

impl SampleInspector for DefaultInspector {
    fn after_sample(&mut self) -> SampleStatus {
        SampleStatus::Idle
    }
}

/// Which half of the wake/sleep cycle the node is in.
pub(crate) enum CyclePhase {
    /// Radio sampling the channel; the window closes at the next `cycle` call.
    Awake,
    /// Radio (normally) off until the next wake-up.
    Asleep,
}

impl<C: Config, const SEQNO_HISTORY: usize> RdcLayer<C, SEQNO_HISTORY> {
    /// Advances the receive duty cycle by one phase.
    ///
    /// Call this whenever the duty-cycle timer expires, starting right after [`new`], and re-arm
    /// the timer with the returned duration. Entering the wake phase turns the radio on;
    /// leaving it consults the [`SampleInspector`] and turns the radio off unless a reception
    /// or transmission is in flight. While the MAC is [turned off], the rhythm keeps going but
    /// no phase touches the radio.
    ///
    /// [`new`]: struct.RdcLayer.html#method.new
    /// [`SampleInspector`]: trait.SampleInspector.html
    /// [turned off]: struct.RdcLayer.html#method.turn_off
    pub fn cycle(&mut self) -> Duration {
        match self.cycle_phase {
            CyclePhase::Asleep => {
                self.gate.radio_on(&mut self.radio);
                self.cycle_phase = CyclePhase::Awake;
                self.timings.on_time
            }
            CyclePhase::Awake => {
                match self.inspector.after_sample() {
                    SampleStatus::Idle => self.gate.radio_off(&mut self.radio),
                    // A reception will resolve by itself; the input path does the power-down.
                    SampleStatus::MidFrame | SampleStatus::FramePresent => {}
                    SampleStatus::Sending => {}
                }
                self.cycle_phase = CyclePhase::Asleep;
                self.timings.off_time
            }
        }
    }
}
