//! Mock hardware for the test suite: a scripted radio, a self-advancing timer, a counting
//! watchdog, and a scripted sample inspector.

use std::collections::VecDeque;

use crate::addr::NodeAddress;
use crate::config::Config;
use crate::framer::BareFramer;
use crate::mac::{RdcLayer, SampleInspector, SampleStatus};
use crate::radio::{Radio, TxResult};
use crate::time::{Instant, Timer};
use crate::watchdog::Watchdog;
use core::cell::Cell;

/// A timer that advances by a fixed step on every reading.
///
/// Busy-wait loops poll the timer, so simulated time passes exactly as fast as the code under
/// test observes it.
pub(crate) struct MockTimer {
    now: Cell<u32>,
    step: u32,
}

impl MockTimer {
    pub fn new(step: u32) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }
}

impl Timer for MockTimer {
    fn now(&self) -> Instant {
        let t = self.now.get();
        self.now.set(t.wrapping_add(self.step));
        Instant::from_raw_micros(t)
    }
}

/// Rule for answering strobed repetitions with an ACK, like a live peer would.
pub(crate) struct AutoAck {
    /// Address bytes the ACK claims to come from.
    pub addr: [u8; 2],
    /// Where in the prepared frame the serial sits (depends on the header layout under test).
    pub seq_index: usize,
}

/// A scripted radio driver recording everything the MAC does to it.
pub(crate) struct MockRadio {
    pub is_on: bool,
    pub on_calls: usize,
    pub off_calls: usize,
    /// The frame staged by the last `prepare` call.
    pub prepared: Option<Vec<u8>>,
    pub transmit_count: usize,
    /// Per-transmit results; once drained, every transmit reports `Sent`.
    pub transmit_results: VecDeque<TxResult>,
    /// Constant CCA answer.
    pub channel_clear: bool,
    /// `receiving_packet` answers `true` this many more times.
    pub receiving_countdown: usize,
    /// The receive FIFO: one unread frame at most.
    pub rx_fifo: Option<Vec<u8>>,
    /// Load this frame into the FIFO once `transmit_count` reaches the given count.
    pub ack_after_transmits: Option<(usize, Vec<u8>)>,
    /// Answer every repetition with a matching ACK built from the prepared frame.
    pub auto_ack: Option<AutoAck>,
    /// Frames pushed through the synchronous `send` path (the MAC's own ACKs).
    pub sent: Vec<Vec<u8>>,
}

impl MockRadio {
    pub fn new() -> Self {
        Self {
            is_on: false,
            on_calls: 0,
            off_calls: 0,
            prepared: None,
            transmit_count: 0,
            transmit_results: VecDeque::new(),
            channel_clear: true,
            receiving_countdown: 0,
            rx_fifo: None,
            ack_after_transmits: None,
            auto_ack: None,
            sent: Vec::new(),
        }
    }
}

impl Radio for MockRadio {
    fn on(&mut self) {
        self.is_on = true;
        self.on_calls += 1;
    }

    fn off(&mut self) {
        self.is_on = false;
        self.off_calls += 1;
    }

    fn prepare(&mut self, frame: &[u8]) {
        self.prepared = Some(frame.to_vec());
    }

    fn transmit(&mut self, _len: usize) -> TxResult {
        self.transmit_count += 1;
        if let Some((after, ack)) = &self.ack_after_transmits {
            if self.transmit_count >= *after {
                self.rx_fifo = Some(ack.clone());
            }
        }
        if let Some(auto) = &self.auto_ack {
            let frame = self.prepared.as_ref().expect("transmit without prepare");
            self.rx_fifo = Some(vec![auto.addr[0], auto.addr[1], frame[auto.seq_index]]);
        }
        self.transmit_results.pop_front().unwrap_or(TxResult::Sent)
    }

    fn channel_clear(&mut self) -> bool {
        self.channel_clear
    }

    fn receiving_packet(&mut self) -> bool {
        if self.receiving_countdown > 0 {
            self.receiving_countdown -= 1;
            true
        } else {
            false
        }
    }

    fn pending_packet(&mut self) -> bool {
        self.rx_fifo.is_some()
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        match self.rx_fifo.take() {
            Some(frame) => {
                let n = frame.len().min(buf.len());
                buf[..n].copy_from_slice(&frame[..n]);
                n
            }
            None => 0,
        }
    }

    fn send(&mut self, frame: &[u8]) -> TxResult {
        self.sent.push(frame.to_vec());
        TxResult::Sent
    }
}

/// Counts kicks.
#[derive(Default)]
pub(crate) struct CountingWatchdog {
    pub kicks: usize,
}

impl Watchdog for CountingWatchdog {
    fn periodic(&mut self) {
        self.kicks += 1;
    }
}

/// Pops scripted statuses, reporting `Idle` once the script runs dry.
#[derive(Default)]
pub(crate) struct ScriptedInspector {
    pub script: VecDeque<SampleStatus>,
}

impl SampleInspector for ScriptedInspector {
    fn after_sample(&mut self) -> SampleStatus {
        self.script.pop_front().unwrap_or(SampleStatus::Idle)
    }
}

/// Configuration relying on radio/driver-level ACKs.
pub(crate) struct HwAckConfig;

impl Config for HwAckConfig {
    type Timer = MockTimer;
    type Radio = MockRadio;
    type Framer = BareFramer;
    type Watchdog = CountingWatchdog;
    type Inspector = ScriptedInspector;
}

/// Configuration where the MAC sends the ACKs itself.
pub(crate) struct SwAckConfig;

impl Config for SwAckConfig {
    type Timer = MockTimer;
    type Radio = MockRadio;
    type Framer = BareFramer;
    type Watchdog = CountingWatchdog;
    type Inspector = ScriptedInspector;

    const SOFTWARE_ACK: bool = true;
}

/// Simulated time per timer reading; busy-wait heavy tests finish quickly at this resolution.
const TIMER_STEP: u32 = 100;

pub(crate) fn hw_layer(addr: NodeAddress) -> RdcLayer<HwAckConfig> {
    RdcLayer::new(
        addr,
        MockRadio::new(),
        MockTimer::new(TIMER_STEP),
        BareFramer,
        CountingWatchdog::default(),
        ScriptedInspector::default(),
    )
}

pub(crate) fn sw_layer(addr: NodeAddress) -> RdcLayer<SwAckConfig> {
    RdcLayer::new(
        addr,
        MockRadio::new(),
        MockTimer::new(TIMER_STEP),
        BareFramer,
        CountingWatchdog::default(),
        ScriptedInspector::default(),
    )
}
