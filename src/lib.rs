//! A radio duty-cycling MAC layer for low-power wireless sensor nodes.
//!
//! Nodes running this layer keep their radio off most of the time and wake at a fixed rate to
//! sniff the channel for a short moment. A sender wakes its neighbors by repeating the same frame
//! back-to-back for a little longer than one full sleep interval, so at least one repetition
//! always intersects the receiver's sample window. Unicast receivers can acknowledge early,
//! letting the sender go back to sleep before the window ends. The result is a radio duty cycle
//! close to the configured check rate, a few percent, which on most sensor-node hardware is the
//! dominant energy cost.
//!
//! # Using the layer
//!
//! Snooze is runtime and hardware-agnostic: it does not need an RTOS and talks to the radio
//! through a small set of traits that need to be implemented once per supported MCU or radio
//! family. An integration has to provide, bundled in an implementation of [`Config`]:
//!
//! * A microsecond-precision [`Timer`].
//! * A [`Radio`] with power control, CCA, and FIFO access.
//! * A [`Framer`] that encodes and decodes the link-layer header.
//! * A [`Watchdog`] that is kicked during long strobed transmissions.
//! * A [`SampleInspector`] that lets the duty cycler peek at radio-internal receive state
//!   (the provided [`DefaultInspector`] is a safe fallback).
//!
//! The receive duty cycler is driven by the platform timer: arm a timer, call
//! [`RdcLayer::cycle`] when it fires, and re-arm it with the returned [`Duration`].
//!
//! [`Config`]: config/trait.Config.html
//! [`Timer`]: time/trait.Timer.html
//! [`Radio`]: radio/trait.Radio.html
//! [`Framer`]: framer/trait.Framer.html
//! [`Watchdog`]: watchdog/trait.Watchdog.html
//! [`SampleInspector`]: mac/trait.SampleInspector.html
//! [`DefaultInspector`]: mac/struct.DefaultInspector.html
//! [`RdcLayer::cycle`]: mac/struct.RdcLayer.html#method.cycle
//! [`Duration`]: time/struct.Duration.html

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;
pub mod addr;
pub mod config;
mod error;
pub mod framer;
pub mod mac;
pub mod packetbuf;
pub mod queue;
pub mod radio;
pub mod time;
pub mod watchdog;

pub use self::error::Error;
