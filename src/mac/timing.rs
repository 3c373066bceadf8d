//! Wake-up and strobe timings, all derived from the configured check rate.

use crate::time::Duration;

/// Length of an ACK frame in bytes.
pub const ACK_LEN: usize = 3;

/// The derived timing set for one MAC configuration.
#[derive(Debug, Copy, Clone)]
pub struct Timings {
    /// How long the radio listens during each wake-up.
    pub on_time: Duration,

    /// Sleep time between wake-ups: one check period minus `on_time`.
    pub off_time: Duration,

    /// How long a sender keeps repeating a frame: one check period plus two `on_time`s, so that
    /// at least one full repetition overlaps any receiver's sample window regardless of phase.
    pub tx_period: Duration,

    /// Gap between two repetitions of the strobed frame.
    ///
    /// Must be long enough for the receiver to take the frame in and push an ACK out; MAC-level
    /// ACKs need considerably more headroom than radio-level ones.
    pub between_tx: Duration,

    /// When traffic is detected while waiting for an ACK, how long to let the reception finish
    /// before reading it as an ACK candidate.
    pub ack_detect_wait: Duration,
}

impl Timings {
    /// Derives the timing set for a wake-up rate of `check_rate_hz` (must be a power of two).
    ///
    /// `software_ack` selects the relaxed variant: a longer sample window and inter-repetition
    /// gap, giving the peer's MAC time to frame and transmit its ACK.
    pub const fn derive(check_rate_hz: u32, software_ack: bool) -> Self {
        assert!(check_rate_hz.is_power_of_two());

        let period = 1_000_000 / check_rate_hz;
        let on_time = if software_ack {
            1_000_000 / 64
        } else {
            1_000_000 / 128
        };
        assert!(on_time < period);

        Timings {
            on_time: Duration::from_micros(on_time),
            off_time: Duration::from_micros(period - on_time),
            tx_period: Duration::from_micros(period + 2 * on_time),
            between_tx: Duration::from_millis(if software_ack { 10 } else { 2 }),
            ack_detect_wait: Duration::from_millis(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate() {
        let t = Timings::derive(8, false);
        assert_eq!(t.on_time, Duration::from_micros(7_812));
        assert_eq!(t.off_time, Duration::from_micros(117_188));
        // One full cycle is exactly the check period, whatever the on-time rounding did.
        assert_eq!(t.on_time + t.off_time, Duration::from_micros(125_000));
        assert_eq!(t.tx_period, Duration::from_micros(140_624));
        assert_eq!(t.between_tx, Duration::from_millis(2));
    }

    #[test]
    fn software_ack_relaxed() {
        let t = Timings::derive(8, true);
        assert_eq!(t.on_time, Duration::from_micros(15_625));
        assert_eq!(t.between_tx, Duration::from_millis(10));
        assert!(t.tx_period > Timings::derive(8, false).tx_period);
    }

    #[test]
    fn other_rates() {
        let t = Timings::derive(2, false);
        assert_eq!(t.on_time + t.off_time, Duration::from_micros(500_000));

        let t = Timings::derive(64, false);
        assert_eq!(t.on_time + t.off_time, Duration::from_micros(15_625));
    }
}
