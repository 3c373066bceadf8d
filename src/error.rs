use core::fmt;

/// Errors returned by the fallible parts of the MAC.
///
/// Note that transmission outcomes are deliberately *not* errors: they are reported through
/// [`TxStatus`](mac/enum.TxStatus.html), since "no ACK" or "channel busy" are expected events the
/// upper MAC reacts to, not failures of this crate.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The packet buffer's header region is full.
    ///
    /// Returned when a header allocation does not fit in front of the payload. The frame cannot
    /// be sent in this configuration, so the send path maps this to a fatal status.
    HeaderSpaceExhausted,

    /// Unexpectedly reached the end of a buffer while reading or writing data.
    Eof,

    /// A received frame was too short to contain the expected header.
    Truncated,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::HeaderSpaceExhausted => "header region full",
            Error::Eof => "end of buffer",
            Error::Truncated => "frame too short",
        })
    }
}
