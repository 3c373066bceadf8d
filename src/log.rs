//! The MAC's logging shim.
//!
//! With the `log` feature enabled, `rdc_log!` forwards to the `log` crate under the `snooze`
//! target, so an integration can raise or silence this layer's chatter separately from the rest
//! of its firmware. Without the feature, the macro still type-checks its arguments but compiles
//! to nothing.

#[cfg(feature = "log")]
macro_rules! rdc_log {
    ($level:ident, $($t:tt)*) => {{
        log::log!(target: "snooze", log::Level::$level, $($t)*);
    }};
}

#[cfg(not(feature = "log"))]
macro_rules! rdc_log {
    ($level:ident, $($t:tt)*) => {{
        format_args!($($t)*);
    }};
}
