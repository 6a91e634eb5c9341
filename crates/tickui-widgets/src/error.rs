#![forbid(unsafe_code)]

//! Widget construction errors.

use std::fmt;

/// A widget was configured with a value it cannot work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// `TickReducer` with an interval of zero ticks.
    ZeroTickInterval,
    /// `Upscale` with a factor of zero.
    ZeroScale,
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTickInterval => write!(f, "tick interval must be at least 1"),
            Self::ZeroScale => write!(f, "scale factor must be at least 1"),
        }
    }
}

impl std::error::Error for WidgetError {}
